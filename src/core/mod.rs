//! # Core Codec Components
//!
//! Low-level cursors and the three container codecs.
//!
//! ## Components
//! - **Cursor**: little-endian byte stream assembly and parsing
//! - **Module**: metadata + ordered asset blocks, length-prefixed framing
//! - **Preset**: encrypted MessagePack pipeline with envelope versioning
//! - **Template**: default preset document and the compatibility merge
//! - **Archive**: zip boundary bundling card, module blob, and assets
//!
//! All operations are synchronous pure transforms over in-memory buffers;
//! I/O belongs to the caller. Decodes fail fast and atomically with a typed
//! error naming the failing stage.

pub mod archive;
pub mod cursor;
pub mod module;
pub mod preset;
pub mod template;
