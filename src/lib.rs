//! # charpack
//!
//! Codec core for portable character and preset bundles.
//!
//! Three sibling container formats share this crate:
//! - the **module container**: a magic/version header, a compressed JSON
//!   metadata block, and ordered compressed asset blocks
//!   ([`core::module`]);
//! - the **preset container**: a MessagePack document, encrypted and
//!   double-compressed inside a versioned envelope ([`core::preset`]);
//! - the **archive container**: a zip bundling a card document, an optional
//!   module blob, and named assets ([`core::archive`]).
//!
//! Every codec is a synchronous pure transform: bytes in, value out (or a
//! typed [`error::CodecError`] naming the stage that failed). File and
//! network I/O are the caller's concern.
//!
//! ## Example
//! ```
//! use charpack::module::{self, ModuleAsset};
//! use serde_json::json;
//!
//! # fn main() -> charpack::Result<()> {
//! let document = json!({"name": "weather", "assets": ["asset_0"]});
//! let assets = vec![ModuleAsset { id: "icon".into(), data: vec![1, 2, 3] }];
//!
//! let blob = module::encode(&document, &assets)?;
//! let decoded = module::decode(&blob)?;
//! assert_eq!(decoded.document, document);
//! assert_eq!(decoded.assets[0].id, "asset_0");
//! # Ok(())
//! # }
//! ```
//!
//! ## Compatibility
//! Wire constants (magic bytes, markers, envelope tags, the static cipher
//! passphrase and zero nonce) live in [`config`] and are frozen: files
//! written by prior releases must keep decoding, so changes require a new
//! format version rather than an edit.

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::core::{archive, module, preset, template};
pub use crate::error::{CodecError, Result};
