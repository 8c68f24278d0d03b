//! # Error Types
//!
//! Comprehensive error handling for the container codecs.
//!
//! This module defines all error variants that can occur while encoding or
//! decoding the module, preset, and archive container formats.
//!
//! ## Error Categories
//! - **Framing Errors**: Buffer underruns, bad magic/version/marker bytes
//! - **Envelope Errors**: Unsupported versions, structural parse failures
//! - **Cryptographic Errors**: Encryption/decryption (authentication) failures
//! - **Compression Errors**: Decompression failures, size limit violations
//!
//! All errors implement `std::error::Error` for interoperability.
//!
//! Every codec function fails fast and atomically: a partially populated
//! result is never returned, and the error identifies the stage that failed.

use std::io;
use thiserror::Error;

/// Human-readable names for the pipeline stages a decode can fail at.
/// Static strings are borrowed, avoiding heap allocations for common error cases.
pub mod stage {
    /// Outer pack (transport) compression layer of the preset container
    pub const OUTER_PACK: &str = "outer pack layer";
    /// Gzip layer of the preset container
    pub const GZIP: &str = "gzip layer";
    /// MessagePack envelope of the preset container
    pub const ENVELOPE: &str = "preset envelope";
    /// Decrypted preset document body
    pub const DOCUMENT: &str = "preset document";
    /// Compressed metadata block of the module container
    pub const METADATA: &str = "module metadata block";
    /// Compressed asset block of the module container
    pub const ASSET: &str = "module asset block";
    /// Card metadata entry of the archive container
    pub const CARD: &str = "archive card entry";
}

/// Primary error type for all codec operations.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unexpected end of input: needed {needed} more byte(s), {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("invalid container format: {0}")]
    InvalidFormat(String),

    #[error("unsupported container version: {0}")]
    UnsupportedVersion(String),

    #[error("decompression failed at {stage}")]
    DecompressionFailed { stage: &'static str },

    #[error("decryption failed (authentication)")]
    DecryptionFailed,

    #[error("encryption failed")]
    EncryptionFailed,

    #[error("corrupt container at {stage}: {detail}")]
    CorruptContainer {
        stage: &'static str,
        detail: String,
    },

    #[error("required archive entry missing: {0}")]
    MissingRequiredEntry(&'static str),

    #[error("block too large for container framing: {0} bytes")]
    OversizedBlock(usize),

    #[error("serialization error: {0}")]
    SerializeError(String),
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
