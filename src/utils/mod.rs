//! # Utility Modules
//!
//! Supporting utilities for cryptography, compression, and logging.
//!
//! ## Components
//! - **Crypto**: AES-256-GCM AEAD encryption with SHA-256 key derivation
//! - **Compression**: pack (zstd) and gzip layers with size limits
//! - **Logging**: structured logging configuration
//!
//! ## Security
//! - Decompression bomb protection (64MB limit)
//! - Authenticated encryption; tampering is always detected

pub mod compression;
pub mod crypto;
pub mod logging;
