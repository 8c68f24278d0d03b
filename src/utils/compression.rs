//! # Compression Layers
//!
//! The two lossless byte-stream transforms the container formats rely on:
//! the pack layer (zstd) used for module blocks and the preset container's
//! outer transport layer, and the gzip layer used inside the preset pipeline.
//!
//! Both are opaque collaborators from the codecs' point of view:
//! `decompress(compress(x)) == x` for every byte string, including empty
//! input. Decompression enforces a maximum output size to prevent
//! decompression bombs.

use crate::config::MAX_DECODED_SIZE;
use crate::error::{CodecError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompressionKind {
    /// Pack layer (zstd): module blocks, preset outer layer
    Pack,
    /// Gzip layer: preset envelope transport
    Gzip,
}

impl CompressionKind {
    fn name(self) -> &'static str {
        match self {
            CompressionKind::Pack => "pack",
            CompressionKind::Gzip => "gzip",
        }
    }
}

/// Compresses data using the specified layer.
///
/// # Errors
/// Returns `CodecError::SerializeError` if the underlying encoder fails.
pub fn compress(data: &[u8], kind: CompressionKind) -> Result<Vec<u8>> {
    match kind {
        CompressionKind::Pack => {
            let mut out = Vec::new();
            zstd::stream::copy_encode(data, &mut out, 3)
                .map_err(|e| CodecError::SerializeError(format!("pack encode: {e}")))?;
            Ok(out)
        }
        CompressionKind::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder
                .write_all(data)
                .and_then(|_| encoder.finish())
                .map_err(|e| CodecError::SerializeError(format!("gzip encode: {e}")))
        }
    }
}

/// Decompresses data that was compressed with the specified layer.
///
/// Enforces [`MAX_DECODED_SIZE`] on the output to prevent decompression
/// bombs; the limit is checked incrementally, before the full allocation.
///
/// # Errors
/// Returns `CodecError::DecompressionFailed` if the stream is malformed, and
/// `CodecError::OversizedBlock` if the output exceeds the size limit.
pub fn decompress(data: &[u8], kind: CompressionKind) -> Result<Vec<u8>> {
    let failed = || CodecError::DecompressionFailed { stage: kind.name() };
    match kind {
        CompressionKind::Pack => {
            let decoder = zstd::stream::Decoder::new(data).map_err(|_| failed())?;
            read_limited(decoder, failed)
        }
        CompressionKind::Gzip => read_limited(GzDecoder::new(data), failed),
    }
}

/// Drain a decoder in chunks, enforcing the output size limit on each chunk.
fn read_limited<R: Read>(mut reader: R, failed: impl Fn() -> CodecError) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut buffer = [0u8; 8192];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                out.extend_from_slice(&buffer[..n]);
                if out.len() > MAX_DECODED_SIZE {
                    return Err(CodecError::OversizedBlock(out.len()));
                }
            }
            Err(_) => return Err(failed()),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_pack_roundtrip() {
        let original = b"Hello, World! This is a test of the pack layer.";
        let compressed = compress(original, CompressionKind::Pack).unwrap();
        let decompressed = decompress(&compressed, CompressionKind::Pack).unwrap();
        assert_eq!(original.as_slice(), decompressed.as_slice());
    }

    #[test]
    fn test_gzip_roundtrip() {
        let original = b"Hello, World! This is a test of the gzip layer.";
        let compressed = compress(original, CompressionKind::Gzip).unwrap();
        let decompressed = decompress(&compressed, CompressionKind::Gzip).unwrap();
        assert_eq!(original.as_slice(), decompressed.as_slice());
    }

    #[test]
    fn test_empty_input_roundtrip() {
        for kind in [CompressionKind::Pack, CompressionKind::Gzip] {
            let compressed = compress(&[], kind).unwrap();
            let decompressed = decompress(&compressed, kind).unwrap();
            assert!(decompressed.is_empty(), "{kind:?} empty roundtrip");
        }
    }

    #[test]
    fn test_malformed_stream_rejected() {
        let malformed = [0xFF, 0xFE, 0xFD, 0x00, 0x01];
        for kind in [CompressionKind::Pack, CompressionKind::Gzip] {
            assert!(
                decompress(&malformed, kind).is_err(),
                "{kind:?} should reject garbage"
            );
        }
    }

    #[test]
    fn test_highly_redundant_data_shrinks() {
        let data = vec![7u8; 64 * 1024];
        let compressed = compress(&data, CompressionKind::Pack).unwrap();
        assert!(compressed.len() < data.len());
        let decompressed = decompress(&compressed, CompressionKind::Pack).unwrap();
        assert_eq!(decompressed, data);
    }
}
