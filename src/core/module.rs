//! # Module Codec
//!
//! Encoder/decoder for the module container: a JSON metadata document plus
//! ordered binary assets in a single length-prefixed byte stream.
//!
//! ## Wire Format
//! ```text
//! [magic:u8=111] [version:u8=0]
//! [metaLen:u32LE] [metaBytes:metaLen]
//! ( [marker:u8=1] [assetLen:u32LE] [assetBytes:assetLen] )*
//! [endMarker:u8=0]
//! ```
//!
//! Metadata and every asset block are individually pack-compressed. Asset
//! identifiers are NOT stored in the stream: decode assigns positional ids
//! (`asset_0`, `asset_1`, …) and the document's own fields reference assets
//! by that convention. This is a structural limitation of the format, kept
//! deliberately; storing names would be a new format version.

use crate::config::{ASSET_MARKER, END_MARKER, MODULE_MAGIC, MODULE_TYPE, MODULE_VERSION};
use crate::core::cursor::{ByteReader, ByteWriter};
use crate::error::{stage, CodecError, Result};
use crate::utils::compression::{compress, decompress, CompressionKind};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One asset carried in a module container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleAsset {
    /// Identifier for the asset. Positional (`asset_N`) after a decode.
    pub id: String,
    /// Raw (uncompressed) asset bytes.
    pub data: Vec<u8>,
}

/// Result of decoding a module container.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedModule {
    /// The metadata document extracted from the envelope.
    pub document: serde_json::Value,
    /// Assets in stream order, with positional identifiers.
    pub assets: Vec<ModuleAsset>,
}

/// JSON envelope wrapped around the metadata document before compression.
#[derive(Serialize, Deserialize)]
struct ModuleEnvelope {
    module: serde_json::Value,
    #[serde(rename = "type")]
    kind: String,
}

/// Compress a block and frame it as `[len:u32LE][bytes]`.
fn write_block(writer: &mut ByteWriter, raw: &[u8]) -> Result<()> {
    let compressed = compress(raw, CompressionKind::Pack)?;
    let len = u32::try_from(compressed.len())
        .map_err(|_| CodecError::OversizedBlock(compressed.len()))?;
    writer.write_u32_le(len);
    writer.write_bytes(compressed);
    Ok(())
}

/// Read a `[len:u32LE][bytes]` block and decompress it.
fn read_block<'a>(reader: &mut ByteReader<'a>, at: &'static str) -> Result<Vec<u8>> {
    let len = reader.read_u32_le()? as usize;
    let compressed = reader.read_bytes(len)?;
    decompress(compressed, CompressionKind::Pack).map_err(|err| match err {
        CodecError::DecompressionFailed { .. } => CodecError::DecompressionFailed { stage: at },
        other => other,
    })
}

/// Package a metadata document and assets into a module container.
///
/// Assets are written in input order; their `id` fields are not stored.
///
/// # Errors
/// Returns `CodecError::SerializeError` if the document cannot be serialized
/// and `CodecError::OversizedBlock` if a compressed block exceeds u32 framing.
pub fn encode(document: &serde_json::Value, assets: &[ModuleAsset]) -> Result<Bytes> {
    let envelope = ModuleEnvelope {
        module: document.clone(),
        kind: MODULE_TYPE.to_owned(),
    };
    let metadata =
        serde_json::to_vec(&envelope).map_err(|e| CodecError::SerializeError(e.to_string()))?;

    let mut writer = ByteWriter::new();
    writer.write_byte(MODULE_MAGIC);
    writer.write_byte(MODULE_VERSION);
    write_block(&mut writer, &metadata)?;

    for asset in assets {
        writer.write_byte(ASSET_MARKER);
        write_block(&mut writer, &asset.data)?;
    }

    writer.write_byte(END_MARKER);
    debug!(assets = assets.len(), bytes = writer.len(), "encoded module container");
    Ok(writer.finish())
}

/// Parse a module container back into its metadata document and assets.
///
/// Reaching end-of-input without an end marker is tolerated (some producers
/// omit the trailing byte) but logged as non-strict.
///
/// # Errors
/// - `CodecError::InvalidFormat`: bad magic, version, or marker byte
/// - `CodecError::UnexpectedEof`: a declared block length exceeds the input
/// - `CodecError::DecompressionFailed`: a block is not a valid pack stream
/// - `CodecError::CorruptContainer`: the metadata envelope is not valid JSON
pub fn decode(data: &[u8]) -> Result<DecodedModule> {
    let mut reader = ByteReader::new(data);

    let magic = reader.read_byte()?;
    let version = reader.read_byte()?;
    if magic != MODULE_MAGIC || version != MODULE_VERSION {
        return Err(CodecError::InvalidFormat(format!(
            "module header mismatch: magic {magic}, version {version}"
        )));
    }

    let metadata = read_block(&mut reader, stage::METADATA)?;
    let envelope: ModuleEnvelope =
        serde_json::from_slice(&metadata).map_err(|e| CodecError::CorruptContainer {
            stage: stage::METADATA,
            detail: e.to_string(),
        })?;
    if envelope.kind != MODULE_TYPE {
        debug!(kind = %envelope.kind, "module envelope carries unexpected type tag");
    }

    let mut assets = Vec::new();
    loop {
        if reader.at_end() {
            warn!("module container ended without end marker (non-strict input)");
            break;
        }
        let marker = reader.read_byte()?;
        if marker == END_MARKER {
            break;
        }
        if marker != ASSET_MARKER {
            return Err(CodecError::InvalidFormat(format!(
                "unknown block marker: {marker}"
            )));
        }
        let data = read_block(&mut reader, stage::ASSET)?;
        assets.push(ModuleAsset {
            id: format!("asset_{}", assets.len()),
            data,
        });
    }

    Ok(DecodedModule {
        document: envelope.module,
        assets,
    })
}
