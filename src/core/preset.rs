//! # Preset Codec
//!
//! Encoder/decoder for the encrypted preset container.
//!
//! ## Pipeline
//! ```text
//! document --msgpack--> plaintext --AES-256-GCM--> ciphertext
//!   --envelope {preset, presetVersion, type}--> msgpack bytes
//!   --gzip--> --pack--> container blob
//! ```
//!
//! Decode reverses the pipeline in strict mirror order and finishes with the
//! template merge from [`crate::core::template`]. The envelope compatibility
//! matrix (current `preset` field vs legacy `pres`, accepted versions
//! `{0, 2}`, current vs legacy type tag) is handled by an explicit
//! [`EnvelopeRevision`] dispatch so it stays auditable in isolation.

use crate::config::{ACCEPTED_PRESET_VERSIONS, PRESET_SECRET, PRESET_TYPE, PRESET_TYPE_LEGACY, PRESET_VERSION};
use crate::core::template::merge_onto_template;
use crate::error::{stage, CodecError, Result};
use crate::utils::compression::{compress, decompress, CompressionKind};
use crate::utils::crypto;
use bytes::Bytes;
use rmpv::Value;
use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;
use tracing::debug;

/// Serialized wrapper around the encrypted preset payload.
///
/// Encoded as a string-keyed MessagePack map. Unknown fields from newer
/// producers are ignored on decode.
#[derive(Serialize, Deserialize)]
struct PresetEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    preset: Option<ByteBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pres: Option<ByteBuf>,
    #[serde(rename = "presetVersion")]
    preset_version: i64,
    #[serde(rename = "type")]
    kind: String,
}

/// Accepted envelope shapes, resolved at decode time.
enum EnvelopeRevision {
    /// `preset` ciphertext field (current files)
    Current(Vec<u8>),
    /// `pres` ciphertext field (legacy files)
    Legacy(Vec<u8>),
}

impl EnvelopeRevision {
    /// Validate version and type tag, then pick the ciphertext field.
    fn classify(envelope: PresetEnvelope) -> Result<Self> {
        if envelope.kind != PRESET_TYPE && envelope.kind != PRESET_TYPE_LEGACY {
            return Err(CodecError::UnsupportedVersion(format!(
                "type tag {:?}",
                envelope.kind
            )));
        }
        if !ACCEPTED_PRESET_VERSIONS
            .iter()
            .any(|&v| i64::from(v) == envelope.preset_version)
        {
            return Err(CodecError::UnsupportedVersion(format!(
                "presetVersion {}",
                envelope.preset_version
            )));
        }
        match (envelope.preset, envelope.pres) {
            (Some(ciphertext), _) => Ok(Self::Current(ciphertext.into_vec())),
            (None, Some(ciphertext)) => Ok(Self::Legacy(ciphertext.into_vec())),
            (None, None) => Err(CodecError::CorruptContainer {
                stage: stage::ENVELOPE,
                detail: "missing ciphertext field (preset/pres)".to_owned(),
            }),
        }
    }

    fn into_ciphertext(self) -> Vec<u8> {
        match self {
            Self::Current(ciphertext) => ciphertext,
            Self::Legacy(ciphertext) => {
                debug!("preset envelope uses legacy 'pres' ciphertext field");
                ciphertext
            }
        }
    }
}

/// Encode a preset document into an encrypted container blob.
///
/// The document may hold any MessagePack-representable value tree: strings,
/// numbers, booleans, nil, nested maps/arrays, and raw byte strings.
pub fn encode(document: &Value) -> Result<Bytes> {
    let mut plaintext = Vec::new();
    rmpv::encode::write_value(&mut plaintext, document)
        .map_err(|e| CodecError::SerializeError(e.to_string()))?;

    let ciphertext = crypto::encrypt(&plaintext, PRESET_SECRET)?;

    let envelope = PresetEnvelope {
        preset: Some(ByteBuf::from(ciphertext)),
        pres: None,
        preset_version: i64::from(PRESET_VERSION),
        kind: PRESET_TYPE.to_owned(),
    };
    // to_vec_named keeps the envelope as a string-keyed map on the wire
    let envelope_bytes =
        rmp_serde::to_vec_named(&envelope).map_err(|e| CodecError::SerializeError(e.to_string()))?;

    let gzipped = compress(&envelope_bytes, CompressionKind::Gzip)?;
    let packed = compress(&gzipped, CompressionKind::Pack)?;
    debug!(bytes = packed.len(), "encoded preset container");
    Ok(Bytes::from(packed))
}

/// Decode an encrypted preset container back into a full preset document.
///
/// The returned document is the decoded payload merged onto the default
/// template, so fields missing from older files are backfilled.
///
/// # Errors
/// - `CodecError::CorruptContainer`: a decompression layer or structural
///   parse failed (the stage names which one)
/// - `CodecError::UnsupportedVersion`: envelope version/type outside the
///   accepted set; no best-effort decode is attempted
/// - `CodecError::DecryptionFailed`: ciphertext failed authentication
pub fn decode(data: &[u8]) -> Result<Value> {
    let gzipped = decompress(data, CompressionKind::Pack).map_err(|e| corrupt(stage::OUTER_PACK, e))?;
    let envelope_bytes =
        decompress(&gzipped, CompressionKind::Gzip).map_err(|e| corrupt(stage::GZIP, e))?;

    let envelope: PresetEnvelope =
        rmp_serde::from_slice(&envelope_bytes).map_err(|e| CodecError::CorruptContainer {
            stage: stage::ENVELOPE,
            detail: e.to_string(),
        })?;

    let ciphertext = EnvelopeRevision::classify(envelope)?.into_ciphertext();
    let plaintext = crypto::decrypt(&ciphertext, PRESET_SECRET)?;

    let document =
        rmpv::decode::read_value(&mut plaintext.as_slice()).map_err(|e| CodecError::CorruptContainer {
            stage: stage::DOCUMENT,
            detail: e.to_string(),
        })?;

    Ok(merge_onto_template(document))
}

/// Map a decompression failure to the corrupt-container stage it occurred in.
fn corrupt(at: &'static str, err: CodecError) -> CodecError {
    match err {
        CodecError::DecompressionFailed { .. } => CodecError::CorruptContainer {
            stage: at,
            detail: "decompression failed".to_owned(),
        },
        other => other,
    }
}
