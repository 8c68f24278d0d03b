//! # Archive Codec
//!
//! Zip-based bundling of a card metadata document, an optional module
//! container blob, and named asset blobs.
//!
//! This is a thin boundary over a generic zip codec: `card.json` is the
//! mandatory metadata entry, `module.risum` is the reserved module entry,
//! and every other entry is treated as a named asset.

use crate::config::{CARD_ENTRY, MODULE_ENTRY};
use crate::error::{stage, CodecError, Result};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Contents of an archive container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArchiveBundle {
    /// Card metadata document, stored as `card.json`.
    pub card: serde_json::Value,
    /// Optional module container blob, stored under the reserved entry name.
    pub module: Option<Vec<u8>>,
    /// Named asset blobs; every non-reserved entry lands here.
    pub assets: BTreeMap<String, Vec<u8>>,
}

/// Package a bundle into zip bytes.
pub fn encode(bundle: &ArchiveBundle) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let entry = |e: zip::result::ZipError| CodecError::SerializeError(e.to_string());

    let card_json = serde_json::to_vec_pretty(&bundle.card)
        .map_err(|e| CodecError::SerializeError(e.to_string()))?;
    writer.start_file(CARD_ENTRY, options).map_err(entry)?;
    writer.write_all(&card_json)?;

    if let Some(module) = &bundle.module {
        writer.start_file(MODULE_ENTRY, options).map_err(entry)?;
        writer.write_all(module)?;
    }

    for (name, data) in &bundle.assets {
        writer.start_file(name.as_str(), options).map_err(entry)?;
        writer.write_all(data)?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| CodecError::SerializeError(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Unpack zip bytes into a bundle.
///
/// # Errors
/// - `CodecError::InvalidFormat`: the input is not a readable zip archive
/// - `CodecError::MissingRequiredEntry`: no `card.json` entry
/// - `CodecError::CorruptContainer`: the card entry is not valid JSON
pub fn decode(data: &[u8]) -> Result<ArchiveBundle> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| CodecError::InvalidFormat(format!("not a zip archive: {e}")))?;

    let card = {
        let mut entry = match archive.by_name(CARD_ENTRY) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(CodecError::MissingRequiredEntry(CARD_ENTRY))
            }
            Err(e) => return Err(CodecError::InvalidFormat(e.to_string())),
        };
        let mut raw = Vec::new();
        entry.read_to_end(&mut raw)?;
        serde_json::from_slice(&raw).map_err(|e| CodecError::CorruptContainer {
            stage: stage::CARD,
            detail: e.to_string(),
        })?
    };

    let mut bundle = ArchiveBundle {
        card,
        ..ArchiveBundle::default()
    };
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| CodecError::InvalidFormat(e.to_string()))?;
        if entry.is_dir() || entry.name() == CARD_ENTRY {
            continue;
        }
        let mut raw = Vec::new();
        entry.read_to_end(&mut raw)?;
        if entry.name() == MODULE_ENTRY {
            bundle.module = Some(raw);
        } else {
            bundle.assets.insert(entry.name().to_owned(), raw);
        }
    }

    Ok(bundle)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    fn sample_bundle() -> ArchiveBundle {
        let mut assets = BTreeMap::new();
        assets.insert("assets/portrait.png".to_owned(), vec![0x89, 0x50, 0x4E]);
        assets.insert("assets/theme.css".to_owned(), b"body{}".to_vec());
        ArchiveBundle {
            card: json!({"name": "Iris", "spec": "chara_card_v3"}),
            module: Some(vec![111, 0, 1, 2, 3]),
            assets,
        }
    }

    #[test]
    fn roundtrip() {
        let bundle = sample_bundle();
        let bytes = encode(&bundle).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, bundle);
    }

    #[test]
    fn roundtrip_without_module() {
        let bundle = ArchiveBundle {
            card: json!({"name": "Iris"}),
            ..ArchiveBundle::default()
        };
        let decoded = decode(&encode(&bundle).unwrap()).unwrap();
        assert_eq!(decoded.module, None);
        assert!(decoded.assets.is_empty());
    }

    #[test]
    fn missing_card_entry_rejected() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hello").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(matches!(
            decode(&bytes),
            Err(CodecError::MissingRequiredEntry(CARD_ENTRY))
        ));
    }

    #[test]
    fn non_zip_input_rejected() {
        assert!(matches!(
            decode(b"definitely not a zip"),
            Err(CodecError::InvalidFormat(_))
        ));
    }
}
