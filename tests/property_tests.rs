//! Property-based tests using proptest
//!
//! These tests validate codec invariants across a wide range of randomly
//! generated documents, assets, and byte streams.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use charpack::core::cursor::{ByteReader, ByteWriter};
use charpack::module::{self, ModuleAsset};
use charpack::preset;
use charpack::template::merge_onto_template;
use charpack::utils::compression::{compress, decompress, CompressionKind};
use proptest::prelude::*;
use rmpv::Value;
use std::collections::BTreeMap;

// Property: the module codec round-trips any document and asset list,
// up to positional asset-id renumbering
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn prop_module_roundtrip(
        doc in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..8),
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..2048), 0..8),
    ) {
        let document = serde_json::to_value(&doc).unwrap();
        let assets: Vec<ModuleAsset> = payloads
            .iter()
            .map(|data| ModuleAsset { id: "unnamed".into(), data: data.clone() })
            .collect();

        let blob = module::encode(&document, &assets).expect("encode should not fail");
        let decoded = module::decode(&blob).expect("decode should not fail");

        prop_assert_eq!(decoded.document, document);
        prop_assert_eq!(decoded.assets.len(), payloads.len());
        for (i, asset) in decoded.assets.iter().enumerate() {
            prop_assert_eq!(&asset.id, &format!("asset_{i}"));
            prop_assert_eq!(&asset.data, &payloads[i]);
        }
    }
}

fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1e9..1e9f64).prop_map(Value::from),
        "[ -~]{0,32}".prop_map(Value::from),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Value::Binary),
        Just(Value::Nil),
    ]
}

// Property: the preset codec round-trips any document map, producing the
// template-merged shape
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn prop_preset_roundtrip(
        doc in prop::collection::btree_map("[a-zA-Z_]{1,12}", scalar_value(), 0..12),
    ) {
        let document = Value::Map(
            doc.into_iter().map(|(k, v)| (Value::from(k), v)).collect::<Vec<_>>(),
        );

        let blob = preset::encode(&document).expect("encode should not fail");
        let decoded = preset::decode(&blob).expect("decode should not fail");

        prop_assert_eq!(decoded, merge_onto_template(document));
    }
}

// Property: preset encoding is deterministic for a fixed document
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]
    #[test]
    fn prop_preset_encode_deterministic(
        name in "[ -~]{0,32}",
    ) {
        let document = Value::Map(vec![(Value::from("name"), Value::from(name))]);
        let first = preset::encode(&document).expect("encode");
        let second = preset::encode(&document).expect("encode");
        prop_assert_eq!(first, second);
    }
}

// Property: both compression layers round-trip arbitrary byte strings
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn prop_compression_roundtrip(data in prop::collection::vec(any::<u8>(), 0..50000)) {
        for kind in [CompressionKind::Pack, CompressionKind::Gzip] {
            let compressed = compress(&data, kind).expect("compression should not fail");
            let decompressed = decompress(&compressed, kind).expect("decompression should not fail");
            prop_assert_eq!(&decompressed, &data);
        }
    }
}

// Property: cursor writes read back in order with exact offsets
proptest! {
    #[test]
    fn prop_cursor_roundtrip(
        bytes in prop::collection::vec(any::<u8>(), 0..16),
        words in prop::collection::vec(any::<u32>(), 0..16),
        tail in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let mut writer = ByteWriter::new();
        for &b in &bytes {
            writer.write_byte(b);
        }
        for &w in &words {
            writer.write_u32_le(w);
        }
        writer.write_bytes(tail.clone());

        let buf = writer.finish();
        let mut reader = ByteReader::new(&buf);
        for &b in &bytes {
            prop_assert_eq!(reader.read_byte().unwrap(), b);
        }
        for &w in &words {
            prop_assert_eq!(reader.read_u32_le().unwrap(), w);
        }
        prop_assert_eq!(reader.read_bytes(tail.len()).unwrap(), &tail[..]);
        prop_assert!(reader.at_end());
    }
}

// Property: decoding random garbage never panics, only errors
proptest! {
    #[test]
    fn prop_module_decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = module::decode(&data);
    }

    #[test]
    fn prop_preset_decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = preset::decode(&data);
    }
}

// Property: archive round-trips arbitrary named assets
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]
    #[test]
    fn prop_archive_roundtrip(
        assets in prop::collection::btree_map(
            "assets/[a-z]{1,8}\\.[a-z]{2,4}",
            prop::collection::vec(any::<u8>(), 0..1024),
            0..6,
        ),
    ) {
        let bundle = charpack::archive::ArchiveBundle {
            card: serde_json::json!({"name": "prop"}),
            module: None,
            assets: assets.into_iter().collect::<BTreeMap<_, _>>(),
        };
        let decoded = charpack::archive::decode(
            &charpack::archive::encode(&bundle).expect("encode"),
        ).expect("decode");
        prop_assert_eq!(decoded, bundle);
    }
}
