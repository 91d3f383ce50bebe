//! Property-based tests for the mapping guarantees that hold for any input:
//! scalars survive a trip through a document, absent paths never mutate the
//! target, and mapping the same document twice changes nothing.

use proptest::prelude::*;
use tagmap::{map, parse_timestamp, tagmap, Document, Layout, MapOptions, Path, Value};

tagmap! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Record {
        id: i64 => "record.id",
        count: u32 => "record.stats.count",
        ratio: f64 => "record.stats.ratio",
        label: String => "record.label",
        flag: Option<bool> => "record.flag",
        note: Option<String> => "record.note",
    }
}

fn record_json(id: i64, count: u32, ratio: f64, label: &str, flag: bool) -> serde_json::Value {
    serde_json::json!({
        "record": {
            "id": id,
            "label": label,
            "flag": flag,
            "stats": { "count": count, "ratio": ratio }
        }
    })
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

proptest! {
    #[test]
    fn prop_scalars_survive_mapping(
        id in any::<i64>(),
        count in any::<u32>(),
        ratio in -1.0e12f64..1.0e12,
        label in ".*",
        flag in any::<bool>(),
    ) {
        let doc = record_json(id, count, ratio, &label, flag);
        let mut record = Record::default();
        let report = map(&doc, &mut record, &MapOptions::new()).unwrap();

        prop_assert!(report.is_clean());
        prop_assert_eq!(record.id, id);
        prop_assert_eq!(record.count, count);
        prop_assert_eq!(record.ratio, ratio);
        prop_assert_eq!(&record.label, &label);
        prop_assert_eq!(record.flag, Some(flag));
        prop_assert_eq!(record.note, None);
    }

    #[test]
    fn prop_absent_paths_never_mutate(
        id in any::<i64>(),
        label in "[ -~]{0,16}",
        note in proptest::option::of("[a-z]{0,8}"),
        keys in prop::collection::vec(segment(), 0..6),
    ) {
        let original = Record {
            id,
            label: label.clone(),
            note: note.clone(),
            ..Record::default()
        };
        let mut object = serde_json::Map::new();
        // every field path starts at "record"
        for key in keys.into_iter().filter(|k| k != "record") {
            object.insert(key, serde_json::Value::from(1));
        }
        let doc = serde_json::Value::Object(object);

        let mut record = original.clone();
        let report = map(&doc, &mut record, &MapOptions::new()).unwrap();
        prop_assert!(report.is_clean());
        prop_assert_eq!(record, original);
    }

    #[test]
    fn prop_mapping_is_idempotent(
        id in any::<i64>(),
        count in any::<u32>(),
        label in "[a-z]{0,8}",
        note in prop_oneof![Just(Value::Null), Just(Value::from(7)), "[a-z]{0,4}".prop_map(Value::from)],
    ) {
        let text = serde_json::json!({
            "record": { "id": id, "label": label, "stats": { "count": count } }
        })
        .to_string();
        let mut doc = Document::from_str(&text).unwrap().into_value();
        if let Value::Object(root) = &mut doc {
            if let Some(Value::Object(mut record)) = root.get("record").cloned() {
                record.insert("note".to_string(), note);
                root.insert("record".to_string(), Value::Object(record));
            }
        }

        let mut once = Record::default();
        let first = map(&doc, &mut once, &MapOptions::new()).unwrap();
        let mut twice = once.clone();
        let second = map(&doc, &mut twice, &MapOptions::new()).unwrap();

        prop_assert_eq!(once, twice);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_split_join_display(parts in prop::collection::vec(segment(), 1..6)) {
        let annotation = parts.join(".");
        let path = Path::split(&annotation);
        prop_assert_eq!(path.segments(), parts.as_slice());
        prop_assert_eq!(path.to_string(), annotation);
    }

    #[test]
    fn prop_iso_dates_parse(year in 1000i32..9999, month in 1u32..=12, day in 1u32..=28) {
        let raw = format!("{:04}-{:02}-{:02}", year, month, day);
        prop_assert_eq!(Layout::detect(&raw), Some(Layout::IsoDate));
        prop_assert!(parse_timestamp(&raw, &chrono::Utc).is_ok());
    }

    #[test]
    fn prop_us_and_iso_agree(year in 1000i32..9999, month in 1u32..=12, day in 1u32..=28) {
        let iso = format!("{:04}-{:02}-{:02}", year, month, day);
        let us = format!("{:02}/{:02}/{:04}", month, day, year);
        prop_assert_eq!(
            parse_timestamp(&iso, &chrono::Utc).unwrap(),
            parse_timestamp(&us, &chrono::Utc).unwrap()
        );
    }
}
