//! Hybrid manifest layout
//!
//! `app.json` and `apps.json` use a mixed layout: every top-level key sits on
//! its own line at the base indent, objects inside lists are written compactly
//! one per line at twice the base indent, and any other object value is
//! written compactly in place. The result stays reviewable without one line
//! per field of every repeated record.
//!
//! ```text
//! {
//!   "name": "calcom",
//!   "meta": {"port":3000},
//!   "versions": [
//!     {"v":"1.0","image":"calcom:1.0"},
//!     {"v":"2.0","image":"calcom:2.0"}
//!   ]
//! }
//! ```
//!
//! Keys keep the input's insertion order, numbers keep their source text
//! and non-ASCII text is written literally.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{Map, Value};

/// Formatter using `", "` and `": "` separators on a single line
#[derive(Debug, Clone, Copy, Default)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn to_spaced<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(serde::ser::Error::custom)
}

fn render_list(items: &[Value], space: &str, inner_space: &str) -> serde_json::Result<String> {
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let rendered = match item {
            Value::Object(_) => serde_json::to_string(item)?,
            _ => to_spaced(item)?,
        };
        lines.push(format!("{inner_space}{rendered}"));
    }
    Ok(format!("[\n{}\n{space}]", lines.join(",\n")))
}

/// Render a manifest object in the hybrid layout
///
/// `indent` is the base indent; list records go at twice that.
pub fn format_hybrid(manifest: &Map<String, Value>, indent: usize) -> serde_json::Result<String> {
    let space = " ".repeat(indent);
    let inner_space = " ".repeat(indent * 2);

    let mut items = Vec::with_capacity(manifest.len());
    for (key, value) in manifest {
        let value_str = match value {
            Value::Array(list) => render_list(list, &space, &inner_space)?,
            Value::Object(map) if map.is_empty() => "{}".to_string(),
            Value::Object(_) => serde_json::to_string(value)?,
            _ => to_spaced(value)?,
        };
        items.push(format!("{space}{}: {value_str}", serde_json::to_string(key)?));
    }

    Ok(format!("{{\n{}\n}}", items.join(",\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::{MANIFEST_INDENT, MIN_PROPTEST_ITERATIONS};
    use proptest::prelude::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_list_of_objects_compact_per_line() {
        let manifest = object(json!({"name": "app1", "versions": [{"v": "1.0"}]}));

        let text = format_hybrid(&manifest, MANIFEST_INDENT).unwrap();

        assert_eq!(
            text,
            "{\n  \"name\": \"app1\",\n  \"versions\": [\n    {\"v\":\"1.0\"}\n  ]\n}"
        );
    }

    #[test]
    fn test_multiple_records_and_nested_object() {
        let manifest = object(json!({
            "meta": {"port": 3000, "env": ["A", "B"]},
            "versions": [
                {"v": "1.0", "ports": [80, 443]},
                {"v": "2.0", "ports": []}
            ]
        }));

        let text = format_hybrid(&manifest, 2).unwrap();

        let expected = concat!(
            "{\n",
            "  \"meta\": {\"port\":3000,\"env\":[\"A\",\"B\"]},\n",
            "  \"versions\": [\n",
            "    {\"v\":\"1.0\",\"ports\":[80,443]},\n",
            "    {\"v\":\"2.0\",\"ports\":[]}\n",
            "  ]\n",
            "}"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_non_object_list_items_use_spaced_separators() {
        let manifest = object(json!({"tags": ["web", [1, 2], 3.5, null]}));

        let text = format_hybrid(&manifest, 2).unwrap();

        assert_eq!(
            text,
            "{\n  \"tags\": [\n    \"web\",\n    [1, 2],\n    3.5,\n    null\n  ]\n}"
        );
    }

    #[test]
    fn test_key_order_follows_input() {
        let manifest = object(json!({"zeta": 1, "alpha": 2, "mid": 3}));

        let text = format_hybrid(&manifest, 2).unwrap();

        assert_eq!(text, "{\n  \"zeta\": 1,\n  \"alpha\": 2,\n  \"mid\": 3\n}");
    }

    #[test]
    fn test_non_ascii_written_literally() {
        let manifest = object(json!({"title": "计算器", "desc": [{"zh": "说明 ✓"}]}));

        let text = format_hybrid(&manifest, 2).unwrap();

        assert!(text.contains("\"title\": \"计算器\""));
        assert!(text.contains("{\"zh\":\"说明 ✓\"}"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_empty_values() {
        let manifest = object(json!({"list": [], "map": {}}));

        let text = format_hybrid(&manifest, 2).unwrap();

        assert_eq!(text, "{\n  \"list\": [\n\n  ],\n  \"map\": {}\n}");
    }

    #[test]
    fn test_numbers_keep_source_text() {
        let manifest: Map<String, Value> = serde_json::from_str(
            r#"{"id":123456789012345678901234,"f":1e100,"x":[{"big":18446744073709551616}]}"#,
        )
        .unwrap();

        let text = format_hybrid(&manifest, 2).unwrap();

        assert_eq!(
            text,
            concat!(
                "{\n",
                "  \"id\": 123456789012345678901234,\n",
                "  \"f\": 1e100,\n",
                "  \"x\": [\n",
                "    {\"big\":18446744073709551616}\n",
                "  ]\n",
                "}"
            )
        );
    }

    #[test]
    fn test_empty_manifest() {
        assert_eq!(format_hybrid(&Map::new(), 2).unwrap(), "{\n\n}");
    }

    #[test]
    fn test_custom_indent() {
        let manifest = object(json!({"a": [{"b": 1}]}));

        let text = format_hybrid(&manifest, 4).unwrap();

        assert_eq!(text, "{\n    \"a\": [\n        {\"b\":1}\n    ]\n}");
    }

    #[test]
    fn test_strings_are_escaped() {
        let manifest = object(json!({"cmd": "echo \"hi\"\n", "k\"ey": true}));

        let text = format_hybrid(&manifest, 2).unwrap();

        assert!(text.contains(r#""cmd": "echo \"hi\"\n""#));
        assert!(text.contains(r#""k\"ey": true"#));
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            any::<f64>()
                .prop_filter("finite", |f| f.is_finite())
                .prop_map(Value::from),
            "-?[1-9][0-9]{19,40}".prop_map(|digits| Value::Number(digits.parse().unwrap())),
            "[1-9]\\.[0-9]{1,6}e[+-]?[1-9][0-9]?"
                .prop_map(|text| Value::Number(text.parse().unwrap())),
            "\\PC{0,12}".prop_map(Value::String),
        ]
    }

    fn key() -> impl Strategy<Value = String> {
        "[a-z_é中文]{1,8}"
    }

    fn value() -> BoxedStrategy<Value> {
        scalar()
            .prop_recursive(3, 24, 4, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                    prop::collection::vec((key(), inner), 0..4)
                        .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
                ]
            })
            .boxed()
    }

    fn record() -> impl Strategy<Value = Value> {
        prop::collection::vec((key(), value()), 0..4)
            .prop_map(|pairs| Value::Object(pairs.into_iter().collect()))
    }

    fn manifest() -> impl Strategy<Value = Map<String, Value>> {
        prop::collection::vec(
            (
                key(),
                prop_oneof![
                    value(),
                    prop::collection::vec(record(), 0..4).prop_map(Value::Array),
                ],
            ),
            0..6,
        )
        .prop_map(|pairs| pairs.into_iter().collect())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(MIN_PROPTEST_ITERATIONS))]

        /// Parsing the hybrid layout gives back the same document
        #[test]
        fn prop_hybrid_layout_preserves_content(manifest in manifest()) {
            let text = format_hybrid(&manifest, MANIFEST_INDENT).unwrap();
            let parsed: Value = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(parsed, Value::Object(manifest));
        }

        /// Each top-level key starts its own line at the base indent
        #[test]
        fn prop_top_level_keys_on_own_lines(manifest in manifest()) {
            let text = format_hybrid(&manifest, MANIFEST_INDENT).unwrap();
            for key in manifest.keys() {
                let prefix = format!("\n  {}: ", serde_json::to_string(key).unwrap());
                prop_assert!(text.contains(&prefix));
            }
        }
    }
}
