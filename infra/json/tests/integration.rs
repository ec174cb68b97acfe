use serde::{Deserialize, Serialize};
use sn_json::*;
use sn_util::IntRange;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Reading {
    source: String,
    watts: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    tag: Option<String>,
    note: Option<String>,
}

fn reading(source: &str, watts: f64) -> Reading {
    Reading { source: source.to_owned(), watts, tag: None, note: None }
}

fn range_keys() -> KeyDeserializerModule {
    KeyDeserializerModule::new("ranges").with(FromStrKeyDeserializer::<IntRange>::new())
}

#[test]
fn default_mapper_omits_null_members() {
    let mapper = ObjectMapper::new();
    let text = mapper.to_string(&reading("meter", 1.5)).unwrap();
    assert_eq!(text, r#"{"source":"meter","watts":1.5}"#);

    let back: Reading = mapper.from_str(&text).unwrap();
    assert_eq!(back, reading("meter", 1.5));
}

#[test]
fn pretty_output_is_indented() {
    let mapper =
        ObjectMapper::new().with_config(MapperConfig { pretty: true, include_nulls: false });
    let text = mapper.to_string(&json!({ "a": 1 })).unwrap();
    assert_eq!(text, "{\n  \"a\": 1\n}");
}

#[test]
fn writer_and_reader_agree() {
    let mapper = ObjectMapper::new();
    let mut buffer = Vec::new();
    mapper.to_writer(&mut buffer, &reading("inverter", 230.0)).unwrap();

    let back: Reading = mapper.from_reader(buffer.as_slice()).unwrap();
    assert_eq!(back.source, "inverter");
    assert_eq!(mapper.from_slice::<Value>(&buffer).unwrap()["watts"], json!(230.0));
}

#[test]
fn malformed_text_is_a_serde_error() {
    let err = ObjectMapper::new().from_str::<Reading>("{ not json").unwrap_err();
    assert!(matches!(err, JsonError::Serde { .. }));
}

#[test]
fn reads_map_with_range_keys() {
    let mapper = ObjectMapper::new().with_module(range_keys());
    let map: HashMap<IntRange, String> =
        mapper.read_map(r#"{"1-5": "low", "6": "single", "-3--1": "negative"}"#).unwrap();

    assert_eq!(map.len(), 3);
    assert_eq!(map[&IntRange::new(1, 5).unwrap()], "low");
    assert_eq!(map[&IntRange::of(6)], "single");
    assert_eq!(map[&IntRange::new(-3, -1).unwrap()], "negative");
}

#[test]
fn invalid_range_key_is_rejected() {
    let mapper = ObjectMapper::new().with_module(range_keys());
    let err = mapper.read_map::<IntRange, i32>(r#"{"9-2": 1}"#).unwrap_err();
    assert!(matches!(err, JsonError::InvalidKey { .. }));
}

#[test]
fn later_module_replaces_key_deserializer() {
    let upper = KeyDeserializerModule::new("upper")
        .with(FnKeyDeserializer::new(|k: &str| Ok::<_, JsonError>(k.to_uppercase())));
    let lower = KeyDeserializerModule::new("lower")
        .with(FnKeyDeserializer::new(|k: &str| Ok::<_, JsonError>(k.to_lowercase())));

    let mapper = ObjectMapper::new().with_module(upper).with_module(lower);
    let map: HashMap<String, u8> = mapper.read_map(r#"{"Key": 1}"#).unwrap();

    assert_eq!(map.get("key"), Some(&1));
    assert_eq!(mapper.modules().collect::<Vec<_>>(), ["upper", "lower"]);
}

#[test]
fn non_object_tree_fails_like_text() {
    let mapper = ObjectMapper::new().with_module(range_keys());
    let map: HashMap<IntRange, bool> = mapper.read_map_value(json!({ "2-3": true })).unwrap();
    assert!(map[&IntRange::new(2, 3).unwrap()]);

    let from_tree = mapper.read_map_value::<IntRange, bool>(json!([1, 2])).unwrap_err();
    let from_text = mapper.read_map::<IntRange, bool>("[1, 2]").unwrap_err();
    assert!(matches!(from_tree, JsonError::Serde { .. }));
    assert!(matches!(from_text, JsonError::Serde { .. }));
}

#[test]
fn value_type_mismatch_names_member() {
    let mapper = ObjectMapper::new().with_module(range_keys());
    let err = mapper.read_map::<IntRange, u8>(r#"{"1": "x"}"#).unwrap_err();
    assert!(matches!(err, JsonError::Serde { .. }));
    assert!(err.to_string().contains("'1'"));
}

#[test]
fn service_replacement_is_visible_across_threads() {
    let service = Arc::new(SimpleObjectMapperService::new());
    let pretty = Arc::new(ObjectMapper::new().with_config(MapperConfig {
        pretty: true,
        include_nulls: false,
    }));

    thread::scope(|s| {
        for _ in 0..4 {
            let service = Arc::clone(&service);
            s.spawn(move || {
                for _ in 0..100 {
                    let mapper = service.object_mapper();
                    assert!(mapper.to_string(&json!({ "a": 1 })).is_ok());
                }
            });
        }
        service.set_object_mapper(Arc::clone(&pretty));
    });

    assert!(Arc::ptr_eq(&service.object_mapper(), &pretty));
}
