use serde_json::json;
use strata::convert::{parse_json, parse_toml};
use strata::{ConfigNode, Key, Scalar, Shape};

#[test]
fn toml_document_becomes_mapping() {
    let node = parse_toml(
        r#"
name = "app"
port = 8080
ratio = 0.5
enabled = true
started = 1979-05-27T07:32:00Z
tags = ["a", "b"]

[cache]
ttl = 60
"#,
    )
    .unwrap();

    assert_eq!(node.shape(), Shape::Mapping);
    assert_eq!(node.get("name").and_then(|n| n.as_str()), Some("app"));
    assert_eq!(node.get("port").and_then(|n| n.as_integer()), Some(8080));
    assert_eq!(node.get("ratio"), Some(&ConfigNode::Scalar(Scalar::Float(0.5))));
    assert_eq!(node.get("enabled").and_then(|n| n.as_bool()), Some(true));
    assert_eq!(
        node.get("started").and_then(|n| n.as_str()),
        Some("1979-05-27T07:32:00Z")
    );
    assert_eq!(node.get("tags").map(|n| n.shape()), Some(Shape::Sequence));
    assert_eq!(node.get_path("tags.1").and_then(|n| n.as_str()), Some("b"));
    assert_eq!(node.get_path("cache.ttl").and_then(|n| n.as_integer()), Some(60));
}

#[test]
fn toml_numeric_keys_are_indexes() {
    let node = parse_toml(
        r#"
[servers]
0 = "alpha"
primary = "beta"
"#,
    )
    .unwrap();
    let servers = node.get("servers").unwrap();
    assert_eq!(servers.shape(), Shape::Mixed);
    assert!(servers.as_mapping().unwrap().contains_key(&Key::Index(0)));
}

#[test]
fn empty_toml_document_is_empty_mapping() {
    let node = parse_toml("").unwrap();
    assert_eq!(node, ConfigNode::default());
    assert!(node.is_empty_collection());
}

#[test]
fn json_top_level_may_be_any_value() {
    assert_eq!(parse_json(r#"["a", "b"]"#).unwrap().shape(), Shape::Sequence);
    assert_eq!(parse_json("42").unwrap().as_integer(), Some(42));
    assert_eq!(parse_json("null").unwrap(), ConfigNode::Scalar(Scalar::Null));
}

#[test]
fn json_list_like_object_is_sequence_shaped() {
    let node = parse_json(r#"{"0": "a", "1": "b"}"#).unwrap();
    assert_eq!(node.shape(), Shape::Sequence);
}

#[test]
fn invalid_documents_fail_to_parse() {
    assert!(parse_toml("name = ").is_err());
    assert!(parse_json("{").is_err());
}

#[test]
fn serializes_back_to_json() {
    let node = ConfigNode::from(json!({"b": [1, 2.5, null], "a": {"x": true}}));
    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(value, json!({"a": {"x": true}, "b": [1, 2.5, null]}));
}

#[test]
fn serializes_to_toml() {
    let node = parse_toml("name = \"app\"\n[cache]\nttl = 60\n").unwrap();
    let rendered = toml::to_string(&node).unwrap();
    let reparsed = parse_toml(&rendered).unwrap();
    assert_eq!(reparsed, node);
}

#[test]
fn display_is_compact_json() {
    let node = ConfigNode::from(json!({"0": "a", "foo": "b"}));
    assert_eq!(node.to_string(), r#"{"0":"a","foo":"b"}"#);
}
