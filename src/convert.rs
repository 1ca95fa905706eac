use crate::node::{ConfigNode, Key, Scalar};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

impl From<toml::Value> for ConfigNode {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => ConfigNode::Scalar(Scalar::String(s)),
            toml::Value::Integer(i) => ConfigNode::Scalar(Scalar::Integer(i)),
            toml::Value::Float(f) => ConfigNode::Scalar(Scalar::Float(f)),
            toml::Value::Boolean(b) => ConfigNode::Scalar(Scalar::Bool(b)),
            toml::Value::Datetime(dt) => ConfigNode::Scalar(Scalar::String(dt.to_string())),
            toml::Value::Array(arr) => {
                ConfigNode::Sequence(arr.into_iter().map(ConfigNode::from).collect())
            }
            toml::Value::Table(table) => ConfigNode::from(table),
        }
    }
}

impl From<toml::Table> for ConfigNode {
    fn from(table: toml::Table) -> Self {
        table
            .into_iter()
            .map(|(k, v)| (Key::from(k), ConfigNode::from(v)))
            .collect()
    }
}

impl From<serde_json::Value> for ConfigNode {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigNode::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => ConfigNode::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigNode::Scalar(Scalar::Integer(i)),
                None => ConfigNode::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => ConfigNode::Scalar(Scalar::String(s)),
            serde_json::Value::Array(arr) => {
                ConfigNode::Sequence(arr.into_iter().map(ConfigNode::from).collect())
            }
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| (Key::from(k), ConfigNode::from(v)))
                .collect(),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for ConfigNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigNode::Scalar(scalar) => scalar.serialize(serializer),
            ConfigNode::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ConfigNode::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

/// Parse a TOML document into a mapping node.
pub fn parse_toml(content: &str) -> Result<ConfigNode, toml::de::Error> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(ConfigNode::from(table))
}

/// Parse a JSON document. Any JSON value is accepted at the top level.
pub fn parse_json(content: &str) -> Result<ConfigNode, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(ConfigNode::from(value))
}
