use crate::node::{ConfigNode, Key};
use std::collections::BTreeMap;

/// Process-wide configuration, keyed by prefix.
///
/// The resolver publishes into it once per prefix; the application may keep
/// mutating it afterwards.
#[derive(Debug, Default, Clone)]
pub struct ConfigStore {
    entries: BTreeMap<String, ConfigNode>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing whatever was there.
    pub fn set(&mut self, key: &str, value: ConfigNode) -> Option<ConfigNode> {
        self.entries.insert(key.to_string(), value)
    }

    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.entries.get(key)
    }

    /// Dotted lookup: `app.cache.ttl` reads `ttl` inside the `app` entry.
    pub fn get_path(&self, path: &str) -> Option<&ConfigNode> {
        let (prefix, rest) = match path.split_once('.') {
            Some((prefix, rest)) => (prefix, rest),
            None => (path, ""),
        };
        self.get(prefix)?.get_path(rest)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The whole store as one mapping of prefix to value.
    pub fn to_node(&self) -> ConfigNode {
        self.entries
            .iter()
            .map(|(k, v)| (Key::from(k.as_str()), v.clone()))
            .collect()
    }
}
