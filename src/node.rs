use std::collections::BTreeMap;
use std::fmt;

/// Key of a mapping entry.
///
/// Textual keys that spell a canonical decimal integer are stored as `Index`,
/// so `{"0": ..}` and a list position are the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match parse_index(s) {
            Some(i) => Key::Index(i),
            None => Key::Name(s.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match parse_index(&s) {
            Some(i) => Key::Index(i),
            None => Key::Name(s),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Index(i)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(s) => f.write_str(s),
        }
    }
}

/// `"0"`, `"42"` and `"-7"` are integers; `"01"`, `"+1"` and `"-0"` are not.
fn parse_index(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if s == "-0" {
        return None;
    }
    s.parse().ok()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

pub type Mapping = BTreeMap<Key, ConfigNode>;

/// A configuration value: a scalar, a list, or a keyed mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
    Scalar(Scalar),
    Sequence(Vec<ConfigNode>),
    Mapping(Mapping),
}

/// Structural classification used by the merge engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    /// List-like: a sequence, an empty collection, or a mapping keyed `0..n`.
    Sequence,
    /// Associative mapping.
    Mapping,
    /// Integer and non-integer keys side by side.
    Mixed,
}

impl Default for ConfigNode {
    fn default() -> Self {
        ConfigNode::Mapping(Mapping::new())
    }
}

impl ConfigNode {
    pub fn shape(&self) -> Shape {
        match self {
            ConfigNode::Scalar(_) => Shape::Scalar,
            ConfigNode::Sequence(_) => Shape::Sequence,
            ConfigNode::Mapping(map) => classify_mapping(map),
        }
    }

    /// Sequences and mappings are collections, whatever their shape.
    pub fn is_collection(&self) -> bool {
        !matches!(self, ConfigNode::Scalar(_))
    }

    pub fn is_empty_collection(&self) -> bool {
        match self {
            ConfigNode::Scalar(_) => false,
            ConfigNode::Sequence(items) => items.is_empty(),
            ConfigNode::Mapping(map) => map.is_empty(),
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ConfigNode::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigNode::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigNode::Scalar(Scalar::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigNode::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Look up a direct child. Sequences accept numeric keys.
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        match self {
            ConfigNode::Scalar(_) => None,
            ConfigNode::Mapping(map) => map.get(&Key::from(key)),
            ConfigNode::Sequence(items) => match Key::from(key) {
                Key::Index(i) => usize::try_from(i).ok().and_then(|i| items.get(i)),
                Key::Name(_) => None,
            },
        }
    }

    /// Walk a dotted path such as `database.connections.0.host`.
    pub fn get_path(&self, path: &str) -> Option<&ConfigNode> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.')
            .try_fold(self, |node, segment| node.get(segment))
    }
}

fn classify_mapping(map: &Mapping) -> Shape {
    if map.is_empty() {
        return Shape::Sequence;
    }

    let mut has_index = false;
    let mut has_name = false;
    for key in map.keys() {
        match key {
            Key::Index(_) => has_index = true,
            Key::Name(_) => has_name = true,
        }
        if has_index && has_name {
            return Shape::Mixed;
        }
    }

    if has_name {
        return Shape::Mapping;
    }

    // Index keys iterate in ascending order.
    let contiguous = map
        .keys()
        .enumerate()
        .all(|(pos, key)| *key == Key::Index(pos as i64));
    if contiguous {
        Shape::Sequence
    } else {
        Shape::Mapping
    }
}

impl From<&str> for ConfigNode {
    fn from(s: &str) -> Self {
        ConfigNode::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for ConfigNode {
    fn from(s: String) -> Self {
        ConfigNode::Scalar(Scalar::String(s))
    }
}

impl From<i64> for ConfigNode {
    fn from(i: i64) -> Self {
        ConfigNode::Scalar(Scalar::Integer(i))
    }
}

impl From<bool> for ConfigNode {
    fn from(b: bool) -> Self {
        ConfigNode::Scalar(Scalar::Bool(b))
    }
}

impl From<Vec<ConfigNode>> for ConfigNode {
    fn from(items: Vec<ConfigNode>) -> Self {
        ConfigNode::Sequence(items)
    }
}

impl From<Mapping> for ConfigNode {
    fn from(map: Mapping) -> Self {
        ConfigNode::Mapping(map)
    }
}

impl<K: Into<Key>> FromIterator<(K, ConfigNode)> for ConfigNode {
    fn from_iter<I: IntoIterator<Item = (K, ConfigNode)>>(iter: I) -> Self {
        ConfigNode::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Compact JSON rendering, used in error messages.
impl fmt::Display for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}
