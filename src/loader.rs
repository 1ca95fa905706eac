use crate::convert;
use crate::node::ConfigNode;
use crate::scanner;
use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Supplies raw configuration layers by name. A missing layer is `Ok(None)`.
pub trait LayerSource {
    fn load_layer(&self, name: &str) -> Result<Option<ConfigNode>>;
}

impl<S: LayerSource + ?Sized> LayerSource for &S {
    fn load_layer(&self, name: &str) -> Result<Option<ConfigNode>> {
        (**self).load_layer(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFormat {
    Toml,
    Json,
}

impl LayerFormat {
    pub const ALL: [LayerFormat; 2] = [LayerFormat::Toml, LayerFormat::Json];

    pub fn extension(self) -> &'static str {
        match self {
            LayerFormat::Toml => "toml",
            LayerFormat::Json => "json",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }
}

/// Reads layers from `<dir>/<name>.toml` or `<dir>/<name>.json`.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Prefixes with a base layer in this directory.
    pub fn discover_prefixes(&self) -> Result<Vec<String>> {
        scanner::discover_prefixes(&self.base_dir)
    }

    /// The file backing layer `name`, if exactly one exists.
    pub fn layer_path(&self, name: &str) -> Result<Option<(PathBuf, LayerFormat)>> {
        let found: Vec<(PathBuf, LayerFormat)> = LayerFormat::ALL
            .into_iter()
            .map(|format| {
                let path = self.base_dir.join(format!("{name}.{}", format.extension()));
                (path, format)
            })
            .filter(|(path, _)| path.is_file())
            .collect();

        match found.len() {
            0 => Ok(None),
            1 => Ok(found.into_iter().next()),
            _ => bail!(
                "ambiguous layer '{name}': both {name}.toml and {name}.json exist in {}",
                self.base_dir.display()
            ),
        }
    }
}

impl LayerSource for ConfigLoader {
    fn load_layer(&self, name: &str) -> Result<Option<ConfigNode>> {
        let Some((path, format)) = self.layer_path(name)? else {
            tracing::debug!(layer = name, dir = %self.base_dir.display(), "layer not found");
            return Ok(None);
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let node = match format {
            LayerFormat::Toml => convert::parse_toml(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?,
            LayerFormat::Json => convert::parse_json(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?,
        };

        tracing::debug!(layer = name, path = %path.display(), "loaded layer");
        Ok(Some(node))
    }
}

/// In-memory layers keyed by name.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    layers: HashMap<String, ConfigNode>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, name: &str, node: ConfigNode) -> Self {
        self.insert(name, node);
        self
    }

    pub fn insert(&mut self, name: &str, node: ConfigNode) {
        self.layers.insert(name.to_string(), node);
    }
}

impl LayerSource for MemorySource {
    fn load_layer(&self, name: &str) -> Result<Option<ConfigNode>> {
        Ok(self.layers.get(name).cloned())
    }
}
