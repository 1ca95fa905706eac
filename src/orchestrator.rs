use crate::context::{ExecutionContext, Rank};
use crate::loader::LayerSource;
use crate::merge;
use crate::node::ConfigNode;
use crate::store::ConfigStore;
use anyhow::{Context, Result};
use serde::Serialize;

/// One configuration layer pulled from the source.
#[derive(Debug, Clone)]
pub struct Layer {
    pub prefix: String,
    pub rank: Rank,
    pub name: String,
    pub node: ConfigNode,
}

/// Where a layer would come from and whether the source has it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerInfo {
    pub rank: Rank,
    pub name: String,
    pub present: bool,
}

/// Resolves each prefix by folding base, project and environment layers.
pub struct Orchestrator<S> {
    source: S,
    context: ExecutionContext,
}

impl<S: LayerSource> Orchestrator<S> {
    pub fn new(source: S, context: ExecutionContext) -> Self {
        Self { source, context }
    }

    /// Load the eligible layers for `prefix`, lowest precedence first.
    /// Missing layers are left out.
    pub fn collect_layers(&self, prefix: &str) -> Result<Vec<Layer>> {
        if self.context.project().is_none() && self.context.environment().is_some() {
            tracing::warn!(prefix, "environment is set without a project, ignoring it");
        }

        let mut layers = Vec::new();
        for (rank, name) in self.context.layer_names(prefix) {
            let node = self
                .source
                .load_layer(&name)
                .with_context(|| format!("failed to load layer '{name}'"))?;
            match node {
                Some(node) => layers.push(Layer {
                    prefix: prefix.to_string(),
                    rank,
                    name,
                    node,
                }),
                None => tracing::debug!(prefix, layer = %name, ?rank, "layer absent, skipping"),
            }
        }
        Ok(layers)
    }

    /// Take the base layer as is and fold the project and environment layers
    /// over it. A missing base starts from an empty mapping.
    pub fn resolve(&self, prefix: &str) -> Result<ConfigNode> {
        let mut result = ConfigNode::default();

        for layer in self.collect_layers(prefix)? {
            if layer.rank == Rank::Base {
                tracing::debug!(prefix, layer = %layer.name, "loaded base layer");
                result = layer.node;
                continue;
            }

            // Skipped rather than merged: merging an empty collection would
            // replace the lower layers outright.
            if layer.node.is_empty_collection() {
                tracing::debug!(prefix, layer = %layer.name, "layer is empty, skipping");
                continue;
            }

            result = merge::merge(result, layer.node).with_context(|| {
                format!("failed to merge layer '{}' into '{}'", layer.name, layer.prefix)
            })?;
            tracing::debug!(prefix, layer = %layer.name, rank = ?layer.rank, "merged layer");
        }

        Ok(result)
    }

    /// Resolve `prefix` and store the result, replacing any previous value.
    pub fn publish(&self, prefix: &str, store: &mut ConfigStore) -> Result<()> {
        let node = self.resolve(prefix)?;
        if store.set(prefix, node).is_some() {
            tracing::debug!(prefix, "replaced existing store entry");
        }
        tracing::info!(prefix, "published configuration");
        Ok(())
    }

    /// Publish every prefix. Stops at the first failure.
    pub fn resolve_all<P: AsRef<str>>(
        &self,
        prefixes: &[P],
        store: &mut ConfigStore,
    ) -> Result<Vec<String>> {
        let mut published = Vec::with_capacity(prefixes.len());
        for prefix in prefixes {
            let prefix = prefix.as_ref();
            self.publish(prefix, store)
                .with_context(|| format!("failed to resolve configuration '{prefix}'"))?;
            published.push(prefix.to_string());
        }
        Ok(published)
    }

    /// Describe the layers `prefix` would draw from.
    pub fn layers(&self, prefix: &str) -> Result<Vec<LayerInfo>> {
        let mut infos = Vec::new();
        for (rank, name) in self.context.layer_names(prefix) {
            let present = self
                .source
                .load_layer(&name)
                .with_context(|| format!("failed to load layer '{name}'"))?
                .is_some();
            infos.push(LayerInfo {
                rank,
                name,
                present,
            });
        }
        Ok(infos)
    }
}
