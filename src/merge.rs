use crate::error::MergeError;
use crate::node::{ConfigNode, Shape};

/// Deep-merge `overlay` onto `base`. Values in `overlay` take precedence.
///
/// Associative mappings are merged key by key, recursing into nested
/// collections. Anything else (scalars, lists, empty collections) is replaced
/// wholesale by `overlay`. Integer keys that only exist in `overlay` are
/// dropped when merging two mappings.
///
/// Fails with [`MergeError::MixedKeys`] if either side mixes integer and
/// non-integer keys, before any other rule applies.
pub fn merge(base: ConfigNode, overlay: ConfigNode) -> Result<ConfigNode, MergeError> {
    let base_shape = checked_shape(&base)?;
    let overlay_shape = checked_shape(&overlay)?;

    match (base, overlay) {
        (ConfigNode::Mapping(mut result), ConfigNode::Mapping(mut incoming))
            if base_shape == Shape::Mapping && overlay_shape == Shape::Mapping =>
        {
            for (key, value) in result.iter_mut() {
                let Some(incoming_value) = incoming.remove(key) else {
                    continue;
                };
                if value.is_collection() && incoming_value.is_collection() {
                    let current = std::mem::take(value);
                    *value = merge(current, incoming_value)?;
                } else {
                    *value = incoming_value;
                }
            }

            for (key, value) in incoming {
                if !key.is_index() {
                    result.insert(key, value);
                }
            }

            Ok(ConfigNode::Mapping(result))
        }
        (_, overlay) => Ok(overlay),
    }
}

/// Fold `layers` left to right onto `base`.
pub fn merge_all<I>(base: ConfigNode, layers: I) -> Result<ConfigNode, MergeError>
where
    I: IntoIterator<Item = ConfigNode>,
{
    layers.into_iter().try_fold(base, merge)
}

fn checked_shape(node: &ConfigNode) -> Result<Shape, MergeError> {
    match node.shape() {
        Shape::Mixed => Err(MergeError::MixedKeys {
            value: node.to_string(),
        }),
        shape => Ok(shape),
    }
}
