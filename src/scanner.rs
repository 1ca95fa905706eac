use crate::loader::LayerFormat;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;

/// List the configuration prefixes in `dir`.
///
/// A prefix is the stem of a `.toml` or `.json` file whose stem is made of
/// ASCII letters and underscores only, so `app.toml` yields `app` while the
/// override `app.acme.toml` yields nothing. Subdirectories are not scanned.
/// A missing directory has no prefixes.
pub fn discover_prefixes(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "config directory not found");
        return Ok(Vec::new());
    }

    let mut prefixes = BTreeSet::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(prefix) = prefix_of(file_name) {
            prefixes.insert(prefix.to_string());
        }
    }

    Ok(prefixes.into_iter().collect())
}

fn prefix_of(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    LayerFormat::from_extension(ext)?;
    let valid = !stem.is_empty() && stem.chars().all(|c| c.is_ascii_alphabetic() || c == '_');
    valid.then_some(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_of_accepts_base_files_only() {
        assert_eq!(prefix_of("app.toml"), Some("app"));
        assert_eq!(prefix_of("database.json"), Some("database"));
        assert_eq!(prefix_of("mail_queue.toml"), Some("mail_queue"));
        assert_eq!(prefix_of("app.acme.toml"), None);
        assert_eq!(prefix_of("app.acme.local.json"), None);
        assert_eq!(prefix_of("app2.toml"), None);
        assert_eq!(prefix_of("app.yaml"), None);
        assert_eq!(prefix_of(".toml"), None);
        assert_eq!(prefix_of("README"), None);
    }
}
