//! Configuration loading with include resolution.
//!
//! - `includes` composes configs from multiple files, relative to the
//!   including file
//! - circular includes are rejected
//! - later definitions override earlier ones per alias; the including file
//!   wins over everything it includes

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use lintignore_types::{CONFIG_FILE_NAME, ConfigFile};

/// Maximum depth for include resolution.
const MAX_INCLUDE_DEPTH: usize = 10;

/// Load `path` with every include resolved and merged.
pub fn load_config_with_includes(path: &Path) -> Result<ConfigFile> {
    let mut visited = HashSet::new();
    load_config_recursive(path, &mut visited, 0)
}

/// Load the explicit config, or the nearest `lintignore.toml` above
/// `start_dir`, or fall back to the built-in (empty) config.
pub fn load_config(explicit: Option<&Path>, start_dir: &Path) -> Result<ConfigFile> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(start_dir),
    };

    let Some(path) = path else {
        debug!("No config file found, using built-in config");
        return Ok(ConfigFile::built_in());
    };

    let config = load_config_with_includes(&path)?;
    debug!(
        "Loaded {} alias(es) from '{}'",
        config.aliases.len(),
        path.display()
    );
    Ok(config)
}

/// Walk up from `start_dir` looking for `lintignore.toml`.
pub fn discover_config(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

fn load_config_recursive(
    path: &Path,
    visited: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<ConfigFile> {
    if depth > MAX_INCLUDE_DEPTH {
        bail!(
            "Include depth exceeded maximum of {} levels at '{}'",
            MAX_INCLUDE_DEPTH,
            path.display()
        );
    }

    let canonical = path
        .canonicalize()
        .with_context(|| format!("canonicalize path '{}'", path.display()))?;

    if !visited.insert(canonical) {
        bail!("Circular include detected: '{}'", path.display());
    }

    debug!("Loading config from '{}' (depth {})", path.display(), depth);

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let config: ConfigFile =
        toml::from_str(&text).with_context(|| format!("parse config '{}'", path.display()))?;

    if config.includes.is_empty() {
        return Ok(config);
    }

    let base_dir = path.parent().unwrap_or(Path::new("."));
    let mut merged = ConfigFile::built_in();

    for include_path in &config.includes {
        let full_path = base_dir.join(include_path);
        debug!(
            "Resolving include '{}' relative to '{}'",
            include_path,
            base_dir.display()
        );

        if !full_path.exists() {
            bail!(
                "Included config file not found: '{}' (resolved from '{}')",
                full_path.display(),
                include_path
            );
        }

        let included = load_config_recursive(&full_path, visited, depth + 1)?;
        merged = merge_configs(merged, included);
    }

    let main_without_includes = ConfigFile {
        includes: vec![],
        ..config
    };
    Ok(merge_configs(merged, main_without_includes))
}

/// Merge two configs; `other` wins per alias and for the unused code.
fn merge_configs(base: ConfigFile, other: ConfigFile) -> ConfigFile {
    let mut aliases = base.aliases;
    aliases.extend(other.aliases);

    ConfigFile {
        includes: vec![],
        aliases,
        unused_suppression_code: other.unused_suppression_code.or(base.unused_suppression_code),
    }
}
