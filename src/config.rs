use crate::error::{Result, ScoreDocError};
use crate::types::config::ScoreDocConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "scoredoc.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".scoredoc/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/scoredoc/config.toml";

/// Load the layered configuration for `root`. Missing files are skipped; with
/// no files at all the defaults apply.
pub fn load_config(root: &Path) -> Result<ScoreDocConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<ScoreDocConfig> {
    let mut merged = Value::Table(Map::new());
    let mut layers = 0;
    if let Some(path) = global_path {
        layers += merge_file_if_exists(&mut merged, path)?;
    }
    layers += merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?;
    layers += merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    if layers == 0 {
        tracing::debug!("no config files found under {}, using defaults", root.display());
        return Ok(ScoreDocConfig::default());
    }

    let cfg: ScoreDocConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ScoreDocError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    tracing::debug!(layers, "loaded configuration");
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<usize> {
    if !path.exists() {
        return Ok(0);
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(1)
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ScoreDocError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
