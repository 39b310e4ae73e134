use anyhow::{Context, Result};
use calgrid_core::layout::geometry::{DEFAULT_ROW_HEIGHT_PX, RowGeometry};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Base URL of the meeting API (the `/mock/meeting` path is appended)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// JSON file holding the local event snapshot
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Height of one hour row in the week grid
    #[serde(default = "default_row_height_px")]
    pub row_height_px: f64,

    /// Domain used when generating event uids
    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            store_path: default_store_path(),
            row_height_px: default_row_height_px(),
            uid_domain: default_uid_domain(),
        }
    }
}

impl Config {
    pub fn store_path(&self) -> PathBuf {
        expand_path(&self.store_path)
    }

    pub fn geometry(&self) -> RowGeometry {
        RowGeometry::new(self.row_height_px)
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_store_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("calgrid").join("events.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "~/.calgrid/events.json".to_string())
}

fn default_row_height_px() -> f64 {
    DEFAULT_ROW_HEIGHT_PX
}

fn default_uid_domain() -> String {
    "example.com".to_string()
}

/// Get the config directory path (~/.config/calgrid)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("calgrid");
    Ok(config_dir)
}

/// Get the config file path (~/.config/calgrid/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from `path`, or from ~/.config/calgrid/config.toml.
/// A missing file means all defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };

    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    if !(config.row_height_px.is_finite() && config.row_height_px > 0.0) {
        anyhow::bail!(
            "Invalid row_height_px = {} in {}. Expected a positive number of pixels",
            config.row_height_px,
            path.display()
        );
    }

    Ok(config)
}

/// Expand ~ in paths to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("config.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.row_height_px, 64.0);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = \"https://api-dev.example.com\"\nrow_height_px = 48\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.api_base_url, "https://api-dev.example.com");
        assert_eq!(config.geometry().row_height_px, 48.0);
        assert_eq!(config.uid_domain, "example.com");
    }

    #[test]
    fn test_rejects_non_positive_row_height() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "row_height_px = 0\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("/tmp/events.json"), PathBuf::from("/tmp/events.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/cal/events.json"), home.join("cal/events.json"));
        }
    }
}
