//! `citra.toml` loading.
//!
//! Lookup order: `--config`, `./citra.toml`, `./.citra.toml`, then
//! `<config dir>/citra/config.toml`. No file means defaults. The edge service
//! environment variables override the `[remote]` section.

use crate::backend::BackendKind;
use anyhow::{bail, Context, Result};
use citra_api_client::config::DEFAULT_EDGE_SERVICE_URL;
use citra_api_client::ClientConfig;
use citra_image::{EdgeMethod, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// File names tried in the working directory.
pub const LOCAL_FILE_NAMES: [&str; 2] = ["citra.toml", ".citra.toml"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub edges: EdgesConfig,
    pub remote: RemoteConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing filter directive
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgesConfig {
    pub backend: BackendKind,
    pub method: EdgeMethod,
}

impl Default for EdgesConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Local,
            method: EdgeMethod::Sobel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EDGE_SERVICE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Values used when a command's flag is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub brightness: i32,
    pub contrast: i32,
    pub threshold: i32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 0,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Config {
    /// Load from `explicit`, or from the first file found in the lookup order.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match locate(explicit)? {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Client settings: `[remote]`, then the environment, then `url_override`.
    pub fn client_config(&self, url_override: Option<&str>) -> Result<ClientConfig> {
        let mut client = ClientConfig::default().with_base_url(&self.remote.base_url);
        if let Some(secs) = self.remote.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        let mut client = client.merge_env()?;
        if let Some(url) = url_override {
            client = client.with_base_url(url);
        }
        Ok(client)
    }
}

fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("Configuration file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }
    Ok(candidates().into_iter().find(|path| path.is_file()))
}

fn candidates() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = LOCAL_FILE_NAMES.iter().map(PathBuf::from).collect();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("citra").join("config.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_full_file() {
        let config = Config::parse(
            r#"
            [logging]
            level = "debug"

            [edges]
            backend = "remote"
            method = "frei-chen"

            [remote]
            base_url = "http://edges.internal:9000"
            timeout_secs = 30

            [defaults]
            brightness = 10
            contrast = -20
            threshold = 90
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.edges.backend, BackendKind::Remote);
        assert_eq!(config.edges.method, EdgeMethod::FreiChen);
        assert_eq!(config.remote.timeout_secs, Some(30));
        assert_eq!(config.defaults.contrast, -20);
        assert_eq!(config.defaults.threshold, 90);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::parse("[defaults]\nbrightness = 5\n").unwrap();
        assert_eq!(config.defaults.brightness, 5);
        assert_eq!(config.defaults.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.edges.method, EdgeMethod::Sobel);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(Config::parse("[edges]\nbackend = \"gpu\"\n").is_err());
        assert!(Config::parse("[edges]\nmethod = \"canny\"\n").is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/citra.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_url_override_wins() {
        let mut config = Config::default();
        config.remote.timeout_secs = Some(5);
        let client = config.client_config(Some("http://127.0.0.1:1234")).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:1234");
    }
}
