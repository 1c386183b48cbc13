//! Config loading for logdeck.
//!
//! Layers, lowest precedence first: defaults, global file, project file,
//! `LOGDECK_URL`. CLI flags are applied by the caller on top.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::discovery::DiscoveryResult;
use crate::config::error::ConfigError;
use crate::config::types::{Config, RawConfig};

/// Environment variable overriding the configured base URL.
pub const URL_ENV: &str = "LOGDECK_URL";

/// Load and parse a YAML config file.
fn load_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    // An empty file is a valid, empty config.
    if content.trim().is_empty() {
        return Ok(RawConfig::default());
    }

    serde_saphyr::from_str(&content)
        .map_err(|e| ConfigError::from_yaml_error(path.to_path_buf(), e))
}

/// Check the values a single file sets.
fn validate_raw(path: &Path, raw: &RawConfig) -> Result<(), ConfigError> {
    if raw.page_size == Some(0) {
        return Err(ConfigError::Validation {
            path: path.to_path_buf(),
            message: "`page_size` must be a positive integer".to_string(),
        });
    }
    if let Some(url) = &raw.url {
        validate_url(url).map_err(|message| ConfigError::Validation {
            path: path.to_path_buf(),
            message,
        })?;
    }
    Ok(())
}

/// A base URL must be non-empty http(s).
pub fn validate_url(url: &str) -> Result<(), String> {
    let url = url.trim();
    let host = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"));
    match host {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(format!("`{}` is not an http(s) base URL", url)),
    }
}

fn apply_file(config: &mut Config, path: &Path) -> Result<(), ConfigError> {
    let raw = load_file(path)?;
    validate_raw(path, &raw)?;
    config.merge(raw);
    config.sources.push(path.to_path_buf());
    Ok(())
}

/// Load the global file, then `explicit` if given or else the discovered
/// project file. Environment overrides are not applied here.
pub fn load_layers(
    discovery: &DiscoveryResult,
    explicit: Option<&Path>,
) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Some(global) = &discovery.global_config {
        apply_file(&mut config, global)?;
    }

    let project: Option<PathBuf> = explicit
        .map(Path::to_path_buf)
        .or_else(|| discovery.project_config.clone());
    if let Some(project) = project {
        apply_file(&mut config, &project)?;
    }

    Ok(config)
}

/// Apply an environment-provided base URL, if set and non-empty.
pub fn apply_env_url(config: &mut Config, env_url: Option<String>) {
    if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
        config.url = url;
    }
}

/// Full load used by the binary: files, then `LOGDECK_URL`.
pub fn load(discovery: &DiscoveryResult, explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = load_layers(discovery, explicit)?;
    apply_env_url(&mut config, std::env::var(URL_ENV).ok());
    Ok(config)
}
