//! Config discovery for logdeck.
//!
//! Walks parent directories to find `logdeck.yaml` and checks for a global
//! config at `<config_dir>/logdeck/config.yaml`.

use std::path::{Path, PathBuf};

/// Project config filename to search for in parent directories.
pub const PROJECT_CONFIG_NAME: &str = "logdeck.yaml";

/// Global config filename within the logdeck config directory.
pub const GLOBAL_CONFIG_NAME: &str = "config.yaml";

/// Paths of the config files that exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryResult {
    pub project_config: Option<PathBuf>,
    pub global_config: Option<PathBuf>,
}

/// Path of the global config file, whether or not it exists.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("logdeck").join(GLOBAL_CONFIG_NAME))
}

/// Discover config files starting from the current working directory.
pub fn discover() -> DiscoveryResult {
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.canonicalize().unwrap_or(dir),
        Err(_) => {
            return DiscoveryResult {
                project_config: None,
                global_config: existing(global_config_path()),
            }
        }
    };
    discover_from(&cwd, global_config_path())
}

/// Discover configs walking up from `start`, with an explicit global path.
pub fn discover_from(start: &Path, global: Option<PathBuf>) -> DiscoveryResult {
    let project_config = start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_NAME))
        .find(|path| path.is_file());

    let result = DiscoveryResult {
        project_config,
        global_config: existing(global),
    };
    tracing::debug!(?result, "config discovery");
    result
}

fn existing(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| p.is_file())
}
