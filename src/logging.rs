//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI, so events go to a log file. Directive
//! priority: `LOGDECK_LOG`, then `RUST_LOG`, then the CLI verbosity.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Project-specific filter directive variable.
pub const LOG_ENV: &str = "LOGDECK_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// Verbose wins when both flags are given.
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub const fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Default log file location: `<cache_dir>/logdeck/logdeck.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("logdeck").join("logdeck.log"))
}

/// Install the global subscriber writing to `path` (appending).
///
/// Call once, before the terminal enters raw mode.
pub fn init(verbosity: Verbosity, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    filter_from_sources(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        verbosity,
    )
}

fn filter_from_sources(
    project: Option<String>,
    rust_log: Option<String>,
    verbosity: Verbosity,
) -> EnvFilter {
    // Unparseable directives fall through to the next source.
    for directives in [project, rust_log].into_iter().flatten() {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }

    let level = verbosity.default_level();
    let directive = if verbosity == Verbosity::Verbose {
        format!("{},logdeck=debug", Level::WARN)
    } else {
        level.to_string()
    };

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
    }

    #[test]
    fn test_default_levels() {
        assert_eq!(Verbosity::Quiet.default_level(), Level::ERROR);
        assert_eq!(Verbosity::Normal.default_level(), Level::WARN);
        assert_eq!(Verbosity::Verbose.default_level(), Level::DEBUG);
    }

    #[test]
    fn test_filter_falls_back_to_verbosity() {
        let rendered = |v| filter_from_sources(None, None, v).to_string().to_lowercase();
        assert!(rendered(Verbosity::Quiet).contains("error"));
        assert!(rendered(Verbosity::Normal).contains("warn"));
        assert!(rendered(Verbosity::Verbose).contains("logdeck=debug"));
    }

    #[test]
    fn test_filter_prefers_project_variable() {
        let filter = filter_from_sources(
            Some("logdeck=trace".into()),
            Some("info".into()),
            Verbosity::Quiet,
        );
        assert!(filter.to_string().contains("logdeck=trace"));
    }

    #[test]
    fn test_filter_skips_unparseable_directives() {
        let filter = filter_from_sources(
            Some("logdeck=loud".into()),
            Some("info".into()),
            Verbosity::Quiet,
        );
        assert_eq!(filter.to_string().to_lowercase(), "info");
    }

    #[test]
    fn test_default_log_path_is_under_logdeck_dir() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("logdeck/logdeck.log"));
        }
    }
}
