//! Config types for logdeck.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::suggest::DEFAULT_DEBOUNCE;

/// Base URL used when nothing else is configured.
pub const DEFAULT_URL: &str = "http://localhost:8000";

/// Keys accepted in a config file, for typo suggestions.
pub const KNOWN_KEYS: &[&str] = &["url", "page_size", "suggest_debounce_ms"];

/// Raw config file structure. Unknown keys are rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Base URL of the log store.
    pub url: Option<String>,
    /// Records per page.
    pub page_size: Option<usize>,
    /// Suggestion debounce in milliseconds.
    pub suggest_debounce_ms: Option<u64>,
}

/// Effective configuration after merging files, environment and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub page_size: usize,
    pub suggest_debounce: Duration,
    /// Files that contributed, lowest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            suggest_debounce: DEFAULT_DEBOUNCE,
            sources: Vec::new(),
        }
    }
}

impl Config {
    /// Overlay the keys present in `raw`.
    pub fn merge(&mut self, raw: RawConfig) {
        if let Some(url) = raw.url {
            self.url = url;
        }
        if let Some(page_size) = raw.page_size {
            self.page_size = page_size;
        }
        if let Some(ms) = raw.suggest_debounce_ms {
            self.suggest_debounce = Duration::from_millis(ms);
        }
    }
}
