//! Config error types for logdeck.
//!
//! Provides Cargo-style error messages with typo suggestions for unknown keys.

use std::fmt;
use std::path::PathBuf;

use crate::config::types::KNOWN_KEYS;

/// Error loading or parsing a config file.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading the config file.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error.
    Parse {
        path: PathBuf,
        message: String,
        suggestion: Option<String>,
    },

    /// Semantic error after parsing (bad URL, zero page size).
    Validation { path: PathBuf, message: String },
}

impl ConfigError {
    /// Wrap a YAML error, suggesting the closest known key when the error
    /// names an unknown one.
    pub fn from_yaml_error(path: PathBuf, err: impl fmt::Display) -> Self {
        let message = err.to_string();
        let suggestion = unknown_key(&message).and_then(closest_known_key);
        ConfigError::Parse {
            path,
            message,
            suggestion,
        }
    }

    /// Format error in Cargo-style format.
    pub fn format_cargo_style(&self) -> String {
        match self {
            ConfigError::Io { path, source } => {
                format!(
                    "error: cannot read config file\n  --> {}\n  |\n  = {}\n",
                    path.display(),
                    source
                )
            }
            ConfigError::Parse {
                path,
                message,
                suggestion,
            } => {
                let mut output = format!("error: {}\n  --> {}\n  |\n", message, path.display());
                if let Some(suggestion) = suggestion {
                    output.push_str(&format!("  = help: did you mean `{}`?\n", suggestion));
                }
                output
            }
            ConfigError::Validation { path, message } => {
                format!("error: {}\n  --> {}\n  |\n", message, path.display())
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_cargo_style())
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Extract `name` from serde's "unknown field `name`" wording.
fn unknown_key(message: &str) -> Option<&str> {
    let rest = message.split("unknown field `").nth(1)?;
    rest.split('`').next()
}

fn closest_known_key(key: &str) -> Option<String> {
    KNOWN_KEYS
        .iter()
        .map(|known| (known, strsim::jaro_winkler(key, known)))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(known, _)| known.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_extraction() {
        let msg = "unknown field `pagesize`, expected one of `url`, `page_size`";
        assert_eq!(unknown_key(msg), Some("pagesize"));
        assert_eq!(unknown_key("invalid type: string"), None);
    }

    #[test]
    fn test_closest_known_key() {
        assert_eq!(closest_known_key("pagesize").as_deref(), Some("page_size"));
        assert_eq!(closest_known_key("urll").as_deref(), Some("url"));
        assert_eq!(closest_known_key("zzzzzz"), None);
    }

    #[test]
    fn test_validation_format() {
        let err = ConfigError::Validation {
            path: PathBuf::from("logdeck.yaml"),
            message: "page_size must be positive".into(),
        };
        let text = err.to_string();
        assert!(text.starts_with("error: page_size must be positive"));
        assert!(text.contains("--> logdeck.yaml"));
    }
}
