//! `logdeck config show`.
//!
//! Respects NO_COLOR via the colored crate.

use crate::config::{self, Config};
use colored::Colorize;
use std::path::Path;

/// Print the effective configuration and the files it came from.
pub fn show(explicit: Option<&Path>) -> Result<(), i32> {
    let discovery = config::discover();
    match config::load(&discovery, explicit) {
        Ok(cfg) => {
            print!("{}", render(&cfg));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            Err(1)
        }
    }
}

fn render(cfg: &Config) -> String {
    let mut out = String::new();
    if cfg.sources.is_empty() {
        out.push_str(&format!("{}\n", "No config found. Using defaults.".dimmed()));
    } else {
        for path in &cfg.sources {
            out.push_str(&format!("Using: {}\n", path.display().to_string().dimmed()));
        }
    }
    out.push('\n');
    out.push_str(&format!("{}: {}\n", "url".cyan(), cfg.url));
    out.push_str(&format!("{}: {}\n", "page_size".cyan(), cfg.page_size));
    out.push_str(&format!(
        "{}: {}\n",
        "suggest_debounce_ms".cyan(),
        cfg.suggest_debounce.as_millis()
    ));
    out
}
