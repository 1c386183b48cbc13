//! Command-line interface for logdeck.

use crate::model::LogLevel;
use crate::query::parse_bound;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "logdeck")]
#[command(about = "Browse and search the activity log of a media-download service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the log store (overrides config and LOGDECK_URL)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Records per page
    #[arg(long, value_name = "N", value_parser = parse_page_size)]
    pub page_size: Option<usize>,

    /// Initial level filter (INFO, WARN, ERROR)
    #[arg(long, value_name = "LEVEL", value_parser = parse_level)]
    pub level: Option<LogLevel>,

    /// Initial search text
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Only show records at or after this date/datetime (ISO 8601)
    #[arg(long, value_name = "ISO", value_parser = parse_bound)]
    pub since: Option<NaiveDateTime>,

    /// Only show records at or before this date/datetime (ISO 8601)
    #[arg(long, value_name = "ISO", value_parser = parse_bound)]
    pub until: Option<NaiveDateTime>,

    /// Use this config file instead of the discovered logdeck.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write diagnostics to this file (default: <cache dir>/logdeck/logdeck.log)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Debug-level diagnostics
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Errors only
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Available subcommands for logdeck.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Config file commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show effective configuration
    Show,
}

fn parse_page_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("`{}` is not a positive integer", raw)),
        Ok(n) => Ok(n),
    }
}

fn parse_level(raw: &str) -> Result<LogLevel, String> {
    raw.parse()
}
