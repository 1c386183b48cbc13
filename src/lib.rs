// Library interface for logdeck
// Exposes the view machinery to the binary and integration tests

pub mod app;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod dispatch;
pub mod event;
pub mod fetcher;
pub mod handlers;
pub mod inspector;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod query;
pub mod signal;
pub mod suggest;
pub mod tui;
pub mod view;
