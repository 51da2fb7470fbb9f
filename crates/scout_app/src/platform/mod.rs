//! Console front end: configuration, logging, prompts and report output.
mod app;
mod config;
mod logging;
mod prompt;

pub use app::run_app;
