//! Tracing setup for the admin console.
//!
//! The screens own stdout, so log lines are appended to a file across runs.
//! HTTP client internals are held at `warn` unless `RUST_LOG` names them.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Targets that log every connection and TLS record at debug level.
const HTTP_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

fn level_filter(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "warn" | "warning" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

/// `<target>=warn` for each HTTP target the `RUST_LOG` value does not mention.
fn http_directives(env: &str) -> Vec<Directive> {
    HTTP_TARGETS
        .iter()
        .filter(|target| !env.contains(*target))
        .filter_map(|target| format!("{target}=warn").parse().ok())
        .collect()
}

fn build_filter(level: &str) -> EnvFilter {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    http_directives(&env).into_iter().fold(
        EnvFilter::builder()
            .with_default_directive(level_filter(level).into())
            .parse_lossy(&env),
        EnvFilter::add_directive,
    )
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Start logging to the configured file.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let file = open_log_file(Path::new(&config.file))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(build_filter(&config.level))
        .init();

    info!(file = %config.file, level = %config.level, "console started");
    Ok(())
}

/// Log to stderr instead. Used when the log file cannot be opened.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(true),
        )
        .with(build_filter(level))
        .init();
}
