//! Tracing configuration and log routing.
//!
//! Both binaries log to stdout with a compact formatter and, unless disabled, to a file.
//! `ECSS_NAVIGATOR_LOG_FILE` selects the file: a path appends to that file, `off` disables file
//! logging, and an unset variable writes to `logs/<binary>.log`.
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_ENV: &str = "ECSS_NAVIGATOR_LOG_FILE";
const LOG_DIR: &str = "logs";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where the file layer should write, resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Only stdout logging.
    Disabled,
    /// Append to an explicit file path.
    File(PathBuf),
    /// Write `<file_name>` inside the default `logs/` directory.
    Rolling {
        /// Directory holding the log file.
        directory: PathBuf,
        /// File name inside `directory`.
        file_name: String,
    },
}

impl LogTarget {
    /// Resolve the target from the raw value of `ECSS_NAVIGATOR_LOG_FILE`.
    pub fn resolve(raw: Option<&str>, app_name: &str) -> Self {
        match raw.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("off") => Self::Disabled,
            Some(value) if !value.is_empty() => Self::File(PathBuf::from(value)),
            _ => Self::Rolling {
                directory: PathBuf::from(LOG_DIR),
                file_name: format!("{app_name}.log"),
            },
        }
    }
}

/// Configure tracing subscribers for stdout and file logging.
///
/// `RUST_LOG` controls filtering and defaults to `info`. `app_name` names the default log file.
pub fn init_tracing(app_name: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    let target = LogTarget::resolve(std::env::var(LOG_FILE_ENV).ok().as_deref(), app_name);
    match open_writer(&target) {
        Some(writer) => {
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .compact();
            registry.with(file_layer).init();
        }
        None => registry.init(),
    }
}

fn open_writer(target: &LogTarget) -> Option<NonBlocking> {
    let (non_blocking, guard) = match target {
        LogTarget::Disabled => return None,
        LogTarget::File(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|err| eprintln!("Failed to open log file {}: {err}", path.display()))
                .ok()?;
            tracing_appender::non_blocking(file)
        }
        LogTarget::Rolling {
            directory,
            file_name,
        } => {
            if let Err(err) = std::fs::create_dir_all(directory) {
                eprintln!("Failed to create {} directory: {err}", directory.display());
                return None;
            }
            tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
        }
    };
    let _ = LOG_GUARD.set(guard);
    Some(non_blocking)
}
