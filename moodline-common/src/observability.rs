//! Centralised `tracing` setup.
//!
//! Call [`init_logging`] once near process start. Subsequent calls are
//! no-ops that hand back the originally resolved file path, so tests and
//! library consumers may call it defensively.
//!
//! Events always go to stderr (stdout is reserved for rendered results)
//! and optionally to a daily-rolling file when a log directory is
//! configured, explicitly or via `MOODLINE_LOG_DIR`.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Output encoding for structured logs.
#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Text,
    Json,
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Logical name of the component (used for the log file name).
    pub app_name: &'static str,
    /// Optional directory for a rolling file sink. If `None`, we consult
    /// `MOODLINE_LOG_DIR`; if that is unset too, logging is stderr-only.
    pub log_dir: Option<PathBuf>,
    /// Preferred log encoding.
    pub format: LogFormat,
    /// Default filter applied when `RUST_LOG` is unset.
    pub default_filter: &'static str,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "moodline",
            log_dir: None,
            format: LogFormat::Text,
            default_filter: "info",
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialise the global `tracing` subscriber.
///
/// Returns the log file path when a file sink is active, `None` when
/// logging is stderr-only.
///
/// ```
/// use moodline_common::observability::{LogConfig, init_logging};
///
/// let path = init_logging(LogConfig::default()).expect("tracing init");
/// assert!(path.is_none() || path.unwrap().ends_with("moodline.log"));
/// ```
pub fn init_logging(config: LogConfig) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_filter));

    let mut layers: Vec<BoxedLayer> = vec![env_filter.boxed()];

    layers.push(match config.format {
        LogFormat::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    });

    let file_path = match resolve_log_dir(config.log_dir.as_deref()) {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

            let log_filename = format!("{}.log", config.app_name);
            let (writer, guard) =
                tracing_appender::non_blocking(rolling::daily(&dir, &log_filename));
            let _ = LOG_GUARD.set(guard);

            layers.push(match config.format {
                LogFormat::Text => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
                LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
            });

            Some(dir.join(log_filename))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_PATH.set(file_path.clone());
    tracing::debug!(file = ?file_path, "logging initialised");
    Ok(file_path)
}

fn resolve_log_dir(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var("MOODLINE_LOG_DIR").ok().map(PathBuf::from))
        .map(|dir| expand_home(&dir))
}

fn expand_home(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_prefix_expands_against_the_environment() {
        if let Ok(home) = std::env::var("HOME") {
            let expanded = expand_home(Path::new("~/logs"));
            assert_eq!(expanded, PathBuf::from(home).join("logs"));
        }
    }

    #[test]
    fn absolute_paths_pass_through_untouched() {
        let expanded = expand_home(Path::new("/var/log/moodline"));
        assert_eq!(expanded, PathBuf::from("/var/log/moodline"));
    }
}
