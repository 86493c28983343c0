use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Where and how verbosely log files are written.
///
/// `LOG_DIR` (default `logs`), `FILE_LOG_LEVEL` (default `debug`) and
/// `ERROR_FILE_LOG_LEVEL` (default `error`). The console follows `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub log_dir: PathBuf,
    pub file_level: String,
    pub error_file_level: String,
}

impl LogSettings {
    pub fn from_env() -> Self {
        let var_or = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.to_string());
        LogSettings {
            log_dir: PathBuf::from(var_or("LOG_DIR", "logs")),
            file_level: var_or("FILE_LOG_LEVEL", "debug"),
            error_file_level: var_or("ERROR_FILE_LOG_LEVEL", "error"),
        }
    }
}

/// Keeps the non-blocking writers flushing; drop it only at shutdown.
pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let guards = Self::setup_logging(&LogSettings::from_env())?;
        Ok(Logger { guards })
    }

    /// Pretty console output plus daily-rolling files: all events as text and
    /// JSON under the log dir, errors again under `<log dir>/error`.
    pub fn setup_logging(settings: &LogSettings) -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
        let error_dir = settings.log_dir.join("error");
        std::fs::create_dir_all(&error_dir)?;

        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,lecturehub_backend=debug"));

        let (general, general_guard) = daily_writer(&settings.log_dir, "lecturehub-backend.log");
        let (errors, error_guard) = daily_writer(&error_dir, "lecturehub-backend-error.log");
        let (json, json_guard) = daily_writer(&settings.log_dir, "lecturehub-backend.json");

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(true)
                    .with_filter(console_filter),
            )
            .with(text_file_layer(general, &settings.file_level))
            .with(text_file_layer(errors, &settings.error_file_level))
            .with(
                fmt::layer()
                    .json()
                    .with_writer(json)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&settings.file_level)),
            )
            .try_init()?;

        Ok(vec![general_guard, error_guard, json_guard])
    }
}

fn daily_writer(dir: &Path, file_name: &str) -> (NonBlocking, WorkerGuard) {
    non_blocking(rolling::daily(dir, file_name))
}

fn text_file_layer<S>(writer: NonBlocking, level: &str) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(EnvFilter::new(level))
}
