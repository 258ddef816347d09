//! Logger setup for the CLI and for library callers that want the same
//! output.

use std::io::Write;

use colored::Colorize;
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies that log at info or debug for every request or parse.
const NOISY_MODULES: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("cookie_store", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
];

/// Installs an `env_logger` backend.
///
/// `RUST_LOG` is read first and `level` then overrides it for this crate and
/// as the global default, so `--log-level` always wins. Plain output is one
/// colored line per record:
///
/// ```text
/// 2026-01-01 12:00:00 INFO  site_harvest::run::pipeline Successfully scraped https://example.com
/// ```
///
/// JSON output is one object per line with `ts` (Unix milliseconds),
/// `level`, `target` and `msg`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already
/// installed in this process.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, filter) in NOISY_MODULES {
        builder.filter_module(module, *filter);
    }
    builder.filter_module("site_harvest", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = serde_json::json!({
                    "ts": chrono::Utc::now().timestamp_millis(),
                    "level": record.level().as_str(),
                    "target": record.target(),
                    "msg": record.args().to_string(),
                });
                writeln!(buf, "{}", line)
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                let label = format!("{:<5}", record.level());
                let label = match record.level() {
                    Level::Error => label.red().bold(),
                    Level::Warn => label.yellow(),
                    Level::Info => label.green(),
                    Level::Debug => label.blue(),
                    Level::Trace => label.purple(),
                };
                writeln!(
                    buf,
                    "{} {} {} {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                    label,
                    record.target().cyan(),
                    record.args()
                )
            });
        }
    }

    builder.try_init()?;
    Ok(())
}
