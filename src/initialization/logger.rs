//! Logger initialization.

use std::io::{self, Write};

use colored::*;
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Installs the global logger.
///
/// `RUST_LOG` is honoured for per-module directives; `level` then sets the
/// default for everything else. HTTP client internals stay at `info` even when
/// the exporter runs at `debug`, since per-request connection chatter would
/// drown out the per-domain lines.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for noisy in ["reqwest", "hyper", "hyper_util"] {
        builder.filter_module(noisy, level.min(LevelFilter::Info));
    }

    match format {
        LogFormat::Json => builder.format(write_json),
        LogFormat::Plain => builder.format(write_plain),
    };

    builder.try_init()?;
    Ok(())
}

/// `{"ts":<millis>,"level":..,"target":..,"msg":..}`, one object per line.
fn write_json(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let msg = serde_json::to_string(&record.args().to_string())
        .unwrap_or_else(|_| "\"\"".into());
    writeln!(
        buf,
        "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
        chrono::Utc::now().timestamp_millis(),
        record.level(),
        record.target(),
        msg
    )
}

fn write_plain(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let level = record.level();
    let (emoji, colored_level) = match level {
        Level::Error => ("❌", level.to_string().red()),
        Level::Warn => ("⚠️", level.to_string().yellow()),
        Level::Info => ("✔️", level.to_string().green()),
        Level::Debug => ("🔍", level.to_string().blue()),
        Level::Trace => ("🔬", level.to_string().purple()),
    };

    writeln!(
        buf,
        "{} {} [{}] {}",
        emoji,
        record.target().cyan(),
        colored_level,
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Json);
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Plain);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }
}
