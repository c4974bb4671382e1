//! Logger setup for the CLI.

use std::io::{self, IsTerminal, Write};

use colored::{ColoredString, Colorize};
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Modules that are chatty at debug level, with the most they may log.
const QUIET_MODULES: [(&str, LevelFilter); 4] = [
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("rustls", LevelFilter::Warn),
];

/// Installs the global logger.
///
/// `RUST_LOG` is honored, but `level` always applies to this crate and
/// acts as the default for everything else.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(io::stderr().is_terminal());

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, cap) in QUIET_MODULES {
        builder.filter_module(module, cap.min(level));
    }
    builder.filter_module(env!("CARGO_CRATE_NAME"), level);

    match format {
        LogFormat::Plain => builder.format(write_plain),
        LogFormat::Json => builder.format(write_json),
    };

    builder.try_init()?;
    Ok(())
}

fn level_badge(level: Level) -> (&'static str, ColoredString) {
    let name = level.as_str();
    match level {
        Level::Error => ("❌", name.red()),
        Level::Warn => ("⚠️", name.yellow()),
        Level::Info => ("✔️", name.green()),
        Level::Debug => ("🔍", name.blue()),
        Level::Trace => ("🔬", name.purple()),
    }
}

fn write_plain(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let (emoji, level) = level_badge(record.level());
    writeln!(
        buf,
        "{} {emoji} {} [{level}] {}",
        chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
        record.target().cyan(),
        record.args()
    )
}

fn write_json(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let line = serde_json::json!({
        "ts": chrono::Utc::now().timestamp_millis(),
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    });
    writeln!(buf, "{line}")
}
