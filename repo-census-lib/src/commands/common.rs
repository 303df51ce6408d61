//! Logging setup shared by the commands.

use crate::Result;
use chrono::{SecondsFormat, Utc};
use clap::ValueEnum;
use ohno::IntoAppError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

impl LogLevel {
    const fn filter(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Error => Some("error"),
            Self::Warn => Some("warn"),
            Self::Info => Some("info"),
            Self::Debug => Some("debug"),
            Self::Trace => Some("trace"),
        }
    }
}

/// Send log records to `log_file`, appending one line per record:
/// `[<RFC 3339 timestamp>] [<LEVEL>] <message>`.
///
/// `RUST_LOG` takes precedence over `log_level`. Nothing is set up for [`LogLevel::None`].
pub fn init_logging(log_level: LogLevel, log_file: &Path) -> Result<()> {
    let Some(level) = log_level.filter() else {
        return Ok(());
    };

    if let Some(parent) = log_file.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).into_app_err_with(|| format!("could not create directory '{}'", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .into_app_err_with(|| format!("could not open log file '{}'", log_file.display()))?;

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger installed earlier in this process stays in place.
    let _ = env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{:<5}] {}",
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();

    Ok(())
}
