//! Runtime configuration read from the process environment

use go_struct_core::{
    Error, Result, ResultExt, DEFAULT_LOG_FILTER, LOG_ANSI_VAR, LOG_FILTER_VAR, LOG_FORMAT_VAR,
};
use std::env;
use std::str::FromStr;

/// Output layout of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "full" => Ok(LogFormat::Full),
            other => Err(Error::configuration(format!(
                "unknown log format '{other}', expected 'compact' or 'full'"
            ))),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `warn` or `go_struct=trace`
    pub filter: String,
    pub ansi: bool,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            ansi: false,
            format: LogFormat::Compact,
        }
    }
}

impl LoggingConfig {
    /// Reads `GO_STRUCT_LOG`, `GO_STRUCT_LOG_ANSI` and `GO_STRUCT_LOG_FORMAT`.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(filter) = read_var(LOG_FILTER_VAR) {
            config.filter = filter;
        }
        if let Some(ansi) = read_var(LOG_ANSI_VAR) {
            config.ansi = parse_flag(&ansi)
                .config_context(|| format!("invalid value for {LOG_ANSI_VAR}"))?;
        }
        if let Some(format) = read_var(LOG_FORMAT_VAR) {
            config.format = format
                .parse::<LogFormat>()
                .config_context(|| format!("invalid value for {LOG_FORMAT_VAR}"))?;
        }

        Ok(config)
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::configuration(format!(
            "expected a boolean flag, got '{other}'"
        ))),
    }
}
