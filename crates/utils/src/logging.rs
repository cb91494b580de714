use crate::config::{LogFormat, LoggingConfig};
use go_struct_core::{Error, Result};
use tracing::{span, Level, Span};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, trace, warn};

/// Initialize the tracing system
///
/// Installs a global subscriber writing to stderr, filtered by
/// `config.filter`. Fails if the filter does not parse or if a global
/// subscriber is already installed, whether by an earlier call or by the
/// host process.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter).map_err(|e| {
        Error::configuration(format!("invalid log filter '{}': {e}", config.filter))
    })?;

    let installed = match config.format {
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .compact()
                .with_target(false)
                .with_thread_ids(false)
                .with_level(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
        }
        LogFormat::Full => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
        }
    };

    installed.map_err(|e| Error::configuration(format!("failed to install logger: {e}")))?;
    debug!(filter = %config.filter, format = ?config.format, "logging initialised");
    Ok(())
}

/// Reads the logging configuration from the environment and initialises
/// tracing with it.
pub fn init_from_env() -> Result<()> {
    let config = LoggingConfig::from_env()?;
    init(&config)
}

/// Create a span covering one call across the C boundary
pub fn boundary_span(symbol: &'static str) -> Span {
    span!(Level::TRACE, "ffi", symbol = %symbol)
}
