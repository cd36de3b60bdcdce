//! Structured logging for the capture CLI.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use tracing_subscriber::{
    EnvFilter,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log format configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable pretty format for development.
    Pretty,
    /// JSON format for log aggregation.
    Json,
}

impl LogFormat {
    /// Determines log format from the `LOG_FORMAT` environment variable.
    ///
    /// - `json` => JSON format
    /// - `pretty` or unset => Pretty format
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("LOG_FORMAT").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Initializes tracing with output on stderr.
///
/// Stdout is reserved for the capture outcome. The level filter comes from
/// `RUST_LOG` and defaults to `info`; span timings are only emitted when it
/// asks for `debug` or finer.
pub fn init_observability(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let span_events = span_events(filter.max_level_hint());

    let registry = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer()
        .with_target(true)
        .with_span_events(span_events)
        .with_writer(io::stderr);

    match format {
        LogFormat::Pretty => {
            registry.with(layer.with_ansi(io::stderr().is_terminal())).init();
        }
        LogFormat::Json => {
            registry.with(layer.json().with_current_span(true).with_span_list(false)).init();
        }
    }
}

/// Span lifecycle events worth logging at the given verbosity.
fn span_events(max_level: Option<LevelFilter>) -> FmtSpan {
    match max_level {
        Some(level) if level >= LevelFilter::DEBUG => FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    }
}
