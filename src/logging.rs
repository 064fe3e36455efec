//! Subscriber construction.
//!
//! Subscribers are built from explicit settings and installed as scoped
//! defaults by the caller, so verbosity changes never leak past a run.
use crate::config::LogSettings;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Build a fmt subscriber at the configured level writing to `writer`.
///
/// `RUST_LOG` directives, when present, refine the filter.
pub fn subscriber<W>(
    settings: LogSettings,
    writer: W,
    ansi: bool,
) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(settings.level()).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .finish()
}

/// Stderr subscriber; colors only when stderr is a terminal.
pub fn stderr_subscriber(settings: LogSettings) -> impl tracing::Subscriber + Send + Sync {
    subscriber(settings, std::io::stderr, std::io::stderr().is_terminal())
}
