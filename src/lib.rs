pub mod config;
pub mod duration;
pub mod error;
pub mod gcode;
pub mod handlers;
pub mod ledger;
pub mod metrics;
pub mod pricing;
pub mod quote;
pub mod server;
pub mod share;
pub mod signals;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Console log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Initialize tracing/logging
///
/// Note: This function can only be called once. The filter defaults to
/// `info` and can be overridden with `RUST_LOG`.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init(),
    }
}
