pub mod api;
pub mod core;
pub mod report;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
