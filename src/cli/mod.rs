//! Command-line flags and logging setup.

mod flags;
mod parse;

pub use flags::CliFlags;
pub use parse::{ArgError, parse};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log to stderr. `RUST_LOG` wins over `--log`, which wins over `warn`.
pub fn init_logging(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("warn")));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
