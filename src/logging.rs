//! Log output.
//!
//! Logs go to stderr through `tracing-subscriber`'s fmt layer, so stdout
//! stays clean for command output. `RUST_LOG` overrides the configured
//! `[logging].filter` directive.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

pub fn init(config: &LoggingConfig) -> Result<()> {
    let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| config.filter.clone());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter: '{}'", directive))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}
