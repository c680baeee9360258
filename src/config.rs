//! TOML configuration.
//!
//! ```toml
//! [catalog]
//! path = "./content/catalog.json"   # omit to use the bundled catalog
//!
//! [server]
//! bind = "127.0.0.1:7340"
//!
//! [filter]
//! settle_ms = 0
//!
//! [contact]
//! recipient = "info@bdabuilt.com.au"
//!
//! [logging]
//! filter = "info"
//! ```
//!
//! Every section is optional.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Content file (`.json` or `.toml`). `None` selects the bundled catalog.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FilterConfig {
    /// Delay before a live filter request is computed; newer input arriving
    /// within the window supersedes it.
    #[serde(default)]
    pub settle_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    #[serde(default = "default_recipient")]
    pub recipient: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: default_recipient(),
        }
    }
}

fn default_recipient() -> String {
    "info@bdabuilt.com.au".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

const MAX_SETTLE_MS: u64 = 5_000;

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if self.server.bind.trim().is_empty() {
            anyhow::bail!("server.bind must not be empty");
        }

        if self.filter.settle_ms > MAX_SETTLE_MS {
            anyhow::bail!("filter.settle_ms must be <= {}", MAX_SETTLE_MS);
        }

        if !self.contact.recipient.contains('@') {
            anyhow::bail!(
                "contact.recipient must be an email address, got '{}'",
                self.contact.recipient
            );
        }

        if self.logging.filter.trim().is_empty() {
            anyhow::bail!("logging.filter must not be empty");
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Relative content paths are resolved against the config file's directory.
    if let Some(catalog_path) = &config.catalog.path {
        if catalog_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.catalog.path = Some(dir.join(catalog_path));
            }
        }
    }

    config.validate()?;
    Ok(config)
}

/// Load `path`, or fall back to defaults when `path` is the untouched CLI
/// default and does not exist.
pub fn load_or_default(path: &Path, is_default_path: bool) -> Result<Config> {
    if is_default_path && !path.exists() {
        return Ok(Config::minimal());
    }
    load_config(path)
}
