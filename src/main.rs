//! # Project Catalog CLI (`catalog`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `catalog search [QUERY]` | Filter projects by text and category |
//! | `catalog get <slug>` | Show one project in full |
//! | `catalog categories` | List the category tabs with counts |
//! | `catalog browse` | Filter interactively from stdin |
//! | `catalog check` | Validate the catalog content |
//! | `catalog serve` | Start the HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! catalog search melbourne
//! catalog search --category retail --format json
//! catalog get eastgate-retail-precinct
//! catalog serve --config ./config/catalog.toml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use project_catalog::search::OutputFormat;
use project_catalog::{browse, config, logging, search, server};

const DEFAULT_CONFIG: &str = "./config/catalog.toml";

/// Project catalog: filtered project search, site content API, and
/// contact-form intake.
#[derive(Parser)]
#[command(name = "catalog", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When the default path does not exist, built-in defaults and the
    /// bundled catalog are used.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter projects by category and free text.
    ///
    /// The query matches title, location and description, case-insensitively.
    /// An empty query lists every project in the category.
    Search {
        /// Text to look for.
        query: Option<String>,

        /// Category tab: `all`, `commercial`, `industrial`, `retail`,
        /// `hospitality`, `healthcare`, or `education`.
        #[arg(long)]
        category: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show a project by slug.
    Get {
        slug: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List category tabs and how many projects each holds.
    Categories,

    /// Filter interactively: one query per line, `:category <c>`, `:clear`, `:quit`.
    Browse,

    /// Load and validate the catalog content.
    Check,

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let is_default = cli.config == PathBuf::from(DEFAULT_CONFIG);
    let cfg = config::load_or_default(&cli.config, is_default)?;
    logging::init(&cfg.logging)?;

    match cli.command {
        Commands::Search {
            query,
            category,
            format,
        } => {
            search::run_search(&cfg, query, category, format)?;
        }
        Commands::Get { slug, format } => {
            search::run_get(&cfg, &slug, format)?;
        }
        Commands::Categories => {
            search::run_categories(&cfg)?;
        }
        Commands::Browse => {
            browse::run_browse(&cfg).await?;
        }
        Commands::Check => {
            search::run_check(&cfg)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
