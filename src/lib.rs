//! # Project Catalog
//!
//! Backend for a commercial construction company's website: the project
//! catalog with category and text filtering, the rest of the site content,
//! and contact-form intake.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────┐
//! │   Content    │──▶│   Catalog (Arc<[_]>)  │
//! │ JSON / TOML  │   └──────────┬───────────┘
//! └──────────────┘              │
//!              ┌────────────────┼─────────────────┐
//!              ▼                ▼                 ▼
//!        ┌──────────┐    ┌────────────┐    ┌────────────┐
//!        │   CLI    │    │ LiveFilter │    │    HTTP    │
//!        │(catalog) │    │  (browse)  │    │   (axum)   │
//!        └──────────┘    └────────────┘    └────────────┘
//! ```
//!
//! The filter itself, the filter state and the request-supersession
//! session live in `project-catalog-core`, which has no runtime
//! dependencies.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`content`] | Catalog loading and validation |
//! | [`search`] | CLI catalog commands |
//! | [`live`] | Live filtering on tokio |
//! | [`browse`] | Interactive stdin browser |
//! | [`contact`] | Contact-form intake |
//! | [`server`] | HTTP server |
//! | [`logging`] | Log subscriber setup |

pub mod browse;
pub mod config;
pub mod contact;
pub mod content;
pub mod live;
pub mod logging;
pub mod search;
pub mod server;
