//! # Project Catalog Core
//!
//! Shared, WASM-safe logic for the project catalog: data models, the
//! category enumeration, the catalog filter, the filter state container,
//! display messages, and the "latest request wins" filter session.
//!
//! This crate contains no tokio, filesystem I/O, or other native-only
//! dependencies. It compiles to both native targets and
//! `wasm32-unknown-unknown`, so the same filter runs in the browser and on
//! the server.

pub mod category;
pub mod display;
pub mod filter;
pub mod models;
pub mod session;
pub mod state;
