//! # Catview Architecture
//!
//! Catview is a **UI-agnostic catalog viewing library**: it fetches a catalog
//! document, narrows it down with a free-text query and per-category filters,
//! and hands structured results to whatever UI asked. The `catview` binary is
//! one such UI.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Loads the catalog once, tracks the LoadState             │
//! │  - Normalizes inputs (selector strings → ItemSelector)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - list / show / facets / config, returning CmdResult       │
//! │  - No I/O assumptions                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Source Layer (source/)                                     │
//! │  - Abstract CatalogSource trait                             │
//! │  - HttpSource, FileSource, InMemorySource (testing)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Filtering
//!
//! [`filter::apply`] is pure and order preserving. Selected values within one
//! category are alternatives; categories constrain together. An item lacking a
//! domain or team never matches a selection in that category.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns Rust values. It
//! never writes to stdout/stderr and never exits the process. Diagnostics go
//! through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: facade over the commands
//! - [`commands`]: one module per operation
//! - [`config`]: `config.json` and endpoint resolution
//! - [`error`]: [`error::CatalogError`] and the crate `Result`
//! - [`filter`]: query matching, filter selections, facets
//! - [`index`]: listing positions and item selectors
//! - [`model`]: the catalog document types
//! - [`source`]: where catalog documents come from
//! - [`state`]: the load lifecycle

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod index;
pub mod model;
pub mod source;
pub mod state;
