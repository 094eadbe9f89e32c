//! # CLI Behavior
//!
//! This is **one possible UI client** for catview, not the application itself.
//! Each invocation is one page load: fetch the catalog once, apply the
//! query and filter flags, render, exit.
//!
//! Running `catview` with no subcommand lists the catalog.
//!
//! ## Indexes
//!
//! `catview list` numbers the visible items. `catview show 3` resolves `3`
//! against the listing produced by the *same* filter flags, so pass the same
//! `-q`/`--kind`/... to both.
//!
//! ## Module Structure
//!
//! - `commands`: context wiring and per-command handlers
//! - `render`: output formatting
//! - `setup`: argument parsing via clap
//! - `styles`: named styles and themes
//! - `templates`: output templates

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::{report_error, run};
