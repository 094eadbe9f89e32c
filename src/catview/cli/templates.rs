//! # CLI Templates
//!
//! Terminal output is produced from minijinja templates kept as standalone
//! files in `templates/` and embedded here at compile time.
//!
//! Conventions:
//!
//! 1. The environment runs with `trim_blocks` and `lstrip_blocks`, so a line
//!    holding only a block tag produces no output. Every emitted line break is
//!    one you can see in the template.
//! 2. Never indent a block tag to indent output: `lstrip_blocks` eats the
//!    indentation. Compute markers and padding in Rust instead.
//! 3. Templates pick style *names*; the theme owns colors. When a style
//!    depends on data, the renderer passes the style name as a field (e.g.
//!    `row.kind_style`) instead of branching in the template.

pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const DETAIL_TEMPLATE: &str = include_str!("templates/detail.tmp");
pub const FACETS_TEMPLATE: &str = include_str!("templates/facets.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const ERROR_TEMPLATE: &str = include_str!("templates/error.tmp");
