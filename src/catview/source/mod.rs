//! # Source Layer
//!
//! The [`CatalogSource`] trait is the data-source seam: one call, one document.
//! Nothing here retries, caches or merges partial results. A failed fetch is a
//! [`CatalogError`](crate::error::CatalogError) and the caller decides how to
//! surface it.
//!
//! ## Implementations
//!
//! - [`http::HttpSource`]: GET against the catalog endpoint. A non-2xx status
//!   is `CatalogError::Unavailable`.
//! - [`file::FileSource`]: a static JSON document of the same shape on disk.
//! - [`memory::InMemorySource`]: fixed items (or a fixed failure) for tests.
//!
//! [`SourceSpec`] picks between the first two from a location string. The
//! choice is explicit: a source never falls back to another one on failure.

use crate::error::Result;
use crate::model::CatalogDocument;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

pub mod file;
pub mod http;
pub mod memory;

/// Default catalog endpoint when neither flag, environment nor config set one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/catalog";

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the whole catalog document in a single attempt.
    async fn fetch(&self) -> Result<CatalogDocument>;

    /// Human-readable location, used in logs and messages.
    fn describe(&self) -> String;
}

/// Where the catalog comes from, as written by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Http(String),
    File(PathBuf),
}

impl SourceSpec {
    /// `http://` and `https://` locations are endpoints, anything else a file path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceSpec::Http(trimmed.to_string())
        } else {
            let path = trimmed.strip_prefix("file://").unwrap_or(trimmed);
            SourceSpec::File(PathBuf::from(path))
        }
    }

    pub fn open(&self) -> Result<Box<dyn CatalogSource>> {
        Ok(match self {
            SourceSpec::Http(url) => Box::new(http::HttpSource::new(url.clone())?),
            SourceSpec::File(path) => Box::new(file::FileSource::new(path.clone())),
        })
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSpec::Http(url) => f.write_str(url),
            SourceSpec::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[async_trait]
impl<S: CatalogSource + ?Sized> CatalogSource for Box<S> {
    async fn fetch(&self) -> Result<CatalogDocument> {
        (**self).fetch().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
