//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for
//! catalog operations, whatever the UI.
//!
//! The facade:
//! - **Loads** the catalog once through its [`CatalogSource`] and tracks the
//!   outcome as a [`LoadState`]
//! - **Normalizes inputs** (selector strings into [`ItemSelector`]s)
//! - **Dispatches** to the matching `commands::*::run`
//!
//! It does no printing and no formatting; it returns [`CmdResult`]s.
//!
//! `CatalogApi<S: CatalogSource>` is generic over the source, so tests run it
//! against an [`InMemorySource`](crate::source::memory::InMemorySource).

use crate::commands;
use crate::error::{CatalogError, Result};
use crate::filter::CatalogQuery;
use crate::index::ItemSelector;
use crate::model::Catalog;
use crate::source::CatalogSource;
use crate::state::LoadState;
use std::path::Path;
use std::str::FromStr;

pub struct CatalogApi<S: CatalogSource> {
    source: S,
    state: LoadState,
}

impl<S: CatalogSource> CatalogApi<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: LoadState::new(),
        }
    }

    /// Fetches the catalog. Only the first call hits the source; later calls
    /// report the outcome already recorded.
    pub async fn load(&mut self) -> Result<()> {
        match &self.state {
            LoadState::Loaded(_) => return Ok(()),
            LoadState::Failed(message) => return Err(CatalogError::Api(message.clone())),
            LoadState::Loading => {}
        }

        tracing::debug!(source = %self.source.describe(), "loading catalog");
        match self.source.fetch().await {
            Ok(document) => {
                let catalog = Catalog::from_document(document);
                tracing::info!(items = catalog.len(), "catalog loaded");
                self.state.succeed(catalog);
                Ok(())
            }
            Err(err) => {
                self.state.fail(err.to_string());
                Err(err)
            }
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn list(&self, query: &CatalogQuery) -> Result<commands::CmdResult> {
        commands::list::run(self.catalog()?, query)
    }

    pub fn show(&self, query: &CatalogQuery, selector: &str) -> Result<commands::CmdResult> {
        let selector = ItemSelector::from_str(selector).map_err(CatalogError::Api)?;
        commands::show::run(self.catalog()?, query, &selector)
    }

    pub fn facets(&self, query: &CatalogQuery) -> Result<commands::CmdResult> {
        commands::facets::run(self.catalog()?, query)
    }

    fn catalog(&self) -> Result<&Catalog> {
        match &self.state {
            LoadState::Loaded(catalog) => Ok(catalog),
            LoadState::Loading => Err(CatalogError::Api("Catalog has not been loaded".into())),
            LoadState::Failed(message) => Err(CatalogError::Api(message.clone())),
        }
    }
}

/// Config needs no catalog, so it does not go through a loaded facade.
pub fn config(config_dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(config_dir, action)
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
