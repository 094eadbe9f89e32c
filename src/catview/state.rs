//! Load lifecycle of a viewer session: `Loading -> Loaded | Failed`.
//!
//! Both outcomes are terminal. There is no retry transition; a new session
//! starts from a fresh `Loading` state.

use crate::error::Result;
use crate::model::Catalog;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded(Catalog),
    Failed(String),
}

impl LoadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves out of `Loading` with the fetch outcome.
    ///
    /// Returns `false`, leaving the state untouched, when already resolved.
    pub fn resolve(&mut self, outcome: Result<Catalog>) -> bool {
        match outcome {
            Ok(catalog) => self.succeed(catalog),
            Err(err) => self.fail(err.to_string()),
        }
    }

    pub fn succeed(&mut self, catalog: Catalog) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = LoadState::Loaded(catalog);
        true
    }

    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if !self.is_loading() {
            return false;
        }
        let message = message.into();
        tracing::debug!(error = %message, "catalog load failed");
        *self = LoadState::Failed(message);
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            LoadState::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
