use super::CatalogSource;
use crate::error::{CatalogError, Result};
use crate::model::{CatalogDocument, CatalogItem, DocumentMeta};
use async_trait::async_trait;

/// In-memory source for testing and development.
///
/// Either always returns the same items or always fails with the same status.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    items: Vec<CatalogItem>,
    fail_status: Option<u16>,
}

impl InMemorySource {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items,
            fail_status: None,
        }
    }

    /// A source whose every fetch fails as if the endpoint answered `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            items: Vec::new(),
            fail_status: Some(status),
        }
    }
}

#[async_trait]
impl CatalogSource for InMemorySource {
    async fn fetch(&self) -> Result<CatalogDocument> {
        if let Some(status) = self.fail_status {
            return Err(CatalogError::Unavailable { status });
        }
        Ok(CatalogDocument {
            data: self.items.clone(),
            meta: Some(DocumentMeta {
                count: self.items.len() as u64,
            }),
        })
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
