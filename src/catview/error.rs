use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to fetch catalog data (HTTP {status})")]
    Unavailable { status: u16 },

    #[error("Failed to fetch catalog data: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl CatalogError {
    /// True for the failures that leave the viewer without any data.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::Unavailable { .. }
                | CatalogError::Http(_)
                | CatalogError::Io(_)
                | CatalogError::Serialization(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
