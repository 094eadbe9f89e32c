use super::CatalogSource;
use crate::error::Result;
use crate::model::CatalogDocument;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads a static catalog document from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    async fn fetch(&self) -> Result<CatalogDocument> {
        tracing::debug!(path = %self.path.display(), "reading catalog file");
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let document = CatalogDocument::from_json(&raw)?;
        tracing::info!(path = %self.path.display(), items = document.data.len(), "catalog read");
        Ok(document)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    #[tokio::test]
    async fn reads_document_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{ "data": [{ "id": "a", "metadata": { "name": "Alpha" } }], "meta": { "count": 1 } }"#,
        )
        .unwrap();

        let document = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(document.data[0].name(), "Alpha");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("nope.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn invalid_json_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ data: ").unwrap();

        let err = FileSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Serialization(_)));
    }
}
