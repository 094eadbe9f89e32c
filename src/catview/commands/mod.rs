use crate::config::CatviewConfig;
use crate::filter::Facet;
use crate::index::ListedItem;
use crate::model::CatalogItem;
use serde::Serialize;

pub mod config;
pub mod facets;
pub mod list;
pub mod show;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a command produced. The CLI decides how to show it.
#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    /// Size of the whole catalog, before filtering.
    pub total: usize,
    pub listed_items: Vec<ListedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<CatalogItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<Facet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<CatviewConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    pub fn with_listed_items(mut self, items: Vec<ListedItem>) -> Self {
        self.listed_items = items;
        self
    }

    pub fn with_selected(mut self, item: CatalogItem) -> Self {
        self.selected = Some(item);
        self
    }

    pub fn with_facets(mut self, facets: Vec<Facet>) -> Self {
        self.facets = facets;
        self
    }

    pub fn with_config(mut self, config: CatviewConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Warns once per load when the source repeated ids.
pub(crate) fn duplicate_warning(catalog: &crate::model::Catalog) -> Option<CmdMessage> {
    let dups = catalog.duplicate_ids();
    if dups.is_empty() {
        return None;
    }
    Some(CmdMessage::warning(format!(
        "Ignored {} item(s) with duplicate ids: {}",
        dups.len(),
        dups.join(", ")
    )))
}
