//! Listing positions and item selectors.
//!
//! Every listing numbers its items from 1 in display order. Those numbers are
//! what `show` accepts, so an index is only meaningful against the same query
//! that produced the listing.

use crate::error::{CatalogError, Result};
use crate::model::CatalogItem;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedItem {
    pub index: usize,
    pub item: CatalogItem,
}

/// Numbers the visible items, starting at 1.
pub fn index_items(items: Vec<&CatalogItem>) -> Vec<ListedItem> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| ListedItem {
            index: i + 1,
            item: item.clone(),
        })
        .collect()
}

/// User input picking one item, either by listing position or by id/name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelector {
    Index(usize),
    Key(String),
}

impl std::fmt::Display for ItemSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemSelector::Index(i) => write!(f, "{}", i),
            ItemSelector::Key(key) => write!(f, "\"{}\"", key),
        }
    }
}

impl std::str::FromStr for ItemSelector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty item selector".to_string());
        }
        match s.parse::<usize>() {
            Ok(0) => Err("Index must be 1 or greater".to_string()),
            Ok(n) => Ok(ItemSelector::Index(n)),
            Err(_) => Ok(ItemSelector::Key(s.to_string())),
        }
    }
}

/// Outcome of resolving a selector against a listing.
#[derive(Debug)]
pub struct Resolved<'a> {
    pub item: &'a ListedItem,
    /// Other listed items that matched the same name.
    pub ambiguous: usize,
}

impl ItemSelector {
    /// Finds the selected item in `listed`.
    ///
    /// Keys match an id exactly first, then a name case-insensitively. When
    /// several items share the name the first one in listing order wins.
    pub fn resolve<'a>(&self, listed: &'a [ListedItem]) -> Result<Resolved<'a>> {
        match self {
            ItemSelector::Index(n) => listed
                .iter()
                .find(|li| li.index == *n)
                .map(|item| Resolved { item, ambiguous: 0 })
                .ok_or_else(|| {
                    CatalogError::NotFound(format!(
                        "index {} (listing has {} items)",
                        n,
                        listed.len()
                    ))
                }),
            ItemSelector::Key(key) => {
                if let Some(item) = listed.iter().find(|li| li.item.id == *key) {
                    return Ok(Resolved { item, ambiguous: 0 });
                }
                let needle = key.to_lowercase();
                let mut by_name = listed
                    .iter()
                    .filter(|li| li.item.name().to_lowercase() == needle);
                match by_name.next() {
                    Some(item) => Ok(Resolved {
                        item,
                        ambiguous: by_name.count(),
                    }),
                    None => Err(CatalogError::NotFound(key.clone())),
                }
            }
        }
    }
}
