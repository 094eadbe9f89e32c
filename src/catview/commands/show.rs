use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::CatalogQuery;
use crate::index::{index_items, ItemSelector};
use crate::model::Catalog;

/// Picks one item out of the listing `query` would produce.
pub fn run(catalog: &Catalog, query: &CatalogQuery, selector: &ItemSelector) -> Result<CmdResult> {
    let listed = index_items(query.apply(catalog.items()));
    let resolved = selector.resolve(&listed)?;
    tracing::debug!(selector = %selector, id = %resolved.item.item.id, "selected item");

    let mut result = CmdResult::default()
        .with_total(catalog.len())
        .with_selected(resolved.item.item.clone());
    if resolved.ambiguous > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} other item(s) share this name; showing #{}",
            resolved.ambiguous, resolved.item.index
        )));
    }
    Ok(result)
}
