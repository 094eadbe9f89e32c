use crate::commands::{duplicate_warning, CmdResult};
use crate::error::Result;
use crate::filter::CatalogQuery;
use crate::index::index_items;
use crate::model::Catalog;

pub fn run(catalog: &Catalog, query: &CatalogQuery) -> Result<CmdResult> {
    let visible = query.apply(catalog.items());
    tracing::debug!(
        total = catalog.len(),
        visible = visible.len(),
        query = %query.text,
        "filtered catalog"
    );

    let mut result = CmdResult::default()
        .with_total(catalog.len())
        .with_listed_items(index_items(visible));
    if let Some(warning) = duplicate_warning(catalog) {
        result.add_message(warning);
    }
    Ok(result)
}
