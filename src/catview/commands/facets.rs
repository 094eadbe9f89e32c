use crate::commands::CmdResult;
use crate::error::Result;
use crate::filter::{facets, CatalogQuery};
use crate::index::index_items;
use crate::model::Catalog;

/// Sidebar data: facets over the whole catalog plus the listing they select.
pub fn run(catalog: &Catalog, query: &CatalogQuery) -> Result<CmdResult> {
    let facets = facets(catalog.items(), &query.filters);
    Ok(CmdResult::default()
        .with_total(catalog.len())
        .with_facets(facets)
        .with_listed_items(index_items(query.apply(catalog.items()))))
}
