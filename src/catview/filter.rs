//! Item filtering.
//!
//! A [`FilterSelection`] holds the selected values for each [`FilterCategory`].
//! [`apply`] keeps the items that match the free-text query and, for every
//! category with at least one selected value, carry one of those values.
//! Categories are combined with AND, values inside a category with OR.
//!
//! Filtering never reorders: the output is the input minus rejected items.

use crate::model::CatalogItem;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The item fields a user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterCategory {
    Kind,
    Class,
    Domain,
    Team,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 4] = [
        FilterCategory::Kind,
        FilterCategory::Class,
        FilterCategory::Domain,
        FilterCategory::Team,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FilterCategory::Kind => "kind",
            FilterCategory::Class => "class",
            FilterCategory::Domain => "domain",
            FilterCategory::Team => "team",
        }
    }

    /// Heading used by the sidebar.
    pub fn title(&self) -> &'static str {
        match self {
            FilterCategory::Kind => "Kind",
            FilterCategory::Class => "Class",
            FilterCategory::Domain => "Domain",
            FilterCategory::Team => "Team",
        }
    }

    /// The item's value for this category, `None` when absent.
    pub fn value_of<'a>(&self, item: &'a CatalogItem) -> Option<&'a str> {
        match self {
            FilterCategory::Kind => Some(item.kind.as_str()),
            FilterCategory::Class => Some(item.class.as_str()),
            FilterCategory::Domain => item.domain(),
            FilterCategory::Team => item.team(),
        }
    }

    fn index(&self) -> usize {
        match self {
            FilterCategory::Kind => 0,
            FilterCategory::Class => 1,
            FilterCategory::Domain => 2,
            FilterCategory::Team => 3,
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kind" | "kinds" => Ok(FilterCategory::Kind),
            "class" | "classes" => Ok(FilterCategory::Class),
            "domain" | "domains" => Ok(FilterCategory::Domain),
            "team" | "teams" => Ok(FilterCategory::Team),
            other => Err(format!("Unknown filter category: {}", other)),
        }
    }
}

/// Selected values per category. An empty set means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    selected: [BTreeSet<String>; 4],
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`select`](Self::select) for several values at once.
    pub fn with<I, V>(mut self, category: FilterCategory, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for value in values {
            self.select(category, value);
        }
        self
    }

    pub fn select(&mut self, category: FilterCategory, value: impl Into<String>) {
        self.selected[category.index()].insert(value.into());
    }

    /// Checkbox behavior: selects the value if it isn't, deselects it if it is.
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, category: FilterCategory, value: &str) -> bool {
        let set = &mut self.selected[category.index()];
        if set.remove(value) {
            false
        } else {
            set.insert(value.to_string());
            true
        }
    }

    pub fn is_selected(&self, category: FilterCategory, value: &str) -> bool {
        self.selected[category.index()].contains(value)
    }

    pub fn selected(&self, category: FilterCategory) -> &BTreeSet<String> {
        &self.selected[category.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.selected.iter().all(BTreeSet::is_empty)
    }

    pub fn clear(&mut self) {
        for set in &mut self.selected {
            set.clear();
        }
    }

    /// Membership test for every constrained category.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        FilterCategory::ALL.iter().all(|category| {
            let set = self.selected(*category);
            if set.is_empty() {
                return true;
            }
            match category.value_of(item) {
                Some(value) => set.contains(value),
                None => false,
            }
        })
    }
}

/// True when `query` is empty or is a case-insensitive substring of the item's
/// name, class, kind, domain or team.
pub fn matches_query(item: &CatalogItem, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    contains(item.name())
        || contains(&item.class)
        || contains(&item.kind)
        || item.domain().is_some_and(contains)
        || item.team().is_some_and(contains)
}

/// Computes the visible subset of `items`, in input order.
pub fn apply<'a, I>(items: I, query: &str, filters: &FilterSelection) -> Vec<&'a CatalogItem>
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    items
        .into_iter()
        .filter(|item| matches_query(item, query) && filters.matches(item))
        .collect()
}

/// A free-text query plus filter selections, i.e. everything that decides
/// which items are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub text: String,
    pub filters: FilterSelection,
}

impl CatalogQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            filters: FilterSelection::new(),
        }
    }

    pub fn with_filters(mut self, filters: FilterSelection) -> Self {
        self.filters = filters;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.filters.is_empty()
    }

    pub fn apply<'a>(&self, items: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
        apply(items, &self.text, &self.filters)
    }
}

/// One distinct value of a category, as shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    pub category: FilterCategory,
    pub values: Vec<FacetValue>,
}

/// Distinct values per category over the whole collection, in first-seen order.
/// Absent domains and teams are skipped.
pub fn facets(items: &[CatalogItem], selection: &FilterSelection) -> Vec<Facet> {
    FilterCategory::ALL
        .iter()
        .map(|category| {
            let mut values: Vec<FacetValue> = Vec::new();
            for value in items.iter().filter_map(|item| category.value_of(item)) {
                match values.iter_mut().find(|fv| fv.value == value) {
                    Some(existing) => existing.count += 1,
                    None => values.push(FacetValue {
                        value: value.to_string(),
                        count: 1,
                        selected: selection.is_selected(*category, value),
                    }),
                }
            }
            Facet {
                category: *category,
                values,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_beta() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("1", "Alpha", "Service", "App").with_domain("Payments"),
            CatalogItem::new("2", "Beta", "Store", "Postgres").with_domain("Payments"),
        ]
    }

    fn sample() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("1", "Checkout API", "Service", "App")
                .with_domain("Payments")
                .with_team("Orbit"),
            CatalogItem::new("2", "ledger-db", "Store", "Postgres")
                .with_domain("Payments")
                .with_team("Vault"),
            CatalogItem::new("3", "search-indexer", "Component", "App").with_team("Orbit"),
            CatalogItem::new("4", "audit-events", "Resource", "Kafka").with_domain("Compliance"),
            CatalogItem::new("5", "orbit-docs", "Resource", "Repository"),
        ]
    }

    fn names(items: &[&CatalogItem]) -> Vec<String> {
        items.iter().map(|i| i.name().to_string()).collect()
    }

    #[test]
    fn empty_query_and_filters_is_identity() {
        let items = sample();
        let result = apply(&items, "", &FilterSelection::new());
        let expected: Vec<&CatalogItem> = items.iter().collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn query_matches_name_case_insensitively() {
        let items = alpha_beta();
        let result = apply(&items, "alpha", &FilterSelection::new());
        assert_eq!(names(&result), vec!["Alpha"]);
    }

    #[test]
    fn kind_filter_excludes_other_kinds() {
        let items = alpha_beta();
        let filters = FilterSelection::new().with(FilterCategory::Kind, ["Service"]);
        let result = apply(&items, "", &filters);
        assert_eq!(names(&result), vec!["Alpha"]);
    }

    #[test]
    fn query_searches_class_kind_domain_and_team() {
        let items = sample();
        let none = FilterSelection::new();
        assert_eq!(names(&apply(&items, "postgres", &none)), vec!["ledger-db"]);
        assert_eq!(names(&apply(&items, "COMPONENT", &none)), vec!["search-indexer"]);
        assert_eq!(names(&apply(&items, "compli", &none)), vec!["audit-events"]);
        assert_eq!(
            names(&apply(&items, "orbit", &none)),
            vec!["Checkout API", "search-indexer", "orbit-docs"]
        );
    }

    #[test]
    fn values_within_a_category_are_ored() {
        let items = sample();
        let filters = FilterSelection::new().with(FilterCategory::Kind, ["Store", "Resource"]);
        assert_eq!(
            names(&apply(&items, "", &filters)),
            vec!["ledger-db", "audit-events", "orbit-docs"]
        );
    }

    #[test]
    fn categories_are_anded() {
        let items = sample();
        let filters = FilterSelection::new()
            .with(FilterCategory::Class, ["App"])
            .with(FilterCategory::Team, ["Orbit"])
            .with(FilterCategory::Domain, ["Payments"]);
        assert_eq!(names(&apply(&items, "", &filters)), vec!["Checkout API"]);
    }

    #[test]
    fn absent_field_fails_membership() {
        let items = sample();
        let filters = FilterSelection::new().with(FilterCategory::Domain, ["Payments", "Compliance"]);
        let result = apply(&items, "", &filters);
        assert!(result.iter().all(|i| i.domain().is_some()));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let items = sample();
        let filters = FilterSelection::new().with(FilterCategory::Kind, ["Service"]);
        assert!(apply(&items, "ledger", &filters).is_empty());
    }

    #[test]
    fn apply_is_idempotent() {
        let items = sample();
        let filters = FilterSelection::new().with(FilterCategory::Kind, ["Resource", "Service"]);
        let once: Vec<CatalogItem> = apply(&items, "a", &filters).into_iter().cloned().collect();
        let twice: Vec<CatalogItem> = apply(&once, "a", &filters).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn result_satisfies_predicates_and_exclusions_violate_one() {
        let items = sample();
        let query = "o";
        let filters = FilterSelection::new().with(FilterCategory::Team, ["Orbit", "Vault"]);
        let result = apply(&items, query, &filters);

        for item in &items {
            let kept = result.iter().any(|r| r.id == item.id);
            let satisfies = matches_query(item, query) && filters.matches(item);
            assert_eq!(kept, satisfies, "item {}", item.id);
        }
    }

    #[test]
    fn preserves_input_order() {
        let items = sample();
        let result = apply(&items, "", &FilterSelection::new().with(FilterCategory::Class, ["App", "Kafka"]));
        let ids: Vec<&str> = result.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = FilterSelection::new();
        assert!(selection.toggle(FilterCategory::Team, "Orbit"));
        assert!(selection.is_selected(FilterCategory::Team, "Orbit"));
        assert!(!selection.toggle(FilterCategory::Team, "Orbit"));
        assert!(selection.is_empty());
    }

    #[test]
    fn clear_drops_every_selection() {
        let mut selection = FilterSelection::new()
            .with(FilterCategory::Kind, ["Service"])
            .with(FilterCategory::Domain, ["Payments"]);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn category_parses_singular_and_plural() {
        assert_eq!("kinds".parse::<FilterCategory>(), Ok(FilterCategory::Kind));
        assert_eq!("Team".parse::<FilterCategory>(), Ok(FilterCategory::Team));
        assert!("owner".parse::<FilterCategory>().is_err());
    }

    #[test]
    fn catalog_query_combines_text_and_filters() {
        let items = sample();
        let query = CatalogQuery::new("e")
            .with_filters(FilterSelection::new().with(FilterCategory::Kind, ["Resource"]));
        assert!(!query.is_empty());
        let result = query.apply(&items);
        assert_eq!(names(&result), vec!["audit-events", "orbit-docs"]);
        assert!(CatalogQuery::default().is_empty());
    }

    #[test]
    fn facets_list_distinct_values_in_first_seen_order() {
        let items = sample();
        let selection = FilterSelection::new().with(FilterCategory::Class, ["App"]);
        let facets = facets(&items, &selection);

        let class = &facets[1];
        assert_eq!(class.category, FilterCategory::Class);
        let values: Vec<(&str, usize, bool)> = class
            .values
            .iter()
            .map(|v| (v.value.as_str(), v.count, v.selected))
            .collect();
        assert_eq!(
            values,
            vec![
                ("App", 2, true),
                ("Postgres", 1, false),
                ("Kafka", 1, false),
                ("Repository", 1, false)
            ]
        );

        let domain: Vec<&str> = facets[2].values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(domain, vec!["Payments", "Compliance"]);
    }
}
