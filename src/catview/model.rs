//! Catalog data types.
//!
//! These mirror the JSON served by the catalog endpoint. Decoding is lenient:
//! absent or `null` lists become empty, absent strings become empty and unknown
//! fields are ignored. Optional classification values stay
//! `Option`s so the filter engine can tell "absent" apart from a real value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EndpointField {
    Location(String),
    Many(Vec<Endpoint>),
    One(Endpoint),
}

/// `runtime.endpoint` shows up both as a list of endpoints and as a bare URL.
fn lenient_endpoints<'de, D>(deserializer: D) -> std::result::Result<Vec<Endpoint>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<EndpointField>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(EndpointField::Location(location)) => vec![Endpoint {
            intent: String::new(),
            location,
        }],
        Some(EndpointField::Many(endpoints)) => endpoints,
        Some(EndpointField::One(endpoint)) => vec![endpoint],
    })
}

/// Letter grade of an item. Anything outside A–F is kept as-is and shown neutrally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScoreLabel {
    A,
    B,
    C,
    D,
    E,
    F,
    Other(String),
}

impl ScoreLabel {
    pub fn as_str(&self) -> &str {
        match self {
            ScoreLabel::A => "A",
            ScoreLabel::B => "B",
            ScoreLabel::C => "C",
            ScoreLabel::D => "D",
            ScoreLabel::E => "E",
            ScoreLabel::F => "F",
            ScoreLabel::Other(raw) => raw,
        }
    }

    pub fn is_graded(&self) -> bool {
        !matches!(self, ScoreLabel::Other(_))
    }
}

impl Default for ScoreLabel {
    fn default() -> Self {
        ScoreLabel::Other(String::new())
    }
}

impl From<String> for ScoreLabel {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "A" => ScoreLabel::A,
            "B" => ScoreLabel::B,
            "C" => ScoreLabel::C,
            "D" => ScoreLabel::D,
            "E" => ScoreLabel::E,
            "F" => ScoreLabel::F,
            _ => ScoreLabel::Other(raw),
        }
    }
}

impl From<ScoreLabel> for String {
    fn from(label: ScoreLabel) -> Self {
        label.as_str().to_string()
    }
}

impl std::fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: ScoreLabel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fq_id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
}

impl Contact {
    /// `id (type)`, or just the id when the type is missing.
    pub fn label(&self) -> String {
        if self.kind.is_empty() {
            self.id.clone()
        } else {
            format!("{} ({})", self.id, self.kind)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub owner: Option<Contact>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contributors: Vec<Contact>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub support: Vec<Contact>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub participants: Vec<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub capability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependencies {
    #[serde(default, deserialize_with = "null_as_default")]
    pub upstream: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downstream: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub triggers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provided_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub intent: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Runtime {
    #[serde(rename = "endpoint", default, deserialize_with = "lenient_endpoints")]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entries: Vec<DebtEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl Operation {
    /// Parses `updated` as an RFC 3339 timestamp.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.updated)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub license: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub class: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: ContactInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Dependencies,
    #[serde(default, deserialize_with = "null_as_default")]
    pub classification: Classification,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: BTreeMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub audit: Audit,
    #[serde(default, deserialize_with = "null_as_default")]
    pub debt: Debt,
    #[serde(default, deserialize_with = "null_as_default")]
    pub runtime: Runtime,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: Score,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl CatalogItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        let mut item = Self {
            id: id.into(),
            kind: kind.into(),
            class: class.into(),
            ..Default::default()
        };
        item.metadata.name = name.into();
        item
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.classification.domain = Some(domain.into());
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.classification.team = Some(team.into());
        self
    }

    pub fn with_score(mut self, value: f64, label: &str) -> Self {
        self.score = Score {
            value,
            label: ScoreLabel::from(label.to_string()),
        };
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn domain(&self) -> Option<&str> {
        non_empty(&self.classification.domain)
    }

    pub fn team(&self) -> Option<&str> {
        non_empty(&self.classification.team)
    }

    pub fn capability(&self) -> Option<&str> {
        non_empty(&self.classification.capability)
    }

    pub fn tag(&self) -> Option<&str> {
        non_empty(&self.classification.tag)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// Wire shape of the catalog endpoint: `{ data: Item[], meta: { count } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<CatalogItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<DocumentMeta>,
}

impl CatalogDocument {
    pub fn from_json(raw: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// The loaded, immutable item collection.
///
/// Ids are unique: when the source repeats an id, the first item wins and the
/// repeated id is remembered in `duplicate_ids`. Items without an id are all
/// kept; there is nothing to compare them by.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    duplicate_ids: Vec<String>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut seen = HashSet::new();
        let mut duplicate_ids = Vec::new();
        let items = items
            .into_iter()
            .filter(|item| {
                if item.id.is_empty() || seen.insert(item.id.clone()) {
                    true
                } else {
                    tracing::warn!(id = %item.id, "dropping catalog item with duplicate id");
                    duplicate_ids.push(item.id.clone());
                    false
                }
            })
            .collect();
        Self {
            items,
            duplicate_ids,
        }
    }

    pub fn from_document(document: CatalogDocument) -> Self {
        if let Some(meta) = &document.meta {
            if meta.count != document.data.len() as u64 {
                tracing::debug!(
                    declared = meta.count,
                    actual = document.data.len(),
                    "catalog meta.count does not match item count"
                );
            }
        }
        Self::new(document.data)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicate_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_item() {
        let raw = r#"{
            "data": [{
                "apiVersion": "v1",
                "id": "test-item-123",
                "kind": "Component",
                "class": "Service",
                "metadata": {
                    "name": "Test Service Item",
                    "description": "A detailed description.",
                    "labels": { "env": "test" },
                    "tier": "Tier 1",
                    "license": "Apache-2.0"
                },
                "score": { "value": 95, "label": "A" },
                "contact": {
                    "owner": { "id": "owner-group", "type": "Group", "fqId": "slack://#owner" },
                    "contributors": [{ "id": "user1", "type": "User", "intent": "Maintainer" }]
                },
                "classification": {
                    "domain": "Payments",
                    "team": "Alpha Team",
                    "capability": "Transaction Processing",
                    "tag": null
                },
                "dependencies": {
                    "upstream": ["core-library"],
                    "downstream": ["reporting-service"],
                    "triggers": null,
                    "providedBy": "platform"
                },
                "links": [{ "type": "repository", "url": "https://example.com/repo" }],
                "runtime": { "endpoint": [{ "intent": "http", "location": "https://api.example.com" }] },
                "debt": { "total": 1, "entries": [{ "name": "Refactor", "description": "Old code", "severity": "High" }] },
                "audit": { "source": "git", "operations": [{ "name": "Create", "updated": "2024-01-01T10:00:00Z", "description": "Initial", "updatedBy": "admin" }] }
            }],
            "meta": { "count": 1 }
        }"#;

        let doc = CatalogDocument::from_json(raw).unwrap();
        assert_eq!(doc.meta.as_ref().unwrap().count, 1);
        let item = &doc.data[0];
        assert_eq!(item.api_version, "v1");
        assert_eq!(item.name(), "Test Service Item");
        assert_eq!(item.score.label, ScoreLabel::A);
        assert_eq!(item.contact.owner.as_ref().unwrap().label(), "owner-group (Group)");
        assert_eq!(item.contact.contributors[0].intent.as_deref(), Some("Maintainer"));
        assert_eq!(item.domain(), Some("Payments"));
        assert_eq!(item.tag(), None);
        assert!(item.dependencies.triggers.is_empty());
        assert_eq!(item.dependencies.provided_by.as_deref(), Some("platform"));
        assert_eq!(item.runtime.endpoints[0].location, "https://api.example.com");
        assert_eq!(item.debt.entries.len(), 1);
        assert!(item.audit.operations[0].updated_at().is_some());
    }

    #[test]
    fn missing_and_null_fields_default_to_empty() {
        let raw = r#"{ "data": [{ "id": "bare", "links": null, "debt": null, "classification": { "domain": null } }] }"#;
        let doc = CatalogDocument::from_json(raw).unwrap();
        let item = &doc.data[0];

        assert!(doc.meta.is_none());
        assert_eq!(item.name(), "");
        assert!(item.links.is_empty());
        assert!(item.debt.entries.is_empty());
        assert!(item.contact.owner.is_none());
        assert!(item.dependencies.upstream.is_empty());
        assert_eq!(item.domain(), None);
        assert_eq!(item.team(), None);
    }

    #[test]
    fn runtime_endpoint_accepts_bare_location() {
        let raw = r#"{ "data": [{ "id": "x", "runtime": { "endpoint": "https://api.example.com/service" } }] }"#;
        let doc = CatalogDocument::from_json(raw).unwrap();
        let endpoints = &doc.data[0].runtime.endpoints;
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].location, "https://api.example.com/service");
        assert_eq!(endpoints[0].intent, "");
    }

    #[test]
    fn unknown_score_label_is_kept_verbatim() {
        let raw = r#"{ "data": [{ "id": "x", "score": { "value": 10, "label": "Z" } }] }"#;
        let doc = CatalogDocument::from_json(raw).unwrap();
        let label = &doc.data[0].score.label;
        assert_eq!(*label, ScoreLabel::Other("Z".into()));
        assert!(!label.is_graded());
        assert_eq!(label.to_string(), "Z");
    }

    #[test]
    fn score_label_serializes_as_plain_string() {
        let score = Score {
            value: 72.5,
            label: ScoreLabel::C,
        };
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["label"], "C");
    }

    #[test]
    fn rejects_document_that_is_not_an_object() {
        assert!(CatalogDocument::from_json("[1, 2, 3]").is_err());
        assert!(CatalogDocument::from_json("not json").is_err());
    }

    #[test]
    fn empty_classification_strings_read_as_absent() {
        let item = CatalogItem::new("a", "A", "Service", "App").with_domain("");
        assert_eq!(item.domain(), None);
    }

    #[test]
    fn items_without_ids_are_all_kept() {
        let raw = r#"{ "data": [
            { "kind": "Service", "metadata": { "name": "One" } },
            { "kind": "Store", "metadata": { "name": "Two" } },
            { "id": null, "kind": "Resource", "metadata": { "name": "Three" } }
        ] }"#;
        let catalog = Catalog::from_document(CatalogDocument::from_json(raw).unwrap());

        assert_eq!(catalog.len(), 3);
        assert!(catalog.duplicate_ids().is_empty());
        assert_eq!(catalog.items()[2].name(), "Three");
    }

    #[test]
    fn non_string_labels_do_not_reject_the_document() {
        let raw = r#"{ "data": [
            { "id": "a", "metadata": { "name": "A", "labels": { "replicas": 3, "env": "prod" },
              "annotations": { "managed": true } } },
            { "id": "b", "metadata": { "name": "B" } }
        ] }"#;
        let doc = CatalogDocument::from_json(raw).unwrap();

        assert_eq!(doc.data.len(), 2);
        assert_eq!(doc.data[0].metadata.labels["replicas"], 3);
        assert_eq!(doc.data[0].metadata.labels["env"], "prod");
        assert_eq!(doc.data[0].metadata.annotations["managed"], true);
    }

    #[test]
    fn catalog_drops_duplicate_ids_keeping_first() {
        let catalog = Catalog::new(vec![
            CatalogItem::new("one", "First", "Service", "App"),
            CatalogItem::new("two", "Second", "Store", "Postgres"),
            CatalogItem::new("one", "Shadow", "Service", "App"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("one").unwrap().name(), "First");
        assert_eq!(catalog.duplicate_ids(), ["one".to_string()]);
    }
}
