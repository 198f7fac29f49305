//! Spatial-query response documents.
//!
//! Only the fields the summarizer reads are modelled. Unknown element
//! types and extra fields (geometry, members, metadata) are tolerated.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level JSON document returned for an `[out:json]` query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QueryResult {
    /// Matched elements plus their recursive members.
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// The type of a returned element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A point.
    Node,
    /// An ordered list of nodes.
    Way,
    /// A group of members.
    Relation,
    /// Anything else the service may return (`area`, `count`, ...).
    #[serde(other)]
    Other,
}

/// One element of a query result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Element {
    /// Element type.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Element id within its type.
    #[serde(default)]
    pub id: i64,
    /// Key/value tags. Skeleton members returned by the recursion step
    /// carry none.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Element {
    /// Tag value for `key`.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}
