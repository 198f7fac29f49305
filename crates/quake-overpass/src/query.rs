//! Spatial query construction and encoding.
//!
//! An [`AreaQuery`] asks for every node, way and relation that carries one
//! of a fixed set of tags and lies inside a polygon, then for the full body
//! of each match plus its recursive members so way and relation geometry
//! resolves down to nodes.

use std::fmt::Write as _;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use quake_types::{CategorySet, InfrastructureCategory, Polygon};

/// Characters left as-is by standard URI component encoding.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// URI component encoding, minus the characters the query language needs
/// to see literally: space `;` `(` `)` `:` `<` `>` `[` `]`.
///
/// Nothing outside that fixed list is let through unencoded.
const QUERY_PAYLOAD: &AsciiSet = &URI_COMPONENT
    .remove(b' ')
    .remove(b';')
    .remove(b':')
    .remove(b'<')
    .remove(b'>')
    .remove(b'[')
    .remove(b']');

/// Element types requested for each category.
const ELEMENT_TYPES: [&str; 3] = ["node", "way", "relation"];

/// A structured infrastructure query over one polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaQuery {
    polygon: Polygon,
    categories: CategorySet,
}

impl AreaQuery {
    /// Query for `categories` inside `polygon`.
    pub const fn new(polygon: Polygon, categories: CategorySet) -> Self {
        Self {
            polygon,
            categories,
        }
    }

    /// The polygon being queried.
    pub const fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// The requested categories.
    pub const fn categories(&self) -> CategorySet {
        self.categories
    }

    /// The polygon filter value: `"lat lng"` pairs joined by spaces.
    pub fn poly_filter(&self) -> String {
        self.polygon
            .vertices()
            .iter()
            .map(|v| format!("{} {}", v.lat, v.lng))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Serialize to the query language.
    pub fn to_query_string(&self) -> String {
        let poly = self.poly_filter();
        let mut query = String::from("[out:json];(");
        for category in self.categories.categories() {
            let selector = tag_selector(*category);
            for element in ELEMENT_TYPES {
                let _ = write!(query, "{element}{selector}(poly:\"{poly}\");");
            }
        }
        query.push_str(");out body;>;out skel qt;");
        query
    }

    /// The query string, encoded for the `data` URL parameter.
    pub fn encoded(&self) -> String {
        encode_payload(&self.to_query_string())
    }
}

/// `["key"="value"]`, or `["key"]` when any value matches.
fn tag_selector(category: InfrastructureCategory) -> String {
    match category.tag_value() {
        Some(value) => format!("[\"{}\"=\"{value}\"]", category.tag_key()),
        None => format!("[\"{}\"]", category.tag_key()),
    }
}

/// Percent-encode a query for transmission.
pub fn encode_payload(query: &str) -> String {
    utf8_percent_encode(query, QUERY_PAYLOAD).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use quake_types::LatLng;

    fn square() -> Polygon {
        Polygon::new(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
            LatLng::new(1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn poly_filter_is_lat_lng_pairs() {
        let query = AreaQuery::new(square(), CategorySet::Infrastructure);
        assert_eq!(query.poly_filter(), "0 0 0 1 1 1 1 0");
    }

    #[test]
    fn fractional_coordinates_keep_full_precision() {
        let polygon = Polygon::new(vec![
            LatLng::new(35.6812, 139.7671),
            LatLng::new(-33.5, 151.25),
            LatLng::new(1.0, -0.125),
        ])
        .unwrap();
        let query = AreaQuery::new(polygon, CategorySet::Buildings);
        assert_eq!(query.poly_filter(), "35.6812 139.7671 -33.5 151.25 1 -0.125");
    }

    #[test]
    fn infrastructure_query_covers_every_type_and_category() {
        let text = AreaQuery::new(square(), CategorySet::Infrastructure).to_query_string();
        assert!(text.starts_with("[out:json];("));
        assert!(text.ends_with(");out body;>;out skel qt;"));
        assert_eq!(text.matches("(poly:\"0 0 0 1 1 1 1 0\");").count(), 18);
        assert!(text.contains("node[\"amenity\"=\"hospital\"](poly:"));
        assert!(text.contains("way[\"amenity\"=\"fuel\"](poly:"));
        assert!(text.contains("relation[\"amenity\"=\"fire_station\"](poly:"));
    }

    #[test]
    fn building_query_matches_any_value() {
        let text = AreaQuery::new(square(), CategorySet::Buildings).to_query_string();
        assert!(text.contains("way[\"building\"](poly:"));
        assert_eq!(text.matches("(poly:").count(), 3);
    }

    #[test]
    fn structural_characters_stay_literal() {
        assert_eq!(encode_payload("[out:json];( a<b>c );"), "[out:json];( a<b>c );");
    }

    #[test]
    fn everything_else_is_encoded() {
        assert_eq!(encode_payload("\"x\"=1"), "%22x%22%3D1");
        assert_eq!(encode_payload("a/b?c&d#e"), "a%2Fb%3Fc%26d%23e");
        assert_eq!(encode_payload("\n\t\r"), "%0A%09%0D");
        assert_eq!(encode_payload("{}|,"), "%7B%7D%7C%2C");
        assert_eq!(encode_payload("é"), "%C3%A9");
    }

    #[test]
    fn uri_component_unreserved_pass_through() {
        assert_eq!(encode_payload("-_.!~*'()"), "-_.!~*'()");
    }

    #[test]
    fn encoded_query_keeps_coordinates_readable() {
        let encoded = AreaQuery::new(square(), CategorySet::Buildings).encoded();
        assert!(encoded.starts_with("[out:json];(node[%22building%22](poly:%220 0 0 1 1 1 1 0%22);"));
        assert!(!encoded.contains('"'));
    }
}
