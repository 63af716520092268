//! Response shapes for the backend endpoints.
//!
//! Only the parts geoq reads are modeled; everything else in a response is
//! ignored by serde.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// One row of `GET /_cat/indices?format=json`.
#[derive(Debug, Deserialize)]
pub(crate) struct CatIndex {
    /// Index name.
    pub index: String,
}

/// Per-index entry of `GET /{index}/_mapping?format=json`.
#[derive(Debug, Deserialize)]
pub(crate) struct IndexMapping {
    /// Mapping body.
    #[serde(default)]
    pub mappings: MappingBody,
}

/// The `mappings` object of an index.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MappingBody {
    /// Field name to property map.
    #[serde(default)]
    pub properties: BTreeMap<String, MappingProperty>,
    /// Optional `_meta` block.
    #[serde(default, rename = "_meta")]
    pub meta: MappingMeta,
}

/// The `_meta` block of a mapping.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MappingMeta {
    /// Per-field default styles, shape-checked later.
    #[serde(default)]
    pub styles: BTreeMap<String, Value>,
}

/// One field property in a mapping.
#[derive(Debug, Deserialize)]
pub(crate) struct MappingProperty {
    /// Declared type; absent for object fields.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A search response: hits plus optional aggregations.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    /// Hits envelope.
    pub hits: HitsEnvelope,
}

/// The `hits` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct HitsEnvelope {
    /// The matched documents.
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// One matched document.
#[derive(Debug, Deserialize)]
pub(crate) struct Hit {
    /// Document identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Requested source fields.
    #[serde(default, rename = "_source")]
    pub source: Map<String, Value>,
}

/// Response to the zero-hit stats aggregation.
#[derive(Debug, Deserialize)]
pub(crate) struct StatsResponse {
    /// Aggregation results; absent when the query failed to aggregate.
    #[serde(default)]
    pub aggregations: Option<StatsAggregations>,
}

/// The stats aggregation container.
#[derive(Debug, Deserialize)]
pub(crate) struct StatsAggregations {
    /// The single stats aggregation geoq requests.
    pub field_stats: StatsBody,
}

/// Body of a stats aggregation.
#[derive(Debug, Deserialize)]
pub(crate) struct StatsBody {
    /// Number of values aggregated.
    pub count: u64,
    /// Minimum value; null when `count` is 0.
    pub min: Option<f64>,
    /// Maximum value; null when `count` is 0.
    pub max: Option<f64>,
}

/// Response to the zero-hit terms aggregation.
#[derive(Debug, Deserialize)]
pub(crate) struct TermsResponse {
    /// Aggregation results; absent when the query failed to aggregate.
    #[serde(default)]
    pub aggregations: Option<TermsAggregations>,
}

/// The terms aggregation container.
#[derive(Debug, Deserialize)]
pub(crate) struct TermsAggregations {
    /// The single terms aggregation geoq requests.
    pub distinct_values: TermsBody,
}

/// Body of a terms aggregation.
#[derive(Debug, Deserialize)]
pub(crate) struct TermsBody {
    /// Value buckets in requested (ascending key) order.
    #[serde(default)]
    pub buckets: Vec<TermsBucket>,
}

/// One terms bucket.
#[derive(Debug, Deserialize)]
pub(crate) struct TermsBucket {
    /// Bucket key; a string for keyword fields, a number otherwise.
    pub key: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_with_meta_styles_parses() {
        let raw = r#"{
            "parcels": {
                "mappings": {
                    "properties": {
                        "area": { "type": "float" },
                        "geom": { "type": "geo_shape" }
                    },
                    "_meta": {
                        "styles": { "area": { "kind": "ranges", "ranges": [] } }
                    }
                }
            }
        }"#;
        let parsed: BTreeMap<String, IndexMapping> = serde_json::from_str(raw).unwrap();
        let mapping = &parsed["parcels"].mappings;
        assert_eq!(mapping.properties.len(), 2);
        assert_eq!(mapping.properties["area"].kind.as_deref(), Some("float"));
        assert!(mapping.meta.styles.contains_key("area"));
    }

    #[test]
    fn mapping_without_meta_parses() {
        let raw = r#"{ "parcels": { "mappings": { "properties": {} } } }"#;
        let parsed: BTreeMap<String, IndexMapping> = serde_json::from_str(raw).unwrap();
        assert!(parsed["parcels"].mappings.meta.styles.is_empty());
    }

    #[test]
    fn search_response_parses_hits() {
        let raw = r#"{
            "took": 3,
            "hits": {
                "total": { "value": 1 },
                "hits": [ { "_id": "1", "_source": { "area": 120.5 } } ]
            }
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.hits.hits.len(), 1);
        assert_eq!(parsed.hits.hits[0].id, "1");
    }

    #[test]
    fn stats_response_with_null_bounds_parses() {
        let raw = r#"{
            "hits": { "hits": [] },
            "aggregations": { "field_stats": { "count": 0, "min": null, "max": null } }
        }"#;
        let parsed: StatsResponse = serde_json::from_str(raw).unwrap();
        let stats = parsed.aggregations.unwrap().field_stats;
        assert_eq!(stats.count, 0);
        assert!(stats.min.is_none());
    }

    #[test]
    fn terms_response_parses_buckets() {
        let raw = r#"{
            "hits": { "hits": [] },
            "aggregations": {
                "distinct_values": {
                    "buckets": [ { "key": "commercial", "doc_count": 4 } ]
                }
            }
        }"#;
        let parsed: TermsResponse = serde_json::from_str(raw).unwrap();
        let buckets = parsed.aggregations.unwrap().distinct_values.buckets;
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, "commercial");
    }
}
