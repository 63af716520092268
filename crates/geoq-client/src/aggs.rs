//! Zero-hit aggregation queries feeding the filter controls.

use serde::Serialize;
use serde_json::json;

use crate::{client::Client, error::ClientError, response::{StatsResponse, TermsResponse}};

/// Bucket cap for the distinct-values terms aggregation.
pub const DISTINCT_VALUES_CAP: usize = 1_000;

/// Value range of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericStats {
    /// Smallest value present.
    pub min: f64,
    /// Largest value present.
    pub max: f64,
}

impl Client {
    /// Fetches the min/max of a numeric field via a zero-hit stats
    /// aggregation.
    ///
    /// Returns `None` when the index holds no values for the field; the
    /// range is a control pre-fill hint, not hard validation.
    pub async fn numeric_stats(
        &self,
        index: &str,
        field: &str,
    ) -> Result<Option<NumericStats>, ClientError> {
        let body = json!({
            "size": 0,
            "aggs": { "field_stats": { "stats": { "field": field } } },
        });

        let response: StatsResponse = self
            .post_json(&format!("/{index}/_search"), &body)
            .await?;

        let Some(aggregations) = response.aggregations else {
            return Ok(None);
        };
        let stats = aggregations.field_stats;
        match (stats.min, stats.max) {
            (Some(min), Some(max)) if stats.count > 0 => Ok(Some(NumericStats { min, max })),
            _ => Ok(None),
        }
    }

    /// Fetches the distinct values of a field via a zero-hit terms
    /// aggregation, capped at [`DISTINCT_VALUES_CAP`] buckets in ascending
    /// key order.
    ///
    /// Zero buckets is a valid empty result: the multi-select control simply
    /// renders without options.
    pub async fn distinct_values(
        &self,
        index: &str,
        field: &str,
    ) -> Result<Vec<String>, ClientError> {
        let body = json!({
            "size": 0,
            "aggs": {
                "distinct_values": {
                    "terms": {
                        "field": field,
                        "size": DISTINCT_VALUES_CAP,
                        "order": { "_key": "asc" },
                    }
                }
            },
        });

        let response: TermsResponse = self
            .post_json(&format!("/{index}/_search"), &body)
            .await?;

        let buckets = response
            .aggregations
            .map(|aggregations| aggregations.distinct_values.buckets)
            .unwrap_or_default();

        Ok(buckets
            .into_iter()
            .map(|bucket| match bucket.key {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect())
    }
}
