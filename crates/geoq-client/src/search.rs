//! Search execution and hit-to-feature conversion.

use geojson::feature::Id;
use geoq_query::GEOMETRY_FIELD;
use serde_json::{Map, Value};
use tracing::warn;

use crate::{client::Client, error::ClientError, response::{Hit, SearchResponse}};

/// One result document as a map feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Document identifier.
    pub id: String,
    /// Geometry from the `geom` source field.
    pub geometry: geojson::Geometry,
    /// All other returned source fields.
    pub attributes: Map<String, Value>,
}

impl Feature {
    /// Converts into a GeoJSON feature for layer output.
    pub fn into_geojson(self) -> geojson::Feature {
        geojson::Feature {
            bbox: None,
            geometry: Some(self.geometry),
            id: Some(Id::String(self.id)),
            properties: Some(self.attributes),
            foreign_members: None,
        }
    }
}

impl Client {
    /// Executes a built (or raw, validated) request against an index.
    ///
    /// Returns one feature per hit; zero hits yields an empty vector and the
    /// caller presents its "no results" path. Hits with a missing or invalid
    /// geometry are skipped with a warning rather than failing the search.
    pub async fn search(&self, index: &str, body: &Value) -> Result<Vec<Feature>, ClientError> {
        let response: SearchResponse = self
            .post_json(&format!("/{index}/_search"), body)
            .await?;

        Ok(response
            .hits
            .hits
            .into_iter()
            .filter_map(hit_to_feature)
            .collect())
    }
}

/// Converts one hit into a feature, splitting geometry from attributes.
fn hit_to_feature(hit: Hit) -> Option<Feature> {
    let mut source = hit.source;

    let Some(raw_geometry) = source.remove(GEOMETRY_FIELD) else {
        warn!(id = %hit.id, "hit has no geometry field, skipping");
        return None;
    };

    match geojson::Geometry::try_from(raw_geometry) {
        Ok(geometry) => Some(Feature {
            id: hit.id,
            geometry,
            attributes: source,
        }),
        Err(err) => {
            warn!(id = %hit.id, %err, "hit has invalid geometry, skipping");
            None
        }
    }
}
