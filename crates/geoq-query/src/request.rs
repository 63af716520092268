//! Search request assembly.
//!
//! A request is rebuilt from scratch on every search: output fields, the
//! thematic filter set (gated by the panel's apply toggle), and the spatial
//! state fold into one body.

use serde_json::{Value, json};

use crate::{
    clause::{Clause, RangeOp},
    field::GEOMETRY_FIELD,
    filter::{Comparator, FilterEntry, FilterSet, FilterValue},
    spatial::{Point, SpatialFilter, SpatialState},
};

/// Hard ceiling on returned documents.
///
/// This is not a pagination scheme: matches beyond the cap are dropped by
/// the backend.
pub const RESULT_CAP: usize = 10_000;

/// A fully assembled search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Output field list; always ends with the geometry field, exactly once.
    fields: Vec<String>,
    /// Thematic clauses, AND-combined under `bool.must`.
    must: Vec<Clause>,
    /// At most one spatial clause, placed under `bool.filter`.
    spatial: Option<Clause>,
    /// Result cap.
    size: usize,
}

impl SearchRequest {
    /// Folds session state into a request.
    ///
    /// - `output_fields`: fields chosen for the result attributes; the
    ///   geometry field is appended exactly once whether or not it was
    ///   chosen.
    /// - `filters`: the session's filter set. Applied only when
    ///   `apply_thematic` is true; the toggle gates application, not
    ///   collection, so entries survive a disabled toggle untouched.
    /// - `spatial`: the session's spatial state; coordinates are reprojected
    ///   to geographic WGS84 here.
    pub fn build(
        output_fields: &[String],
        filters: &FilterSet,
        apply_thematic: bool,
        spatial: &SpatialState,
    ) -> Self {
        let mut fields: Vec<String> = output_fields
            .iter()
            .filter(|f| f.as_str() != GEOMETRY_FIELD)
            .cloned()
            .collect();
        fields.push(GEOMETRY_FIELD.to_string());

        let must = if apply_thematic {
            filters.iter().map(thematic_clause).collect()
        } else {
            Vec::new()
        };

        Self {
            fields,
            must,
            spatial: spatial_clause(spatial),
            size: RESULT_CAP,
        }
    }

    /// The output field list, geometry field last.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The thematic clauses that will be sent.
    pub fn thematic_clauses(&self) -> &[Clause] {
        &self.must
    }

    /// The spatial clause, if any.
    pub fn spatial_clause(&self) -> Option<&Clause> {
        self.spatial.as_ref()
    }

    /// Renders the request to its JSON body.
    pub fn to_value(&self) -> Value {
        let mut bool_body = serde_json::Map::new();
        if !self.must.is_empty() {
            bool_body.insert(
                "must".to_string(),
                Value::Array(self.must.iter().map(Clause::to_value).collect()),
            );
        }
        if let Some(spatial) = &self.spatial {
            bool_body.insert("filter".to_string(), json!([spatial.to_value()]));
        }

        let query = if bool_body.is_empty() {
            json!({ "match_all": {} })
        } else {
            json!({ "bool": bool_body })
        };

        json!({
            "_source": { "includes": self.fields },
            "query": query,
            "size": self.size,
        })
    }

    /// Serializes the request body to a JSON string.
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Serializes the request body to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_else(|_| self.to_json())
    }
}

/// Translates one filter entry into its clause.
fn thematic_clause(entry: &FilterEntry) -> Clause {
    match &entry.value {
        FilterValue::Comparison { comparator, value } => {
            let op = match comparator {
                // Equality is an exact match, not a range.
                Comparator::Equals => {
                    return Clause::Term {
                        field: entry.field.clone(),
                        value: json!(value),
                    };
                }
                Comparator::LessThan => RangeOp::Lt,
                Comparator::LessOrEqual => RangeOp::Lte,
                Comparator::GreaterThan => RangeOp::Gt,
                Comparator::GreaterOrEqual => RangeOp::Gte,
            };
            Clause::Range {
                field: entry.field.clone(),
                op,
                value: *value,
            }
        }
        FilterValue::Membership { values } => {
            if values.len() == 1 {
                Clause::Term {
                    field: entry.field.clone(),
                    value: json!(values[0]),
                }
            } else {
                Clause::Terms {
                    field: entry.field.clone(),
                    values: values.iter().map(|v| json!(v)).collect(),
                }
            }
        }
    }
}

/// Translates the spatial state into its clause, reprojecting to WGS84.
fn spatial_clause(state: &SpatialState) -> Option<Clause> {
    match state.filter {
        SpatialFilter::None => None,
        SpatialFilter::Distance { center, radius_km } => {
            let (lon, lat) = center.to_wgs84(state.crs);
            Some(Clause::GeoDistance {
                field: GEOMETRY_FIELD.to_string(),
                lat,
                lon,
                radius_km,
            })
        }
        SpatialFilter::BoundingBox(bounds) => {
            let (min_lon, min_lat) = Point::new(bounds.min_x, bounds.min_y).to_wgs84(state.crs);
            let (max_lon, max_lat) = Point::new(bounds.max_x, bounds.max_y).to_wgs84(state.crs);
            Some(Clause::GeoBoundingBox {
                field: GEOMETRY_FIELD.to_string(),
                top_left: (max_lat, min_lon),
                bottom_right: (min_lat, max_lon),
            })
        }
    }
}
