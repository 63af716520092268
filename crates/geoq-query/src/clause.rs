//! Typed query clauses.
//!
//! Clauses are built as a closed enum and rendered to JSON once, at the
//! request boundary, rather than being glued together as strings.

use serde_json::{Value, json};

/// Range operator codes accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl RangeOp {
    /// The operator key used in a range clause body.
    pub fn code(self) -> &'static str {
        match self {
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
        }
    }

    /// Parses an operator code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            _ => None,
        }
    }
}

/// A single query clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Exact match of one value.
    Term {
        /// Field to match.
        field: String,
        /// Value to match (string or number).
        value: Value,
    },
    /// Membership in a list of values.
    Terms {
        /// Field to match.
        field: String,
        /// Accepted values.
        values: Vec<Value>,
    },
    /// Numeric range comparison.
    Range {
        /// Field to compare.
        field: String,
        /// Operator.
        op: RangeOp,
        /// Bound value.
        value: f64,
    },
    /// Within `radius_km` kilometers of a geographic point.
    GeoDistance {
        /// Geometry field name.
        field: String,
        /// Center latitude in degrees.
        lat: f64,
        /// Center longitude in degrees.
        lon: f64,
        /// Radius in kilometers.
        radius_km: f64,
    },
    /// Within a geographic bounding box.
    GeoBoundingBox {
        /// Geometry field name.
        field: String,
        /// North-west corner as `(lat, lon)`.
        top_left: (f64, f64),
        /// South-east corner as `(lat, lon)`.
        bottom_right: (f64, f64),
    },
}

impl Clause {
    /// Renders the clause to its JSON body.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Term { field, value } => json!({ "term": { (field): value } }),
            Self::Terms { field, values } => json!({ "terms": { (field): values } }),
            Self::Range { field, op, value } => {
                json!({ "range": { (field): { (op.code()): value } } })
            }
            Self::GeoDistance {
                field,
                lat,
                lon,
                radius_km,
            } => json!({
                "geo_distance": {
                    "distance": format!("{radius_km}km"),
                    (field): { "lat": lat, "lon": lon },
                }
            }),
            Self::GeoBoundingBox {
                field,
                top_left,
                bottom_right,
            } => json!({
                "geo_bounding_box": {
                    (field): {
                        "top_left": { "lat": top_left.0, "lon": top_left.1 },
                        "bottom_right": { "lat": bottom_right.0, "lon": bottom_right.1 },
                    }
                }
            }),
        }
    }
}
