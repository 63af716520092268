//! Field descriptors and the closed field-kind variant.
//!
//! Backend mappings declare field types as strings; this module normalizes
//! them into a closed enum so every dispatch on field kind is checked at
//! compile time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the geometry field carried by every searchable index.
///
/// The geometry field is never offered as a filter or output choice, but it
/// is force-included in every request's output field list and is present in
/// every result feature.
pub const GEOMETRY_FIELD: &str = "geom";

/// The declared kind of an index field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Whole-number numeric field (integer, long, short, byte).
    Integer,
    /// Floating-point numeric field (float, double, half_float, scaled_float).
    Float,
    /// Enumerable exact-match field (keyword).
    Keyword,
    /// Free-text field (text).
    Text,
    /// Geometry field (geo_point, geo_shape).
    Geometry,
}

impl FieldKind {
    /// Normalizes a mapping type string into a field kind.
    ///
    /// Returns `None` for types the search panel does not handle (dates,
    /// booleans, nested objects, ...); such fields are not offered at all.
    pub fn from_mapping_type(mapping_type: &str) -> Option<Self> {
        match mapping_type {
            "integer" | "long" | "short" | "byte" => Some(Self::Integer),
            "float" | "double" | "half_float" | "scaled_float" => Some(Self::Float),
            "keyword" => Some(Self::Keyword),
            "text" => Some(Self::Text),
            "geo_point" | "geo_shape" => Some(Self::Geometry),
            _ => None,
        }
    }

    /// Returns true for the two numeric kinds.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Returns true if the field may carry a thematic filter.
    ///
    /// Geometry fields are spatial-only: they are never offered as filter or
    /// output choices.
    pub fn is_filterable(self) -> bool {
        !matches!(self, Self::Geometry)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Keyword => "keyword",
            Self::Text => "text",
            Self::Geometry => "geometry",
        };
        write!(f, "{name}")
    }
}

/// A named field with its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as it appears in the index mapping.
    pub name: String,
    /// Normalized field kind.
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Creates a descriptor.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Returns true if this descriptor names the geometry field.
    pub fn is_geometry(&self) -> bool {
        self.name == GEOMETRY_FIELD || self.kind == FieldKind::Geometry
    }
}
