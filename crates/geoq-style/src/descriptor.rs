//! Style descriptors and the selection rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    classify::{jenks_breaks, quantile_breaks, unique_values},
    color::{Color, ramp},
    error::StyleError,
};

/// Generic fallback symbol color.
const DEFAULT_COLOR: Color = Color {
    r: 0x31,
    g: 0x6a,
    b: 0xc5,
};

/// Classification method for an explicit style request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Equal-count classes over a numeric field.
    Quantile,
    /// Jenks natural breaks over a numeric field.
    Jenks,
    /// One class per distinct value of a field.
    Categories,
}

/// An explicit style request from the panel's style controls.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSpec {
    /// Field driving the symbology.
    pub field: String,
    /// Classification method.
    pub method: Classification,
    /// Ramp start color.
    pub start: Color,
    /// Ramp end color.
    pub end: Color,
    /// Number of classes (graduated methods only).
    pub classes: usize,
}

/// A renderable style for a result layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyleDescriptor {
    /// A single symbol color.
    Flat {
        /// Symbol color.
        color: Color,
    },
    /// One color per distinct field value.
    Categorical {
        /// Field driving the symbology.
        field: String,
        /// Value-to-color assignments.
        categories: BTreeMap<String, Color>,
        /// Color for values without an assignment.
        default: Color,
    },
    /// A numeric field's range partitioned into classes on a color ramp.
    Graduated {
        /// Field driving the symbology.
        field: String,
        /// Class edges, minimum first, maximum last (`classes + 1` entries).
        breaks: Vec<f64>,
        /// One color per class.
        colors: Vec<Color>,
    },
}

impl StyleDescriptor {
    /// The generic flat default style.
    pub fn flat_default() -> Self {
        Self::Flat {
            color: DEFAULT_COLOR,
        }
    }
}

/// A per-field default style declared in the index mapping's `_meta.styles`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefaultStyle {
    /// Fixed value-to-color assignments.
    Categorical {
        /// Value-to-color map (hex strings).
        categories: BTreeMap<String, String>,
    },
    /// Predefined numeric ranges.
    Ranges {
        /// Range entries, in display order.
        ranges: Vec<RangeStyle>,
    },
}

/// One entry of a predefined range style.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RangeStyle {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (exclusive except for the last entry).
    pub max: f64,
    /// Color as a hex string.
    pub color: String,
}

/// Chooses the style for a result layer.
///
/// With an explicit `spec` the requested classification runs over
/// `field_values` (the spec field's values across the result features).
/// Without one, the `default_field`'s entry in the mapping's declared
/// `defaults` applies; a missing or unparsable entry falls through to the
/// flat default. There are no failure semantics here: every path yields a
/// usable style.
pub fn select_style(
    spec: Option<&StyleSpec>,
    field_values: &[Value],
    default_field: Option<&str>,
    defaults: &BTreeMap<String, DefaultStyle>,
) -> StyleDescriptor {
    if let Some(spec) = spec {
        return classify(spec, field_values).unwrap_or_else(|_| StyleDescriptor::flat_default());
    }

    default_field
        .and_then(|field| defaults.get(field).map(|style| from_metadata(field, style)))
        .unwrap_or_else(StyleDescriptor::flat_default)
}

/// Runs the requested classification over the field's result values.
pub fn classify(spec: &StyleSpec, field_values: &[Value]) -> Result<StyleDescriptor, StyleError> {
    match spec.method {
        Classification::Quantile | Classification::Jenks => {
            if spec.classes == 0 {
                return Err(StyleError::NoClasses);
            }
            let numbers: Vec<f64> = field_values.iter().filter_map(Value::as_f64).collect();
            if numbers.is_empty() {
                return Err(StyleError::NoValues {
                    field: spec.field.clone(),
                });
            }
            let breaks = match spec.method {
                Classification::Quantile => quantile_breaks(&numbers, spec.classes),
                Classification::Jenks => jenks_breaks(&numbers, spec.classes),
                Classification::Categories => unreachable!("matched above"),
            };
            let classes = breaks.len() - 1;
            Ok(StyleDescriptor::Graduated {
                field: spec.field.clone(),
                breaks,
                colors: ramp(spec.start, spec.end, classes),
            })
        }
        Classification::Categories => {
            let strings: Vec<String> = field_values
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect();
            if strings.is_empty() {
                return Err(StyleError::NoValues {
                    field: spec.field.clone(),
                });
            }
            let values = unique_values(strings);
            let colors = ramp(spec.start, spec.end, values.len());
            Ok(StyleDescriptor::Categorical {
                field: spec.field.clone(),
                categories: values.into_iter().zip(colors).collect(),
                default: DEFAULT_COLOR,
            })
        }
    }
}

/// Builds a descriptor from a field's `_meta.styles` default.
///
/// Colors that fail to parse fall back to the generic default color rather
/// than failing the whole style.
pub fn from_metadata(field: &str, style: &DefaultStyle) -> StyleDescriptor {
    match style {
        DefaultStyle::Categorical { categories } => StyleDescriptor::Categorical {
            field: field.to_string(),
            categories: categories
                .iter()
                .map(|(value, hex)| {
                    (
                        value.clone(),
                        Color::from_hex(hex).unwrap_or(DEFAULT_COLOR),
                    )
                })
                .collect(),
            default: DEFAULT_COLOR,
        },
        DefaultStyle::Ranges { ranges } => {
            let mut breaks = Vec::with_capacity(ranges.len() + 1);
            let mut colors = Vec::with_capacity(ranges.len());
            for (idx, range) in ranges.iter().enumerate() {
                if idx == 0 {
                    breaks.push(range.min);
                }
                breaks.push(range.max);
                colors.push(Color::from_hex(&range.color).unwrap_or(DEFAULT_COLOR));
            }
            StyleDescriptor::Graduated {
                field: field.to_string(),
                breaks,
                colors,
            }
        }
    }
}
