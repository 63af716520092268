//! Filter-input controls.
//!
//! Each filterable field gets a control shaped by its declared kind:
//! numeric fields a comparator + number input with a min/max hint, keyword
//! fields a multi-select over the field's distinct values, text fields a
//! plain text input. Geometry fields get no control at all.

use geoq_client::{Client, ClientError, NumericStats};
use geoq_query::{Comparator, FieldDescriptor, FieldKind};

/// Comparators offered by numeric controls.
pub const NUMERIC_COMPARATORS: [Comparator; 5] = [
    Comparator::Equals,
    Comparator::LessThan,
    Comparator::LessOrEqual,
    Comparator::GreaterThan,
    Comparator::GreaterOrEqual,
];

/// The input control rendered for a filterable field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterControl {
    /// Comparator + number input.
    Numeric {
        /// Field name.
        field: String,
        /// Numeric kind (integer or float).
        kind: FieldKind,
        /// Observed value range, as a pre-fill hint (not hard validation).
        hint: Option<NumericStats>,
    },
    /// Multi-select over the field's distinct values.
    ///
    /// An empty option list is a valid control: it renders with no options.
    MultiSelect {
        /// Field name.
        field: String,
        /// Distinct values, ascending.
        options: Vec<String>,
    },
    /// Plain text input (single-value equality).
    Text {
        /// Field name.
        field: String,
    },
}

/// Builds the control for a field, fetching stats or distinct values as the
/// kind requires.
///
/// Returns `None` for geometry fields: they are never offered as filters.
pub async fn build_control(
    client: &Client,
    index: &str,
    field: &FieldDescriptor,
) -> Result<Option<FilterControl>, ClientError> {
    let control = match field.kind {
        FieldKind::Integer | FieldKind::Float => {
            let hint = client.numeric_stats(index, &field.name).await?;
            FilterControl::Numeric {
                field: field.name.clone(),
                kind: field.kind,
                hint,
            }
        }
        FieldKind::Keyword => {
            let options = client.distinct_values(index, &field.name).await?;
            FilterControl::MultiSelect {
                field: field.name.clone(),
                options,
            }
        }
        FieldKind::Text => FilterControl::Text {
            field: field.name.clone(),
        },
        FieldKind::Geometry => return Ok(None),
    };
    Ok(Some(control))
}
