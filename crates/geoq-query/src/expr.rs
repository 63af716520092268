//! Filter expression parsing.
//!
//! A small textual form for filter entries, used when the panel is driven
//! from a command line rather than widget controls:
//!
//! - `area >= 100`: numeric comparison
//! - `floors = 3`: numeric equality (on a numeric field)
//! - `type = residential,commercial`: keyword membership
//! - `name = "Main Street"`: quoted values may contain commas and spaces
//!
//! Parsing is kind-agnostic: `parse_filter` produces a [`FilterExpr`] with
//! the raw right-hand side, and [`FilterExpr::into_entry`] resolves it
//! against the field's declared kind once mappings are known.

use crate::{
    error::ExprError,
    field::{FieldKind, GEOMETRY_FIELD},
    filter::{Comparator, FilterEntry},
};

/// A parsed but not yet kind-resolved filter expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    /// Field name on the left-hand side.
    pub field: String,
    /// Comparison operator.
    pub comparator: Comparator,
    /// Raw right-hand side values (split on commas outside quotes).
    pub values: Vec<String>,
    /// The original input, kept for error reporting.
    input: String,
    /// Byte position where the right-hand side starts.
    rhs_position: usize,
}

/// Parses a filter expression of the form `field <op> value[,value...]`.
pub fn parse_filter(input: &str) -> Result<FilterExpr, ExprError> {
    let (field, rest_at) = read_field(input)?;
    let (comparator, rhs_at) = read_comparator(input, rest_at)?;
    let values = read_values(input, rhs_at)?;

    Ok(FilterExpr {
        field,
        comparator,
        values,
        input: input.to_string(),
        rhs_position: rhs_at,
    })
}

impl FilterExpr {
    /// Resolves the expression against the field's declared kind.
    ///
    /// Numeric kinds require a single numeric right-hand side; keyword and
    /// text kinds accept only the equality operator. The geometry field is
    /// never filterable.
    pub fn into_entry(self, kind: FieldKind) -> Result<FilterEntry, ExprError> {
        if self.field == GEOMETRY_FIELD || kind == FieldKind::Geometry {
            return Err(ExprError::new(
                format!("'{}' is the geometry field and cannot be filtered", self.field),
                0,
                &self.input,
            ));
        }

        match kind {
            FieldKind::Integer | FieldKind::Float => {
                if self.values.len() != 1 {
                    return Err(ExprError::new(
                        "numeric fields take a single value",
                        self.rhs_position,
                        &self.input,
                    ));
                }
                let value: f64 = self.values[0].parse().map_err(|_| {
                    ExprError::new("expected a number", self.rhs_position, &self.input)
                })?;
                Ok(FilterEntry::comparison(self.field, self.comparator, value))
            }
            FieldKind::Keyword | FieldKind::Text => {
                if self.comparator != Comparator::Equals {
                    return Err(ExprError::new(
                        format!("'{}' fields only support '='", kind),
                        0,
                        &self.input,
                    ));
                }
                Ok(FilterEntry::membership(self.field, self.values))
            }
            FieldKind::Geometry => unreachable!("handled above"),
        }
    }
}

/// Reads the field name; returns it with the position just past it.
fn read_field(input: &str) -> Result<(String, usize), ExprError> {
    let trimmed_start = input.len() - input.trim_start().len();
    let mut end = trimmed_start;
    for (idx, ch) in input[trimmed_start..].char_indices() {
        if ch.is_whitespace() || matches!(ch, '=' | '<' | '>') {
            break;
        }
        end = trimmed_start + idx + ch.len_utf8();
    }

    if end == trimmed_start {
        return Err(ExprError::new("expected a field name", trimmed_start, input));
    }
    Ok((input[trimmed_start..end].to_string(), end))
}

/// Reads the comparator; returns it with the position just past it.
fn read_comparator(input: &str, from: usize) -> Result<(Comparator, usize), ExprError> {
    let rest = &input[from..];
    let offset = rest.len() - rest.trim_start().len();
    let at = from + offset;
    let rest = &input[at..];

    let (comparator, len) = if rest.starts_with("<=") {
        (Comparator::LessOrEqual, 2)
    } else if rest.starts_with(">=") {
        (Comparator::GreaterOrEqual, 2)
    } else if rest.starts_with('<') {
        (Comparator::LessThan, 1)
    } else if rest.starts_with('>') {
        (Comparator::GreaterThan, 1)
    } else if rest.starts_with('=') {
        (Comparator::Equals, 1)
    } else {
        return Err(ExprError::new(
            "expected one of '=', '<', '<=', '>', '>='",
            at,
            input,
        ));
    };

    Ok((comparator, at + len))
}

/// Reads the comma-separated right-hand side, honoring double quotes.
fn read_values(input: &str, from: usize) -> Result<Vec<String>, ExprError> {
    let rest = input[from..].trim();
    if rest.is_empty() {
        return Err(ExprError::new("expected a value", input.len(), input));
    }

    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for (idx, ch) in rest.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                let value = current.trim().to_string();
                if value.is_empty() {
                    return Err(ExprError::new("empty value in list", from + idx, input));
                }
                values.push(value);
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if in_quotes {
        return Err(ExprError::new("unclosed quote", input.len(), input));
    }

    let last = current.trim().to_string();
    if last.is_empty() {
        return Err(ExprError::new("trailing comma in value list", input.len(), input));
    }
    values.push(last);

    Ok(values)
}
