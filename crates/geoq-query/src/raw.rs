//! Raw request bodies for the manual-editor mode.
//!
//! In raw mode the user edits the request JSON directly. The body is parsed
//! and shape-checked before anything is sent: a malformed body is a reported
//! error, never a fault reaching the backend. The geometry invariant is kept
//! by appending `geom` to an explicit `_source.includes` list when missing.

use serde_json::Value;

use crate::{error::RawBodyError, field::GEOMETRY_FIELD, request::RESULT_CAP};

/// A validated raw request body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRequest {
    /// The validated body.
    body: Value,
}

impl RawRequest {
    /// Parses and validates a hand-edited request body.
    ///
    /// Checks performed:
    /// - the text must parse as a JSON object;
    /// - `query`, when present, must be an object;
    /// - `_source`, when present, must be an object whose `includes` is an
    ///   array of strings; `geom` is appended if missing;
    /// - `size`, when present, must be a non-negative integer; it is clamped
    ///   to the result cap. A missing `size` gets the cap.
    pub fn parse(text: &str) -> Result<Self, RawBodyError> {
        let value: Value = serde_json::from_str(text)?;

        let Value::Object(mut body) = value else {
            return Err(RawBodyError::NotAnObject);
        };

        if let Some(query) = body.get("query")
            && !query.is_object()
        {
            return Err(RawBodyError::InvalidSection {
                section: "query",
                expected: "an object",
            });
        }

        if let Some(source) = body.get_mut("_source") {
            validate_source(source)?;
        }

        let size = match body.get("size") {
            None => RESULT_CAP as u64,
            Some(size) => size
                .as_u64()
                .ok_or(RawBodyError::InvalidSection {
                    section: "size",
                    expected: "a non-negative integer",
                })?
                .min(RESULT_CAP as u64),
        };
        body.insert("size".to_string(), Value::from(size));

        Ok(Self {
            body: Value::Object(body),
        })
    }

    /// Borrows the validated body.
    pub fn as_value(&self) -> &Value {
        &self.body
    }

    /// Consumes the wrapper, yielding the request body.
    pub fn into_value(self) -> Value {
        self.body
    }
}

/// Validates the `_source` section, keeping the geometry field invariant.
fn validate_source(source: &mut Value) -> Result<(), RawBodyError> {
    let Some(section) = source.as_object_mut() else {
        return Err(RawBodyError::InvalidSection {
            section: "_source",
            expected: "an object",
        });
    };

    let Some(includes) = section.get_mut("includes") else {
        return Ok(());
    };

    let Some(fields) = includes.as_array_mut() else {
        return Err(RawBodyError::InvalidSection {
            section: "_source.includes",
            expected: "an array of field names",
        });
    };

    let mut has_geom = false;
    for field in fields.iter() {
        match field.as_str() {
            Some(name) => has_geom = has_geom || name == GEOMETRY_FIELD,
            None => {
                return Err(RawBodyError::InvalidSection {
                    section: "_source.includes",
                    expected: "an array of field names",
                });
            }
        }
    }
    if !has_geom {
        fields.push(Value::from(GEOMETRY_FIELD));
    }

    Ok(())
}
