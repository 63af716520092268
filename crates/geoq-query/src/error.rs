//! Error types for request construction and filter expressions.

use std::{error::Error as StdError, fmt};

use thiserror::Error;

/// Errors raised while validating a raw request body.
#[derive(Debug, Error)]
pub enum RawBodyError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The root of the body is not a JSON object.
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// A known section has the wrong shape.
    #[error("'{section}' must be {expected}")]
    InvalidSection {
        /// Section path within the body.
        section: &'static str,
        /// What the section is expected to be.
        expected: &'static str,
    },
}

/// Filter expression error with position information.
///
/// Rendered with a caret pointing at the offending position:
///
/// ```text
/// filter expression error: expected a number
///   area >= ten
///            ^
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprError {
    /// Error message.
    pub message: String,
    /// Byte position in input where the error occurred.
    pub position: usize,
    /// The original input string.
    pub input: String,
}

impl ExprError {
    /// Creates a new expression error.
    pub fn new(message: impl Into<String>, position: usize, input: &str) -> Self {
        Self {
            message: message.into(),
            position,
            input: input.to_string(),
        }
    }

    /// Formats the error with a position indicator.
    pub fn format_with_context(&self) -> String {
        let mut result = String::new();
        result.push_str(&format!("filter expression error: {}\n", self.message));
        result.push_str(&format!("  {}\n", self.input));
        result.push_str(&format!("  {}^", " ".repeat(self.position.min(self.input.len()))));
        result
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_context())
    }
}

impl StdError for ExprError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expr_error_points_at_position() {
        let err = ExprError::new("expected a number", 8, "area >= ten");
        let display = err.to_string();
        assert!(display.contains("expected a number"));
        assert!(display.contains("area >= ten"));
        assert!(display.contains('^'));
        // Caret sits under position 8.
        let caret_line = display.lines().last().unwrap();
        assert_eq!(caret_line, format!("  {}^", " ".repeat(8)));
    }

    #[test]
    fn expr_error_clamps_out_of_range_position() {
        let err = ExprError::new("unexpected end of input", 99, "area");
        let caret_line = err.to_string().lines().last().unwrap().to_string();
        assert_eq!(caret_line, format!("  {}^", " ".repeat(4)));
    }
}
