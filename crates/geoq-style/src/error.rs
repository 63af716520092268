//! Error types for style selection.

use thiserror::Error;

/// Errors raised while building a style descriptor.
#[derive(Debug, Error)]
pub enum StyleError {
    /// A color string could not be parsed.
    #[error("invalid color '{value}': expected #rrggbb")]
    InvalidColor {
        /// The rejected value.
        value: String,
    },

    /// The chosen field has no usable values in the result set.
    #[error("field '{field}' has no values to classify")]
    NoValues {
        /// The classified field.
        field: String,
    },

    /// The break count is unusable.
    #[error("class count must be at least 1")]
    NoClasses,
}
