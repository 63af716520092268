//! Layer style selection and value classification for geoq.
//!
//! Result layers are styled one of three ways:
//!
//! - **Flat**: a single symbol color (the generic default)
//! - **Categorical**: one color per distinct value of a field
//! - **Graduated**: a numeric field's range partitioned into classes, each
//!   mapped onto a start→end color ramp (choropleth)
//!
//! When styling is not explicitly requested, the field's default style from
//! the index mapping's `_meta.styles` entry applies; a missing entry falls
//! through to the flat default.

#![warn(missing_docs)]

mod classify;
mod color;
mod descriptor;
mod error;

pub use classify::{jenks_breaks, quantile_breaks, unique_values};
pub use color::{Color, ramp};
pub use descriptor::{
    Classification, DefaultStyle, RangeStyle, StyleDescriptor, StyleSpec, classify,
    from_metadata, select_style,
};
pub use error::StyleError;
