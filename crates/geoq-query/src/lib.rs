//! Filter model and search request construction for geoq.
//!
//! This crate turns a search session's state into a single structured
//! Elasticsearch request body:
//!
//! - **Fields**: declared field kinds with exhaustive matching
//! - **Filters**: per-field thematic filter entries (at most one per field)
//! - **Spatial**: an optional distance or bounding-box constraint
//! - **Clauses**: typed clause values, serialized once at the boundary
//! - **Raw mode**: validation for hand-edited request bodies
//! - **Expressions**: a small `field>=value` filter expression language
//!
//! # Example
//!
//! ```
//! use geoq_query::{Comparator, FilterEntry, FilterSet, SearchRequest, SpatialState};
//!
//! let mut filters = FilterSet::default();
//! filters.set(FilterEntry::comparison("area", Comparator::GreaterOrEqual, 100.0));
//!
//! let request = SearchRequest::build(
//!     &["area".to_string()],
//!     &filters,
//!     true,
//!     &SpatialState::default(),
//! );
//! assert_eq!(request.fields(), ["area", "geom"]);
//! ```

#![warn(missing_docs)]

mod clause;
mod error;
mod expr;
mod field;
mod filter;
mod raw;
mod request;
mod spatial;

pub use clause::{Clause, RangeOp};
pub use error::{ExprError, RawBodyError};
pub use expr::{FilterExpr, parse_filter};
pub use field::{FieldDescriptor, FieldKind, GEOMETRY_FIELD};
pub use filter::{Comparator, FilterEntry, FilterSet, FilterValue};
pub use raw::RawRequest;
pub use request::{RESULT_CAP, SearchRequest};
pub use spatial::{Bounds, MapCrs, Point, SpatialFilter, SpatialState, mercator_to_wgs84};
