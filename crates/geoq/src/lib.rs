//! geoq: filtered geospatial search against Elasticsearch indices.
//!
//! geoq builds structured search requests from field selections, thematic
//! filters and spatial constraints, executes them against an
//! Elasticsearch-backed geospatial index, and emits the matching documents
//! as a GeoJSON layer with a style descriptor a map client can render.
//! A raw mode accepts hand-edited request bodies after validation.

#![warn(missing_docs)]

pub mod cli;
pub mod panel;
