//! Elasticsearch catalog, aggregation and search client for geoq.
//!
//! This crate is the only place geoq talks to the network. It covers:
//!
//! - **Catalog**: listing searchable indices and reading per-index field
//!   mappings (including default styles declared under `_meta.styles`)
//! - **Aggregations**: zero-hit stats and terms queries that feed the
//!   panel's filter controls
//! - **Search**: executing a built request and converting hits into map
//!   features
//! - **Sequencing**: a monotonic guard so stale responses from overlapping
//!   operations are dropped instead of overwriting newer state
//!
//! All calls share one HTTP layer with a configurable timeout and bounded
//! exponential-backoff retries for transient failures.

#![warn(missing_docs)]

mod aggs;
mod catalog;
mod client;
mod error;
mod response;
mod search;
mod seq;

pub use aggs::{DISTINCT_VALUES_CAP, NumericStats};
pub use catalog::{IndexDescriptor, IndexFields};
pub use client::{BasicAuth, Client, ClientOptions};
pub use error::ClientError;
pub use search::Feature;
pub use seq::{SeqGuard, Ticket};
