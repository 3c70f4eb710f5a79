//! HTTP surface for the ticket search aggregation service.
//!
//! Exposed as a library so integration tests can build the router
//! in-process with a mock upstream source.

pub mod api;
pub mod metrics;
pub mod state;
