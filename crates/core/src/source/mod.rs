//! Upstream ticket search abstraction.
//!
//! This module provides a `TicketSource` trait for the paginated upstream
//! search service, plus the HTTP implementation used in production. Tests
//! inject a mock implementation instead (see `crate::testing`).

mod http;
mod types;

pub use http::HttpTicketSource;
pub use types::{PollBatch, SearchId, SourceError, TicketSource};
