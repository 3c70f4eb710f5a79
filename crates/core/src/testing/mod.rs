//! Testing utilities: a scriptable mock ticket source and fixtures.
//!
//! The mock replaces the real HTTP upstream in unit and E2E tests,
//! letting tests script exact batch/error sequences without network
//! infrastructure.

pub mod fixtures;
mod mock_source;

pub use mock_source::MockTicketSource;
