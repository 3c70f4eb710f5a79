//! Ticket ingestion: session state, the polling loop and the consumer
//! handle that drives it.

mod runner;
mod session;
mod types;

pub use runner::IngestionLoop;
pub use session::{SearchSession, SessionSnapshot};
pub use types::{IngestError, IngestErrorInfo, IngestPhase, SessionState, TicketBatch};
