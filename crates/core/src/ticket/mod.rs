//! Flight ticket data model.

mod types;

pub use types::{RawTicket, Segment, Ticket, TicketId};
