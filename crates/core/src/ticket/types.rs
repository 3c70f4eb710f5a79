//! Types for flight tickets and their segments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a ticket when it is ingested.
///
/// Upstream tickets carry no id of their own; a session-scoped counter
/// assigns one so consumers have a stable display key. Uniqueness holds
/// within a single search session only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub u64);

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t-{}", self.0)
    }
}

/// One leg of an itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Departure airport code.
    pub origin: String,
    /// Arrival airport code.
    pub destination: String,
    /// Departure time.
    pub date: DateTime<Utc>,
    /// Airport codes of intermediate stops. The length of this list is
    /// the stop-count classifier used by filtering.
    pub stops: Vec<String>,
    /// Flight duration in minutes.
    pub duration: u32,
}

impl Segment {
    /// Number of intermediate stops on this segment.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}

/// A ticket as it arrives on the wire, before an id is assigned.
///
/// The upstream contract carries exactly two segments (outbound and
/// return); this is not enforced on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTicket {
    /// Carrier IATA code.
    pub carrier: String,
    /// Total price.
    pub price: u32,
    /// Itinerary segments, in travel order.
    pub segments: Vec<Segment>,
}

/// An ingested ticket with its session-scoped id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub carrier: String,
    pub price: u32,
    pub segments: Vec<Segment>,
}

impl Ticket {
    /// Attach an id to a raw upstream ticket.
    pub fn from_raw(id: TicketId, raw: RawTicket) -> Self {
        Self {
            id,
            carrier: raw.carrier,
            price: raw.price,
            segments: raw.segments,
        }
    }

    /// Duration of the first segment in minutes, or 0 for a ticket
    /// without segments. Used by the "fastest" sort.
    pub fn first_segment_duration(&self) -> u32 {
        self.segments.first().map(|s| s.duration).unwrap_or(0)
    }
}
