//! Ticket fixtures for tests.

use chrono::{TimeZone, Utc};

use crate::ticket::{RawTicket, Segment};

/// Build a segment with the given stop count and duration in minutes.
pub fn segment(stops: usize, duration: u32) -> Segment {
    Segment {
        origin: "MOW".to_string(),
        destination: "HKT".to_string(),
        date: Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap(),
        stops: (0..stops).map(|i| format!("XX{}", i)).collect(),
        duration,
    }
}

/// Build a raw ticket from `(stop_count, duration)` pairs, one per
/// segment.
pub fn raw_ticket(carrier: &str, price: u32, segments: &[(usize, u32)]) -> RawTicket {
    RawTicket {
        carrier: carrier.to_string(),
        price,
        segments: segments
            .iter()
            .map(|&(stops, duration)| segment(stops, duration))
            .collect(),
    }
}

/// Build `n` direct round-trip tickets with slightly varying prices.
pub fn raw_batch(n: usize) -> Vec<RawTicket> {
    (0..n)
        .map(|i| raw_ticket("SU", 10_000 + (i as u32 % 97) * 13, &[(0, 120), (0, 130)]))
        .collect()
}
