//! Filter/sort/reveal computation over the accumulated ticket collection.

use serde::{Deserialize, Serialize};

use crate::ticket::Ticket;

use super::FilterSet;

/// Number of tickets shown before any "reveal more" request.
pub const INITIAL_REVEAL: usize = 5;

/// How many additional tickets each "reveal more" request exposes.
pub const REVEAL_STEP: usize = 5;

/// Sort order for the visible ticket list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Cheapest,
    Fastest,
}

fn matches_filters(ticket: &Ticket, active_stop_counts: &[usize]) -> bool {
    ticket
        .segments
        .iter()
        .any(|segment| active_stop_counts.contains(&segment.stop_count()))
}

/// Compute the visible prefix of the filtered, sorted ticket collection.
///
/// A ticket is retained when at least one of its segments has a stop
/// count matching an active filter. Sorting is stable, so tickets with
/// equal keys keep their ingestion order. `reveal_count` is clamped to
/// the filtered length.
///
/// The "fastest" sort orders by the first segment's duration only, not
/// the total itinerary duration. Intentional; see the dedicated test
/// below before changing it.
pub fn compute_visible(
    tickets: &[Ticket],
    filters: &FilterSet,
    sort: SortMode,
    reveal_count: usize,
) -> Vec<Ticket> {
    let active = filters.active_stop_counts();

    let mut filtered: Vec<Ticket> = tickets
        .iter()
        .filter(|ticket| matches_filters(ticket, &active))
        .cloned()
        .collect();

    match sort {
        SortMode::Cheapest => filtered.sort_by_key(|t| t.price),
        SortMode::Fastest => filtered.sort_by_key(|t| t.first_segment_duration()),
    }

    filtered.truncate(reveal_count);
    filtered
}

/// Number of tickets matching the active filters, ignoring the reveal
/// limit. Consumers use this to decide whether more can be revealed.
pub fn count_matching(tickets: &[Ticket], filters: &FilterSet) -> usize {
    let active = filters.active_stop_counts();
    tickets
        .iter()
        .filter(|ticket| matches_filters(ticket, &active))
        .count()
}
