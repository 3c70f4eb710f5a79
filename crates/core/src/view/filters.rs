//! Stop-count filter checkbox group.
//!
//! A fixed group of five options: an "all" aggregate plus one option per
//! stop count (0..=3). The aggregate's checked state is the AND of the
//! others and can also override them; this invariant is re-established
//! after every mutation.

use serde::{Deserialize, Serialize};

/// Identifier of a filter option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterId {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "0")]
    Direct,
    #[serde(rename = "1")]
    OneStop,
    #[serde(rename = "2")]
    TwoStops,
    #[serde(rename = "3")]
    ThreeStops,
}

impl FilterId {
    /// The stop count this option filters on, or `None` for the
    /// aggregate pseudo-option.
    pub fn stop_count(&self) -> Option<usize> {
        match self {
            FilterId::All => None,
            FilterId::Direct => Some(0),
            FilterId::OneStop => Some(1),
            FilterId::TwoStops => Some(2),
            FilterId::ThreeStops => Some(3),
        }
    }
}

/// One checkbox in the filter group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOption {
    pub id: FilterId,
    pub label: String,
    pub is_checked: bool,
}

/// The fixed filter group with its consistency rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    options: Vec<FilterOption>,
}

impl Default for FilterSet {
    fn default() -> Self {
        let option = |id, label: &str, is_checked| FilterOption {
            id,
            label: label.to_string(),
            is_checked,
        };

        Self {
            options: vec![
                option(FilterId::All, "All", false),
                option(FilterId::Direct, "No stops", true),
                option(FilterId::OneStop, "1 stop", true),
                option(FilterId::TwoStops, "2 stops", true),
                option(FilterId::ThreeStops, "3 stops", false),
            ],
        }
    }
}

impl FilterSet {
    /// All options in display order.
    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    /// Set one option's checked state.
    ///
    /// Setting `All` fans out to every option; setting any other option
    /// recomputes `All` as the AND of the non-aggregate options.
    pub fn set_filter(&mut self, id: FilterId, is_checked: bool) {
        if id == FilterId::All {
            for option in &mut self.options {
                option.is_checked = is_checked;
            }
            return;
        }

        for option in &mut self.options {
            if option.id == id {
                option.is_checked = is_checked;
            }
        }

        let all_checked = self
            .options
            .iter()
            .filter(|o| o.id != FilterId::All)
            .all(|o| o.is_checked);
        for option in &mut self.options {
            if option.id == FilterId::All {
                option.is_checked = all_checked;
            }
        }
    }

    /// Stop counts of the active (checked, non-aggregate) options.
    pub fn active_stop_counts(&self) -> Vec<usize> {
        self.options
            .iter()
            .filter(|o| o.is_checked)
            .filter_map(|o| o.id.stop_count())
            .collect()
    }

    #[cfg(test)]
    fn is_checked(&self, id: FilterId) -> bool {
        self.options
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.is_checked)
            .unwrap_or(false)
    }
}
