use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::model::{OrderDataset, OrderRecord, SetDimension};

// ---------------------------------------------------------------------------
// FilterSelection – the user's current constraints
// ---------------------------------------------------------------------------

/// Inclusive calendar-day interval over the departure date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// One optional constraint per dimension.
///
/// A `None` range or an empty value set means "no restriction" on that
/// dimension. Rebuilt from the controls on every recomputation, never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    /// Departure-date interval, inclusive at both ends.
    pub departure: Option<DateRange>,
    /// Per-dimension selected values; an absent or empty set is inactive.
    pub sets: BTreeMap<SetDimension, BTreeSet<String>>,
}

impl FilterSelection {
    /// A selection with every dimension unset (the identity filter).
    pub fn unrestricted() -> Self {
        FilterSelection::default()
    }

    /// Selected values for a dimension (possibly empty = inactive).
    pub fn selected(&self, dim: SetDimension) -> Option<&BTreeSet<String>> {
        self.sets.get(&dim)
    }

    /// Whether a dimension currently restricts anything.
    pub fn is_active(&self, dim: SetDimension) -> bool {
        self.sets.get(&dim).is_some_and(|s| !s.is_empty())
    }

    /// Toggle a single value in a dimension's selected set.
    pub fn toggle(&mut self, dim: SetDimension, value: &str) {
        let selected = self.sets.entry(dim).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    /// Deactivate a dimension (no restriction).
    pub fn clear(&mut self, dim: SetDimension) {
        self.sets.remove(&dim);
    }

    fn matches(&self, order: &OrderRecord) -> bool {
        if let Some(range) = &self.departure {
            // A null departure date cannot satisfy an active range.
            match order.departure_date {
                Some(ts) if range.contains(ts.date()) => {}
                _ => return false,
            }
        }

        for (dim, selected) in &self.sets {
            if selected.is_empty() {
                continue; // nothing selected = no restriction
            }
            match dim.value(order) {
                Some(value) if selected.contains(value) => {}
                // Null values fail an active set filter.
                _ => return false,
            }
        }

        true
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the rows passing the current selection
// ---------------------------------------------------------------------------

/// Read-only view over the dataset: row indices in original order.
///
/// Owned by the current recomputation and discarded after rendering.
#[derive(Debug)]
pub struct FilteredView<'a> {
    dataset: &'a OrderDataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the surviving orders in original row order.
    pub fn iter(&self) -> impl Iterator<Item = &'a OrderRecord> + '_ {
        self.indices.iter().map(|&i| &self.dataset.orders[i])
    }

    /// Row indices into the underlying dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

/// Apply the selection to the dataset.
///
/// Dimensions compose as a strict conjunction of independent row predicates,
/// so the result is the same whatever order they are evaluated in, and
/// re-applying an already-satisfied filter changes nothing.
///
/// Callers must check `is_empty` before aggregating: an empty view is an
/// explicit "no results" condition, not an input to the aggregator.
pub fn apply<'a>(dataset: &'a OrderDataset, selection: &FilterSelection) -> FilteredView<'a> {
    let indices = dataset
        .orders
        .iter()
        .enumerate()
        .filter(|(_, order)| selection.matches(order))
        .map(|(i, _)| i)
        .collect();

    FilteredView { dataset, indices }
}
