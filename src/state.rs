use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::CategoryColors;
use crate::data::aggregate::DashboardData;
use crate::data::cache::DatasetCache;
use crate::data::filter::{self, DateRange, FilterSelection};
use crate::data::model::{OrderDataset, SetDimension};

/// Default extract location; the upstream pipeline drops the file next to
/// the binary. File → Open… points the dashboard elsewhere.
pub const DEFAULT_DATA_FILE: &str = "df_geo_v2.parquet";

/// Default on-time delivery target (90%).
pub const DEFAULT_TARGET: f64 = 0.9;

// ---------------------------------------------------------------------------
// Pipeline outcome
// ---------------------------------------------------------------------------

/// What the central panel should show.
///
/// Every failure mode ends up here as an explicit state - nothing in the
/// pipeline panics or leaks an error into rendering code.
pub enum Dashboard {
    /// No dataset yet (not loaded, or the load failed - see status message).
    NotLoaded,
    /// The current filters match no orders; aggregation was skipped.
    NoResults,
    /// Aggregates over a non-empty filtered view.
    Ready(DashboardData),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Memoized dataset load (the only long-lived data).
    pub cache: DatasetCache,

    /// Current filter constraints, rebuilt by the controls.
    pub selection: FilterSelection,

    /// On-time delivery target in `[0, 1]`.
    pub target: f64,

    /// Output of the latest recomputation.
    pub dashboard: Dashboard,

    /// Bar colours per priority class.
    pub priority_colors: CategoryColors,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: DatasetCache::new(DEFAULT_DATA_FILE),
            selection: FilterSelection::unrestricted(),
            target: DEFAULT_TARGET,
            dashboard: Dashboard::NotLoaded,
            priority_colors: CategoryColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Load the extract behind `cache` and run the first recomputation.
    ///
    /// On failure the dashboard stays in `NotLoaded` with a visible message;
    /// no filtering or aggregation is attempted.
    pub fn load(&mut self) {
        match self.cache.get_or_load() {
            Ok(dataset) => {
                self.selection = initial_selection(&dataset);
                self.priority_colors = CategoryColors::new(
                    dataset
                        .values_for(SetDimension::Priority)
                        .into_iter()
                        .flatten()
                        .map(String::as_str),
                );
                self.status_message = None;
                self.recompute();
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.cache.path().display());
                self.status_message = Some(format!("Error: {e}"));
                self.dashboard = Dashboard::NotLoaded;
            }
        }
    }

    /// Point the dashboard at a different extract file.
    pub fn open_file(&mut self, path: &Path) {
        self.cache = DatasetCache::new(path);
        self.load();
    }

    /// The loaded dataset, if any.
    pub fn dataset(&self) -> Option<&Arc<OrderDataset>> {
        self.cache.loaded()
    }

    /// Orders passing the current filters (0 when nothing is loaded).
    pub fn visible_count(&self) -> usize {
        match &self.dashboard {
            Dashboard::Ready(data) => data.orders,
            _ => 0,
        }
    }

    /// Re-run filter + aggregation from the cached dataset.
    ///
    /// An empty filter result short-circuits to `NoResults` before any
    /// aggregate runs, so the undefined-mean/rate cases never arise.
    pub fn recompute(&mut self) {
        let Some(dataset) = self.cache.loaded() else {
            self.dashboard = Dashboard::NotLoaded;
            return;
        };

        let view = filter::apply(dataset, &self.selection);
        self.dashboard = if view.is_empty() {
            Dashboard::NoResults
        } else {
            Dashboard::Ready(DashboardData::compute(&view))
        };
    }

    /// Toggle a value in a dimension's filter and recompute.
    pub fn toggle_filter_value(&mut self, dim: SetDimension, value: &str) {
        self.selection.toggle(dim, value);
        self.recompute();
    }

    /// Lift a dimension's restriction entirely.
    pub fn clear_dimension(&mut self, dim: SetDimension) {
        self.selection.clear(dim);
        self.recompute();
    }

    /// Set the departure-date interval and recompute.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.selection.departure = Some(DateRange { start, end });
        self.recompute();
    }
}

/// Fresh selection for a newly loaded dataset: date range spanning the whole
/// extract, no categorical restrictions.
fn initial_selection(dataset: &OrderDataset) -> FilterSelection {
    let mut selection = FilterSelection::unrestricted();
    selection.departure = dataset
        .departure_bounds
        .map(|(start, end)| DateRange { start, end });
    selection
}
