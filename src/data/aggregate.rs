use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta};

use super::filter::FilteredView;
use super::model::{DurationColumn, FlagColumn, QuantColumn, SetDimension};

// ---------------------------------------------------------------------------
// Scalar aggregates
// ---------------------------------------------------------------------------

/// Number of orders in the view.
pub fn count(view: &FilteredView) -> usize {
    view.len()
}

/// Sum of a quantitative column; nulls count as zero.
pub fn sum(view: &FilteredView, column: QuantColumn) -> f64 {
    view.iter().filter_map(|o| column.value(o)).sum()
}

/// Arithmetic mean of a duration column, ignoring nulls.
///
/// `None` when every entry is null - callers render a placeholder, never a
/// computed zero.
pub fn mean_duration(view: &FilteredView, column: DurationColumn) -> Option<TimeDelta> {
    mean_of(view.iter().filter_map(|o| column.value(o)))
}

/// Mean over the strictly-positive entries of a duration column.
///
/// Used for the average delay: a zero or negative delay means "on time", not
/// a negative lateness, so it must not drag the mean down.
pub fn mean_duration_positive(view: &FilteredView, column: DurationColumn) -> Option<TimeDelta> {
    mean_of(
        view.iter()
            .filter_map(|o| column.value(o))
            .filter(|d| *d > TimeDelta::zero()),
    )
}

fn mean_of(durations: impl Iterator<Item = TimeDelta>) -> Option<TimeDelta> {
    let mut total = TimeDelta::zero();
    let mut n: i32 = 0;
    for d in durations {
        total = total + d;
        n += 1;
    }
    (n > 0).then(|| total / n)
}

/// Fraction of non-null entries of an indicator column that are true.
///
/// `None` when the column has no non-null entries. The recompute pipeline
/// never reaches this on an empty view (the empty-result short-circuit runs
/// first), but the zero-denominator guard holds regardless.
pub fn rate(view: &FilteredView, column: FlagColumn) -> Option<f64> {
    let mut trues = 0usize;
    let mut known = 0usize;
    for order in view.iter() {
        if let Some(flag) = column.value(order) {
            known += 1;
            if flag {
                trues += 1;
            }
        }
    }
    (known > 0).then(|| trues as f64 / known as f64)
}

/// Before-cutoff deliveries relative to late deliveries.
///
/// The denominator is the late-order count, not the view size - that is the
/// reporting convention this dashboard inherits (see DESIGN.md). `None` when
/// no order is late.
pub fn cutoff_ratio(view: &FilteredView) -> Option<f64> {
    let before = view
        .iter()
        .filter(|o| o.before_cutoff == Some(true))
        .count();
    let late = view.iter().filter(|o| o.late == Some(true)).count();
    (late > 0).then(|| before as f64 / late as f64)
}

// ---------------------------------------------------------------------------
// Grouped aggregates
// ---------------------------------------------------------------------------

/// Orders per distinct value of a categorical dimension.
///
/// First-seen order within the view; null categories are dropped.
pub fn group_count(view: &FilteredView, dimension: SetDimension) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for order in view.iter() {
        let Some(value) = dimension.value(order) else {
            continue;
        };
        match counts.iter_mut().find(|(v, _)| v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    counts
}

/// One calendar day of traffic.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBucket {
    pub day: NaiveDate,
    /// Sum of the chosen quantity over the day's orders (nulls as zero).
    pub total: f64,
    /// Orders whose last event fell on the day.
    pub orders: usize,
}

/// Per-day totals over the last-event date, sorted ascending by day.
///
/// Orders with a null last-event date are dropped. The ascending sort is a
/// hard requirement: the combo chart assumes a monotonic x-axis.
pub fn group_daily(view: &FilteredView, quantity: QuantColumn) -> Vec<DailyBucket> {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for order in view.iter() {
        let Some(ts) = order.last_event_date else {
            continue;
        };
        let entry = buckets.entry(ts.date()).or_insert((0.0, 0));
        entry.0 += quantity.value(order).unwrap_or(0.0);
        entry.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(day, (total, orders))| DailyBucket { day, total, orders })
        .collect()
}

// ---------------------------------------------------------------------------
// DashboardData – everything the central panel renders
// ---------------------------------------------------------------------------

/// Aggregates for one recomputation, consumed by the dashboard panel.
///
/// Only ever built from a non-empty view; `None` fields mean "no data" for
/// that scorecard (all-null column), not zero.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub orders: usize,
    pub packages: u64,
    pub mean_delivery: Option<TimeDelta>,
    pub mean_processing: Option<TimeDelta>,
    pub mean_last_mile: Option<TimeDelta>,
    /// Mean over late orders only (positive delays).
    pub mean_delay: Option<TimeDelta>,
    /// Share of orders delivered on time (1 - late rate).
    pub on_time_rate: Option<f64>,
    /// Before-cutoff deliveries per late delivery.
    pub cutoff_ratio: Option<f64>,
    pub by_priority: Vec<(String, usize)>,
    pub daily: Vec<DailyBucket>,
}

impl DashboardData {
    pub fn compute(view: &FilteredView) -> Self {
        DashboardData {
            orders: count(view),
            packages: sum(view, QuantColumn::PackageCount) as u64,
            mean_delivery: mean_duration(view, DurationColumn::Delivery),
            mean_processing: mean_duration(view, DurationColumn::Processing),
            mean_last_mile: mean_duration(view, DurationColumn::LastMile),
            mean_delay: mean_duration_positive(view, DurationColumn::Delay),
            on_time_rate: rate(view, FlagColumn::Late).map(|late| 1.0 - late),
            cutoff_ratio: cutoff_ratio(view),
            by_priority: group_count(view, SetDimension::Priority),
            daily: group_daily(view, QuantColumn::DeclaredWeight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSelection};
    use crate::data::model::{OrderDataset, OrderRecord};
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn hours(h: i64) -> TimeDelta {
        TimeDelta::hours(h)
    }

    #[test]
    fn count_sum_and_daily_traffic() {
        // Three orders on consecutive days, weights 10/20/30.
        let orders: Vec<OrderRecord> = (1..=3)
            .map(|d| OrderRecord {
                reference: Some(format!("OT-{d}")),
                last_event_date: Some(ts(d, 10)),
                declared_weight: Some(10.0 * d as f64),
                package_count: Some(2),
                ..OrderRecord::default()
            })
            .collect();
        let ds = OrderDataset::from_orders(orders);
        let view = apply(&ds, &FilterSelection::unrestricted());

        assert_eq!(count(&view), 3);
        assert_eq!(sum(&view, QuantColumn::DeclaredWeight), 60.0);
        assert_eq!(sum(&view, QuantColumn::PackageCount), 6.0);

        let daily = group_daily(&view, QuantColumn::DeclaredWeight);
        assert_eq!(daily.len(), 3);
        let days: Vec<NaiveDate> = daily.iter().map(|b| b.day).collect();
        let mut sorted = days.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(days, sorted, "days must be ascending and unique");
        assert_eq!(
            daily.iter().map(|b| b.orders).collect::<Vec<_>>(),
            vec![1, 1, 1]
        );
        assert_eq!(daily.iter().map(|b| b.orders).sum::<usize>(), count(&view));
        assert_eq!(daily[2].total, 30.0);
    }

    #[test]
    fn sum_treats_nulls_as_zero() {
        let ds = OrderDataset::from_orders(vec![
            OrderRecord {
                declared_weight: Some(5.0),
                ..OrderRecord::default()
            },
            OrderRecord::default(),
        ]);
        let view = apply(&ds, &FilterSelection::unrestricted());
        assert_eq!(sum(&view, QuantColumn::DeclaredWeight), 5.0);
    }

    #[test]
    fn duration_means_ignore_nulls_and_never_return_zero_for_empty_input() {
        // Delays: [-1h, 0h, 2h, null]
        let delays = [Some(hours(-1)), Some(hours(0)), Some(hours(2)), None];
        let orders: Vec<OrderRecord> = delays
            .iter()
            .map(|d| OrderRecord {
                delay: *d,
                ..OrderRecord::default()
            })
            .collect();
        let ds = OrderDataset::from_orders(orders);
        let view = apply(&ds, &FilterSelection::unrestricted());

        // Signed mean ignores only the null: (-1 + 0 + 2) / 3 = 20 min.
        assert_eq!(
            mean_duration(&view, DurationColumn::Delay),
            Some(TimeDelta::minutes(20))
        );
        // Positive-only mean keeps just the 2h entry.
        assert_eq!(
            mean_duration_positive(&view, DurationColumn::Delay),
            Some(hours(2))
        );
        // Other columns are entirely null: no data, not zero.
        assert_eq!(mean_duration(&view, DurationColumn::Delivery), None);
    }

    #[test]
    fn positive_mean_is_none_when_nothing_is_late() {
        let orders: Vec<OrderRecord> = [hours(-2), hours(0)]
            .iter()
            .map(|d| OrderRecord {
                delay: Some(*d),
                ..OrderRecord::default()
            })
            .collect();
        let ds = OrderDataset::from_orders(orders);
        let view = apply(&ds, &FilterSelection::unrestricted());
        assert_eq!(mean_duration_positive(&view, DurationColumn::Delay), None);
    }

    #[test]
    fn rate_over_mixed_flags() {
        let flags = [Some(true), Some(true), Some(false), Some(false)];
        let orders: Vec<OrderRecord> = flags
            .iter()
            .map(|f| OrderRecord {
                late: *f,
                ..OrderRecord::default()
            })
            .collect();
        let ds = OrderDataset::from_orders(orders);
        let view = apply(&ds, &FilterSelection::unrestricted());

        assert_eq!(rate(&view, FlagColumn::Late), Some(0.5));
        // All-null indicator: undefined, not 0.
        assert_eq!(rate(&view, FlagColumn::BeforeCutoff), None);
    }

    #[test]
    fn group_count_keeps_first_seen_order_and_drops_nulls() {
        let priorities = [Some("URGENT"), Some("STANDARD"), None, Some("URGENT")];
        let orders: Vec<OrderRecord> = priorities
            .iter()
            .map(|p| OrderRecord {
                priority: p.map(str::to_string),
                ..OrderRecord::default()
            })
            .collect();
        let ds = OrderDataset::from_orders(orders);
        let view = apply(&ds, &FilterSelection::unrestricted());

        assert_eq!(
            group_count(&view, SetDimension::Priority),
            vec![("URGENT".to_string(), 2), ("STANDARD".to_string(), 1)]
        );
    }

    #[test]
    fn cutoff_ratio_uses_late_count_as_denominator() {
        let rows = [
            (Some(true), Some(true)),
            (Some(true), Some(false)),
            (Some(false), Some(true)),
            (Some(false), Some(false)),
        ];
        let orders: Vec<OrderRecord> = rows
            .iter()
            .map(|(before, late)| OrderRecord {
                before_cutoff: *before,
                late: *late,
                ..OrderRecord::default()
            })
            .collect();
        let ds = OrderDataset::from_orders(orders);
        let view = apply(&ds, &FilterSelection::unrestricted());

        // 2 before-cutoff deliveries over 2 late orders.
        assert_eq!(cutoff_ratio(&view), Some(1.0));
    }

    #[test]
    fn dashboard_data_bundles_the_scorecards() {
        let orders = vec![
            OrderRecord {
                reference: Some("OT-1".into()),
                priority: Some("URGENT".into()),
                package_count: Some(3),
                declared_weight: Some(10.0),
                delivery_time: Some(hours(26)),
                delay: Some(hours(2)),
                late: Some(true),
                last_event_date: Some(ts(2, 9)),
                ..OrderRecord::default()
            },
            OrderRecord {
                reference: Some("OT-2".into()),
                priority: Some("STANDARD".into()),
                package_count: Some(1),
                declared_weight: Some(30.0),
                delivery_time: Some(hours(24)),
                delay: Some(hours(-1)),
                late: Some(false),
                last_event_date: Some(ts(1, 9)),
                ..OrderRecord::default()
            },
        ];
        let ds = OrderDataset::from_orders(orders);
        let view = apply(&ds, &FilterSelection::unrestricted());
        let data = DashboardData::compute(&view);

        assert_eq!(data.orders, 2);
        assert_eq!(data.packages, 4);
        assert_eq!(data.mean_delivery, Some(hours(25)));
        assert_eq!(data.mean_delay, Some(hours(2)));
        assert_eq!(data.on_time_rate, Some(0.5));
        assert_eq!(data.mean_processing, None);
        assert_eq!(data.by_priority.len(), 2);
        // Daily buckets come back in date order even though the rows don't.
        assert_eq!(data.daily[0].day, ts(1, 9).date());
        assert_eq!(data.daily[1].total, 10.0);
    }
}
