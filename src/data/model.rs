use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use super::schema;

// ---------------------------------------------------------------------------
// OrderRecord – one row of the order extract
// ---------------------------------------------------------------------------

/// A single transport order ("OT").
///
/// Every field except the reference may be absent in the source file; the
/// durations and flags are computed upstream and carried through as-is, the
/// dashboard only aggregates and formats them.
#[derive(Debug, Clone, Default)]
pub struct OrderRecord {
    /// Order reference. Opaque, not guaranteed unique.
    pub reference: Option<String>,

    pub order_date: Option<NaiveDateTime>,
    pub departure_date: Option<NaiveDateTime>,
    pub arrival_date: Option<NaiveDateTime>,
    pub promised_date: Option<NaiveDateTime>,
    pub last_event_date: Option<NaiveDateTime>,

    pub pickup_agency: Option<String>,
    pub delivery_agency: Option<String>,
    pub product: Option<String>,
    pub priority: Option<String>,
    pub pickup_country: Option<String>,
    pub delivery_country: Option<String>,
    pub pickup_region: Option<String>,
    pub delivery_region: Option<String>,
    pub pickup_department: Option<String>,
    pub delivery_department: Option<String>,

    pub package_count: Option<u64>,
    pub declared_weight: Option<f64>,

    /// End-to-end delivery duration (DL_H).
    pub delivery_time: Option<TimeDelta>,
    /// Processing duration (DT_H).
    pub processing_time: Option<TimeDelta>,
    /// Last-mile duration (DDK_H).
    pub last_mile_time: Option<TimeDelta>,
    /// Delay vs promised delivery (DELAIS_RETARD). Zero or negative = on time.
    pub delay: Option<TimeDelta>,

    pub late: Option<bool>,
    pub before_cutoff: Option<bool>,
}

// ---------------------------------------------------------------------------
// Typed column accessors
// ---------------------------------------------------------------------------

/// The categorical dimensions the filter panel offers.
///
/// Each variant ties a source column to a field accessor, so adding or
/// removing a dimension is a compile-time change rather than a string lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SetDimension {
    PickupAgency,
    DeliveryAgency,
    Product,
    Priority,
    PickupCountry,
    DeliveryCountry,
    PickupRegion,
    DeliveryRegion,
    PickupDepartment,
    DeliveryDepartment,
}

impl SetDimension {
    pub const ALL: [SetDimension; 10] = [
        SetDimension::PickupAgency,
        SetDimension::DeliveryAgency,
        SetDimension::Product,
        SetDimension::Priority,
        SetDimension::PickupCountry,
        SetDimension::DeliveryCountry,
        SetDimension::PickupRegion,
        SetDimension::DeliveryRegion,
        SetDimension::PickupDepartment,
        SetDimension::DeliveryDepartment,
    ];

    /// Source column name.
    pub fn column(self) -> &'static str {
        match self {
            SetDimension::PickupAgency => schema::AGENCE_ENL,
            SetDimension::DeliveryAgency => schema::AGENCE_LIV,
            SetDimension::Product => schema::PRODUIT,
            SetDimension::Priority => schema::PRIORITE,
            SetDimension::PickupCountry => schema::PAYS_ENL,
            SetDimension::DeliveryCountry => schema::PAYS_LIV,
            SetDimension::PickupRegion => schema::REGION_ENL,
            SetDimension::DeliveryRegion => schema::REGION_LIV,
            SetDimension::PickupDepartment => schema::DEPT_ENL,
            SetDimension::DeliveryDepartment => schema::DEPT_LIV,
        }
    }

    /// Label shown in the filter panel.
    pub fn label(self) -> &'static str {
        match self {
            SetDimension::PickupAgency => "Pickup agency",
            SetDimension::DeliveryAgency => "Delivery agency",
            SetDimension::Product => "Product",
            SetDimension::Priority => "Priority",
            SetDimension::PickupCountry => "Pickup country",
            SetDimension::DeliveryCountry => "Delivery country",
            SetDimension::PickupRegion => "Pickup region",
            SetDimension::DeliveryRegion => "Delivery region",
            SetDimension::PickupDepartment => "Pickup department",
            SetDimension::DeliveryDepartment => "Delivery department",
        }
    }

    /// The order's value on this dimension.
    pub fn value(self, order: &OrderRecord) -> Option<&str> {
        let field = match self {
            SetDimension::PickupAgency => &order.pickup_agency,
            SetDimension::DeliveryAgency => &order.delivery_agency,
            SetDimension::Product => &order.product,
            SetDimension::Priority => &order.priority,
            SetDimension::PickupCountry => &order.pickup_country,
            SetDimension::DeliveryCountry => &order.delivery_country,
            SetDimension::PickupRegion => &order.pickup_region,
            SetDimension::DeliveryRegion => &order.delivery_region,
            SetDimension::PickupDepartment => &order.pickup_department,
            SetDimension::DeliveryDepartment => &order.delivery_department,
        };
        field.as_deref()
    }
}

/// Duration columns the scorecards average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationColumn {
    Delivery,
    Processing,
    LastMile,
    Delay,
}

impl DurationColumn {
    pub fn value(self, order: &OrderRecord) -> Option<TimeDelta> {
        match self {
            DurationColumn::Delivery => order.delivery_time,
            DurationColumn::Processing => order.processing_time,
            DurationColumn::LastMile => order.last_mile_time,
            DurationColumn::Delay => order.delay,
        }
    }
}

/// Quantitative columns that sum across the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantColumn {
    PackageCount,
    DeclaredWeight,
}

impl QuantColumn {
    pub fn value(self, order: &OrderRecord) -> Option<f64> {
        match self {
            QuantColumn::PackageCount => order.package_count.map(|n| n as f64),
            QuantColumn::DeclaredWeight => order.declared_weight,
        }
    }
}

/// Boolean indicator columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagColumn {
    Late,
    BeforeCutoff,
}

impl FlagColumn {
    pub fn value(self, order: &OrderRecord) -> Option<bool> {
        match self {
            FlagColumn::Late => order.late,
            FlagColumn::BeforeCutoff => order.before_cutoff,
        }
    }
}

// ---------------------------------------------------------------------------
// OrderDataset – the complete loaded extract
// ---------------------------------------------------------------------------

/// The full parsed extract with pre-computed filter indices.
///
/// Immutable after load: the cache hands out shared references and every
/// downstream structure is a fresh per-interaction allocation.
#[derive(Debug, Clone, Default)]
pub struct OrderDataset {
    /// All orders (rows), in file order.
    pub orders: Vec<OrderRecord>,
    /// For each filter dimension the sorted set of distinct non-null values.
    pub unique_values: BTreeMap<SetDimension, BTreeSet<String>>,
    /// Min/max departure dates, for seeding the date-range controls.
    pub departure_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl OrderDataset {
    /// Build filter indices from the loaded orders.
    pub fn from_orders(orders: Vec<OrderRecord>) -> Self {
        let mut unique_values: BTreeMap<SetDimension, BTreeSet<String>> = BTreeMap::new();
        for dim in SetDimension::ALL {
            let values: BTreeSet<String> = orders
                .iter()
                .filter_map(|o| dim.value(o))
                .map(str::to_owned)
                .collect();
            unique_values.insert(dim, values);
        }

        let mut departure_bounds: Option<(NaiveDate, NaiveDate)> = None;
        for day in orders
            .iter()
            .filter_map(|o| o.departure_date)
            .map(|ts| ts.date())
        {
            departure_bounds = Some(match departure_bounds {
                None => (day, day),
                Some((lo, hi)) => (lo.min(day), hi.max(day)),
            });
        }

        OrderDataset {
            orders,
            unique_values,
            departure_bounds,
        }
    }

    /// Number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the extract is empty.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Distinct values for one filter dimension.
    pub fn values_for(&self, dim: SetDimension) -> Option<&BTreeSet<String>> {
        self.unique_values.get(&dim)
    }
}
