/// Data layer: schema, core types, loading, caching, filtering, aggregation.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → OrderDataset (dates coerced, rest verbatim)
///   └──────────┘
///        │  memoized by cache (load once per process)
///        ▼
///   ┌──────────────┐
///   │ OrderDataset  │  Vec<OrderRecord>, unique-value index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterSelection → FilteredView
///   └──────────┘
///        │  empty view short-circuits to "no results"
///        ▼
///   ┌────────────┐
///   │ aggregate   │  scorecards + chart series (DashboardData)
///   └────────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
