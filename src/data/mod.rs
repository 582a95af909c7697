/// Data layer: core types, loading, cleaning and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  "Funding Received" text → numbers (once, in place)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  value counts, top-N, cross-tabulation
///   └───────────┘
/// ```

pub mod aggregate;
pub mod clean;
pub mod loader;
pub mod model;
