/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  performance_results.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + coerce → MeasurementTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  alpha / size predicates → sub-tables
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group means, per-size CUDA lookup, speedups
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
