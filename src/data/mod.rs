/// Data layer: the faceted filtering and aggregation engine.
///
/// Refresh pipeline:
/// ```text
///  gdelt_events.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Dataset (immutable, once per session)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ catalog   │  distinct facet values + category→subcategory cascade
///   └──────────┘
///        │            FilterSpec (from the presentation layer)
///        ▼                │
///   ┌──────────┐          │
///   │  filter   │ ◄───────┘  compile spec → Predicate (cascade-corrected)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  apply predicate → Subset (order-preserving row view)
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌──────────┐  ┌──────────┐  ┌──────────┐
///   │ aggregate │  │  export   │  │ table/map │ (presentation)
///   └──────────┘  └──────────┘  └──────────┘
/// ```

pub mod aggregate;
pub mod catalog;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod select;
