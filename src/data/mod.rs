/// Data layer: core types, loading, selection and reshaping.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SourceTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐      ┌───────────┐
///   │ SourceTable  │◄─────│ selection  │  Vec<Pick> (entity, variable)
///   └─────────────┘      └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  first matching row → year/value pairs, % detection
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   wide    │  outer join on year, one column per label
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod selection;
pub mod series;
pub mod wide;
