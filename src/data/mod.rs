/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (per-column type inference)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   Session     │  Dataset + Capabilities (Year / Value / Category)
///   └──────────────┘
/// ```

pub mod loader;
pub mod model;
