/// Data layer: core types and the bundled table.
///
/// Architecture:
/// ```text
///  iris.csv (include_str!)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Sample>, read-only after load
///   └──────────┘
/// ```

pub mod loader;
pub mod model;

pub use loader::load;
pub use model::{Dataset, FEATURE_COUNT, Feature, Sample, Species};
