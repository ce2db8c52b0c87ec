/// Data layer: NWB access and the records built from it.
///
/// Architecture:
/// ```text
///   *.nwb (HDF5)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  NwbFile: location table, acquisitions
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  labels   │  stored string bytes → text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  LocationRecord, SignalStream, FrequencyRange
///   └──────────┘
/// ```

pub mod labels;
pub mod loader;
pub mod model;
