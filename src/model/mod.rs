pub mod collection;
pub mod sample;
pub mod series;
pub mod station;

pub use collection::{Collection, SnapshotMeta, SnapshotSet};
pub use sample::Sample;
pub use series::{MetricSeries, metric};
pub use station::{DisplayConfig, Location, Provenance, Station};
