use crate::error::{AppError, AppResult};
use crate::model::{Collection, Station, metric};

/// Which secondary-source stations get admitted into a merge.
///
/// The table and timeseries views use deliberately different predicates; they
/// are kept as distinct named policies rather than unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionPolicy {
    /// Admit stations with at least one non-null wind-speed or wind-direction
    /// sample. Used for the wind observation table.
    WindTable,
    /// Admit stations with a non-empty wind-speed series. Used for chart
    /// timeseries.
    WindTimeseries,
    /// Admit nothing. Merging a collection with itself under this policy is a
    /// no-op.
    RejectAll,
}

impl InclusionPolicy {
    #[must_use]
    pub fn admits(self, station: &Station) -> bool {
        match self {
            Self::WindTable => {
                station.has_reading(metric::WIND_SPEED) || station.has_reading(metric::WIND_DIR)
            }
            Self::WindTimeseries => station.has_series(metric::WIND_SPEED),
            Self::RejectAll => false,
        }
    }
}

/// Merge secondary collections into a primary one under an inclusion policy.
///
/// The primary's stations and metadata are carried verbatim. Each secondary
/// station is admitted only if the policy accepts it. Distinct source kinds
/// must not share an id, so a collision between the primary and an admitted
/// secondary (or between two secondaries) is an error, never an overwrite.
///
/// The merged collection has no iteration-order guarantee; consumers that
/// need display order sort explicitly.
pub fn merge_collections(
    primary: &Collection,
    secondaries: &[&Collection],
    policy: InclusionPolicy,
) -> AppResult<Collection> {
    let mut merged = primary.clone();

    for secondary in secondaries {
        for (id, station) in &secondary.stations {
            if !policy.admits(station) {
                continue;
            }
            if merged.stations.contains_key(id) {
                return Err(AppError::IdCollision { id: id.clone() });
            }
            merged.stations.insert(id.clone(), station.clone());
        }
    }

    Ok(merged)
}
