use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped reading. `value = None` means "no reading", which is
/// distinct from a reading of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: DateTime<Utc>,
    pub value: Option<f64>,
    /// Set when the station reported gusting conditions at this reading.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub gusting: bool,
}

impl Sample {
    #[must_use]
    pub fn new(time: DateTime<Utc>, value: Option<f64>) -> Self {
        Self {
            time,
            value,
            gusting: false,
        }
    }
}
