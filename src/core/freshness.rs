use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Data age beyond which a snapshot counts as stale.
const STALE_AFTER_HOURS: f64 = 8.0;
/// Data age beyond which the snapshot is flagged as outdated, not merely late.
const OUTDATED_AFTER_HOURS: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Freshness {
    pub is_stale: bool,
    /// Fractional hours since the snapshot was generated; `None` when the
    /// snapshot carries no timestamp.
    pub age_hours: Option<f64>,
    pub message: String,
}

fn count_unit(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Classify the staleness of a snapshot generated at `generated_utc`.
///
/// Pure function of `(now, generated_utc)`; callers inject `now`. Message
/// tiers are evaluated in priority order, first match wins.
#[must_use]
pub fn evaluate(now: DateTime<Utc>, generated_utc: Option<DateTime<Utc>>) -> Freshness {
    let Some(generated) = generated_utc else {
        return Freshness {
            is_stale: true,
            age_hours: None,
            message: "no timestamp available".to_string(),
        };
    };

    let age = now.signed_duration_since(generated);
    let age_hours = age.num_milliseconds() as f64 / 3_600_000.0;
    let whole_hours = age.num_hours();
    let whole_minutes = age.num_minutes();

    let message = if age_hours > OUTDATED_AFTER_HOURS {
        format!(
            "Data may be outdated – last updated {} ago",
            count_unit(whole_hours, "hour")
        )
    } else if age_hours > STALE_AFTER_HOURS {
        format!(
            "Awaiting update – last updated {} ago",
            count_unit(whole_hours, "hour")
        )
    } else if age_hours < 1.0 {
        format!("Updated {} ago", count_unit(whole_minutes, "minute"))
    } else {
        format!("Updated {} ago", count_unit(whole_hours, "hour"))
    };

    Freshness {
        is_stale: age_hours > STALE_AFTER_HOURS,
        age_hours: Some(age_hours),
        message,
    }
}
