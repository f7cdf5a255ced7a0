use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::prediction::{ImpactBadge, ImpactLevel};

/// Stable identifier handed over by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Trimmed identifier, or `None` when blank.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One saved docking result. `created_at` is always stamped by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockingRecord {
    pub user_id: UserId,
    pub molecule_name: String,
    pub protein_name: String,
    pub classical_score: Option<f64>,
    pub refined_energy: Option<f64>,
    pub binding_affinity: f64,
    pub confidence_score: f64,
    pub rationale: String,
    pub pose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_impact: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// History row as presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntryView {
    #[serde(flatten)]
    pub record: DockingRecord,
    pub affinity_level: ImpactLevel,
    pub affinity_label: &'static str,
    pub badge: ImpactBadge,
    pub age: String,
}

impl HistoryEntryView {
    pub fn from_record(record: DockingRecord, now: DateTime<Utc>) -> Self {
        let level = ImpactLevel::classify(record.binding_affinity);
        let age = relative_age(record.created_at, now);
        Self {
            record,
            affinity_level: level,
            affinity_label: level.label(),
            badge: level.badge(),
            age,
        }
    }
}

const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_MONTH: i64 = 43_200;

/// "time ago" phrase for `then` relative to `now`, worded like date-fns
/// `formatDistanceToNow` with a suffix.
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let (earlier, later, future) = if then <= now {
        (then, now, false)
    } else {
        (now, then, true)
    };
    let seconds = (later - earlier).num_seconds();
    let minutes = round_half_up(seconds as f64 / 60.0);

    let distance = if minutes < 2 {
        if minutes == 0 {
            "less than a minute".to_string()
        } else {
            "1 minute".to_string()
        }
    } else if minutes < 45 {
        count(minutes, "minute")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_IN_DAY {
        format!("about {}", count(round_half_up(minutes as f64 / 60.0), "hour"))
    } else if minutes < 2_520 {
        "1 day".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        count(round_half_up(minutes as f64 / MINUTES_IN_DAY as f64), "day")
    } else if minutes < 2 * MINUTES_IN_MONTH {
        let months = round_half_up(minutes as f64 / MINUTES_IN_MONTH as f64);
        format!("about {}", count(months, "month"))
    } else {
        let months = calendar_months(earlier, later);
        if months < 12 {
            count(round_half_up(minutes as f64 / MINUTES_IN_MONTH as f64), "month")
        } else {
            let years = months / 12;
            match months % 12 {
                0..=2 => format!("about {}", count(years, "year")),
                3..=8 => format!("over {}", count(years, "year")),
                _ => format!("almost {}", count(years + 1, "year")),
            }
        }
    };

    if future {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Whole calendar months from `earlier` to `later`; a month counts once its
/// day of month and time of day are reached.
fn calendar_months(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let mut months = i64::from(later.year() - earlier.year()) * 12
        + i64::from(later.month()) - i64::from(earlier.month());
    if (later.day(), later.time()) < (earlier.day(), earlier.time()) {
        months -= 1;
    }
    months
}

fn count(amount: i64, unit: &str) -> String {
    if amount == 1 {
        format!("1 {unit}")
    } else {
        format!("{amount} {unit}s")
    }
}
