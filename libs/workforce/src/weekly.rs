//! Weekly hours aggregation over punch pairs

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::PunchPair;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Hours worked in the current Monday-anchored week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyHours {
    pub total_ms: i64,
    pub total_hours: f64,
    /// Short weekday name (`"Mon"`) to hours
    pub daily_hours: BTreeMap<String, f64>,
}

/// Monday of the week containing `today`
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
}

/// Sum the pairs dated on or after the start of `today`'s week
pub fn aggregate_week(pairs: &[PunchPair], today: NaiveDate) -> WeeklyHours {
    let start = week_start(today);
    let mut total_ms = 0;
    let mut daily_hours: BTreeMap<String, f64> = BTreeMap::new();

    for pair in pairs.iter().filter(|pair| pair.date >= start) {
        total_ms += pair.total_ms;
        let day = pair.date.format("%a").to_string();
        *daily_hours.entry(day).or_insert(0.0) += pair.total_ms as f64 / MS_PER_HOUR;
    }

    WeeklyHours {
        total_ms,
        total_hours: total_ms as f64 / MS_PER_HOUR,
        daily_hours,
    }
}
