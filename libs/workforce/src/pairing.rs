//! Punch-pairing engine
//!
//! Reduces a worker's raw punches to one [`PunchPair`] per calendar date:
//! the day's first IN, its last OUT and the span between them. Punches are
//! not required to alternate; extra or missing punches are tolerated.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Punch, PunchPair, PunchType};

#[derive(Default)]
struct DayPunches {
    ins: Vec<DateTime<Utc>>,
    outs: Vec<DateTime<Utc>>,
}

/// Pair punches by the date component of their timestamp
///
/// Input is expected in ascending time order, as the stores return it; the
/// "first" IN and "last" OUT are taken in input order. Output is sorted by
/// date, most recent first. Dates without punches are not emitted.
pub fn pair_punches(punches: &[Punch]) -> Vec<PunchPair> {
    let mut days: BTreeMap<NaiveDate, DayPunches> = BTreeMap::new();

    for punch in punches {
        let day = days.entry(punch.timestamp.date_naive()).or_default();
        match punch.punch_type {
            PunchType::In => day.ins.push(punch.timestamp),
            PunchType::Out => day.outs.push(punch.timestamp),
        }
    }

    days.into_iter()
        .rev()
        .map(|(date, day)| {
            let clock_in = day.ins.first().copied();
            let clock_out = day.outs.last().copied();
            let total_ms = match (clock_in, clock_out) {
                (Some(start), Some(end)) => end.signed_duration_since(start).num_milliseconds(),
                _ => 0,
            };

            PunchPair {
                date,
                clock_in,
                clock_out,
                total_ms,
            }
        })
        .collect()
}
