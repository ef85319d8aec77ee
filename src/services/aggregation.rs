//! Calendar statistics over stored mood logs.
//!
//! Works purely on the `calculated_zone` already stored on each record; the
//! classifier is never consulted here.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::mood_log::MoodLog;
use crate::services::emotion::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneCount {
    pub zone: Zone,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTally {
    /// Always holds all six zones, in canonical order.
    pub counts: BTreeMap<Zone, i64>,
    pub total: i64,
    /// `{Green, 0}` when nothing was counted.
    pub mode: ZoneCount,
}

/// Count zones and pick the most frequent one. Zones are compared in
/// canonical order and a later zone only wins on a strictly greater count,
/// so ties resolve to the earlier zone. An empty input yields the first
/// canonical zone with count 0.
pub fn tally_zones<I>(zones: I) -> ZoneTally
where
    I: IntoIterator<Item = Zone>,
{
    let mut counts: BTreeMap<Zone, i64> = Zone::ALL.iter().map(|&z| (z, 0)).collect();
    let mut total = 0;
    for zone in zones {
        *counts.entry(zone).or_insert(0) += 1;
        total += 1;
    }

    let mut mode = ZoneCount {
        zone: Zone::ALL[0],
        count: 0,
    };
    for zone in Zone::ALL {
        let count = counts[&zone];
        if count > mode.count {
            mode = ZoneCount { zone, count };
        }
    }

    ZoneTally {
        counts,
        total,
        mode,
    }
}

/// Bucket records by `log_date`, ascending. Records keep their input order
/// within a day.
pub fn group_by_date(logs: &[MoodLog]) -> BTreeMap<NaiveDate, Vec<&MoodLog>> {
    let mut days: BTreeMap<NaiveDate, Vec<&MoodLog>> = BTreeMap::new();
    for log in logs {
        days.entry(log.log_date).or_default().push(log);
    }
    days
}

/// First and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    pub tally: ZoneTally,
    pub entries: Vec<MoodLog>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<DaySummary>,
    pub totals: ZoneTally,
}

/// Build the calendar view for one month. Records dated outside the month
/// are skipped. Returns `None` for an invalid month.
pub fn month_summary(year: i32, month: u32, logs: &[MoodLog]) -> Option<MonthSummary> {
    let (start_date, end_date) = month_bounds(year, month)?;

    let in_month: Vec<MoodLog> = logs
        .iter()
        .filter(|log| log.log_date.year() == year && log.log_date.month() == month)
        .cloned()
        .collect();

    let days = group_by_date(&in_month)
        .into_iter()
        .map(|(date, entries)| DaySummary {
            date,
            tally: tally_zones(entries.iter().map(|log| log.calculated_zone)),
            entries: entries.into_iter().cloned().collect(),
        })
        .collect();

    Some(MonthSummary {
        year,
        month,
        start_date,
        end_date,
        days,
        totals: tally_zones(in_month.iter().map(|log| log.calculated_zone)),
    })
}
