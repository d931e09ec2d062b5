//! Gregorian period arithmetic used to place records on chart checkpoints.
//!
//! Every checkpoint is the last instant of a month or year, so the two
//! primitives here are "end of the period containing X" and "are X and Y in
//! the same period". Everything else in the crate is built from them.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::errors::DashboardError;

const MONTH_LABEL_FORMAT: &str = "%b %Y";
const YEAR_LABEL_FORMAT: &str = "%Y";

/// Chart granularity.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Month,
    Year,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Month => "Monthly",
            Period::Year => "Yearly",
        }
    }

    /// First calendar day of the period containing `date`.
    pub fn start_of(&self, date: NaiveDate) -> NaiveDate {
        let (month, day) = match self {
            Period::Month => (date.month(), 1),
            Period::Year => (1, 1),
        };
        NaiveDate::from_ymd_opt(date.year(), month, day).unwrap_or(date)
    }

    /// Last instant (23:59:59.999) of the period containing `instant`.
    pub fn end_of(&self, instant: NaiveDateTime) -> NaiveDateTime {
        let date = instant.date();
        let last_day = match self {
            Period::Month => last_day_of_month(date.year(), date.month()),
            Period::Year => NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(NaiveDate::MAX),
        };
        end_of_day(last_day)
    }

    /// End of the period that follows the one containing `instant`.
    ///
    /// Saturates at the calendar maximum, in which case the input period end
    /// is returned unchanged.
    pub fn next_end(&self, instant: NaiveDateTime) -> NaiveDateTime {
        let current = self.end_of(instant);
        match current.date().succ_opt() {
            Some(first_of_next) => self.end_of(first_of_next.and_time(NaiveTime::default())),
            None => current,
        }
    }

    /// Calendar equality: same year and month, or same year.
    pub fn same_period(&self, a: NaiveDateTime, b: NaiveDateTime) -> bool {
        match self {
            Period::Month => a.year() == b.year() && a.month() == b.month(),
            Period::Year => a.year() == b.year(),
        }
    }

    /// Renders a checkpoint label: `Jan 2024` for months, `2024` for years.
    pub fn format_label(&self, instant: NaiveDateTime) -> String {
        let format = match self {
            Period::Month => MONTH_LABEL_FORMAT,
            Period::Year => YEAR_LABEL_FORMAT,
        };
        instant.format(format).to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Month => f.write_str("month"),
            Period::Year => f.write_str("year"),
        }
    }
}

impl FromStr for Period {
    type Err = DashboardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "month" | "monthly" | "m" => Ok(Period::Month),
            "year" | "yearly" | "y" => Ok(Period::Year),
            other => Err(DashboardError::InvalidInput(format!(
                "unknown period `{other}` (expected month or year)"
            ))),
        }
    }
}

/// The last representable millisecond of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(end_of_day_time())
}

/// End of the calendar day immediately before `instant`.
pub fn end_of_previous_day(instant: NaiveDateTime) -> NaiveDateTime {
    let date = instant.date();
    end_of_day(date.pred_opt().unwrap_or(date))
}

/// Parses a timestamp written as a plain date, a naive date-time, or RFC 3339.
///
/// Plain dates are read as midnight. RFC 3339 values keep their wall-clock
/// time and drop the offset. Precision is truncated to milliseconds, the
/// resolution of period ends.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, DashboardError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::default()));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.trunc_subsecs(3));
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|parsed| parsed.naive_local().trunc_subsecs(3))
        .map_err(|_| DashboardError::InvalidInput(format!("unrecognised timestamp `{trimmed}`")))
}

fn end_of_day_time() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or_default()
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
