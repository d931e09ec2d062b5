//! Date ranges selected on the dashboard, and the presets that resolve to them.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{end_of_day, Period},
    errors::DashboardError,
};

/// Clock abstracts access to the current local time so range presets stay deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Inclusive chart range. Either bound may be unset while the user is still picking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whole-day range: from midnight of `start` through the last instant of `end`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(start.and_time(NaiveTime::default()), end_of_day(end))
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// Named ranges offered by the dashboard range picker.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RangePreset {
    #[default]
    Last12Months,
    YearToDate,
    LastFiveYears,
    AllTime,
    Custom,
}

impl RangePreset {
    /// Resolves the preset against `clock`. Ranges end at the close of today, so
    /// only periods that have already finished get a checkpoint.
    ///
    /// `earliest` is the oldest record timestamp; `AllTime` without records has
    /// no start. `Custom` has no intrinsic bounds and returns `None`.
    pub fn resolve(&self, clock: &dyn Clock, earliest: Option<NaiveDateTime>) -> Option<DateRange> {
        let today = clock.today();
        let end = Some(end_of_day(today));
        let month_start = Period::Month.start_of(today);
        let year_start = Period::Year.start_of(today);
        let start = match self {
            RangePreset::Last12Months => month_start
                .checked_sub_months(Months::new(12))
                .map(|date| date.and_time(NaiveTime::default())),
            RangePreset::YearToDate => Some(year_start.and_time(NaiveTime::default())),
            RangePreset::LastFiveYears => NaiveDate::from_ymd_opt(today.year() - 5, 1, 1)
                .map(|date| date.and_time(NaiveTime::default())),
            RangePreset::AllTime => earliest,
            RangePreset::Custom => return None,
        };
        Some(DateRange { start, end })
    }
}

impl fmt::Display for RangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RangePreset::Last12Months => "last-12-months",
            RangePreset::YearToDate => "year-to-date",
            RangePreset::LastFiveYears => "last-5-years",
            RangePreset::AllTime => "all-time",
            RangePreset::Custom => "custom",
        };
        f.write_str(label)
    }
}

impl FromStr for RangePreset {
    type Err = DashboardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "last-12-months" | "12m" => Ok(RangePreset::Last12Months),
            "year-to-date" | "ytd" => Ok(RangePreset::YearToDate),
            "last-5-years" | "last-five-years" | "5y" => Ok(RangePreset::LastFiveYears),
            "all-time" | "all" => Ok(RangePreset::AllTime),
            "custom" => Ok(RangePreset::Custom),
            other => Err(DashboardError::InvalidInput(format!(
                "unknown range preset `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(y: i32, m: u32, d: u32) -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        )
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn last_twelve_months_starts_on_month_boundary() {
        let range = RangePreset::Last12Months
            .resolve(&clock(2024, 6, 18), None)
            .expect("preset resolves");
        assert_eq!(range.start, Some(midnight(2023, 6, 1)));
        assert_eq!(
            range.end,
            Some(end_of_day(NaiveDate::from_ymd_opt(2024, 6, 18).unwrap()))
        );
    }

    #[test]
    fn year_to_date_and_five_years() {
        let ytd = RangePreset::YearToDate
            .resolve(&clock(2024, 6, 18), None)
            .unwrap();
        assert_eq!(ytd.start, Some(midnight(2024, 1, 1)));

        let five = RangePreset::LastFiveYears
            .resolve(&clock(2024, 6, 18), None)
            .unwrap();
        assert_eq!(five.start, Some(midnight(2019, 1, 1)));
    }

    #[test]
    fn all_time_uses_earliest_record() {
        let earliest = midnight(2021, 3, 4);
        let range = RangePreset::AllTime
            .resolve(&clock(2024, 6, 18), Some(earliest))
            .unwrap();
        assert_eq!(range.start, Some(earliest));

        let empty = RangePreset::AllTime
            .resolve(&clock(2024, 6, 18), None)
            .unwrap();
        assert!(!empty.is_complete());
    }

    #[test]
    fn custom_preset_has_no_bounds() {
        assert!(RangePreset::Custom.resolve(&clock(2024, 6, 18), None).is_none());
    }

    #[test]
    fn presets_parse_from_display_names() {
        for preset in [
            RangePreset::Last12Months,
            RangePreset::YearToDate,
            RangePreset::LastFiveYears,
            RangePreset::AllTime,
            RangePreset::Custom,
        ] {
            assert_eq!(preset.to_string().parse::<RangePreset>().unwrap(), preset);
        }
        assert_eq!("ytd".parse::<RangePreset>().unwrap(), RangePreset::YearToDate);
    }

    #[test]
    fn between_spans_whole_days() {
        let range = DateRange::between(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        assert_eq!(range.start, Some(midnight(2024, 1, 1)));
        assert_eq!(
            range.end,
            Some(end_of_day(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()))
        );
    }
}
