use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::{end_of_previous_day, Period};

/// The last instant of one period instance: an x-axis point on a chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint {
    pub at: NaiveDateTime,
    pub period: Period,
}

impl Checkpoint {
    /// Checkpoint closing the period that contains `instant`.
    pub fn containing(instant: NaiveDateTime, period: Period) -> Self {
        Self {
            at: period.end_of(instant),
            period,
        }
    }

    pub fn next(&self) -> Self {
        Self {
            at: self.period.next_end(self.at),
            period: self.period,
        }
    }

    /// True when `instant` falls in the same calendar period as this checkpoint.
    pub fn covers(&self, instant: NaiveDateTime) -> bool {
        self.period.same_period(self.at, instant)
    }

    pub fn label(&self) -> String {
        self.period.format_label(self.at)
    }
}

/// Period-end checkpoints whose instant lies in `[start, end]`, ascending.
///
/// Empty when either bound is missing or when no period ends inside the range
/// (which includes every `start > end`).
pub fn generate_checkpoints(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    period: Period,
) -> Vec<Checkpoint> {
    let (Some(start), Some(end)) = (start, end) else {
        return Vec::new();
    };

    let mut checkpoints = Vec::new();
    let mut current = Checkpoint::containing(start, period);
    while current.at <= end {
        checkpoints.push(current);
        let next = current.next();
        if next.at <= current.at {
            break;
        }
        current = next;
    }
    checkpoints
}

/// Pairs each checkpoint with the instant its deltas are measured from.
///
/// The first checkpoint is measured from the end of the day before
/// `range_start`, so only activity inside the range counts toward it. Every
/// later checkpoint is measured from its predecessor.
pub fn with_previous(
    checkpoints: &[Checkpoint],
    range_start: NaiveDateTime,
) -> Vec<(Checkpoint, NaiveDateTime)> {
    let mut previous = end_of_previous_day(range_start);
    checkpoints
        .iter()
        .map(|checkpoint| {
            let pair = (*checkpoint, previous);
            previous = checkpoint.at;
            pair
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn mid_month_range_yields_completed_months_only() {
        let checkpoints =
            generate_checkpoints(Some(at(2024, 1, 15)), Some(at(2024, 3, 10)), Period::Month);
        let labels: Vec<String> = checkpoints.iter().map(Checkpoint::label).collect();
        assert_eq!(labels, vec!["Jan 2024", "Feb 2024"]);
        let leap_day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(checkpoints[1].at.date(), leap_day);
    }

    #[test]
    fn missing_bounds_or_inverted_range_is_empty() {
        assert!(generate_checkpoints(None, Some(at(2024, 3, 1)), Period::Month).is_empty());
        assert!(generate_checkpoints(Some(at(2024, 3, 1)), None, Period::Year).is_empty());
        assert!(
            generate_checkpoints(Some(at(2024, 3, 1)), Some(at(2024, 1, 1)), Period::Month)
                .is_empty()
        );
    }

    #[test]
    fn range_ending_exactly_on_period_end_is_inclusive() {
        let end = Period::Month.end_of(at(2024, 3, 1));
        let checkpoints = generate_checkpoints(Some(at(2024, 1, 1)), Some(end), Period::Month);
        assert_eq!(checkpoints.len(), 3);
        assert_eq!(checkpoints.last().unwrap().at, end);
    }

    #[test]
    fn yearly_checkpoints_close_each_year() {
        let checkpoints =
            generate_checkpoints(Some(at(2020, 6, 1)), Some(at(2023, 12, 31)), Period::Year);
        let years: Vec<i32> = checkpoints.iter().map(|c| c.at.year()).collect();
        // 2023-12-31 00:00 precedes the 2023 year-end instant.
        assert_eq!(years, vec![2020, 2021, 2022]);
    }

    #[test]
    fn generation_stops_at_calendar_maximum() {
        let last_year = NaiveDate::MAX.year();
        let start = at(last_year, 11, 1);
        let monthly = generate_checkpoints(Some(start), Some(NaiveDateTime::MAX), Period::Month);
        let months: Vec<u32> = monthly.iter().map(|c| c.at.month()).collect();
        assert_eq!(months, vec![11, 12]);
        assert_eq!(monthly[1].at.date(), NaiveDate::MAX);

        let yearly = generate_checkpoints(Some(start), Some(NaiveDateTime::MAX), Period::Year);
        assert_eq!(yearly.len(), 1);
        assert_eq!(yearly[0].at.date(), NaiveDate::MAX);
    }

    #[test]
    fn first_delta_is_measured_from_day_before_start() {
        let checkpoints =
            generate_checkpoints(Some(at(2024, 1, 15)), Some(at(2024, 3, 10)), Period::Month);
        let pairs = with_previous(&checkpoints, at(2024, 1, 15));
        let day_before = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        assert_eq!(pairs[0].1, crate::calendar::end_of_day(day_before));
        assert_eq!(pairs[1].1, checkpoints[0].at);
    }
}
