#![allow(dead_code)]

use cashflow_core::domain::{DashboardDataset, ExpenseRecord, IncomeRecord, ValuationSnapshot};
use chrono::{NaiveDate, NaiveDateTime};

/// Midnight on the given day.
pub fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

/// A year of household activity: salary on the 25th, rent on the 1st, a side
/// gig every quarter, and two buckets snapshotted mid-month.
pub fn household_dataset() -> DashboardDataset {
    let mut dataset = DashboardDataset::new();
    for month in 1..=12 {
        dataset.add_income(
            IncomeRecord::new(day(2023, month, 25), 5_000.0, 3_800.0).with_category(1),
        );
        dataset.add_expense(ExpenseRecord::new(day(2023, month, 1), 1_500.0));
        if month % 3 == 0 {
            dataset.add_income(IncomeRecord::new(day(2023, month, 10), 400.0, 400.0));
        }
        let invested = 1_000.0 * month as f64;
        dataset.add_snapshot(ValuationSnapshot::new(
            10,
            day(2023, month, 15),
            invested * 1.05,
            invested,
        ));
        if month >= 6 {
            let saved = 250.0 * (month - 5) as f64;
            dataset.add_snapshot(ValuationSnapshot::new(20, day(2023, month, 20), saved, saved));
        }
    }
    dataset
}
