//! Per-checkpoint totals for income and expenses.
//!
//! Each reducer sums only the records that share the checkpoint's calendar
//! period. These are per-period totals, not running balances.

use std::collections::BTreeMap;

use crate::domain::{
    Amounted, BelongsToCategory, CategoryKey, Dated, ExpenseRecord, IncomeBasis, IncomeRecord,
};

use super::checkpoints::Checkpoint;

fn sum_in_period<'a, T, F>(records: &'a [T], checkpoint: &Checkpoint, amount: F) -> f64
where
    T: Dated,
    F: Fn(&'a T) -> f64,
{
    records
        .iter()
        .filter(|record| checkpoint.covers(record.occurred_at()))
        .map(amount)
        .fold(0.0, |total, value| total + value)
}

pub fn net_income_at_checkpoint(income: &[IncomeRecord], checkpoint: &Checkpoint) -> f64 {
    sum_in_period(income, checkpoint, |record| record.net_amount)
}

pub fn gross_income_at_checkpoint(income: &[IncomeRecord], checkpoint: &Checkpoint) -> f64 {
    sum_in_period(income, checkpoint, |record| record.gross_amount)
}

pub fn income_at_checkpoint(
    income: &[IncomeRecord],
    checkpoint: &Checkpoint,
    basis: IncomeBasis,
) -> f64 {
    match basis {
        IncomeBasis::Net => net_income_at_checkpoint(income, checkpoint),
        IncomeBasis::Gross => gross_income_at_checkpoint(income, checkpoint),
    }
}

pub fn expense_at_checkpoint(expenses: &[ExpenseRecord], checkpoint: &Checkpoint) -> f64 {
    sum_in_period(expenses, checkpoint, Amounted::amount)
}

/// Period income grouped by category. Categories with no income in the
/// period are absent rather than zero.
pub fn income_by_category_at_checkpoint(
    income: &[IncomeRecord],
    checkpoint: &Checkpoint,
    basis: IncomeBasis,
) -> BTreeMap<CategoryKey, f64> {
    let mut totals = BTreeMap::new();
    for record in income
        .iter()
        .filter(|record| checkpoint.covers(record.received_date))
    {
        *totals.entry(record.category_key()).or_insert(0.0) += record.amount_for(basis);
    }
    totals
}
