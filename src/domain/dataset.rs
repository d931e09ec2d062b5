use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{
    common::Dated,
    records::{BucketHistories, ExpenseRecord, IncomeRecord, ValuationSnapshot},
};

/// Everything the dashboard needs, fetched up front by the data layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardDataset {
    #[serde(default)]
    pub income: Vec<IncomeRecord>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub valuations: BucketHistories,
}

impl DashboardDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_income(&mut self, record: IncomeRecord) {
        self.income.push(record);
    }

    pub fn add_expense(&mut self, record: ExpenseRecord) {
        self.expenses.push(record);
    }

    /// Files a snapshot under its bucket, keeping the history ascending by `recorded_at`.
    pub fn add_snapshot(&mut self, snapshot: ValuationSnapshot) {
        let history = self.valuations.entry(snapshot.bucket_id).or_default();
        let idx = history.partition_point(|existing| existing.recorded_at <= snapshot.recorded_at);
        history.insert(idx, snapshot);
    }

    /// Oldest timestamp across all record kinds.
    pub fn earliest_timestamp(&self) -> Option<NaiveDateTime> {
        let income = self.income.iter().map(Dated::occurred_at);
        let expenses = self.expenses.iter().map(Dated::occurred_at);
        let snapshots = self.valuations.values().flatten().map(Dated::occurred_at);
        income.chain(expenses).chain(snapshots).min()
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty()
            && self.expenses.is_empty()
            && self.valuations.values().all(Vec::is_empty)
    }
}
