//! Pre-fetched financial records consumed by the checkpoint aggregator.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{domain::common::*, errors::DashboardError};

pub type BucketId = i64;
pub type CategoryId = i64;

/// Valuation histories keyed by bucket, each ascending by `recorded_at`.
pub type BucketHistories = BTreeMap<BucketId, Vec<ValuationSnapshot>>;

/// A single income payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeRecord {
    #[serde(with = "timestamp")]
    pub received_date: NaiveDateTime,
    pub gross_amount: f64,
    pub net_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

impl IncomeRecord {
    pub fn new(received_date: NaiveDateTime, gross_amount: f64, net_amount: f64) -> Self {
        Self {
            received_date,
            gross_amount,
            net_amount,
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Amount under the given basis.
    pub fn amount_for(&self, basis: IncomeBasis) -> f64 {
        match basis {
            IncomeBasis::Net => self.net_amount,
            IncomeBasis::Gross => self.gross_amount,
        }
    }
}

impl Dated for IncomeRecord {
    fn occurred_at(&self) -> NaiveDateTime {
        self.received_date
    }
}

impl BelongsToCategory for IncomeRecord {
    fn category_key(&self) -> CategoryKey {
        CategoryKey::from(self.category_id)
    }
}

/// An expense transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    #[serde(with = "timestamp")]
    pub transaction_date: NaiveDateTime,
    pub amount: f64,
}

impl ExpenseRecord {
    pub fn new(transaction_date: NaiveDateTime, amount: f64) -> Self {
        Self {
            transaction_date,
            amount,
        }
    }
}

impl Dated for ExpenseRecord {
    fn occurred_at(&self) -> NaiveDateTime {
        self.transaction_date
    }
}

impl Amounted for ExpenseRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Point-in-time valuation of a bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuationSnapshot {
    pub bucket_id: BucketId,
    #[serde(with = "timestamp")]
    pub recorded_at: NaiveDateTime,
    pub market_value: f64,
    pub contributed_amount: f64,
}

impl ValuationSnapshot {
    pub fn new(
        bucket_id: BucketId,
        recorded_at: NaiveDateTime,
        market_value: f64,
        contributed_amount: f64,
    ) -> Self {
        Self {
            bucket_id,
            recorded_at,
            market_value,
            contributed_amount,
        }
    }

    /// Market value minus what was put in.
    pub fn growth(&self) -> f64 {
        self.market_value - self.contributed_amount
    }
}

impl Dated for ValuationSnapshot {
    fn occurred_at(&self) -> NaiveDateTime {
        self.recorded_at
    }
}

/// Grouping key for income categories. Records without a category land in
/// `Uncategorized`, which never collides with a numeric id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(from = "Option<CategoryId>", into = "Option<CategoryId>")]
pub enum CategoryKey {
    Uncategorized,
    Category(CategoryId),
}

impl From<Option<CategoryId>> for CategoryKey {
    fn from(value: Option<CategoryId>) -> Self {
        match value {
            Some(id) => CategoryKey::Category(id),
            None => CategoryKey::Uncategorized,
        }
    }
}

impl From<CategoryKey> for Option<CategoryId> {
    fn from(value: CategoryKey) -> Self {
        match value {
            CategoryKey::Category(id) => Some(id),
            CategoryKey::Uncategorized => None,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKey::Uncategorized => f.write_str("Uncategorized"),
            CategoryKey::Category(id) => write!(f, "Category {id}"),
        }
    }
}

/// Which income figure feeds the charts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IncomeBasis {
    #[default]
    Net,
    Gross,
}

impl FromStr for IncomeBasis {
    type Err = DashboardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "net" => Ok(IncomeBasis::Net),
            "gross" => Ok(IncomeBasis::Gross),
            other => Err(DashboardError::InvalidInput(format!(
                "unknown income basis `{other}` (expected net or gross)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn category_key_keeps_uncategorized_distinct() {
        let uncategorized = IncomeRecord::new(noon(2024, 1, 1), 10.0, 8.0);
        let salary = IncomeRecord::new(noon(2024, 1, 1), 10.0, 8.0).with_category(0);
        assert_eq!(uncategorized.category_key(), CategoryKey::Uncategorized);
        assert_eq!(salary.category_key(), CategoryKey::Category(0));
        assert_ne!(uncategorized.category_key(), salary.category_key());
    }

    #[test]
    fn category_key_serializes_as_nullable_id() {
        let json = serde_json::to_string(&vec![
            CategoryKey::Uncategorized,
            CategoryKey::Category(7),
        ])
        .unwrap();
        assert_eq!(json, "[null,7]");
        let parsed: Vec<CategoryKey> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[1], CategoryKey::Category(7));
    }

    #[test]
    fn income_record_reads_plain_dates() {
        let record: IncomeRecord = serde_json::from_str(
            r#"{"received_date":"2024-02-10","gross_amount":120.0,"net_amount":100.0}"#,
        )
        .unwrap();
        let midnight = NaiveDate::from_ymd_opt(2024, 2, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(record.received_date, midnight);
        assert_eq!(record.category_id, None);
        assert_eq!(record.amount_for(IncomeBasis::Gross), 120.0);
    }
}
