pub mod common;
pub mod dataset;
pub mod range;
pub mod records;

pub use common::{Amounted, BelongsToCategory, Dated};
pub use dataset::DashboardDataset;
pub use range::{Clock, DateRange, FixedClock, RangePreset, SystemClock};
pub use records::{
    BucketHistories, BucketId, CategoryId, CategoryKey, ExpenseRecord, IncomeBasis, IncomeRecord,
    ValuationSnapshot,
};
