#![doc(test(attr(deny(warnings))))]

//! Cashflow Core turns pre-fetched income, expense, and bucket valuation
//! records into period-aligned series for personal-finance dashboard charts.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

use std::sync::Once;

pub use crate::calendar::Period;
pub use crate::core::services::{CashFlowChart, ChartOptions, DashboardService};
pub use crate::errors::{DashboardError, Result};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Cashflow Core tracing initialized.");
    });
}
