use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    calendar::Period,
    core::{
        checkpoints::{generate_checkpoints, with_previous, Checkpoint},
        contribution::{
            contributed_at_checkpoint, contribution_delta_at_checkpoint, is_chronological,
            market_value_at_checkpoint,
        },
        reducers::{expense_at_checkpoint, income_at_checkpoint, income_by_category_at_checkpoint},
    },
    domain::{BucketHistories, CategoryKey, DashboardDataset, DateRange, IncomeBasis},
};

/// Knobs shared by every dashboard chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartOptions {
    pub period: Period,
    pub income_basis: IncomeBasis,
}

impl ChartOptions {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            income_basis: IncomeBasis::default(),
        }
    }

    pub fn with_income_basis(mut self, basis: IncomeBasis) -> Self {
        self.income_basis = basis;
        self
    }
}

/// Parallel series for the cash-flow chart, one entry per checkpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowChart {
    pub labels: Vec<String>,
    pub income_data: Vec<f64>,
    pub expense_data: Vec<f64>,
    pub asset_contribution_data: Vec<f64>,
}

impl CashFlowChart {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySeries {
    pub category: CategoryKey,
    pub data: Vec<f64>,
}

/// Income split by category; every series has one entry per label.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChart {
    pub labels: Vec<String>,
    pub series: Vec<CategorySeries>,
}

/// Total bucket value and contributions standing at each checkpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetChart {
    pub labels: Vec<String>,
    pub market_value_data: Vec<f64>,
    pub contributed_data: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_cash_flow: f64,
    pub total_contribution: f64,
}

pub struct DashboardService;

impl DashboardService {
    pub fn checkpoints(range: &DateRange, period: Period) -> Vec<Checkpoint> {
        generate_checkpoints(range.start, range.end, period)
    }

    pub fn cash_flow_chart(
        dataset: &DashboardDataset,
        range: &DateRange,
        options: ChartOptions,
    ) -> CashFlowChart {
        let checkpoints = Self::checkpoints(range, options.period);
        let Some(range_start) = range.start.filter(|_| !checkpoints.is_empty()) else {
            return CashFlowChart::default();
        };
        let histories = ordered_histories(&dataset.valuations);

        let mut chart = CashFlowChart::default();
        for (checkpoint, previous) in with_previous(&checkpoints, range_start) {
            chart.labels.push(checkpoint.label());
            chart.income_data.push(income_at_checkpoint(
                &dataset.income,
                &checkpoint,
                options.income_basis,
            ));
            chart
                .expense_data
                .push(expense_at_checkpoint(&dataset.expenses, &checkpoint));
            chart
                .asset_contribution_data
                .push(contribution_delta_at_checkpoint(&histories, &checkpoint, previous));
        }
        debug!(
            checkpoints = chart.len(),
            period = %options.period,
            "built cash flow chart"
        );
        chart
    }

    pub fn category_chart(
        dataset: &DashboardDataset,
        range: &DateRange,
        options: ChartOptions,
    ) -> CategoryChart {
        let checkpoints = Self::checkpoints(range, options.period);
        let per_checkpoint: Vec<BTreeMap<CategoryKey, f64>> = checkpoints
            .iter()
            .map(|checkpoint| {
                income_by_category_at_checkpoint(&dataset.income, checkpoint, options.income_basis)
            })
            .collect();

        let categories: BTreeSet<CategoryKey> = per_checkpoint
            .iter()
            .flat_map(|totals| totals.keys().copied())
            .collect();
        let series = categories
            .into_iter()
            .map(|category| CategorySeries {
                category,
                data: per_checkpoint
                    .iter()
                    .map(|totals| totals.get(&category).copied().unwrap_or(0.0))
                    .collect(),
            })
            .collect::<Vec<_>>();

        debug!(
            checkpoints = checkpoints.len(),
            categories = series.len(),
            "built category chart"
        );
        CategoryChart {
            labels: checkpoints.iter().map(Checkpoint::label).collect(),
            series,
        }
    }

    pub fn asset_chart(
        dataset: &DashboardDataset,
        range: &DateRange,
        options: ChartOptions,
    ) -> AssetChart {
        let checkpoints = Self::checkpoints(range, options.period);
        let histories = ordered_histories(&dataset.valuations);
        let mut chart = AssetChart::default();
        for checkpoint in &checkpoints {
            chart.labels.push(checkpoint.label());
            chart
                .market_value_data
                .push(market_value_at_checkpoint(&histories, checkpoint));
            chart
                .contributed_data
                .push(contributed_at_checkpoint(&histories, checkpoint));
        }
        debug!(checkpoints = checkpoints.len(), "built asset chart");
        chart
    }

    pub fn summarize(chart: &CashFlowChart) -> CashFlowSummary {
        let total_income = total(&chart.income_data);
        let total_expense = total(&chart.expense_data);
        CashFlowSummary {
            total_income,
            total_expense,
            net_cash_flow: total_income - total_expense,
            total_contribution: total(&chart.asset_contribution_data),
        }
    }
}

/// Sum that starts from positive zero, so an empty series totals `0.0`.
fn total(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |total, value| total + value)
}

/// Borrows the histories when every bucket is already ascending; otherwise
/// sorts a copy of the offending buckets.
fn ordered_histories(histories: &BucketHistories) -> Cow<'_, BucketHistories> {
    if histories.values().all(|history| is_chronological(history)) {
        return Cow::Borrowed(histories);
    }
    let mut ordered = histories.clone();
    for (bucket_id, history) in ordered.iter_mut() {
        if !is_chronological(history) {
            warn!(
                bucket_id = *bucket_id,
                "valuation history out of order; sorting by recorded_at"
            );
            history.sort_by_key(|snapshot| snapshot.recorded_at);
        }
    }
    Cow::Owned(ordered)
}
