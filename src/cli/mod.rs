//! Command-line front end: load a dataset, pick a range, print a chart.

pub mod table;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing::debug;

use crate::{
    calendar::Period,
    config::{ConfigManager, DashboardConfig},
    core::services::{CashFlowChart, ChartOptions, DashboardService},
    domain::{Clock, DashboardDataset, DateRange, IncomeBasis, RangePreset, SystemClock},
    errors::{DashboardError, Result},
    utils::{build_info, persistence::load_dataset_from_file},
};

use table::{Table, TableColumn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    #[default]
    Cashflow,
    Categories,
    Assets,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Summarise income, expenses, and bucket contributions per month or year.
#[derive(Debug, Parser)]
#[command(name = "cashflow_cli", version)]
pub struct CliArgs {
    /// JSON dataset with `income`, `expenses`, and `valuations`; remembered for later runs
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// First day of a custom range (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last day of a custom range (YYYY-MM-DD), inclusive
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,

    /// Named range: last-12-months, year-to-date, last-5-years, all-time
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub preset: Option<RangePreset>,

    /// Checkpoint granularity: month or year
    #[arg(long)]
    pub period: Option<Period>,

    /// Income figure to chart: net or gross
    #[arg(long)]
    pub basis: Option<IncomeBasis>,

    #[arg(long, value_enum, default_value_t = ChartKind::Cashflow)]
    pub chart: ChartKind,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Directory holding config.json (defaults to $CASHFLOW_CORE_HOME or ~/.cashflow_core)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Print build metadata and exit
    #[arg(long)]
    pub version_info: bool,
}

pub fn run_cli() -> Result<()> {
    let args = CliArgs::parse();
    let output = execute(&args, &SystemClock)?;
    println!("{output}");
    Ok(())
}

/// Runs one CLI invocation and returns what should be printed.
pub fn execute(args: &CliArgs, clock: &dyn Clock) -> Result<String> {
    if args.version_info {
        return Ok(build_info::current().render());
    }

    let manager = match &args.config_dir {
        Some(dir) => ConfigManager::with_base_dir(dir.clone())?,
        None => ConfigManager::new()?,
    };
    let mut config = manager.load()?;

    let data_path = match (&args.data, &config.last_dataset) {
        (Some(path), _) => path.canonicalize().unwrap_or_else(|_| path.clone()),
        (None, Some(path)) => path.clone(),
        (None, None) => {
            return Err(DashboardError::InvalidInput(
                "no dataset given; pass --data <FILE>".into(),
            ))
        }
    };
    let dataset = load_dataset_from_file(&data_path)?;
    if config.last_dataset.as_ref() != Some(&data_path) {
        config.last_dataset = Some(data_path);
        manager.save(&config)?;
    }

    let range = resolve_range(args, &config, &dataset, clock)?;
    let mut options = config.chart_options();
    if let Some(period) = args.period {
        options.period = period;
    }
    if let Some(basis) = args.basis {
        options.income_basis = basis;
    }
    debug!(?range, ?options, chart = ?args.chart, "rendering dashboard chart");

    render(args, &config, &dataset, &range, options)
}

fn resolve_range(
    args: &CliArgs,
    config: &DashboardConfig,
    dataset: &DashboardDataset,
    clock: &dyn Clock,
) -> Result<DateRange> {
    if let (Some(start), Some(end)) = (args.start, args.end) {
        return Ok(DateRange::between(start, end));
    }
    let preset = args.preset.unwrap_or(config.default_range);
    preset
        .resolve(clock, dataset.earliest_timestamp())
        .ok_or_else(|| {
            DashboardError::InvalidInput("a custom range needs both --start and --end".into())
        })
}

fn render(
    args: &CliArgs,
    config: &DashboardConfig,
    dataset: &DashboardDataset,
    range: &DateRange,
    options: ChartOptions,
) -> Result<String> {
    let json = args.format == OutputFormat::Json;
    let output = match args.chart {
        ChartKind::Cashflow => {
            let chart = DashboardService::cash_flow_chart(dataset, range, options);
            if json {
                serde_json::to_string_pretty(&chart)?
            } else {
                cash_flow_table(&chart, config, options)
            }
        }
        ChartKind::Categories => {
            let chart = DashboardService::category_chart(dataset, range, options);
            if json {
                serde_json::to_string_pretty(&chart)?
            } else if chart.labels.is_empty() {
                empty_notice()
            } else {
                let mut columns = vec![TableColumn::left("Period")];
                columns.extend(
                    chart
                        .series
                        .iter()
                        .map(|series| TableColumn::right(series.category.to_string())),
                );
                let mut table = Table::new(columns);
                for (idx, label) in chart.labels.iter().enumerate() {
                    let mut row = vec![label.clone()];
                    row.extend(
                        chart
                            .series
                            .iter()
                            .map(|series| format_amount(series.data[idx])),
                    );
                    table.push_row(row);
                }
                let title = format!("{} income by category", options.period.label());
                titled(&title, config, table)
            }
        }
        ChartKind::Assets => {
            let chart = DashboardService::asset_chart(dataset, range, options);
            if json {
                serde_json::to_string_pretty(&chart)?
            } else if chart.labels.is_empty() {
                empty_notice()
            } else {
                let mut table = Table::new(vec![
                    TableColumn::left("Period"),
                    TableColumn::right("Market value"),
                    TableColumn::right("Contributed"),
                    TableColumn::right("Growth"),
                ]);
                for (idx, label) in chart.labels.iter().enumerate() {
                    let market = chart.market_value_data[idx];
                    let contributed = chart.contributed_data[idx];
                    table.push_row(vec![
                        label.clone(),
                        format_amount(market),
                        format_amount(contributed),
                        format_amount(market - contributed),
                    ]);
                }
                let title = format!("{} asset values", options.period.label());
                titled(&title, config, table)
            }
        }
    };
    Ok(output)
}

fn cash_flow_table(
    chart: &CashFlowChart,
    config: &DashboardConfig,
    options: ChartOptions,
) -> String {
    if chart.is_empty() {
        return empty_notice();
    }
    let mut table = Table::new(vec![
        TableColumn::left("Period"),
        TableColumn::right("Income"),
        TableColumn::right("Expenses"),
        TableColumn::right("Net"),
        TableColumn::right("Contributions"),
    ]);
    for idx in 0..chart.len() {
        let income = chart.income_data[idx];
        let expense = chart.expense_data[idx];
        table.push_row(vec![
            chart.labels[idx].clone(),
            format_amount(income),
            format_amount(expense),
            format_amount(income - expense),
            format_amount(chart.asset_contribution_data[idx]),
        ]);
    }
    let summary = DashboardService::summarize(chart);
    table.push_row(vec![
        "Total".bold().to_string(),
        format_amount(summary.total_income),
        format_amount(summary.total_expense),
        format_amount(summary.net_cash_flow),
        format_amount(summary.total_contribution),
    ]);
    titled(&format!("{} cash flow", options.period.label()), config, table)
}

fn titled(title: &str, config: &DashboardConfig, table: Table) -> String {
    format!(
        "{}\n{}",
        format!("=== {title} ({}) ===", config.currency).bold(),
        table.render()
    )
}

fn empty_notice() -> String {
    "No completed periods in the selected range.".to_string()
}

fn format_amount(value: f64) -> String {
    let text = format!("{value:.2}");
    if value < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}
