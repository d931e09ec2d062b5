pub mod dashboard_service;

pub use dashboard_service::{
    AssetChart, CashFlowChart, CashFlowSummary, CategoryChart, CategorySeries, ChartOptions,
    DashboardService,
};
