use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::{
    calendar::Period,
    core::services::ChartOptions,
    domain::{IncomeBasis, RangePreset},
    errors::{DashboardError, Result},
    utils::paths::{app_data_dir, config_file_in, ensure_dir, tmp_path},
};

/// User preferences for the dashboard charts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub default_period: Period,
    pub default_range: RangePreset,
    pub income_basis: IncomeBasis,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_dataset: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_period: Period::Month,
            default_range: RangePreset::Last12Months,
            income_basis: IncomeBasis::Net,
            currency: "USD".into(),
            last_dataset: None,
        }
    }
}

impl DashboardConfig {
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions::new(self.default_period).with_income_basis(self.income_basis)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<DashboardConfig> {
        if !self.path.exists() {
            return Ok(DashboardConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            DashboardError::Config(format!("{} is not valid: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &DashboardConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), "saved dashboard config");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
