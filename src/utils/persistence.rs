use std::{fs, path::Path};

use tracing::info;

use crate::{
    domain::DashboardDataset,
    errors::Result,
    utils::paths::{ensure_dir, tmp_path},
};

/// Writes the dataset to disk atomically by staging to a temporary file.
pub fn save_dataset_to_file(dataset: &DashboardDataset, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let json = serde_json::to_string_pretty(dataset)?;
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a dataset from disk, returning structured errors on failure.
pub fn load_dataset_from_file(path: &Path) -> Result<DashboardDataset> {
    let data = fs::read_to_string(path)?;
    let dataset: DashboardDataset = serde_json::from_str(&data)?;
    info!(
        path = %path.display(),
        income = dataset.income.len(),
        expenses = dataset.expenses.len(),
        buckets = dataset.valuations.len(),
        "loaded dashboard dataset"
    );
    Ok(dataset)
}
