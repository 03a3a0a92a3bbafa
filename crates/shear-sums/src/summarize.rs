use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shear_core::errors::ShearError;
use shear_core::{MdetStep, StepSums, SumRecord};
use shear_stats::serde::from_yaml_slice;
use shear_stats::write_step_sums;
use tracing::{debug, info};

use crate::catalog::{read_catalog, ObjectRow};
use crate::select::SelectionCuts;
use crate::weights::WeightScheme;

/// Selection and weighting used to reduce a catalog to per-step sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SumsConfig {
    /// Object quality cuts.
    #[serde(default)]
    pub cuts: SelectionCuts,
    /// Per-object weighting.
    #[serde(default)]
    pub weights: WeightScheme,
}

impl SumsConfig {
    /// Loads a YAML configuration; missing keys fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self, ShearError> {
        let bytes = fs::read(path).map_err(|err| ShearError::io("sums-config-read", path, err))?;
        from_yaml_slice(&bytes)
    }
}

/// Weighted sums of the selected objects of one step.
pub fn summarize_step(rows: &[ObjectRow], step: MdetStep, config: &SumsConfig) -> SumRecord {
    let mut selected = 0usize;
    let sums: SumRecord = rows
        .iter()
        .filter(|row| config.cuts.accepts(row, step))
        .map(|row| {
            selected += 1;
            let w = config.weights.weight(row);
            SumRecord::new(w, w * row.gauss_g_1, w * row.gauss_g_2)
        })
        .sum();
    debug!(%step, selected, "summed step");
    sums
}

/// Reduces catalog rows to one record per detection-mode step.
pub fn summarize_rows(rows: &[ObjectRow], config: &SumsConfig) -> StepSums {
    StepSums::from_fn(|step| summarize_step(rows, step, config))
}

/// Reads a catalog, sums it and writes the per-step sums to `out`.
pub fn summarize_catalog(
    catalog: &Path,
    out: &Path,
    config: &SumsConfig,
) -> Result<StepSums, ShearError> {
    let rows = read_catalog(catalog)?;
    let sums = summarize_rows(&rows, config);
    info!(
        catalog = %catalog.display(),
        out = %out.display(),
        objects = rows.len(),
        noshear_wsum = sums.noshear.wsum,
        "writing tile sums"
    );
    write_step_sums(out, &sums)?;
    Ok(sums)
}
