use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use shear_core::errors::{ErrorInfo, ShearError};
use shear_core::{RngHandle, ShearSign};
use shear_stats::serde::from_yaml_slice;
use tracing::info;

use crate::jobs::{BatchConfig, JobSpec};
use crate::template::{render, TemplateVars};

const SIM_TEMPLATE: &str = r#"
command: |
    source activate {{ environment }}

    tilename={{ tilename }}
    config={{ config }}
    seed={{ seed }}

    nproc=$(cat /proc/cpuinfo | grep "^processor" | wc -l)

    echo "nproc: $nproc"

    export MEDS_DIR={{ meds_root }}
    export OMP_NUM_THREADS=1

    export IMSIM_DATA=${MEDS_DIR}
    export TMPDIR={{ tmp_dir }}

    plusdir="./${tilename}-plus"
    minusdir="./${tilename}-minus"

    mkdir -p ${plusdir}
    mkdir -p ${minusdir}

    {{ sim_command }} \
      -v 1 \
      --seed ${seed} \
      ${config} \
      ${plusdir} \
      stamp.shear.g1={{ g1_plus }} \
      stamp.shear.g2=0.0 \
      metadetect.n_jobs=${nproc} \
      output.nproc=${nproc} \
      output.tilename=${tilename}

    {{ sim_command }} \
      -v 1 \
      --seed ${seed} \
      ${config} \
      ${minusdir} \
      stamp.shear.g1={{ g1_minus }} \
      stamp.shear.g2=0.0 \
      metadetect.n_jobs=${nproc} \
      output.nproc=${nproc} \
      output.tilename=${tilename}

job_name: {{ job_name }}
mode: bynode
"#;

/// Sections of the simulation config that may point at further config files.
const NESTED_CONFIG_SECTIONS: [&str; 2] = ["pizza_cutter", "metadetect"];

/// Inputs for one simulation run.
#[derive(Debug, Clone)]
pub struct SimRunOpts {
    /// Run identifier, used for the output directory and job names.
    pub run: String,
    /// Simulation configuration file.
    pub config: PathBuf,
    /// Master seed for the per-tile seeds.
    pub seed: u64,
    /// Directory holding one entry per tile.
    pub tiles_dir: PathBuf,
    /// Glob pattern, relative to `tiles_dir`, selecting tiles.
    pub tile_pattern: String,
    /// Parent of the `runs/<run>` directory.
    pub out_root: PathBuf,
}

/// Files written for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimRunSummary {
    /// Run directory.
    pub run_dir: PathBuf,
    /// Job descriptors, in tile order.
    pub jobs: Vec<PathBuf>,
    /// Config files copied into the run directory.
    pub copied: Vec<PathBuf>,
}

/// Tile names matching `pattern` under `dir`, sorted.
pub fn discover_tiles(dir: &Path, pattern: &str) -> Result<Vec<String>, ShearError> {
    let full = dir.join(pattern);
    let full = full.to_string_lossy();
    let entries = glob::glob(&full).map_err(|err| {
        ShearError::Config(
            ErrorInfo::new("tile-pattern", err.to_string())
                .with_context("pattern", full.to_string()),
        )
    })?;
    let mut tiles = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| ShearError::io("tile-glob", err.path(), err.error()))?;
        if let Some(name) = path.file_name() {
            tiles.push(name.to_string_lossy().into_owned());
        }
    }
    tiles.sort();
    Ok(tiles)
}

/// Job running the plus and minus simulations of one tile with a shared seed.
pub fn sim_job(
    run: &str,
    tilename: &str,
    config_name: &str,
    seed: u64,
    batch: &BatchConfig,
) -> Result<JobSpec, ShearError> {
    let job_name = format!("{run}-{tilename}");
    let mut vars = TemplateVars::new();
    vars.insert("environment", batch.environment.clone());
    vars.insert("tilename", tilename.to_string());
    vars.insert("config", config_name.to_string());
    vars.insert("seed", seed.to_string());
    vars.insert("meds_root", batch.meds_root.clone());
    vars.insert("tmp_dir", batch.tmp_dir.clone());
    vars.insert("sim_command", batch.sim_command.clone());
    vars.insert("g1_plus", ShearSign::Plus.applied_g1().to_string());
    vars.insert("g1_minus", ShearSign::Minus.applied_g1().to_string());
    vars.insert("job_name", job_name.clone());
    let text = render(SIM_TEMPLATE, &vars)?;
    Ok(JobSpec { job_name, text })
}

/// Config files referenced by `config_file` keys of the nested sections.
pub fn nested_config_files(config: &Value) -> Vec<PathBuf> {
    NESTED_CONFIG_SECTIONS
        .iter()
        .filter_map(|section| config.get(*section)?.get("config_file")?.as_str())
        .map(PathBuf::from)
        .collect()
}

fn copy_into(src: &Path, dir: &Path) -> Result<PathBuf, ShearError> {
    let name = src.file_name().ok_or_else(|| {
        ShearError::Config(
            ErrorInfo::new("config-path", "config path has no file name")
                .with_context("path", src.display().to_string()),
        )
    })?;
    let dest = dir.join(name);
    info!(from = %src.display(), to = %dir.display(), "copying config");
    fs::copy(src, &dest).map_err(|err| ShearError::io("config-copy", src, err))?;
    Ok(dest)
}

/// Copies the configs and writes one job per discovered tile into `runs/<run>/`.
pub fn write_sim_run(opts: &SimRunOpts, batch: &BatchConfig) -> Result<SimRunSummary, ShearError> {
    let tiles = discover_tiles(&opts.tiles_dir, &opts.tile_pattern)?;
    info!(tiles = tiles.len(), "found tiles");

    let run_dir = opts.out_root.join("runs").join(&opts.run);
    fs::create_dir_all(&run_dir).map_err(|err| ShearError::io("run-dir", &run_dir, err))?;

    let bytes = fs::read(&opts.config)
        .map_err(|err| ShearError::io("sim-config-read", &opts.config, err))?;
    let config: Value = from_yaml_slice(&bytes)?;
    let mut copied = vec![copy_into(&opts.config, &run_dir)?];
    for nested in nested_config_files(&config) {
        copied.push(copy_into(&nested, &run_dir)?);
    }

    let config_name = opts
        .config
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut rng = RngHandle::from_seed(opts.seed);
    let jobs = tiles
        .iter()
        .map(|tile| {
            sim_job(&opts.run, tile, &config_name, rng.next_job_seed(), batch)?.write_to(&run_dir)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SimRunSummary {
        run_dir,
        jobs,
        copied,
    })
}
