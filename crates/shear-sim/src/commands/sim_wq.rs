use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use shear_batch::{write_sim_run, BatchConfig, SimRunOpts};

#[derive(Args, Debug)]
pub struct SimWqArgs {
    /// Run identifier; jobs land in `runs/<run>/`.
    #[arg(long)]
    pub run: String,
    /// Simulation configuration file.
    #[arg(long)]
    pub config: PathBuf,
    /// Master seed for the per-tile seeds.
    #[arg(long)]
    pub seed: u64,
    /// Directory with one entry per tile.
    #[arg(long)]
    pub tiles_dir: PathBuf,
    /// Glob selecting tiles inside `--tiles-dir`.
    #[arg(long, default_value = "DES*")]
    pub tile_pattern: String,
    /// Directory under which `runs/` is created.
    #[arg(long, default_value = ".")]
    pub out_root: PathBuf,
    /// Optional YAML file with site settings.
    #[arg(long)]
    pub batch_config: Option<PathBuf>,
}

pub fn run(args: &SimWqArgs) -> Result<(), Box<dyn Error>> {
    let batch = match &args.batch_config {
        Some(path) => BatchConfig::load(path)?,
        None => BatchConfig::default(),
    };
    let opts = SimRunOpts {
        run: args.run.clone(),
        config: args.config.clone(),
        seed: args.seed,
        tiles_dir: args.tiles_dir.clone(),
        tile_pattern: args.tile_pattern.clone(),
        out_root: args.out_root.clone(),
    };
    let summary = write_sim_run(&opts, &batch)?;
    println!("found: {} tiles", summary.jobs.len());
    for path in &summary.jobs {
        println!("{}", path.display());
    }
    Ok(())
}
