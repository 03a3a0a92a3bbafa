use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use shear_sums::{summarize_catalog, SumsConfig};

#[derive(Args, Debug)]
pub struct SumsArgs {
    /// Object catalog (CSV with header).
    pub catalog: PathBuf,
    /// Output sum file.
    pub outfile: PathBuf,
    /// Optional YAML file overriding selection cuts and weighting.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &SumsArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => SumsConfig::load(path)?,
        None => SumsConfig::default(),
    };
    println!("{}", args.outfile.display());
    summarize_catalog(&args.catalog, &args.outfile, &config)?;
    Ok(())
}
