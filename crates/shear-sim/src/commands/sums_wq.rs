use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use shear_batch::{write_sums_jobs, BatchConfig};

#[derive(Args, Debug)]
pub struct SumsWqArgs {
    /// File listing one catalog path per line.
    pub flist: PathBuf,
    /// Optional YAML file with site settings.
    #[arg(long)]
    pub batch_config: Option<PathBuf>,
}

pub fn run(args: &SumsWqArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.batch_config {
        Some(path) => BatchConfig::load(path)?,
        None => BatchConfig::default(),
    };
    for path in write_sums_jobs(&args.flist, &config)? {
        println!("writing: {}", path.display());
    }
    Ok(())
}
