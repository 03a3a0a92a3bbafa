use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use shear_stats::{jackknife_with, load_pairs, render_report, JackknifeOpts, PairingOpts};
use tracing::info;

use crate::write_json;

#[derive(Args, Debug)]
pub struct JackknifeArgs {
    /// Per-tile sum files; minus files are paired with their plus siblings.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Substring marking minus files.
    #[arg(long, default_value = "minus")]
    pub minus_token: String,
    /// Replacement substring locating the plus sibling.
    #[arg(long, default_value = "plus")]
    pub plus_token: String,
    /// Worker threads for the leave-one-out loop (0 uses all cores).
    #[arg(long, default_value_t = 0)]
    pub threads: usize,
    /// Optional path for a JSON copy of the result.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Loads the paired tiles, runs the jackknife and prints the report.
pub fn run(args: &JackknifeArgs) -> Result<(), Box<dyn Error>> {
    let pairing = PairingOpts {
        minus_token: args.minus_token.clone(),
        plus_token: args.plus_token.clone(),
    };
    let pairs = load_pairs(&args.files, &pairing)?;
    let opts = JackknifeOpts {
        threads: args.threads,
    };
    let result = jackknife_with(&pairs.plus, &pairs.minus, &opts)?;

    print!("{}", render_report(&result));
    if let Some(path) = &args.json {
        write_json(path, &result)?;
        info!(path = %path.display(), hash = %result.result_hash, "wrote result");
    }
    Ok(())
}
