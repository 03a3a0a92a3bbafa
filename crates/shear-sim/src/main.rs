use std::error::Error;
use std::fs;
use std::path::Path;

use clap::{Parser, Subcommand};
use commands::{
    jackknife::{self, JackknifeArgs},
    sim_wq::{self, SimWqArgs},
    sums::{self, SumsArgs},
    sums_wq::{self, SumsWqArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "shear-sim", about = "Paired-shear bias calibration CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pair minus/plus sum files and report m, c and R with jackknife errors.
    Jackknife(JackknifeArgs),
    /// Reduce one object catalog to per-step weighted sums.
    Sums(SumsArgs),
    /// Write summarizer queue jobs for a list of catalogs.
    SumsWq(SumsWqArgs),
    /// Write paired simulation queue jobs for every discovered tile.
    SimWq(SimWqArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Jackknife(args) => jackknife::run(&args),
        Command::Sums(args) => sums::run(&args),
        Command::SumsWq(args) => sums_wq::run(&args),
        Command::SimWq(args) => sim_wq::run(&args),
    }
}

pub(crate) fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
