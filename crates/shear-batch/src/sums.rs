use std::fs;
use std::path::{Path, PathBuf};

use shear_core::errors::ShearError;
use shear_core::ShearSign;

use crate::jobs::{BatchConfig, JobSpec};
use crate::template::{render, TemplateVars};

const SUMS_TEMPLATE: &str = r#"
command: |
    source activate {{ environment }}

    export OMP_NUM_THREADS=1

    {{ sums_command }} {{ catalog }} {{ outfile }}

job_name: {{ job_name }}
"#;

/// Characters of a catalog basename that make up the tile name.
pub const TILENAME_LEN: usize = 12;

/// Tile name: the leading characters of the file's basename.
pub fn tilename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().chars().take(TILENAME_LEN).collect())
        .unwrap_or_default()
}

/// Sign inferred from the catalog path.
pub fn sign_of(path: &Path) -> ShearSign {
    if path.to_string_lossy().contains(ShearSign::Plus.label()) {
        ShearSign::Plus
    } else {
        ShearSign::Minus
    }
}

/// Job summarizing one catalog into `<job_name>.json`.
pub fn sums_job(catalog: &Path, config: &BatchConfig) -> Result<JobSpec, ShearError> {
    let job_name = format!("{}-{}-sums", tilename(catalog), sign_of(catalog).label());
    let mut vars = TemplateVars::new();
    vars.insert("environment", config.environment.clone());
    vars.insert("sums_command", config.sums_command.clone());
    vars.insert("catalog", catalog.display().to_string());
    vars.insert("outfile", format!("{job_name}.json"));
    vars.insert("job_name", job_name.clone());
    let text = render(SUMS_TEMPLATE, &vars)?;
    Ok(JobSpec { job_name, text })
}

/// Reads a catalog list, one path per line; blank lines are skipped.
pub fn read_file_list(list: &Path) -> Result<Vec<PathBuf>, ShearError> {
    let text = fs::read_to_string(list).map_err(|err| ShearError::io("file-list-read", list, err))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Writes one summarizer job per listed catalog into `<list dir>/sums/`.
pub fn write_sums_jobs(list: &Path, config: &BatchConfig) -> Result<Vec<PathBuf>, ShearError> {
    let wq_dir = list
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("sums");
    fs::create_dir_all(&wq_dir).map_err(|err| ShearError::io("job-dir", &wq_dir, err))?;
    read_file_list(list)?
        .iter()
        .map(|catalog| sums_job(catalog, config)?.write_to(&wq_dir))
        .collect()
}
