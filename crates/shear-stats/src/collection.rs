use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shear_core::errors::{ErrorInfo, ShearError};
use shear_core::{MdetStep, ShearSign, StepSums, SumRecord};
use tracing::{debug, info, warn};

use crate::serde::{from_json_slice, to_canonical_json_pretty};

fn config_error(code: &str, message: impl Into<String>) -> ShearError {
    ShearError::Config(ErrorInfo::new(code, message.into()))
}

/// Per-tile sums for one side of the shear pair, in tile order.
///
/// Index `i` refers to the same tile in every step, and the loader keeps the
/// same index for the same tile in the paired collection of the other sign.
#[derive(Debug, Clone, PartialEq)]
pub struct TileCollection {
    sign: ShearSign,
    labels: Vec<String>,
    tiles: Vec<StepSums>,
}

impl TileCollection {
    /// Creates an empty collection for one sign.
    pub fn new(sign: ShearSign) -> Self {
        Self {
            sign,
            labels: Vec::new(),
            tiles: Vec::new(),
        }
    }

    /// Builds a collection from already loaded tiles, labelling them by index.
    pub fn from_tiles(sign: ShearSign, tiles: Vec<StepSums>) -> Self {
        let labels = (0..tiles.len()).map(|idx| format!("tile-{idx}")).collect();
        Self {
            sign,
            labels,
            tiles,
        }
    }

    /// Appends one tile.
    pub fn push(&mut self, label: impl Into<String>, sums: StepSums) {
        self.labels.push(label.into());
        self.tiles.push(sums);
    }

    /// Sign of the simulations in this collection.
    pub fn sign(&self) -> ShearSign {
        self.sign
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the collection holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Per-tile sums in tile order.
    pub fn tiles(&self) -> &[StepSums] {
        &self.tiles
    }

    /// Tile labels in tile order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The ordered sequence of records for one detection-mode step.
    pub fn step(&self, step: MdetStep) -> impl Iterator<Item = &SumRecord> + '_ {
        self.tiles.iter().map(move |tile| &tile[step])
    }
}

/// Filename tokens used to derive the `plus` sibling of a `minus` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingOpts {
    /// Substring identifying the minus simulation.
    #[serde(default = "PairingOpts::default_minus_token")]
    pub minus_token: String,
    /// Replacement substring identifying the plus simulation.
    #[serde(default = "PairingOpts::default_plus_token")]
    pub plus_token: String,
}

impl PairingOpts {
    fn default_minus_token() -> String {
        ShearSign::Minus.label().to_string()
    }

    fn default_plus_token() -> String {
        ShearSign::Plus.label().to_string()
    }
}

impl Default for PairingOpts {
    fn default() -> Self {
        Self {
            minus_token: Self::default_minus_token(),
            plus_token: Self::default_plus_token(),
        }
    }
}

/// Paired collections produced by [`load_pairs`].
#[derive(Debug, Clone)]
pub struct PairedCollections {
    /// Tiles from the `+g` simulations.
    pub plus: TileCollection,
    /// Tiles from the `-g` simulations, aligned with `plus`.
    pub minus: TileCollection,
    /// Minus files skipped because their plus sibling does not exist.
    pub skipped: Vec<PathBuf>,
}

/// Derives the plus sibling of a minus file by token substitution.
pub fn plus_sibling(minus: &Path, opts: &PairingOpts) -> Result<PathBuf, ShearError> {
    let minus_name = minus.to_string_lossy();
    let plus_name = minus_name.replace(&opts.minus_token, &opts.plus_token);
    if plus_name == minus_name {
        return Err(ShearError::Config(
            ErrorInfo::new(
                "degenerate-pair",
                "plus filename derived from minus filename is identical",
            )
            .with_context("path", minus_name.to_string())
            .with_context("minus_token", opts.minus_token.clone())
            .with_hint("minus files must contain the minus token in their path"),
        ));
    }
    Ok(PathBuf::from(plus_name))
}

/// Reads the three per-step records of one sum file.
pub fn read_step_sums(path: &Path) -> Result<StepSums, ShearError> {
    let bytes = fs::read(path).map_err(|err| ShearError::io("sums-read", path, err))?;
    from_json_slice(&bytes).map_err(|err| {
        let info = err
            .info()
            .clone()
            .with_context("path", path.display().to_string());
        ShearError::Serde(info)
    })
}

/// Writes the three per-step records of one tile to `path`.
pub fn write_step_sums(path: &Path, sums: &StepSums) -> Result<(), ShearError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| ShearError::io("sums-dir", parent, err))?;
    }
    let bytes = to_canonical_json_pretty(sums)?;
    fs::write(path, bytes).map_err(|err| ShearError::io("sums-write", path, err))
}

fn validate_tokens(opts: &PairingOpts) -> Result<(), ShearError> {
    if opts.minus_token.is_empty() {
        return Err(config_error("empty-token", "minus token must not be empty"));
    }
    if opts.plus_token.is_empty() {
        return Err(config_error("empty-token", "plus token must not be empty"));
    }
    if opts.minus_token.contains(&opts.plus_token) {
        return Err(ShearError::Config(
            ErrorInfo::new(
                "overlapping-tokens",
                "minus token contains the plus token, so every minus file would be skipped",
            )
            .with_context("minus_token", opts.minus_token.clone())
            .with_context("plus_token", opts.plus_token.clone()),
        ));
    }
    Ok(())
}

fn tile_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Pairs minus files with their plus siblings and loads both sides.
///
/// Paths containing the plus token are ignored; pairs are always driven from
/// the minus side. A minus file with no existing plus sibling is skipped.
pub fn load_pairs<P: AsRef<Path>>(
    paths: &[P],
    opts: &PairingOpts,
) -> Result<PairedCollections, ShearError> {
    validate_tokens(opts)?;
    let mut plus = TileCollection::new(ShearSign::Plus);
    let mut minus = TileCollection::new(ShearSign::Minus);
    let mut skipped = Vec::new();

    for path in paths.iter().map(AsRef::as_ref) {
        if path.to_string_lossy().contains(&opts.plus_token) {
            debug!(path = %path.display(), "plus-side input, paired from its minus file");
            continue;
        }
        let plus_path = plus_sibling(path, opts)?;
        if !plus_path.exists() {
            warn!(minus = %path.display(), plus = %plus_path.display(), "no plus sibling, skipping");
            skipped.push(path.to_path_buf());
            continue;
        }
        info!(minus = %path.display(), plus = %plus_path.display(), "matched pair");

        let minus_sums = read_step_sums(path)?;
        let plus_sums = read_step_sums(&plus_path)?;
        let label = tile_label(path);
        minus.push(label.clone(), minus_sums);
        plus.push(label, plus_sums);
    }

    info!(pairs = plus.len(), skipped = skipped.len(), "loaded tile pairs");
    Ok(PairedCollections {
        plus,
        minus,
        skipped,
    })
}
