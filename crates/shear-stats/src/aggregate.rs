use shear_core::errors::{ErrorInfo, ShearError};
use shear_core::{MdetStep, StepSums, SumRecord};

use crate::collection::TileCollection;

/// Sums every tile of the collection, field-wise and per step.
pub fn combine(collection: &TileCollection) -> StepSums {
    StepSums::from_fn(|step| combine_step(collection, step))
}

/// Sums a single step's sequence across tiles.
pub fn combine_step(collection: &TileCollection, step: MdetStep) -> SumRecord {
    collection.step(step).sum()
}

/// Removes one tile's contribution from precomputed full-sample sums.
///
/// Exact for plain additive sums, so it matches re-aggregating the remaining
/// tiles up to floating-point rounding.
pub fn without_tile(full: &StepSums, tile: &StepSums) -> StepSums {
    *full - *tile
}

/// Full-sample sums with tile `index` left out.
pub fn leave_one_out(
    collection: &TileCollection,
    full: &StepSums,
    index: usize,
) -> Result<StepSums, ShearError> {
    let tile = collection.tiles().get(index).ok_or_else(|| {
        ShearError::Stats(
            ErrorInfo::new("tile-index", "leave-one-out index outside the collection")
                .with_context("index", index.to_string())
                .with_context("tiles", collection.len().to_string()),
        )
    })?;
    Ok(without_tile(full, tile))
}
