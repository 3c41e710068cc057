//! # SpecRes Algorithms
//!
//! Spectral resampling algorithms for SpecRes.
//!
//! The central operation is [`resample::resample`]: convolving every pixel
//! of a hyperspectral source raster against a set of spectral response
//! functions, streaming block by block so rasters never have to fit in
//! memory.

pub mod maybe_rayon;
pub mod resample;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::resample::{resample, BlockIterator, BLOCK_COLS, BLOCK_ROWS};
    pub use specres_core::prelude::*;
}
