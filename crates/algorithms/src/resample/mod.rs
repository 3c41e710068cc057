//! Convolution resampling
//!
//! - [`BlockIterator`]: row-major windowing of a raster extent
//! - [`resample`]: the per-block weighted convolution engine

mod blocks;
mod engine;

pub use blocks::{BlockIterator, BLOCK_COLS, BLOCK_ROWS};
pub use engine::{output_band_centers, resample};
