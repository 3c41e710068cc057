//! Windowed raster access traits
//!
//! The resampling engine is generic over these traits; concrete adapters
//! live in [`crate::io`]. Blocks are exchanged as `Array3<f64>` in
//! (band, row, col) order regardless of the underlying storage type.

use crate::error::Result;
use crate::raster::{BandDescriptor, Crs, GeoTransform, Window};
use ndarray::Array3;

/// A readable multi-band raster with per-band spectral metadata.
pub trait SourceRaster {
    /// Raster height in pixels
    fn rows(&self) -> usize;

    /// Raster width in pixels
    fn cols(&self) -> usize;

    /// Spectral metadata for every band, in band order
    fn bands(&self) -> &[BandDescriptor];

    /// Affine georeferencing transform
    fn transform(&self) -> GeoTransform;

    /// Coordinate reference system, if georeferenced
    fn crs(&self) -> Option<Crs>;

    /// Read one window across all bands.
    ///
    /// Returns a (bands, rows, cols) array with every sample cast to f64.
    /// The window must lie inside the raster extent.
    fn read_window(&self, window: Window) -> Result<Array3<f64>>;

    /// Number of bands
    fn band_count(&self) -> usize {
        self.bands().len()
    }
}

/// A writable multi-band raster accepting windowed block writes.
///
/// Band count, band names and georeferencing are fixed when the adapter is
/// created; the engine only streams pixel blocks into it.
pub trait OutputRaster {
    /// Destination band names, in band order
    fn band_names(&self) -> &[String];

    /// No-data sentinel written for pixels with no usable contribution
    fn nodata(&self) -> f64;

    /// Write one window across all bands.
    ///
    /// `data` has shape (bands, rows, cols) matching the window; conversion
    /// to the destination storage type (round half away from zero) happens
    /// here, at write time.
    fn write_window(&mut self, window: Window, data: &Array3<f64>) -> Result<()>;

    /// Record that the raster was only partially written (cancellation).
    fn mark_incomplete(&mut self) -> Result<()>;

    /// Flush and finalize the raster.
    fn finish(&mut self) -> Result<()>;
}
