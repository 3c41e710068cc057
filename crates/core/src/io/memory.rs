//! In-memory raster adapters
//!
//! Fully materialized rasters implementing the windowed access traits.
//! These are the reference implementation used by the test suite and by
//! callers that already hold their data in arrays.

use crate::error::{Error, Result};
use crate::raster::{BandDescriptor, Crs, GeoTransform, OutputRaster, SourceRaster, Window};
use ndarray::{s, Array3};

/// An in-memory multi-band source raster
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Array3<f64>,
    bands: Vec<BandDescriptor>,
    transform: GeoTransform,
    crs: Option<Crs>,
}

impl MemorySource {
    /// Create a source from a (bands, rows, cols) array and matching
    /// band descriptors.
    pub fn new(data: Array3<f64>, bands: Vec<BandDescriptor>) -> Result<Self> {
        let (band_count, rows, cols) = data.dim();
        if band_count != bands.len() {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            data,
            bands,
            transform: GeoTransform::default(),
            crs: None,
        })
    }

    /// Set the geotransform
    pub fn set_transform(&mut self, transform: GeoTransform) {
        self.transform = transform;
    }

    /// Set the CRS
    pub fn set_crs(&mut self, crs: Option<Crs>) {
        self.crs = crs;
    }
}

impl SourceRaster for MemorySource {
    fn rows(&self) -> usize {
        self.data.dim().1
    }

    fn cols(&self) -> usize {
        self.data.dim().2
    }

    fn bands(&self) -> &[BandDescriptor] {
        &self.bands
    }

    fn transform(&self) -> GeoTransform {
        self.transform
    }

    fn crs(&self) -> Option<Crs> {
        self.crs.clone()
    }

    fn read_window(&self, window: Window) -> Result<Array3<f64>> {
        if !window.fits(self.rows(), self.cols()) {
            return Err(Error::WindowOutOfBounds {
                window,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(self
            .data
            .slice(s![
                ..,
                window.row_off..window.row_off + window.rows,
                window.col_off..window.col_off + window.cols
            ])
            .to_owned())
    }
}

/// An in-memory multi-band output raster
#[derive(Debug, Clone)]
pub struct MemoryOutput {
    data: Array3<f64>,
    band_names: Vec<String>,
    nodata: f64,
    transform: GeoTransform,
    crs: Option<Crs>,
    incomplete: bool,
}

impl MemoryOutput {
    /// Create an output raster with one band per name, filled with the
    /// no-data value. Geotransform and CRS are copied from the source.
    pub fn new(
        rows: usize,
        cols: usize,
        band_names: Vec<String>,
        nodata: f64,
        transform: GeoTransform,
        crs: Option<Crs>,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 || band_names.is_empty() {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let data = Array3::from_elem((band_names.len(), rows, cols), nodata);
        Ok(Self {
            data,
            band_names,
            nodata,
            transform,
            crs,
            incomplete: false,
        })
    }

    /// Convenience constructor copying the spatial grid from a source
    pub fn like_source(
        source: &dyn SourceRaster,
        band_names: Vec<String>,
        nodata: f64,
    ) -> Result<Self> {
        Self::new(
            source.rows(),
            source.cols(),
            band_names,
            nodata,
            source.transform(),
            source.crs(),
        )
    }

    /// Pixel value at (band, row, col)
    pub fn get(&self, band: usize, row: usize, col: usize) -> f64 {
        self.data[(band, row, col)]
    }

    /// The full (bands, rows, cols) array
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Geotransform carried from the source
    pub fn transform(&self) -> GeoTransform {
        self.transform
    }

    /// CRS carried from the source
    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    /// Whether the raster was marked as partially written
    pub fn is_incomplete(&self) -> bool {
        self.incomplete
    }
}

impl OutputRaster for MemoryOutput {
    fn band_names(&self) -> &[String] {
        &self.band_names
    }

    fn nodata(&self) -> f64 {
        self.nodata
    }

    fn write_window(&mut self, window: Window, data: &Array3<f64>) -> Result<()> {
        let (rows, cols) = (self.data.dim().1, self.data.dim().2);
        if !window.fits(rows, cols) {
            return Err(Error::WindowOutOfBounds { window, rows, cols });
        }
        if data.dim() != (self.band_names.len(), window.rows, window.cols) {
            return Err(Error::RasterIo {
                message: format!(
                    "block shape {:?} does not match window and band count",
                    data.dim()
                ),
                window,
            });
        }
        self.data
            .slice_mut(s![
                ..,
                window.row_off..window.row_off + window.rows,
                window.col_off..window.col_off + window.cols
            ])
            .assign(data);
        Ok(())
    }

    fn mark_incomplete(&mut self) -> Result<()> {
        self.incomplete = true;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
