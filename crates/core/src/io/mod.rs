//! Raster I/O adapters
//!
//! The in-memory adapter is always available and backs the test suite and
//! embedding scenarios. GeoTIFF adapters require the `gdal` feature.

#[cfg(feature = "gdal")]
mod gdal_io;
mod memory;

#[cfg(feature = "gdal")]
pub use gdal_io::{GdalOutputRaster, GdalSourceRaster, OutputDataType};
pub use memory::{MemoryOutput, MemorySource};
