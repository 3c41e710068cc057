//! # SpecRes Core
//!
//! Core types, traits and I/O for the SpecRes spectral resampling library.
//!
//! This crate provides:
//! - `ResponseFunction` / `ResponseFunctionSet`: discrete spectral response functions
//! - `SrfLibrary`: the profile records a response-function set is built from
//! - `SourceRaster` / `OutputRaster`: windowed raster access traits
//! - `ProgressSink`: progress reporting and cooperative cancellation
//! - I/O adapters for in-memory rasters and (with the `gdal` feature) GeoTIFF

pub mod error;
pub mod io;
pub mod progress;
pub mod raster;
pub mod srf;

pub use error::{Error, Result};
pub use progress::ProgressSink;
pub use raster::{BandDescriptor, GeoTransform, OutputRaster, SourceRaster, Window};
pub use srf::{ResponseFunction, ResponseFunctionSet, SrfLibrary};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::progress::{ProgressSink, SilentProgress};
    pub use crate::raster::{BandDescriptor, GeoTransform, OutputRaster, SourceRaster, Window};
    pub use crate::srf::{ResponseFunction, ResponseFunctionSet, SpectralProfile, SrfLibrary};
}
