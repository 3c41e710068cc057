//! Spectral response function model
//!
//! A response function maps wavelength (nm) to a relative sensitivity weight
//! and defines one destination sensor band. This module covers:
//! - [`ResponseFunction`]: the dense, gap-free discrete weight table
//! - [`parser`]: normalization of raw profile samples into a table
//! - [`ResponseFunctionSet`]: the ordered collection defining output bands
//! - [`SrfLibrary`]: raw profile records as supplied by the caller

mod function;
mod library;
pub mod parser;
mod set;

pub use function::ResponseFunction;
pub use library::{SpectralProfile, SrfLibrary, SrfRecord};
pub use parser::{parse_profile, RESPONSE_CUTOFF_DIGITS, RESPONSE_CUTOFF_VALUE};
pub use set::ResponseFunctionSet;
