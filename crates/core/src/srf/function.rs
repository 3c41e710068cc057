//! Discrete spectral response function

use crate::srf::parser::{round_weight, RESPONSE_CUTOFF_VALUE};

/// Conversion factor between FWHM and the standard deviation of a Gaussian:
/// `fwhm = 2 * sqrt(2 * ln 2) * sigma`.
const FWHM_TO_SIGMA: f64 = 2.354_820_045_030_949_3;

/// A named spectral response function as a dense weight table.
///
/// The table is contiguous: `weights[i]` is the sensitivity at wavelength
/// `min_nm + i` nanometers, with an entry for every integer nm between
/// `min_nm` and `max_nm` inclusive. The parser guarantees density by filling
/// gaps with zero, so wavelength lookup is a plain index operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseFunction {
    name: String,
    min_nm: i64,
    weights: Vec<f64>,
}

impl ResponseFunction {
    /// Create a response function from a dense weight table.
    ///
    /// `weights[i]` is the weight at `min_nm + i`. The table must be
    /// non-empty; the parser enforces this before construction.
    pub(crate) fn from_dense(name: String, min_nm: i64, weights: Vec<f64>) -> Self {
        debug_assert!(!weights.is_empty());
        Self {
            name,
            min_nm,
            weights,
        }
    }

    /// Build a Gaussian response function from a band center and FWHM.
    ///
    /// This is how sensors defined only by per-band center/FWHM pairs are
    /// turned into response functions. The tails are truncated where the
    /// weight drops below [`RESPONSE_CUTOFF_VALUE`], and weights are rounded
    /// like parsed profiles so both construction paths produce comparable
    /// tables.
    pub fn gaussian(name: impl Into<String>, center_nm: f64, fwhm_nm: f64) -> Self {
        let sigma = fwhm_nm / FWHM_TO_SIGMA;
        // Solve exp(-d^2 / (2 sigma^2)) >= cutoff for the half width in nm.
        let half = (sigma * (-2.0 * RESPONSE_CUTOFF_VALUE.ln()).sqrt()).floor() as i64;
        let center = center_nm.round() as i64;

        let min_nm = center - half;
        let weights: Vec<f64> = (min_nm..=center + half)
            .map(|nm| {
                let d = nm as f64 - center_nm;
                round_weight((-d * d / (2.0 * sigma * sigma)).exp())
            })
            .collect();

        Self::from_dense(name.into(), min_nm, weights)
    }

    /// The function's name; defines the destination band name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Smallest wavelength with an entry, in nm
    pub fn min_nm(&self) -> i64 {
        self.min_nm
    }

    /// Largest wavelength with an entry, in nm
    pub fn max_nm(&self) -> i64 {
        self.min_nm + self.weights.len() as i64 - 1
    }

    /// Number of entries in the dense table
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// A response function is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether a (possibly fractional) wavelength falls inside the support
    pub fn covers(&self, nm: f64) -> bool {
        let nm = nm.round() as i64;
        nm >= self.min_nm && nm <= self.max_nm()
    }

    /// Weight at a wavelength, by nearest-integer lookup.
    ///
    /// Returns `None` outside the support. Inside the support a value always
    /// exists because the table is dense.
    pub fn weight_at_nm(&self, nm: f64) -> Option<f64> {
        let nm = nm.round() as i64;
        if nm < self.min_nm || nm > self.max_nm() {
            return None;
        }
        Some(self.weights[(nm - self.min_nm) as usize])
    }

    /// Iterate `(wavelength_nm, weight)` pairs in increasing wavelength order
    pub fn samples(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.weights
            .iter()
            .enumerate()
            .map(move |(i, &w)| (self.min_nm + i as i64, w))
    }

    /// Weighted mean wavelength of the function, in nm.
    ///
    /// Recorded as the center wavelength of the destination band.
    pub fn mean_wavelength_nm(&self) -> f64 {
        let mut num = 0.0;
        let mut den = 0.0;
        for (nm, w) in self.samples() {
            num += nm as f64 * w;
            den += w;
        }
        num / den
    }
}
