//! Profile-to-response-function parser
//!
//! Turns one raw profile record (x/y samples plus a wavelength unit) into a
//! normalized, gap-filled [`ResponseFunction`]: unit scaling to nm, cutoff
//! filtering of negligible weights, discretization to integer nm, and zero
//! gap-filling so the resulting table is dense.

use crate::error::{Error, Result};
use crate::srf::{ResponseFunction, SpectralProfile};
use std::collections::BTreeMap;

/// Minimum significant weight; profile samples below this are dropped before
/// gap-filling. Inherited numeric tuning, fixed rather than user-tunable.
/// Filtering reduces band bleed from long shallow tails and the number of
/// source bands each destination band has to touch.
pub const RESPONSE_CUTOFF_VALUE: f64 = 1e-3;

/// Number of decimal digits weights are rounded to during discretization.
pub const RESPONSE_CUTOFF_DIGITS: i32 = 3;

/// Round a weight to [`RESPONSE_CUTOFF_DIGITS`] decimal digits.
pub(crate) fn round_weight(y: f64) -> f64 {
    let factor = 10f64.powi(RESPONSE_CUTOFF_DIGITS);
    (y * factor).round() / factor
}

/// Scale factor converting the profile's x unit to nanometers.
fn unit_scale(unit: &str, band: &str) -> Result<f64> {
    match unit.to_lowercase().as_str() {
        "micrometers" | "um" => Ok(1000.0),
        "nanometers" | "nm" => Ok(1.0),
        _ => Err(Error::UnsupportedUnit {
            unit: unit.to_string(),
            band: band.to_string(),
        }),
    }
}

/// Parse one profile record into a response function.
///
/// Samples with `y` below [`RESPONSE_CUTOFF_VALUE`] are dropped, the rest
/// are discretized to `(round(x * scale), round(y, 3))`, and every integer
/// nm between the discretized minimum and maximum without a sample gets
/// weight `0.0`.
///
/// When two source samples round to the same integer wavelength the later
/// one wins. Profiles are expected to be sampled finer than 1 nm only
/// rarely, and the collision is accepted rather than corrected.
pub fn parse_profile(name: &str, profile: &SpectralProfile) -> Result<ResponseFunction> {
    let scale = unit_scale(&profile.x_unit, name)?;

    let mut discrete: BTreeMap<i64, f64> = BTreeMap::new();
    for (&x, &y) in profile.x.iter().zip(profile.y.iter()) {
        if y < RESPONSE_CUTOFF_VALUE {
            continue;
        }
        discrete.insert((x * scale).round() as i64, round_weight(y));
    }

    let (min_nm, max_nm) = match (discrete.first_key_value(), discrete.last_key_value()) {
        (Some((&min, _)), Some((&max, _))) => (min, max),
        _ => {
            return Err(Error::EmptyResponseFunction {
                band: name.to_string(),
            })
        }
    };

    let weights: Vec<f64> = (min_nm..=max_nm)
        .map(|nm| discrete.get(&nm).copied().unwrap_or(0.0))
        .collect();

    Ok(ResponseFunction::from_dense(
        name.to_string(),
        min_nm,
        weights,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(x: Vec<f64>, y: Vec<f64>, unit: &str) -> SpectralProfile {
        SpectralProfile {
            x,
            y,
            x_unit: unit.to_string(),
        }
    }

    #[test]
    fn micrometers_and_nanometers_agree() {
        let um = parse_profile("b", &profile(vec![0.5], vec![1.0], "Micrometers")).unwrap();
        let nm = parse_profile("b", &profile(vec![500.0], vec![1.0], "nm")).unwrap();
        assert_eq!(um, nm);
        assert_eq!(um.min_nm(), 500);
        assert_eq!(um.weight_at_nm(500.0), Some(1.0));
    }

    #[test]
    fn unit_labels_are_case_insensitive() {
        for unit in ["Nanometers", "NANOMETERS", "nm", "NM"] {
            assert!(parse_profile("b", &profile(vec![500.0], vec![1.0], unit)).is_ok());
        }
        for unit in ["Micrometers", "UM", "um"] {
            assert!(parse_profile("b", &profile(vec![0.5], vec![1.0], unit)).is_ok());
        }
    }

    #[test]
    fn unsupported_unit_is_fatal() {
        let err = parse_profile("swir", &profile(vec![1.0], vec![1.0], "Angstrom")).unwrap_err();
        match err {
            Error::UnsupportedUnit { unit, band } => {
                assert_eq!(unit, "Angstrom");
                assert_eq!(band, "swir");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negligible_samples_are_dropped() {
        // The 400 nm sample sits below the cutoff and must not widen the support.
        let f = parse_profile(
            "b",
            &profile(vec![400.0, 500.0, 501.0], vec![1e-5, 0.8, 0.9], "nm"),
        )
        .unwrap();
        assert_eq!(f.min_nm(), 500);
        assert_eq!(f.max_nm(), 501);
        assert_eq!(f.weight_at_nm(400.0), None);
    }

    #[test]
    fn gaps_are_zero_filled() {
        let f = parse_profile("b", &profile(vec![500.0, 503.0], vec![0.5, 0.7], "nm")).unwrap();
        assert_eq!(f.len(), 4);
        assert_eq!(f.weight_at_nm(500.0), Some(0.5));
        assert_eq!(f.weight_at_nm(501.0), Some(0.0));
        assert_eq!(f.weight_at_nm(502.0), Some(0.0));
        assert_eq!(f.weight_at_nm(503.0), Some(0.7));
    }

    #[test]
    fn contiguity_holds_for_sparse_profiles() {
        let f = parse_profile(
            "b",
            &profile(vec![0.45, 0.46, 0.50], vec![0.2, 0.4, 0.9], "um"),
        )
        .unwrap();
        // Exactly one entry per integer nm in [450, 500]
        assert_eq!(f.len(), 51);
        for nm in 450..=500 {
            assert!(f.weight_at_nm(nm as f64).is_some());
        }
    }

    #[test]
    fn rounding_collision_last_sample_wins() {
        // 500.4 and 500.6 um-free samples both round to 500 nm.
        let f = parse_profile("b", &profile(vec![500.4, 499.6], vec![0.3, 0.8], "nm")).unwrap();
        assert_eq!(f.len(), 1);
        assert_eq!(f.weight_at_nm(500.0), Some(0.8));
    }

    #[test]
    fn weights_are_rounded_to_three_digits() {
        let f = parse_profile("b", &profile(vec![500.0], vec![0.123_456], "nm")).unwrap();
        assert_eq!(f.weight_at_nm(500.0), Some(0.123));
    }

    #[test]
    fn all_samples_below_cutoff_is_fatal() {
        let err = parse_profile("weak", &profile(vec![500.0], vec![1e-6], "nm")).unwrap_err();
        assert!(matches!(err, Error::EmptyResponseFunction { band } if band == "weak"));
    }
}
