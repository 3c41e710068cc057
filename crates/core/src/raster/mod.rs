//! Raster model: band metadata, georeferencing and windowed access traits

mod band;
mod crs;
mod geotransform;
mod traits;
mod window;

pub use band::BandDescriptor;
pub use crs::Crs;
pub use geotransform::GeoTransform;
pub use traits::{OutputRaster, SourceRaster};
pub use window::Window;

/// Round half away from zero, the rounding used when converting computed
/// f64 values to an integer storage type at write time.
///
/// `f64::round` in Rust already rounds half away from zero; the named
/// wrapper keeps the write-time policy explicit at call sites.
pub fn round_half_away(value: f64) -> f64 {
    value.round()
}

#[cfg(test)]
mod tests {
    use super::round_half_away;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_half_away(0.5), 1.0);
        assert_eq!(round_half_away(-0.5), -1.0);
        assert_eq!(round_half_away(2.5), 3.0);
        assert_eq!(round_half_away(-2.5), -3.0);
        assert_eq!(round_half_away(1.4), 1.0);
    }
}
