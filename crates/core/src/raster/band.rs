//! Per-band spectral metadata

/// Spectral metadata for one source raster band.
///
/// Everything the convolution engine needs to know about a band is carried
/// here explicitly, so block processing stays a pure function of its inputs
/// rather than reaching into ambient dataset state.
#[derive(Debug, Clone, PartialEq)]
pub struct BandDescriptor {
    /// Band number in the source raster (1-based, GDAL convention)
    pub index: usize,
    /// Center wavelength in nanometers
    pub center_nm: f64,
    /// Full width at half maximum in nanometers, if known
    pub fwhm_nm: Option<f64>,
    /// No-data sentinel for this band, if any
    pub nodata: Option<f64>,
    /// Whether the band is flagged unreliable and must not contribute
    /// to any destination band
    pub bad: bool,
}

impl BandDescriptor {
    /// Create a descriptor with only a center wavelength set
    pub fn new(index: usize, center_nm: f64) -> Self {
        Self {
            index,
            center_nm,
            fwhm_nm: None,
            nodata: None,
            bad: false,
        }
    }

    /// Set the no-data sentinel
    pub fn with_nodata(mut self, nodata: f64) -> Self {
        self.nodata = Some(nodata);
        self
    }

    /// Set the FWHM
    pub fn with_fwhm(mut self, fwhm_nm: f64) -> Self {
        self.fwhm_nm = Some(fwhm_nm);
        self
    }

    /// Flag the band as bad
    pub fn bad(mut self) -> Self {
        self.bad = true;
        self
    }

    /// Check whether a pixel value is this band's no-data sentinel
    pub fn is_nodata(&self, value: f64) -> bool {
        if value.is_nan() {
            return true;
        }
        match self.nodata {
            Some(nd) => value == nd,
            None => false,
        }
    }
}
