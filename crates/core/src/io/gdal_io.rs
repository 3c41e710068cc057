//! GeoTIFF adapters using GDAL
//!
//! `GdalSourceRaster` reads per-band spectral metadata using ENVI-style
//! keys (`wavelength`, `wavelength_units`, `fwhm`, `bbl`), which is how
//! hyperspectral products usually carry them. `GdalOutputRaster` creates a
//! GTiff with the source grid and writes blocks as they arrive.

use crate::error::{Error, Result};
use crate::raster::{
    round_half_away, BandDescriptor, Crs, GeoTransform, OutputRaster, SourceRaster, Window,
};
use gdal::raster::{Buffer, GdalType, RasterCreationOption};
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset, DriverManager, Metadata};
use ndarray::Array3;
use std::path::Path;

/// Storage type for output pixels.
///
/// Computation is always f64; this only controls the on-disk sample type.
/// Integer storage rounds half away from zero at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputDataType {
    #[default]
    Float64,
    Float32,
    Int16,
}

fn band_metadata_item(dataset: &Dataset, band: usize, key: &str) -> Result<Option<String>> {
    let rasterband = dataset.rasterband(band)?;
    for domain in ["", "ENVI"] {
        if let Some(value) = rasterband.metadata_item(key, domain) {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Scale factor from the metadata wavelength unit to nanometers.
/// Missing units default to nanometers.
fn wavelength_scale(unit: Option<&str>) -> f64 {
    match unit.map(|u| u.to_lowercase()) {
        Some(u) if u == "micrometers" || u == "um" => 1000.0,
        _ => 1.0,
    }
}

/// A GDAL-backed readable source raster
pub struct GdalSourceRaster {
    dataset: Dataset,
    bands: Vec<BandDescriptor>,
    transform: GeoTransform,
    crs: Option<Crs>,
    rows: usize,
    cols: usize,
}

impl GdalSourceRaster {
    /// Open a raster and collect per-band spectral metadata.
    ///
    /// Every band must carry a center wavelength; a hyperspectral product
    /// without wavelengths cannot be spectrally resampled.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let dataset = Dataset::open(path.as_ref())?;
        let (cols, rows) = dataset.raster_size();
        let band_count = dataset.raster_count();

        let mut bands = Vec::with_capacity(band_count);
        for index in 1..=band_count {
            let unit = band_metadata_item(&dataset, index, "wavelength_units")?;
            let scale = wavelength_scale(unit.as_deref());

            let center_nm = band_metadata_item(&dataset, index, "wavelength")?
                .and_then(|v| v.trim().parse::<f64>().ok())
                .map(|v| v * scale)
                .ok_or_else(|| {
                    Error::Other(format!("band {index} has no center wavelength metadata"))
                })?;

            let fwhm_nm = band_metadata_item(&dataset, index, "fwhm")?
                .and_then(|v| v.trim().parse::<f64>().ok())
                .map(|v| v * scale);

            // ENVI bad band list: 1 = usable, 0 = bad
            let bad = band_metadata_item(&dataset, index, "bbl")?
                .map(|v| v.trim() == "0")
                .unwrap_or(false);

            let nodata = dataset.rasterband(index)?.no_data_value();

            bands.push(BandDescriptor {
                index,
                center_nm,
                fwhm_nm,
                nodata,
                bad,
            });
        }

        let transform = dataset
            .geo_transform()
            .map(GeoTransform::from_gdal)
            .unwrap_or_default();

        let crs = dataset.spatial_ref().ok().and_then(|srs| {
            if let Ok(code) = srs.auth_code() {
                Some(Crs::from_epsg(code as u32))
            } else {
                srs.to_wkt().ok().map(Crs::from_wkt)
            }
        });

        Ok(Self {
            dataset,
            bands,
            transform,
            crs,
            rows,
            cols,
        })
    }
}

impl SourceRaster for GdalSourceRaster {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
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
        if !window.fits(self.rows, self.cols) {
            return Err(Error::WindowOutOfBounds {
                window,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let mut block = Array3::zeros((self.bands.len(), window.rows, window.cols));
        for (i, band) in self.bands.iter().enumerate() {
            let buffer = self
                .dataset
                .rasterband(band.index)
                .and_then(|b| {
                    b.read_as::<f64>(
                        (window.col_off as isize, window.row_off as isize),
                        (window.cols, window.rows),
                        (window.cols, window.rows),
                        None,
                    )
                })
                .map_err(|e| Error::RasterIo {
                    message: format!("reading band {}: {}", band.index, e),
                    window,
                })?;

            for row in 0..window.rows {
                for col in 0..window.cols {
                    block[(i, row, col)] = buffer.data()[row * window.cols + col];
                }
            }
        }
        Ok(block)
    }
}

/// A GDAL-backed writable output raster
pub struct GdalOutputRaster {
    dataset: Dataset,
    band_names: Vec<String>,
    nodata: f64,
    data_type: OutputDataType,
    rows: usize,
    cols: usize,
}

impl GdalOutputRaster {
    /// Create a GTiff with one band per name, copying grid, geotransform and
    /// CRS from the source. Band descriptions are set to the destination
    /// band names and each band records its center wavelength in nm.
    pub fn create(
        path: impl AsRef<Path>,
        source: &dyn SourceRaster,
        band_names: Vec<String>,
        centers_nm: &[f64],
        nodata: f64,
        data_type: OutputDataType,
    ) -> Result<Self> {
        let driver = DriverManager::get_driver_by_name("GTiff")?;
        let (rows, cols) = (source.rows(), source.cols());
        let options = [
            RasterCreationOption {
                key: "COMPRESS",
                value: "DEFLATE",
            },
            RasterCreationOption {
                key: "TILED",
                value: "YES",
            },
        ];

        let mut dataset = match data_type {
            OutputDataType::Float64 => {
                create_typed::<f64>(&driver, path.as_ref(), rows, cols, band_names.len(), &options)?
            }
            OutputDataType::Float32 => {
                create_typed::<f32>(&driver, path.as_ref(), rows, cols, band_names.len(), &options)?
            }
            OutputDataType::Int16 => {
                create_typed::<i16>(&driver, path.as_ref(), rows, cols, band_names.len(), &options)?
            }
        };

        dataset.set_geo_transform(&source.transform().to_gdal())?;
        if let Some(crs) = source.crs() {
            if let Some(epsg) = crs.epsg() {
                dataset.set_spatial_ref(&SpatialRef::from_epsg(epsg)?)?;
            } else if let Some(wkt) = crs.wkt() {
                dataset.set_spatial_ref(&SpatialRef::from_wkt(wkt)?)?;
            }
        }

        for (i, name) in band_names.iter().enumerate() {
            let mut band = dataset.rasterband(i + 1)?;
            band.set_description(name)?;
            band.set_no_data_value(Some(nodata))?;
            if let Some(&center) = centers_nm.get(i) {
                band.set_metadata_item("wavelength", &format!("{center}"), "")?;
                band.set_metadata_item("wavelength_units", "Nanometers", "")?;
            }
        }

        Ok(Self {
            dataset,
            band_names,
            nodata,
            data_type,
            rows,
            cols,
        })
    }
}

fn create_typed<T: GdalType>(
    driver: &gdal::Driver,
    path: &Path,
    rows: usize,
    cols: usize,
    bands: usize,
    options: &[RasterCreationOption<'_>],
) -> Result<Dataset> {
    Ok(driver.create_with_band_type_with_options::<T, _>(path, cols, rows, bands, options)?)
}

impl OutputRaster for GdalOutputRaster {
    fn band_names(&self) -> &[String] {
        &self.band_names
    }

    fn nodata(&self) -> f64 {
        self.nodata
    }

    fn write_window(&mut self, window: Window, data: &Array3<f64>) -> Result<()> {
        if data.dim() != (self.band_names.len(), window.rows, window.cols) {
            return Err(Error::RasterIo {
                message: format!(
                    "block shape {:?} does not match window and band count",
                    data.dim()
                ),
                window,
            });
        }

        for i in 0..self.band_names.len() {
            let plane = data.index_axis(ndarray::Axis(0), i);
            let result = match self.data_type {
                OutputDataType::Float64 => {
                    let samples: Vec<f64> = plane.iter().copied().collect();
                    self.write_band(i + 1, window, samples)
                }
                OutputDataType::Float32 => {
                    let samples: Vec<f32> = plane.iter().map(|&v| v as f32).collect();
                    self.write_band(i + 1, window, samples)
                }
                OutputDataType::Int16 => {
                    let samples: Vec<i16> = plane
                        .iter()
                        .map(|&v| num_traits::cast(round_half_away(v)).unwrap_or(i16::MIN))
                        .collect();
                    self.write_band(i + 1, window, samples)
                }
            };
            result.map_err(|e| Error::RasterIo {
                message: format!("writing band {}: {}", i + 1, e),
                window,
            })?;
        }
        Ok(())
    }

    fn mark_incomplete(&mut self) -> Result<()> {
        self.dataset.set_metadata_item("INCOMPLETE", "TRUE", "")?;
        self.dataset.flush_cache()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.dataset.flush_cache()?;
        Ok(())
    }
}

impl GdalOutputRaster {
    fn write_band<T: GdalType + Copy>(
        &mut self,
        band: usize,
        window: Window,
        samples: Vec<T>,
    ) -> gdal::errors::Result<()> {
        let mut rasterband = self.dataset.rasterband(band)?;
        let mut buffer = Buffer::new((window.cols, window.rows), samples);
        rasterband.write(
            (window.col_off as isize, window.row_off as isize),
            (window.cols, window.rows),
            &mut buffer,
        )
    }
}
