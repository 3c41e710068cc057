//! Per-block weighted convolution engine

use crate::maybe_rayon::*;
use crate::resample::BlockIterator;
use ndarray::{Array2, Array3, ArrayView3, Axis};
use specres_core::error::{Error, Result};
use specres_core::progress::ProgressSink;
use specres_core::raster::{BandDescriptor, OutputRaster, SourceRaster, Window};
use specres_core::srf::{ResponseFunction, ResponseFunctionSet};

/// One source band's contribution to a destination band: the band's plane
/// index in the block array, its no-data sentinel, and the response weight
/// at the band's center wavelength.
#[derive(Debug, Clone, Copy)]
struct Contribution {
    plane: usize,
    nodata: Option<f64>,
    weight: f64,
}

/// Source bands contributing to one response function: in-support center
/// wavelength, not flagged bad. Weights come from the dense table by
/// nearest-integer lookup, so this depends only on band metadata and can be
/// computed once per run.
fn contributions(bands: &[BandDescriptor], function: &ResponseFunction) -> Vec<Contribution> {
    bands
        .iter()
        .enumerate()
        .filter(|(_, band)| !band.bad)
        .filter_map(|(plane, band)| {
            function.weight_at_nm(band.center_nm).map(|weight| Contribution {
                plane,
                nodata: band.nodata,
                weight,
            })
        })
        .collect()
}

/// Center wavelengths recorded for the destination bands: the weighted mean
/// wavelength of each response function, in set order.
pub fn output_band_centers(responses: &ResponseFunctionSet) -> Vec<f64> {
    responses.iter().map(|f| f.mean_wavelength_nm()).collect()
}

/// Resample a source raster onto the destination bands defined by a
/// response function set.
///
/// Streams the source block by block in row-major order. For every pixel and
/// every response function the output is the weighted mean of the source
/// bands inside the function's support, with weights taken from the dense
/// table at each band's center wavelength. Bands whose pixel equals their
/// no-data sentinel drop out of both numerator and denominator; a pixel with
/// no usable weight becomes the output no-data value. All arithmetic is f64.
///
/// Progress is reported as `blocks_done / total_blocks` after every block.
/// Cancellation is polled at block boundaries: the output is marked
/// incomplete and [`Error::Cancelled`] is returned, and the caller is
/// expected to discard the partial output.
pub fn resample<S, O>(
    source: &S,
    responses: &ResponseFunctionSet,
    output: &mut O,
    progress: &dyn ProgressSink,
) -> Result<()>
where
    S: SourceRaster + ?Sized,
    O: OutputRaster + ?Sized,
{
    let contribs: Vec<Vec<Contribution>> = responses
        .iter()
        .map(|f| contributions(source.bands(), f))
        .collect();

    let nodata_out = output.nodata();
    let blocks = BlockIterator::new(source.rows(), source.cols());
    let total = blocks.total_blocks();
    let mut done = 0usize;

    for window in blocks {
        if progress.is_cancelled() {
            output.mark_incomplete()?;
            return Err(Error::Cancelled);
        }

        let block = source.read_window(window).inspect_err(|e| {
            progress.report_error(&e.to_string(), true);
        })?;

        let mut out = Array3::zeros((responses.len(), window.rows, window.cols));
        for (fi, function_contribs) in contribs.iter().enumerate() {
            let plane = convolve_plane(&block.view(), function_contribs, window, nodata_out);
            let plane = Array2::from_shape_vec((window.rows, window.cols), plane)
                .map_err(|e| Error::Other(e.to_string()))?;
            out.index_axis_mut(Axis(0), fi).assign(&plane);
        }

        output.write_window(window, &out).inspect_err(|e| {
            progress.report_error(&e.to_string(), true);
        })?;
        done += 1;
        progress.report(done as f64 / total as f64);
    }

    output.finish()?;
    Ok(())
}

/// Convolve one response function over one block, row-parallel.
///
/// Returns the destination plane in row-major order. The physical write
/// stays on the driving thread; only the arithmetic is parallelized.
fn convolve_plane(
    block: &ArrayView3<'_, f64>,
    contribs: &[Contribution],
    window: Window,
    nodata_out: f64,
) -> Vec<f64> {
    (0..window.rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![nodata_out; window.cols];
            for col in 0..window.cols {
                let mut weighted_sum = 0.0;
                let mut weight_sum = 0.0;
                for c in contribs {
                    let value = block[(c.plane, row, col)];
                    // NaN is always treated as missing, independent of the sentinel
                    if value.is_nan() || c.nodata == Some(value) {
                        continue;
                    }
                    weighted_sum += value * c.weight;
                    weight_sum += c.weight;
                }
                if weight_sum > 0.0 {
                    row_data[col] = weighted_sum / weight_sum;
                }
            }
            row_data
        })
        .collect()
}
