//! End-to-end resampling pipeline tests over in-memory rasters.
//!
//! These exercise the full path: JSON library -> parser -> set builder ->
//! block-streamed convolution -> output raster with propagated metadata.

use ndarray::Array3;
use specres_algorithms::resample::{resample, BlockIterator, BLOCK_COLS, BLOCK_ROWS};
use specres_core::error::Error;
use specres_core::io::{MemoryOutput, MemorySource};
use specres_core::progress::{ProgressSink, SilentProgress};
use specres_core::raster::{BandDescriptor, GeoTransform, OutputRaster, SourceRaster, Window};
use specres_core::srf::{ResponseFunctionSet, SrfLibrary};
use std::sync::atomic::{AtomicUsize, Ordering};

const NODATA: f64 = -9999.0;

/// Library with three destination bands in non-wavelength order, mixing
/// micrometer and nanometer records.
fn library_json() -> &'static str {
    r#"[
        {"name": "red",   "x": [620.0, 640.0, 660.0, 680.0], "y": [0.4, 1.0, 1.0, 0.4], "xUnit": "Nanometers"},
        {"name": "blue",  "x": [0.44, 0.45, 0.46, 0.47],     "y": [0.5, 1.0, 1.0, 0.5], "xUnit": "Micrometers"},
        {"name": "green", "x": [540.0, 550.0, 560.0],        "y": [0.8, 1.0, 0.8],      "xUnit": "nm"}
    ]"#
}

/// Hyperspectral source: bands every 10 nm from 400 to 700, value pattern
/// `band_index * 1000 + row * 10 + col`.
fn hyperspectral_source(rows: usize, cols: usize) -> MemorySource {
    let centers: Vec<f64> = (0..31).map(|i| 400.0 + 10.0 * i as f64).collect();
    let data = Array3::from_shape_fn((centers.len(), rows, cols), |(b, r, c)| {
        (b * 1000 + r * 10 + c) as f64
    });
    let bands = centers
        .iter()
        .enumerate()
        .map(|(i, &nm)| BandDescriptor::new(i + 1, nm).with_nodata(NODATA))
        .collect();
    let mut source = MemorySource::new(data, bands).unwrap();
    source.set_transform(GeoTransform::new(380000.0, 5820000.0, 30.0, -30.0));
    source
}

fn build_set() -> ResponseFunctionSet {
    let library = SrfLibrary::from_json_str(library_json()).unwrap();
    ResponseFunctionSet::from_library(&library).unwrap()
}

#[test]
fn output_bands_follow_library_order() {
    let source = hyperspectral_source(4, 4);
    let responses = build_set();
    let mut output = MemoryOutput::like_source(&source, responses.names(), NODATA).unwrap();

    resample(&source, &responses, &mut output, &SilentProgress).unwrap();

    assert_eq!(responses.names(), ["red", "blue", "green"]);
    assert_eq!(output.band_names(), responses.names().as_slice());
    assert_eq!(output.data().dim().0, responses.len());
    // Geotransform carried from the source
    assert_eq!(output.transform(), source.transform());
}

#[test]
fn every_valid_pixel_gets_a_value() {
    let source = hyperspectral_source(8, 8);
    let responses = build_set();
    let mut output = MemoryOutput::like_source(&source, responses.names(), NODATA).unwrap();

    resample(&source, &responses, &mut output, &SilentProgress).unwrap();

    for band in 0..3 {
        for row in 0..8 {
            for col in 0..8 {
                assert_ne!(output.get(band, row, col), NODATA);
            }
        }
    }
}

#[test]
fn resampled_value_is_the_weighted_band_average() {
    let source = hyperspectral_source(2, 2);
    let responses = build_set();
    let mut output = MemoryOutput::like_source(&source, responses.names(), NODATA).unwrap();

    resample(&source, &responses, &mut output, &SilentProgress).unwrap();

    // "green" support is [540, 560]; source bands at 540, 550, 560 nm are
    // planes 14..=16 with weights 0.8, 1.0, 0.8.
    let expected = |row: usize, col: usize| {
        let v = |plane: usize| (plane * 1000 + row * 10 + col) as f64;
        (v(14) * 0.8 + v(15) * 1.0 + v(16) * 0.8) / 2.6
    };
    for row in 0..2 {
        for col in 0..2 {
            let got = output.get(2, row, col);
            assert!((got - expected(row, col)).abs() < 1e-9);
        }
    }
}

#[test]
fn runs_are_bit_identical() {
    let source = hyperspectral_source(16, 16);
    let responses = build_set();

    let mut first = MemoryOutput::like_source(&source, responses.names(), NODATA).unwrap();
    resample(&source, &responses, &mut first, &SilentProgress).unwrap();

    let mut second = MemoryOutput::like_source(&source, responses.names(), NODATA).unwrap();
    resample(&source, &responses, &mut second, &SilentProgress).unwrap();

    assert_eq!(first.data(), second.data());
}

// ---------------------------------------------------------------------------
// Multi-block streaming and cancellation
// ---------------------------------------------------------------------------

/// Source wrapper counting windowed reads.
struct CountingSource {
    inner: MemorySource,
    reads: AtomicUsize,
}

impl SourceRaster for CountingSource {
    fn rows(&self) -> usize {
        self.inner.rows()
    }

    fn cols(&self) -> usize {
        self.inner.cols()
    }

    fn bands(&self) -> &[BandDescriptor] {
        self.inner.bands()
    }

    fn transform(&self) -> GeoTransform {
        self.inner.transform()
    }

    fn crs(&self) -> Option<specres_core::raster::Crs> {
        self.inner.crs()
    }

    fn read_window(&self, window: Window) -> specres_core::Result<ndarray::Array3<f64>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_window(window)
    }
}

/// Progress sink that requests cancellation after a fixed number of
/// completed blocks.
struct CancelAfterBlocks {
    after: usize,
    reported: AtomicUsize,
}

impl CancelAfterBlocks {
    fn new(after: usize) -> Self {
        Self {
            after,
            reported: AtomicUsize::new(0),
        }
    }
}

impl ProgressSink for CancelAfterBlocks {
    fn report(&self, _fraction: f64) {
        self.reported.fetch_add(1, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.reported.load(Ordering::SeqCst) >= self.after
    }

    fn report_error(&self, _message: &str, _fatal: bool) {}
}

/// Raster taller than one block, so the engine streams several windows.
fn multi_block_source() -> CountingSource {
    let rows = BLOCK_ROWS + 40;
    let cols = BLOCK_COLS / 4;
    CountingSource {
        inner: hyperspectral_source(rows, cols),
        reads: AtomicUsize::new(0),
    }
}

#[test]
fn streaming_covers_multiple_blocks() {
    let source = multi_block_source();
    let total = BlockIterator::new(source.rows(), source.cols()).total_blocks();
    assert!(total > 1, "test raster must span several blocks");

    let responses = build_set();
    let mut output = MemoryOutput::like_source(&source, responses.names(), NODATA).unwrap();
    resample(&source, &responses, &mut output, &SilentProgress).unwrap();

    assert_eq!(source.reads.load(Ordering::SeqCst), total);
    // Last pixel of the last block got written
    assert_ne!(
        output.get(0, source.rows() - 1, source.cols() - 1),
        NODATA
    );
}

#[test]
fn cancel_after_first_block_stops_the_run() {
    let source = multi_block_source();
    let total = BlockIterator::new(source.rows(), source.cols()).total_blocks();
    assert!(total > 1);

    let responses = build_set();
    let mut output = MemoryOutput::like_source(&source, responses.names(), NODATA).unwrap();

    let progress = CancelAfterBlocks::new(1);
    let err = resample(&source, &responses, &mut output, &progress).unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert!(output.is_incomplete());
    // Exactly one block was read before the cancellation was honored.
    assert_eq!(source.reads.load(Ordering::SeqCst), 1);
    // The untouched tail is still no-data.
    assert_eq!(
        output.get(0, source.rows() - 1, source.cols() - 1),
        NODATA
    );
}

#[test]
fn progress_reaches_one() {
    struct LastFraction(std::sync::Mutex<f64>);
    impl ProgressSink for LastFraction {
        fn report(&self, fraction: f64) {
            *self.0.lock().unwrap() = fraction;
        }
        fn is_cancelled(&self) -> bool {
            false
        }
        fn report_error(&self, _message: &str, _fatal: bool) {}
    }

    let source = multi_block_source();
    let responses = build_set();
    let mut output = MemoryOutput::like_source(&source, responses.names(), NODATA).unwrap();

    let progress = LastFraction(std::sync::Mutex::new(0.0));
    resample(&source, &responses, &mut output, &progress).unwrap();
    assert!((*progress.0.lock().unwrap() - 1.0).abs() < 1e-12);
}
