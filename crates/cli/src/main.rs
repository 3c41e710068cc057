//! SpecRes CLI - spectral resampling of hyperspectral rasters

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use specres_algorithms::resample::{output_band_centers, resample};
use specres_core::io::{GdalOutputRaster, GdalSourceRaster, OutputDataType};
use specres_core::progress::ProgressSink;
use specres_core::raster::SourceRaster;
use specres_core::srf::{ResponseFunctionSet, SrfLibrary};
use specres_core::Error;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "specres")]
#[command(author, version, about = "Spectral convolution resampling", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show spectral metadata of a raster file
    Info {
        /// Input raster file
        input: PathBuf,
    },
    /// Resample a hyperspectral raster onto a response function library
    Resample {
        /// Input hyperspectral raster
        input: PathBuf,
        /// SRF library (JSON: list of {name, x, y, xUnit} records)
        library: PathBuf,
        /// Output raster file
        output: PathBuf,
        /// Output no-data value
        #[arg(short, long, default_value = "-9999")]
        nodata: f64,
        /// Output sample type: float64, float32, int16
        #[arg(short, long, default_value = "float64")]
        dtype: String,
    },
}

// ─── Progress reporting ─────────────────────────────────────────────────

/// Indicatif-backed progress sink for resampling runs
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.green} {pos}% {msg}")
                .unwrap(),
        );
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for BarProgress {
    fn report(&self, fraction: f64) {
        self.bar.set_position((fraction * 100.0).round() as u64);
    }

    fn is_cancelled(&self) -> bool {
        false
    }

    fn report_error(&self, message: &str, fatal: bool) {
        if fatal {
            tracing::error!("{message}");
        } else {
            tracing::warn!("{message}");
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn parse_dtype(s: &str) -> Result<OutputDataType> {
    match s.to_lowercase().as_str() {
        "float64" | "f64" => Ok(OutputDataType::Float64),
        "float32" | "f32" => Ok(OutputDataType::Float32),
        "int16" | "i16" => Ok(OutputDataType::Int16),
        _ => anyhow::bail!("Unknown sample type: {}. Use float64, float32 or int16.", s),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let source =
                GdalSourceRaster::open(&input).context("Failed to open input raster")?;

            println!("File: {}", input.display());
            println!(
                "Dimensions: {} x {} ({} bands)",
                source.cols(),
                source.rows(),
                source.band_count()
            );
            if let Some(crs) = source.crs() {
                println!("CRS: {}", crs);
            }
            println!("\nBands:");
            for band in source.bands() {
                let fwhm = band
                    .fwhm_nm
                    .map(|f| format!(", fwhm {:.1} nm", f))
                    .unwrap_or_default();
                let flags = if band.bad { " [bad]" } else { "" };
                println!(
                    "  {:>3}: {:.1} nm{}{}",
                    band.index, band.center_nm, fwhm, flags
                );
            }
        }

        // ── Resample ─────────────────────────────────────────────────
        Commands::Resample {
            input,
            library,
            output,
            nodata,
            dtype,
        } => {
            let start = Instant::now();
            let dtype = parse_dtype(&dtype)?;

            let srf_library =
                SrfLibrary::from_path(&library).context("Failed to read SRF library")?;
            let responses = ResponseFunctionSet::from_library(&srf_library)
                .context("Invalid SRF library")?;
            info!("Response functions: {}", responses.len());

            let source =
                GdalSourceRaster::open(&input).context("Failed to open input raster")?;
            info!(
                "Input: {} x {}, {} bands",
                source.cols(),
                source.rows(),
                source.band_count()
            );

            let centers = output_band_centers(&responses);
            let mut destination = GdalOutputRaster::create(
                &output,
                &source,
                responses.names(),
                &centers,
                nodata,
                dtype,
            )
            .context("Failed to create output raster")?;

            let progress = BarProgress::new();
            let result = resample(&source, &responses, &mut destination, &progress);
            progress.finish();

            match result {
                Ok(()) => {
                    println!("Resampled raster saved to: {}", output.display());
                    println!("  Output bands: {}", responses.len());
                    println!("  Processing time: {:.2?}", start.elapsed());
                }
                Err(Error::Cancelled) => {
                    // Incomplete output is the caller's to discard.
                    info!("Cancelled; partial output left at {}", output.display());
                    return Err(Error::Cancelled).context("Resampling cancelled");
                }
                Err(e) => return Err(e).context("Resampling failed"),
            }
        }
    }

    Ok(())
}
