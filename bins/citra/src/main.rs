//! citra: brightness/contrast, threshold, histogram analysis and edge
//! detection from the command line.

mod backend;
mod config;

use anyhow::{Context, Result};
use backend::{BackendKind, EdgeBackend};
use citra_cli::output::{self, Status};
use citra_cli::progress;
use citra_image::{codec, EdgeMethod, EdgeSource, PixelBuffer};
use citra_telemetry::{TelemetryConfig, Timer};
use clap::{Parser, Subcommand};
use config::Config;
use owo_colors::{OwoColorize, Stream};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(name = "citra")]
#[command(about = "Image adjustment, histogram analysis and edge detection")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (default: ./citra.toml, ./.citra.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert to luma grayscale
    Grayscale {
        /// Input image
        input: PathBuf,
        /// Output image; format follows the extension
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Adjust brightness then contrast
    Tone {
        /// Input image
        input: PathBuf,
        /// Output image; format follows the extension
        #[arg(short, long)]
        output: PathBuf,
        /// Added to each colour channel, nominally -100..=100
        #[arg(long, allow_negative_numbers = true)]
        brightness: Option<i32>,
        /// Contrast stretch around 128, nominally -100..=100
        #[arg(long, allow_negative_numbers = true)]
        contrast: Option<i32>,
    },
    /// Binarize on luma: above the level becomes white
    Threshold {
        /// Input image
        input: PathBuf,
        /// Output image; format follows the extension
        #[arg(short, long)]
        output: PathBuf,
        /// Luma level, 0..=255
        #[arg(long, allow_negative_numbers = true)]
        level: Option<i32>,
    },
    /// Show the sampled luma histogram and an exposure verdict
    Histogram {
        /// Input image
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Detect edges locally or through the edge service
    Edges {
        /// Input image
        input: PathBuf,
        /// Output image; format follows the extension
        #[arg(short, long)]
        output: PathBuf,
        /// sobel, prewitt, roberts, laplace or frei-chen
        #[arg(short, long)]
        method: Option<EdgeMethod>,
        /// Where detection runs
        #[arg(long, value_enum)]
        backend: Option<BackendKind>,
        /// Edge service base URL, used with `--backend remote`
        #[arg(long)]
        url: Option<String>,
        /// Binarize the edge map at this luma level
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<i32>,
    },
    /// List edge detection methods
    Methods,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!(
                "{} {:#}",
                "Error:".if_supports_color(Stream::Stderr, |text| text.red()),
                err
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    citra_telemetry::init_with_config(TelemetryConfig::with_level(level))?;

    match cli.command {
        Commands::Grayscale { input, output } => {
            let (_, pixels) = load(&input)?;
            store(&citra_image::grayscale(&pixels), &output)
        }

        Commands::Tone {
            input,
            output,
            brightness,
            contrast,
        } => {
            let brightness = brightness.unwrap_or(config.defaults.brightness);
            let contrast = contrast.unwrap_or(config.defaults.contrast);
            let range = citra_image::TONE_RANGE;
            if !range.contains(&brightness) || !range.contains(&contrast) {
                Status::warning("brightness/contrast outside -100..=100; channels will clamp");
            }
            let (_, pixels) = load(&input)?;
            let adjusted = citra_image::tone_adjust(&pixels, brightness, contrast)?;
            store(&adjusted, &output)
        }

        Commands::Threshold { input, output, level } => {
            let level = level.unwrap_or(config.defaults.threshold);
            let (_, pixels) = load(&input)?;
            store(&citra_image::threshold(&pixels, level), &output)
        }

        Commands::Histogram { input, json } => {
            let (_, pixels) = load(&input)?;
            let buckets = citra_image::histogram(&pixels);
            let analysis = citra_image::analyze_histogram(&buckets);

            if json {
                let report = serde_json::json!({
                    "buckets": buckets,
                    "analysis": analysis,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                Status::header(&format!(
                    "{} {}",
                    input.display(),
                    output::format_dimensions(pixels.width(), pixels.height())
                ));
                output::print_histogram(&buckets);
                output::print_analysis(&analysis);
            }
            Ok(())
        }

        Commands::Edges {
            input,
            output,
            method,
            backend,
            url,
            threshold,
        } => {
            let method = method.unwrap_or(config.edges.method);
            let kind = backend.unwrap_or(config.edges.backend);
            let client = config.client_config(url.as_deref())?;
            let backend = EdgeBackend::new(kind, client)?;

            let (encoded, pixels) = load(&input)?;
            let source = EdgeSource::new(&pixels).with_encoded(&encoded);
            let edges = detect(&backend, source, method)?;
            let edges = match threshold {
                Some(level) => citra_image::threshold(&edges, level),
                None => edges,
            };
            store(&edges, &output)
        }

        Commands::Methods => {
            for method in EdgeMethod::ALL {
                println!("{:<10} {}", method.as_str().bold(), method.description());
            }
            Ok(())
        }
    }
}

fn detect(
    backend: &EdgeBackend,
    source: EdgeSource<'_>,
    method: EdgeMethod,
) -> Result<PixelBuffer> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    if !backend.is_remote() {
        return runtime.block_on(backend.detect(source, method));
    }

    let spinner = progress::spinner(&format!("Detecting edges ({method}) via edge service..."));
    let timer = Timer::start("remote_edges");
    let result = runtime.block_on(backend.detect(source, method));
    let elapsed = timer.stop();
    match &result {
        Ok(_) => progress::finish_success(
            &spinner,
            &format!("Edge map received in {}ms", elapsed.as_millis()),
        ),
        Err(_) => progress::finish_error(&spinner, "Edge service request failed"),
    }
    result
}

/// Read a file, keeping the original bytes alongside the decoded pixels.
fn load(path: &Path) -> Result<(Vec<u8>, PixelBuffer)> {
    let encoded =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let pixels = codec::decode(&encoded)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    debug!(
        path = %path.display(),
        width = pixels.width(),
        height = pixels.height(),
        "Loaded image"
    );
    Ok((encoded, pixels))
}

fn store(pixels: &PixelBuffer, path: &Path) -> Result<()> {
    codec::save(pixels, path).with_context(|| format!("Failed to write {}", path.display()))?;
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    Status::success(&format!(
        "Wrote {} ({}, {})",
        path.display(),
        output::format_dimensions(pixels.width(), pixels.height()),
        output::format_size(size)
    ));
    Ok(())
}
