//! Surgemap CLI - sea-level-rise impact estimation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use surgemap_algorithms::classify::{flood_mask, FloodRule};
use surgemap_algorithms::impact::{Evaluation, ImpactEngine, DEFAULT_PIXEL_AREA_KM2};
use surgemap_core::io::{read_rgb_png, write_mask_png, FileRasterLoader};
use surgemap_core::legend::Legend;
use surgemap_core::raster::Rgb;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "surgemap")]
#[command(author, version, about = "Sea-level-rise impact estimation", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a raster file
    Info {
        /// Input raster file
        input: PathBuf,
    },
    /// Estimate the marginal impact of a sea level over a baseline
    Impact {
        /// Population raster year
        #[arg(short, long)]
        year: i32,
        /// Target sea-level rise in metres
        #[arg(short, long)]
        level: f64,
        /// Baseline sea-level rise in metres
        #[arg(short, long, default_value = "0.0")]
        baseline: f64,
        /// Directory holding population rasters
        #[arg(long, default_value = "Populations")]
        population_dir: PathBuf,
        /// Directory holding flood rasters
        #[arg(long, default_value = "Resized")]
        flood_dir: PathBuf,
        /// Flood classification rule: strict, loose
        #[arg(short, long, default_value = "strict")]
        rule: FloodRule,
        /// Ground area of one pixel in km²
        #[arg(long, default_value_t = DEFAULT_PIXEL_AREA_KM2)]
        pixel_area: f64,
        /// Emit the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract a flood raster's inundation mask as a transparent PNG overlay
    Mask {
        /// Input flood raster
        input: PathBuf,
        /// Output overlay file
        output: PathBuf,
        /// Flood classification rule: strict, loose
        #[arg(short, long, default_value = "strict")]
        rule: FloodRule,
    },
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

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn print_evaluation(label: &str, eval: &Evaluation) {
    println!("  {}:", label);
    println!(
        "    Population: {} - {}",
        eval.impact.population_min, eval.impact.population_max
    );
    println!("    Area: {:.4} km²", eval.impact.area_km2);
    println!("    Flooded pixels: {}", eval.flooded_pixels);
    if eval.unmapped_pixels > 0 {
        println!("    Unmapped pixels: {}", eval.unmapped_pixels);
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let raster = read_rgb_png(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let (rows, cols) = raster.shape();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, raster.len());
            for rule in [FloodRule::StrictBand, FloodRule::Loose] {
                let mask = flood_mask(&raster, rule)?;
                let flooded = mask.count(true);
                println!(
                    "Flood pixels ({:?}): {} ({:.1}%)",
                    rule,
                    flooded,
                    100.0 * flooded as f64 / raster.len() as f64
                );
            }
        }

        // ── Impact ───────────────────────────────────────────────────
        Commands::Impact {
            year,
            level,
            baseline,
            population_dir,
            flood_dir,
            rule,
            pixel_area,
            json,
        } => {
            let engine = ImpactEngine::new(Legend::population_density(), rule, pixel_area)?;
            let loader = FileRasterLoader::new(&population_dir, &flood_dir);

            let pb = spinner("Computing marginal impact...");
            let start = Instant::now();
            let marginal = engine
                .marginal_impact(&loader, year, level, baseline)
                .with_context(|| {
                    format!("computing impact of {:.1}m over {:.1}m for {}", level, baseline, year)
                })?;
            pb.finish_and_clear();
            info!("Computed in {:.2?}", start.elapsed());

            let unmapped = marginal.target.unmapped_pixels + marginal.baseline.unmapped_pixels;
            if unmapped > 0 {
                warn!(
                    "{} flooded pixels had no legend band and were excluded from population sums",
                    unmapped
                );
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&marginal)?);
            } else {
                println!(
                    "Marginal impact of {:.1}m over {:.1}m (year {}):",
                    level, baseline, year
                );
                println!(
                    "  Affected population: {} - {}",
                    marginal.impact.population_min, marginal.impact.population_max
                );
                println!("  Affected area: {:.4} km²", marginal.impact.area_km2);
                print_evaluation("Target", &marginal.target);
                print_evaluation("Baseline", &marginal.baseline);
            }
        }

        // ── Mask ─────────────────────────────────────────────────────
        Commands::Mask {
            input,
            output,
            rule,
        } => {
            let raster = read_rgb_png(&input)
                .with_context(|| format!("reading {}", input.display()))?;

            let pb = spinner("Classifying flood extent...");
            let start = Instant::now();
            let mask = flood_mask(&raster, rule)?;
            pb.finish_and_clear();

            write_mask_png(&mask, Rgb::new(255, 0, 0), &output)
                .with_context(|| format!("writing {}", output.display()))?;
            info!(
                "Wrote {} ({} flood pixels) in {:.2?}",
                output.display(),
                mask.count(true),
                start.elapsed()
            );
        }
    }

    Ok(())
}
