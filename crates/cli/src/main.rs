//! AgriVis CLI - spectral index visualization for aerial imagery

mod config;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use agrivis_algorithms::imagery::{Catalog, IndexDefinition, IndexRegistry};
use agrivis_algorithms::pipeline::{run, IndexRequest, IndexVisualization};
use agrivis_colormap::{ColorScheme, RenderOptions};
use agrivis_core::io::read_raster;
use agrivis_core::raster::MultiBandRaster;
use agrivis_core::SensorLayout;

use config::Config;
use output::{persist, Report};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "agrivis")]
#[command(author, version, about = "Spectral index visualization for aerial imagery", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the indices of a catalog
    Indices {
        /// Catalog: extended or classic
        #[arg(short, long, default_value = "extended")]
        catalog: Catalog,
        /// Only show indices offered for this layout (RGB, RGN, NGB)
        #[arg(short, long)]
        layout: Option<SensorLayout>,
    },
    /// List the available colormaps
    Colormaps,
    /// Compute an index and save it as a false-color image with legend
    Compute {
        /// Input image (PNG, JPEG or TIFF, three channels)
        input: PathBuf,
        /// Index id, as shown by `agrivis indices`
        #[arg(short, long)]
        index: String,
        /// Channel layout of the input: RGB, RGN or NGB
        #[arg(short, long)]
        layout: SensorLayout,
        /// Colormap name or key; unknown names use the index default
        #[arg(short = 'm', long)]
        colormap: Option<String>,
        /// Catalog: extended or classic
        #[arg(short, long, default_value = "extended")]
        catalog: Catalog,
        /// Directory for result images [default: static/results]
        #[arg(short, long)]
        result_dir: Option<PathBuf>,
        /// Output resolution in pixels per inch
        #[arg(long, default_value = "600")]
        dpi: u32,
        /// Number of legend ticks (raised to the next odd number)
        #[arg(long, default_value = "5")]
        ticks: usize,
        /// Render an all-zero result instead of rejecting it
        #[arg(long)]
        allow_flat: bool,
        /// Print the result summary as JSON
        #[arg(long)]
        json: bool,
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

fn spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid progress template")?,
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}

fn read_input(path: &Path) -> Result<MultiBandRaster<f64>> {
    let pb = spinner("Reading image...")?;
    let raster: MultiBandRaster<f64> = read_raster(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    pb.finish_and_clear();
    info!(
        "Input: {} x {}, {} channels",
        raster.cols(),
        raster.rows(),
        raster.channels()
    );
    Ok(raster)
}

fn done(vis: &IndexVisualization, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", vis.label(), path.display());
    println!("  Colormap: {}", vis.colormap);
    println!("  Range: ±{}", vis.abs_max());
    println!("  Processing time: {:.2?}", elapsed);
}

/// Why an index cannot be computed, if it never can be.
fn unavailable_note(def: &IndexDefinition, layout: Option<SensorLayout>) -> Option<String> {
    match layout {
        Some(l) => def
            .missing_band(l)
            .map(|band| format!("unavailable: {} has no {} band", l.name(), band.short_name())),
        None if !def.is_satisfiable() => Some("unavailable: no supported layout has every band".into()),
        None => None,
    }
}

fn list_indices(catalog: Catalog, layout: Option<SensorLayout>) {
    let registry = IndexRegistry::new(catalog);
    println!("{} catalog, {} indices", registry.catalog(), registry.len());
    println!("{:>4}  {:<10} {:<12} {:<14} Default colormap", "Id", "Label", "Bands", "Layouts");
    let entries: Vec<_> = match layout {
        Some(l) => registry.for_layout(l).collect(),
        None => registry.iter().collect(),
    };
    for def in entries {
        let bands: Vec<&str> = def.required_bands.iter().map(|b| b.short_name()).collect();
        let layouts: Vec<&str> = def.supported_layouts.iter().map(|l| l.name()).collect();
        let note = unavailable_note(def, layout)
            .map(|n| format!("  [{}]", n))
            .unwrap_or_default();
        println!(
            "{:>4}  {:<10} {:<12} {:<14} {}{}",
            def.id,
            def.label,
            bands.join(", "),
            layouts.join(", "),
            def.default_colormap,
            note
        );
    }
}

fn list_colormaps() {
    for scheme in ColorScheme::ALL {
        println!("{:<10} {}", scheme.key(), scheme.name());
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Indices { catalog, layout } => list_indices(catalog, layout),

        Commands::Colormaps => list_colormaps(),

        Commands::Compute {
            input,
            index,
            layout,
            colormap,
            catalog,
            result_dir,
            dpi,
            ticks,
            allow_flat,
            json,
        } => {
            let defaults = Config::default();
            let config = Config {
                result_dir: result_dir.unwrap_or(defaults.result_dir),
                catalog,
                render: RenderOptions {
                    dpi,
                    tick_count: ticks,
                    allow_flat_result: allow_flat,
                    ..defaults.render
                },
            };
            let registry = IndexRegistry::new(config.catalog);
            let raw = read_input(&input)?;

            let request = IndexRequest {
                index_id: &index,
                layout,
                colormap: colormap.as_deref(),
            };
            let start = Instant::now();
            let pb = spinner("Computing index...")?;
            let vis = run(&registry, &raw, &request, &config.render);
            pb.finish_and_clear();
            let vis = vis.with_context(|| format!("Failed to compute index {}", index))?;
            let elapsed = start.elapsed();

            let path = persist(&config, &input, &vis)?;
            if json {
                let report = Report::new(&path, &vis);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                done(&vis, &path, elapsed);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let client = err
                .chain()
                .find_map(|e| e.downcast_ref::<agrivis_core::Error>())
                .is_some_and(|e| e.is_client_error());
            if client {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
