use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use raster_core::logging::{LogCategory, LogConfig, LogLevel};
use raster_core::types::{BufferPoint, NormalizedVertex, PixelList};
use raster_core::{RasterConfig, Rasterizer};
use std::path::PathBuf;

mod grid;

use grid::{CoverageGrid, Report};

#[derive(Parser)]
#[command(name = "raster", about = "Rasterize a line or triangle and print its coverage")]
struct Args {
    /// Canvas width in pixels
    #[arg(long, default_value_t = 32)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 16)]
    height: u32,

    /// JSON raster config (bounds, duplicates, ndc_edge, sample_point)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Ascii)]
    format: Format,

    /// Include per-pixel vertex weights (triangles only)
    #[arg(long, default_value_t = false)]
    weights: bool,

    /// Core log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "off")]
    log_level: String,

    /// Restrict the core log level to one category (mapping, line, triangle, contribution, config)
    #[arg(long)]
    log_category: Option<String>,

    /// Write core logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    shape: Shape,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Ascii,
    Json,
}

#[derive(Subcommand)]
enum Shape {
    /// x1 y1 x2 y2
    Line {
        #[arg(num_args = 4, allow_negative_numbers = true, required = true)]
        coords: Vec<f32>,
        /// Coordinates are normalized device coordinates in [-1, 1]
        #[arg(long, default_value_t = false)]
        ndc: bool,
        /// Omit the end point
        #[arg(long, default_value_t = false)]
        tailless: bool,
    },
    /// x1 y1 x2 y2 x3 y3
    Triangle {
        #[arg(num_args = 6, allow_negative_numbers = true, required = true)]
        coords: Vec<f32>,
        /// Coordinates are normalized device coordinates in [-1, 1]
        #[arg(long, default_value_t = false)]
        ndc: bool,
    },
}

fn configure_core_logging(args: &Args) -> Result<()> {
    let level = LogLevel::from_str(&args.log_level)
        .with_context(|| format!("Unknown log level: {}", args.log_level))?;
    let config = LogConfig::global();

    match args.log_category.as_deref() {
        Some(name) => {
            let category = LogCategory::from_str(name)
                .with_context(|| format!("Unknown log category: {}", name))?;
            config.set_level(category, level);
        }
        None => config.set_global_level(level),
    }

    if let Some(path) = &args.log_file {
        config
            .set_log_file(path.clone())
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
    }
    Ok(())
}

/// Resolve CLI coordinates into buffer points, mapping through NDC when asked.
fn to_points(raster: &Rasterizer, coords: &[f32], ndc: bool) -> Result<Vec<BufferPoint>> {
    coords
        .chunks(2)
        .map(|xy| {
            if ndc {
                return Ok(raster
                    .mapper()
                    .to_buffer_point(NormalizedVertex::new(xy[0], xy[1])));
            }
            if xy.iter().any(|v| v.fract() != 0.0) {
                bail!("Buffer coordinates must be integers (use --ndc for normalized input)");
            }
            Ok(BufferPoint::new(xy[0] as i32, xy[1] as i32))
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    configure_core_logging(&args)?;

    let config = match &args.config {
        Some(path) => RasterConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RasterConfig::default(),
    };
    log::debug!("Raster config: {:?}", config);

    let raster = Rasterizer::with_config(args.width, args.height, config)?;
    if grid::grid_cells(args.width, args.height).is_none() {
        bail!(
            "Canvas {}x{} exceeds the {} cell output limit",
            args.width,
            args.height,
            grid::MAX_GRID_CELLS
        );
    }

    let (pixels, weights): (PixelList, _) = match &args.shape {
        Shape::Line {
            coords,
            ndc,
            tailless,
        } => {
            let p = to_points(&raster, coords, *ndc)?;
            if args.weights {
                log::warn!("--weights only applies to triangles, ignoring");
            }
            (raster.raster_line(p[0].x, p[0].y, p[1].x, p[1].y, *tailless), None)
        }
        Shape::Triangle { coords, ndc } => {
            let p = to_points(&raster, coords, *ndc)?;
            let pixels = raster.raster_triangle(p[0].x, p[0].y, p[1].x, p[1].y, p[2].x, p[2].y);
            let weights = args
                .weights
                .then(|| raster.vertex_contributions(p[0], p[1], p[2], &pixels));
            (pixels, weights)
        }
    };
    log::info!("{} pixel(s) covered", pixels.len());

    let grid = CoverageGrid::from_pixels(raster.width(), raster.height(), &pixels)
        .context("Canvas too large for the coverage grid")?;
    match args.format {
        Format::Ascii => {
            print!("{}", grid.to_ascii());
            if grid.off_canvas() > 0 {
                println!("{} pixel(s) outside the canvas", grid.off_canvas());
            }
            if let Some(weights) = &weights {
                for (p, w) in pixels.iter().zip(weights) {
                    println!("({}, {}) {:.4} {:.4} {:.4}", p.x, p.y, w.w1, w.w2, w.w3);
                }
            }
        }
        Format::Json => {
            let report = Report {
                width: raster.width(),
                height: raster.height(),
                pixels: &pixels,
                off_canvas: grid.off_canvas(),
                weights: weights.as_deref(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
