use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

mod canvas;
mod config;
mod domain;
mod geometry;
mod render;
mod source;

use canvas::SvgCanvas;
use config::{FileConfig, ProjectionKind};
use domain::{Stroke, Transform};
use geometry::{Projector, simplify_shape};
use render::project_shape;
use source::load_shapes;

/// Overlay country outlines onto a map at arbitrary positions
///
/// Examples:
///   # Japan at its true location, Mercator
///   mapoverlay -i japan.geojson -o japan.svg
///
///   # Japan translated over Europe for size comparison
///   mapoverlay -i japan.geojson --lat-offset 13 --lon-offset -128 --graticule 10
///
///   # Argentina flipped into the northern hemisphere, orthographic view
///   mapoverlay -i argentina.geojson --mirror --projection orthographic \
///       --center-lat 40 --center-lon 10 -o flipped.svg
///
///   # Use a config file
///   mapoverlay --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "mapoverlay")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches mapoverlay.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input GeoJSON file with the outline(s) to draw
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output SVG file path (defaults to the input name with .svg)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Map projection: mercator or orthographic
    #[arg(short = 'p', long, value_enum)]
    projection: Option<ProjectionKind>,

    /// Latitude the orthographic view is centred on
    #[arg(long, allow_hyphen_values = true)]
    center_lat: Option<f64>,

    /// Longitude the orthographic view is centred on
    #[arg(long, allow_hyphen_values = true)]
    center_lon: Option<f64>,

    /// Canvas size in pixels (square output)
    #[arg(short = 's', long)]
    size: Option<f64>,

    /// Stroke color (any CSS color string)
    #[arg(long)]
    color: Option<String>,

    /// Stroke width in pixels
    #[arg(long)]
    line_width: Option<f64>,

    /// Canvas margin in pixels
    #[arg(long)]
    margin: Option<f64>,

    /// Background color, or "none" for transparent
    #[arg(long)]
    background: Option<String>,

    /// Degrees to add to every latitude before drawing
    #[arg(long, allow_hyphen_values = true)]
    lat_offset: Option<f64>,

    /// Degrees to add to every longitude before drawing
    #[arg(long, allow_hyphen_values = true)]
    lon_offset: Option<f64>,

    /// Negate latitudes (flip the shape across the equator) before offsetting
    #[arg(long)]
    mirror: bool,

    /// Draw parallels and meridians every N degrees
    #[arg(long)]
    graticule: Option<f64>,

    /// Simplification tolerance in degrees (0 = off)
    #[arg(long)]
    simplify: Option<f64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };
    let cfg = file_config.unwrap_or_default();

    let input = args
        .input
        .clone()
        .or(cfg.input)
        .context("Must provide an input GeoJSON file via --input or a config file")?;
    let output = args
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| input.with_extension("svg"));
    let projection = args.projection.unwrap_or(cfg.projection);
    let center_lat = args.center_lat.unwrap_or(cfg.center_lat);
    let center_lon = args.center_lon.unwrap_or(cfg.center_lon);
    let size = args.size.unwrap_or(cfg.size);
    let color = args.color.clone().unwrap_or(cfg.color);
    let line_width = args.line_width.unwrap_or(cfg.line_width);
    let margin = args.margin.unwrap_or(cfg.margin);
    let background = args.background.clone().unwrap_or(cfg.background);
    let background = if background == "none" {
        None
    } else {
        Some(background)
    };
    let lat_offset = args.lat_offset.unwrap_or(cfg.lat_offset);
    let lon_offset = args.lon_offset.unwrap_or(cfg.lon_offset);
    let mirror = args.mirror || cfg.mirror;
    let graticule = args.graticule.or(cfg.graticule);
    let simplify = args.simplify.unwrap_or(cfg.simplify);
    let verbose = args.verbose || cfg.verbose;

    if let Some(spacing) = graticule
        && spacing <= 0.0
    {
        bail!("Graticule spacing must be positive, got {}", spacing);
    }

    println!("mapoverlay - Country Outline Overlay");
    println!("====================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Input: {}", input.display());
        println!("  Output: {}", output.display());
        println!("  Projection: {:?}", projection);
        if projection == ProjectionKind::Orthographic {
            println!("  Centre: ({:.4}, {:.4})", center_lat, center_lon);
        }
        println!("  Canvas: {}px ({}px margin)", size, margin);
        println!("  Stroke: {} @ {}px", color, line_width);
        println!(
            "  Offsets: lat {:+.2}°, lon {:+.2}°{}",
            lat_offset,
            lon_offset,
            if mirror { " (mirrored)" } else { "" }
        );
        if let Some(spacing) = graticule {
            println!("  Graticule: every {}°", spacing);
        }
        println!("  Simplify tolerance: {}°", simplify);
        println!();
    }

    let spinner = create_spinner("Loading shapes...");
    let start = Instant::now();
    let shapes = load_shapes(&input)
        .with_context(|| format!("Failed to load shapes from {}", input.display()))?;
    let total_points: usize = shapes.iter().map(|s| s.shape.points.len()).sum();
    spinner.finish_with_message(format!(
        "Loaded {} shapes ({} points) [{:.1}s]",
        shapes.len(),
        total_points,
        start.elapsed().as_secs_f32()
    ));

    let shapes = if simplify > 0.0 {
        let spinner = create_spinner("Simplifying outlines...");
        let start = Instant::now();
        let mut simplified = Vec::with_capacity(shapes.len());
        for mut loaded in shapes {
            loaded.shape =
                simplify_shape(&loaded.shape, simplify).context("Failed to simplify shape")?;
            simplified.push(loaded);
        }
        let remaining: usize = simplified.iter().map(|s| s.shape.points.len()).sum();
        spinner.finish_with_message(format!(
            "Simplified to {} points [{:.1}s]",
            remaining,
            start.elapsed().as_secs_f32()
        ));
        simplified
    } else {
        shapes
    };

    let projector = match projection {
        ProjectionKind::Mercator => Projector::mercator(),
        ProjectionKind::Orthographic => Projector::orthographic((center_lat, center_lon)),
    };
    let mut canvas = SvgCanvas::new(projector, size)
        .with_margin(margin)
        .with_background(background);

    if let Some(spacing) = graticule {
        canvas.draw_graticule(spacing);
    }

    let stroke = Stroke::new(color, line_width);
    let transform = Transform {
        lat_offset,
        lon_offset,
        mirror_latitude: mirror,
    };

    let spinner = create_spinner("Rendering shapes...");
    let start = Instant::now();
    let total_rings: usize = shapes.iter().map(|s| s.shape.part_count()).sum();
    for loaded in &shapes {
        project_shape(&loaded.shape, &stroke, &transform, &mut canvas).with_context(|| {
            match &loaded.name {
                Some(name) => format!("Failed to render {}", name),
                None => "Failed to render shape".to_string(),
            }
        })?;
    }
    spinner.finish_with_message(format!(
        "Rendered {} rings from {} shapes [{:.1}s]",
        total_rings,
        shapes.len(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Writing SVG file...");
    let start = Instant::now();
    canvas
        .write_svg(&output)
        .with_context(|| format!("Failed to write SVG file: {}", output.display()))?;
    spinner.finish_with_message(format!(
        "Wrote {} polylines [{:.1}s]",
        canvas.polyline_count(),
        start.elapsed().as_secs_f32()
    ));

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output.display());

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
