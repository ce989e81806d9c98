use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::Stroke;
use crate::geometry::{Bounds, Projector, Scaler};
use crate::render::{DrawSurface, SurfaceError};

/// Degrees between sample points along graticule lines.
const GRATICULE_STEP: f64 = 2.0;
/// Parallels stop short of the poles, as printed maps usually do.
const GRATICULE_MAX_LAT: f64 = 80.0;

/// An SVG drawing surface backed by a map projection.
///
/// Incoming polylines are projected immediately and buffered; the canvas
/// is fitted to everything drawn and written out in one pass at the end,
/// so shapes drawn in any order share one scale.
pub struct SvgCanvas {
    projector: Projector,
    size_px: f64,
    margin_px: f64,
    background: Option<String>,
    polylines: Vec<(Vec<(f64, f64)>, Stroke)>,
}

impl SvgCanvas {
    pub fn new(projector: Projector, size_px: f64) -> Self {
        Self {
            projector,
            size_px,
            margin_px: 10.0,
            background: Some("white".to_string()),
            polylines: Vec::new(),
        }
    }

    pub fn with_margin(mut self, margin_px: f64) -> Self {
        self.margin_px = margin_px;
        self
    }

    pub fn with_background(mut self, color: Option<String>) -> Self {
        self.background = color;
        self
    }

    pub fn polyline_count(&self) -> usize {
        self.polylines.len()
    }

    /// Draw parallels and meridians every `spacing` degrees.
    ///
    /// Graticule lines are decoration, not shape data: where the
    /// projection cannot represent a sample point (the hidden hemisphere
    /// of an orthographic view), the line is split there rather than
    /// failing the whole drawing.
    pub fn draw_graticule(&mut self, spacing: f64) {
        // A zero or negative spacing would never advance the loops below.
        if spacing <= 0.0 {
            return;
        }

        let stroke = Stroke::new("#c8c8c8", 0.3);

        // Parallels.
        let mut lat = -GRATICULE_MAX_LAT;
        while lat <= GRATICULE_MAX_LAT {
            let mut samples = Vec::new();
            let mut lon = -180.0;
            while lon <= 180.0 {
                samples.push((lon, lat));
                lon += GRATICULE_STEP;
            }
            self.push_clipped(&samples, &stroke);
            lat += spacing;
        }

        // Meridians.
        let mut lon = -180.0;
        while lon < 180.0 {
            let mut samples = Vec::new();
            let mut lat = -GRATICULE_MAX_LAT;
            while lat <= GRATICULE_MAX_LAT {
                samples.push((lon, lat));
                lat += GRATICULE_STEP;
            }
            self.push_clipped(&samples, &stroke);
            lon += spacing;
        }
    }

    /// Project a sampled line, breaking it into visible runs at points the
    /// projection rejects.
    fn push_clipped(&mut self, samples: &[(f64, f64)], stroke: &Stroke) {
        let mut run: Vec<(f64, f64)> = Vec::new();
        for &(lon, lat) in samples {
            match self.projector.project(lon, lat) {
                Ok(p) => run.push(p),
                Err(_) => {
                    if run.len() >= 2 {
                        self.polylines.push((std::mem::take(&mut run), stroke.clone()));
                    }
                    run.clear();
                }
            }
        }
        if run.len() >= 2 {
            self.polylines.push((run, stroke.clone()));
        }
    }

    /// Fit everything drawn so far onto the canvas and write the SVG file.
    pub fn write_svg(&self, path: &Path) -> Result<(), SurfaceError> {
        let mut bounds: Option<Bounds> = None;
        for (points, _) in &self.polylines {
            match bounds.as_mut() {
                Some(b) => b.expand(points),
                None => bounds = Bounds::from_points(points),
            }
        }
        let bounds = bounds.ok_or(SurfaceError::NothingDrawn)?;
        let scaler = Scaler::from_bounds_with_margin(&bounds, self.size_px, self.margin_px);

        let file = File::create(path)?;
        let mut w = BufWriter::new(file);

        writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            w,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
            s = self.size_px
        )?;
        if let Some(ref bg) = self.background {
            writeln!(
                w,
                r#"<rect width="{s}" height="{s}" fill="{bg}"/>"#,
                s = self.size_px
            )?;
        }

        for (points, stroke) in &self.polylines {
            write!(
                w,
                r#"<polyline fill="none" stroke="{}" stroke-width="{}" points=""#,
                stroke.color, stroke.width
            )?;
            for (i, &(x, y)) in points.iter().enumerate() {
                let (px, py) = scaler.scale(x, y);
                if i > 0 {
                    write!(w, " ")?;
                }
                write!(w, "{:.2},{:.2}", px, py)?;
            }
            writeln!(w, r#""/>"#)?;
        }

        writeln!(w, "</svg>")?;
        w.flush()?;

        Ok(())
    }
}

impl DrawSurface for SvgCanvas {
    fn draw_polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) -> Result<(), SurfaceError> {
        // Project the whole ring before buffering any of it, so a
        // rejected point leaves no half-drawn ring behind.
        let mut projected = Vec::with_capacity(points.len());
        for &(lon, lat) in points {
            projected.push(self.projector.project(lon, lat)?);
        }
        self.polylines.push((projected, stroke.clone()));
        Ok(())
    }
}
