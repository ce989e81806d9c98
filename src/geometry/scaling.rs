/// Bounding box in projected coordinates
#[derive(Debug, Clone)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from a set of points
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;

        for &(x, y) in points {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        Some(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Expand bounds to include another set of points
    pub fn expand(&mut self, points: &[(f64, f64)]) {
        for &(x, y) in points {
            self.min_x = self.min_x.min(x);
            self.max_x = self.max_x.max(x);
            self.min_y = self.min_y.min(y);
            self.max_y = self.max_y.max(y);
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Fits projected coordinates onto a square SVG canvas.
///
/// Uniform scale (the larger dimension fills the usable area), centred
/// both ways, with the y axis flipped because SVG y grows downward while
/// projected y grows northward.
#[derive(Debug, Clone)]
pub struct Scaler {
    /// Canvas pixels per projected unit
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    canvas_px: f64,
}

impl Scaler {
    pub fn from_bounds(bounds: &Bounds, canvas_px: f64) -> Self {
        Self::from_bounds_with_margin(bounds, canvas_px, 0.0)
    }

    /// Create a scaler with a margin on all four sides
    pub fn from_bounds_with_margin(bounds: &Bounds, canvas_px: f64, margin_px: f64) -> Self {
        let width = bounds.width();
        let height = bounds.height();

        let usable = canvas_px - 2.0 * margin_px;
        let max_dim = width.max(height);

        let scale = if max_dim > 0.0 { usable / max_dim } else { 1.0 };

        let scaled_width = width * scale;
        let scaled_height = height * scale;

        let offset_x = (canvas_px - scaled_width) / 2.0 - bounds.min_x * scale;
        let offset_y = (canvas_px - scaled_height) / 2.0 - bounds.min_y * scale;

        Self {
            scale,
            offset_x,
            offset_y,
            canvas_px,
        }
    }

    /// Scale a projected point to canvas pixels (y flipped)
    pub fn scale(&self, x: f64, y: f64) -> (f64, f64) {
        let px = x * self.scale + self.offset_x;
        let py = y * self.scale + self.offset_y;
        (px, self.canvas_px - py)
    }

    /// Get the scale factor (px per projected unit)
    pub fn scale_factor(&self) -> f64 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let points = vec![(0.0, 0.0), (2.0, 4.0), (1.0, 1.0)];
        let bounds = Bounds::from_points(&points).unwrap();

        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 2.0);
        assert_eq!(bounds.min_y, 0.0);
        assert_eq!(bounds.max_y, 4.0);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_bounds_expand() {
        let mut bounds = Bounds::from_points(&[(0.0, 0.0), (1.0, 1.0)]).unwrap();
        bounds.expand(&[(-2.0, 5.0)]);
        assert_eq!(bounds.min_x, -2.0);
        assert_eq!(bounds.max_y, 5.0);
    }

    #[test]
    fn test_scaler_fits_canvas() {
        let bounds = Bounds {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 10.0,
        };

        let scaler = Scaler::from_bounds(&bounds, 800.0);
        assert!((scaler.scale_factor() - 80.0).abs() < 1e-9);

        // Centre maps to the centre of the canvas.
        let (x, y) = scaler.scale(5.0, 5.0);
        assert!((x - 400.0).abs() < 1e-9);
        assert!((y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaler_flips_y() {
        let bounds = Bounds {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 10.0,
        };

        let scaler = Scaler::from_bounds(&bounds, 800.0);
        // Northernmost point lands at the top of the canvas.
        let (_, top) = scaler.scale(0.0, 10.0);
        let (_, bottom) = scaler.scale(0.0, 0.0);
        assert!(top < bottom);
        assert!((top - 0.0).abs() < 1e-9);
        assert!((bottom - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaler_margin() {
        let bounds = Bounds {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 10.0,
        };

        let scaler = Scaler::from_bounds_with_margin(&bounds, 800.0, 50.0);
        let (x, _) = scaler.scale(0.0, 0.0);
        assert!((x - 50.0).abs() < 1e-9);
        let (x, _) = scaler.scale(10.0, 0.0);
        assert!((x - 750.0).abs() < 1e-9);
    }
}
