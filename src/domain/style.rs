/// Stroke style forwarded verbatim to the drawing surface.
///
/// The color is whatever the surface accepts (for the SVG canvas, any CSS
/// color string); no validation happens here.
#[derive(Debug, Clone)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new("black", 0.5)
    }
}

/// Coordinate transform applied to every ring of a shape before drawing.
///
/// Mirroring negates latitude first, then the offsets are added. Offsets
/// relocate a shape's rendered position (e.g. Japan drawn over Europe);
/// mirroring flips it across the equator (e.g. Argentina drawn against a
/// northern-hemisphere map).
#[derive(Debug, Clone, Copy, Default)]
pub struct Transform {
    /// Degrees added to every (possibly mirrored) latitude.
    pub lat_offset: f64,
    /// Degrees added to every longitude.
    pub lon_offset: f64,
    /// Negate latitudes before offsetting.
    pub mirror_latitude: bool,
}

impl Transform {
    pub fn with_lat_offset(mut self, degrees: f64) -> Self {
        self.lat_offset = degrees;
        self
    }

    pub fn with_lon_offset(mut self, degrees: f64) -> Self {
        self.lon_offset = degrees;
        self
    }

    pub fn mirrored(mut self) -> Self {
        self.mirror_latitude = true;
        self
    }

    /// Apply mirror then offsets to one (lon, lat) point.
    pub fn apply(&self, point: (f64, f64)) -> (f64, f64) {
        let (lon, lat) = point;
        let lat = if self.mirror_latitude { -lat } else { lat };
        (lon + self.lon_offset, lat + self.lat_offset)
    }
}
