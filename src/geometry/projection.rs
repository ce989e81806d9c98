use thiserror::Error;

/// Mercator diverges towards the poles; reject latitudes past the usual
/// square-map cutoff instead of clamping them to something wrong.
const MERCATOR_MAX_LAT: f64 = 85.0511;

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("latitude {lat}° is beyond the Mercator cutoff (±{MERCATOR_MAX_LAT}°)")]
    LatitudeOutOfRange { lat: f64 },
    #[error("point ({lon}°, {lat}°) is beyond the orthographic horizon")]
    BeyondHorizon { lon: f64, lat: f64 },
}

/// Forward projection from (lon, lat) degrees to unitless planar
/// coordinates, scaled to the canvas afterwards.
///
/// Hand-rolled formulas instead of a full projection library; accuracy is
/// fine for outline comparison drawings. Orthographic shows one hemisphere
/// and fails for points beyond its horizon — the caller decides whether
/// that aborts the drawing.
#[derive(Debug, Clone)]
pub enum Projector {
    /// Cylindrical Mercator: x = λ, y = asinh(tan φ).
    Mercator,
    /// The globe as seen from far above (center_lat, center_lon).
    Orthographic { center_lat: f64, center_lon: f64 },
}

impl Projector {
    pub fn mercator() -> Self {
        Projector::Mercator
    }

    /// Orthographic projection centred at `(lat, lon)` degrees.
    pub fn orthographic(center: (f64, f64)) -> Self {
        let (lat, lon) = center;
        Projector::Orthographic {
            center_lat: lat,
            center_lon: lon,
        }
    }

    /// Project one point. Fails for points the projection cannot represent.
    pub fn project(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjectionError> {
        match *self {
            Projector::Mercator => {
                if lat.abs() > MERCATOR_MAX_LAT {
                    return Err(ProjectionError::LatitudeOutOfRange { lat });
                }
                let x = lon.to_radians();
                let y = lat.to_radians().tan().asinh();
                Ok((x, y))
            }
            Projector::Orthographic {
                center_lat,
                center_lon,
            } => {
                let phi = lat.to_radians();
                let phi0 = center_lat.to_radians();
                let d_lambda = (lon - center_lon).to_radians();

                // Cosine of the angular distance from the projection centre;
                // negative means the point is on the far side of the globe.
                let cos_c = phi0.sin() * phi.sin() + phi0.cos() * phi.cos() * d_lambda.cos();
                if cos_c < 0.0 {
                    return Err(ProjectionError::BeyondHorizon { lon, lat });
                }

                let x = phi.cos() * d_lambda.sin();
                let y = phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * d_lambda.cos();
                Ok((x, y))
            }
        }
    }
}
