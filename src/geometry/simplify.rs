use geo::{LineString, Simplify};

use crate::domain::{Shape, ShapeError};

/// Simplify one ring with Ramer-Douglas-Peucker, epsilon in degrees.
/// Rings too small to simplify safely come back unchanged.
fn simplify_ring(points: &[(f64, f64)], epsilon: f64) -> Vec<(f64, f64)> {
    if points.len() < 5 {
        return points.to_vec();
    }

    let line: LineString<f64> = points
        .iter()
        .map(|&(lon, lat)| geo::coord! { x: lon, y: lat })
        .collect();

    let simplified = line.simplify(&epsilon);

    if simplified.0.len() < 4 {
        return points.to_vec();
    }

    simplified.0.into_iter().map(|c| (c.x, c.y)).collect()
}

/// Simplify every ring of a shape independently, rebuilding the flat
/// point/part tables so the part structure survives.
///
/// Full-resolution country outlines run to tens of thousands of points;
/// decimating them first keeps the SVG output sane.
pub fn simplify_shape(shape: &Shape, epsilon: f64) -> Result<Shape, ShapeError> {
    shape.validate()?;

    let mut points = Vec::with_capacity(shape.points.len());
    let mut parts = Vec::with_capacity(shape.parts.len());

    for ring in shape.rings() {
        parts.push(points.len());
        points.extend(simplify_ring(ring, epsilon));
    }

    Ok(Shape::new(points, parts))
}
