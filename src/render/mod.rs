use std::io;

use thiserror::Error;

use crate::domain::{Shape, ShapeError, Stroke, Transform};
use crate::geometry::ProjectionError;

/// Failure inside a drawing surface.
///
/// Not recovered here — whether to skip the shape, abort, or log and
/// continue is the caller's policy, not the rendering primitive's.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    #[error("failed to write drawing output")]
    Io(#[from] io::Error),
    #[error("nothing has been drawn")]
    NothingDrawn,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("malformed shape: {0}")]
    Shape(#[from] ShapeError),
    #[error("draw surface rejected a ring: {0}")]
    Surface(#[from] SurfaceError),
}

/// A projected map canvas that can draw one styled polyline at a time.
pub trait DrawSurface {
    /// Draw a polyline through the given (lon, lat) points.
    fn draw_polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) -> Result<(), SurfaceError>;
}

/// Draw every ring of a shape onto a surface with one shared stroke.
///
/// The shape is validated first, so a malformed shape issues zero draw
/// calls. Each ring is then extracted by the part table, mirrored and
/// offset per `transform`, and forwarded independently to the surface in
/// part order — exactly one `draw_polyline` call per part. Surface
/// failures propagate unchanged.
pub fn project_shape(
    shape: &Shape,
    stroke: &Stroke,
    transform: &Transform,
    surface: &mut dyn DrawSurface,
) -> Result<(), RenderError> {
    shape.validate()?;

    for ring in shape.rings() {
        let points: Vec<(f64, f64)> = ring.iter().map(|&p| transform.apply(p)).collect();
        surface.draw_polyline(&points, stroke)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every draw call instead of drawing anything.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<(Vec<(f64, f64)>, Stroke)>,
        fail_after: Option<usize>,
    }

    impl DrawSurface for RecordingSurface {
        fn draw_polyline(
            &mut self,
            points: &[(f64, f64)],
            stroke: &Stroke,
        ) -> Result<(), SurfaceError> {
            if let Some(limit) = self.fail_after
                && self.calls.len() >= limit
            {
                return Err(SurfaceError::Projection(ProjectionError::BeyondHorizon {
                    lon: points[0].0,
                    lat: points[0].1,
                }));
            }
            self.calls.push((points.to_vec(), stroke.clone()));
            Ok(())
        }
    }

    fn two_part_shape() -> Shape {
        Shape::new(
            vec![
                (0.0, 0.0),
                (1.0, 0.0),
                (1.0, 1.0),
                (0.0, 0.0),
                (10.0, 10.0),
                (11.0, 10.0),
                (10.0, 11.0),
                (10.0, 10.0),
            ],
            vec![0, 4],
        )
    }

    #[test]
    fn test_single_part_one_call() {
        let shape = Shape::single(vec![(138.0, 37.0), (139.0, 37.5), (138.5, 38.0)]);
        let mut surface = RecordingSurface::default();

        project_shape(
            &shape,
            &Stroke::default(),
            &Transform::default(),
            &mut surface,
        )
        .unwrap();

        assert_eq!(surface.calls.len(), 1);
        assert_eq!(surface.calls[0].0, shape.points);
    }

    #[test]
    fn test_one_call_per_part_no_points_lost() {
        let shape = two_part_shape();
        let mut surface = RecordingSurface::default();

        project_shape(
            &shape,
            &Stroke::default(),
            &Transform::default(),
            &mut surface,
        )
        .unwrap();

        assert_eq!(surface.calls.len(), 2);
        let total: usize = surface.calls.iter().map(|(pts, _)| pts.len()).sum();
        assert_eq!(total, shape.points.len());
        assert_eq!(
            surface.calls[0].0,
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]
        );
        assert_eq!(
            surface.calls[1].0,
            vec![(10.0, 10.0), (11.0, 10.0), (10.0, 11.0), (10.0, 10.0)]
        );
    }

    #[test]
    fn test_mirror_and_lon_offset() {
        let shape = two_part_shape();
        let transform = Transform::default().with_lon_offset(5.0).mirrored();
        let mut surface = RecordingSurface::default();

        project_shape(&shape, &Stroke::default(), &transform, &mut surface).unwrap();

        assert_eq!(
            surface.calls[0].0,
            vec![(5.0, 0.0), (6.0, 0.0), (6.0, -1.0), (5.0, 0.0)]
        );
    }

    #[test]
    fn test_offsets_match_per_point_addition() {
        let shape = two_part_shape();
        let transform = Transform::default().with_lat_offset(13.0).with_lon_offset(-128.0);
        let mut surface = RecordingSurface::default();

        project_shape(&shape, &Stroke::default(), &transform, &mut surface).unwrap();

        for ((pts, _), ring) in surface.calls.iter().zip(shape.rings()) {
            for (&(lon, lat), &(orig_lon, orig_lat)) in pts.iter().zip(ring) {
                assert_eq!(lon, orig_lon - 128.0);
                assert_eq!(lat, orig_lat + 13.0);
            }
        }
    }

    #[test]
    fn test_mirror_twice_restores_latitudes() {
        let shape = Shape::single(vec![(-67.0, -40.0), (-66.0, -41.0), (-67.5, -42.0)]);
        let mirrored = Transform::default().mirrored();
        let mut surface = RecordingSurface::default();

        project_shape(&shape, &Stroke::default(), &mirrored, &mut surface).unwrap();

        let restored: Vec<(f64, f64)> = surface.calls[0]
            .0
            .iter()
            .map(|&(lon, lat)| (lon, -lat))
            .collect();
        assert_eq!(restored, shape.points);
    }

    #[test]
    fn test_empty_shape_zero_calls() {
        let shape = Shape::new(vec![], vec![0]);
        let mut surface = RecordingSurface::default();

        let err = project_shape(
            &shape,
            &Stroke::default(),
            &Transform::default(),
            &mut surface,
        )
        .unwrap_err();

        assert!(matches!(err, RenderError::Shape(ShapeError::EmptyPoints)));
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_bad_part_table_zero_calls() {
        let shape = Shape::new((0..8).map(|i| (i as f64, 0.0)).collect(), vec![0, 5, 3]);
        let mut surface = RecordingSurface::default();

        let err = project_shape(
            &shape,
            &Stroke::default(),
            &Transform::default(),
            &mut surface,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            RenderError::Shape(ShapeError::PartsNotIncreasing { .. })
        ));
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_surface_failure_propagates() {
        let shape = two_part_shape();
        let mut surface = RecordingSurface {
            fail_after: Some(1),
            ..Default::default()
        };

        let err = project_shape(
            &shape,
            &Stroke::default(),
            &Transform::default(),
            &mut surface,
        )
        .unwrap_err();

        assert!(matches!(err, RenderError::Surface(_)));
        // The first ring was already forwarded before the surface failed.
        assert_eq!(surface.calls.len(), 1);
    }

    #[test]
    fn test_stroke_passed_through() {
        let shape = two_part_shape();
        let stroke = Stroke::new("gold", 2.0);
        let mut surface = RecordingSurface::default();

        project_shape(&shape, &stroke, &Transform::default(), &mut surface).unwrap();

        for (_, s) in &surface.calls {
            assert_eq!(s.color, "gold");
            assert_eq!(s.width, 2.0);
        }
    }
}
