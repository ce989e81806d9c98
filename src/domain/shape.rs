use thiserror::Error;

/// Errors raised when a shape's point and part tables are inconsistent.
///
/// These are detected up front, before any drawing happens, so a malformed
/// shape never renders partially.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("shape has no points")]
    EmptyPoints,
    #[error("shape has no part-start indices")]
    EmptyParts,
    #[error("first part-start index must be 0, got {0}")]
    FirstPartNotZero(usize),
    #[error("part-start indices must be strictly increasing: {previous} followed by {current}")]
    PartsNotIncreasing { previous: usize, current: usize },
    #[error("part-start index {index} out of bounds for {point_count} points")]
    PartOutOfBounds { index: usize, point_count: usize },
}

/// A polygon outline, possibly made of several disjoint closed rings
/// (islands, enclaves, disjoint administrative regions).
///
/// Rings are encoded the way legacy geographic vector formats encode them:
/// one flat point list plus the index at which each ring starts. Ring `i`
/// spans `[parts[i], parts[i + 1])`; the last ring runs to the end of the
/// point list.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Points as (lon, lat) pairs in degrees.
    pub points: Vec<(f64, f64)>,
    /// Start index of each ring within `points`. Always begins with 0.
    pub parts: Vec<usize>,
}

impl Shape {
    pub fn new(points: Vec<(f64, f64)>, parts: Vec<usize>) -> Self {
        Self { points, parts }
    }

    /// A shape consisting of one simple ring.
    pub fn single(points: Vec<(f64, f64)>) -> Self {
        Self::new(points, vec![0])
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Check the point/part invariants: non-empty points, part starts
    /// strictly increasing, first part at 0, all starts in bounds.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.points.is_empty() {
            return Err(ShapeError::EmptyPoints);
        }
        if self.parts.is_empty() {
            return Err(ShapeError::EmptyParts);
        }
        if self.parts[0] != 0 {
            return Err(ShapeError::FirstPartNotZero(self.parts[0]));
        }
        for pair in self.parts.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ShapeError::PartsNotIncreasing {
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }
        for &start in &self.parts {
            if start >= self.points.len() {
                return Err(ShapeError::PartOutOfBounds {
                    index: start,
                    point_count: self.points.len(),
                });
            }
        }
        Ok(())
    }

    /// Iterate the rings as contiguous point slices, in part order.
    ///
    /// Only call on a shape that passed [`validate`](Self::validate);
    /// out-of-bounds part indices panic here.
    pub fn rings(&self) -> impl Iterator<Item = &[(f64, f64)]> + '_ {
        let last = self.parts.len() - 1;
        self.parts.iter().enumerate().map(move |(i, &start)| {
            let end = if i == last {
                self.points.len()
            } else {
                self.parts[i + 1]
            };
            &self.points[start..end]
        })
    }
}
