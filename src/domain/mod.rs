pub mod shape;
pub mod style;

pub use shape::{Shape, ShapeError};
pub use style::{Stroke, Transform};
