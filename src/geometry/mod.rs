pub mod projection;
pub mod scaling;
pub mod simplify;

pub use projection::{ProjectionError, Projector};
pub use scaling::{Bounds, Scaler};
pub use simplify::simplify_shape;
