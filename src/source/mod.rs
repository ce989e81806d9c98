pub mod geojson;

pub use geojson::{LoadedShape, SourceError, load_shapes, parse_shapes};
