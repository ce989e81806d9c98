use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::Shape;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(String),
    #[error("geometry has no coordinates")]
    EmptyGeometry,
    #[error("position must carry at least lon and lat")]
    MalformedPosition,
    #[error("document has no features")]
    NoFeatures,
}

/// Raw GeoJSON document (FeatureCollection or single Feature)
#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    features: Vec<Feature>,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Option<serde_json::Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Option<serde_json::Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    type_: String,
    coordinates: Value,
}

/// A shape together with whatever display name its feature carried.
#[derive(Debug, Clone)]
pub struct LoadedShape {
    pub name: Option<String>,
    pub shape: Shape,
}

/// Load shapes from a GeoJSON file.
pub fn load_shapes(path: &Path) -> Result<Vec<LoadedShape>, SourceError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_shapes(&contents)
}

/// Parse a GeoJSON document into shapes.
///
/// Polygon and MultiPolygon geometries become multi-part shapes: every
/// ring, outer boundary or hole, is one part, matching the flat part
/// table of the legacy shapefile encoding these outlines come from. Any
/// other geometry type is an explicit unsupported-input error rather
/// than being skipped.
pub fn parse_shapes(json: &str) -> Result<Vec<LoadedShape>, SourceError> {
    let doc: Document = serde_json::from_str(json)?;

    match doc.type_.as_str() {
        "FeatureCollection" => {
            if doc.features.is_empty() {
                return Err(SourceError::NoFeatures);
            }
            doc.features.iter().map(feature_to_shape).collect()
        }
        "Feature" => {
            let feature = Feature {
                geometry: doc.geometry,
                properties: doc.properties,
            };
            Ok(vec![feature_to_shape(&feature)?])
        }
        other => Err(SourceError::UnsupportedGeometry(other.to_string())),
    }
}

fn feature_to_shape(feature: &Feature) -> Result<LoadedShape, SourceError> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| SourceError::UnsupportedGeometry("null".to_string()))?;
    let shape = geometry_to_shape(geometry)?;
    Ok(LoadedShape {
        name: feature_name(feature.properties.as_ref()),
        shape,
    })
}

/// GADM exports and hand-written files disagree on the name key.
fn feature_name(properties: Option<&serde_json::Map<String, Value>>) -> Option<String> {
    let props = properties?;
    for key in ["name", "NAME", "COUNTRY", "NAME_0", "NAME_1"] {
        if let Some(Value::String(s)) = props.get(key) {
            return Some(s.clone());
        }
    }
    None
}

fn geometry_to_shape(geometry: &Geometry) -> Result<Shape, SourceError> {
    match geometry.type_.as_str() {
        "Polygon" => {
            let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(geometry.coordinates.clone())?;
            shape_from_rings(rings)
        }
        "MultiPolygon" => {
            let polygons: Vec<Vec<Vec<Vec<f64>>>> =
                serde_json::from_value(geometry.coordinates.clone())?;
            shape_from_rings(polygons.into_iter().flatten())
        }
        other => Err(SourceError::UnsupportedGeometry(other.to_string())),
    }
}

fn shape_from_rings(
    rings: impl IntoIterator<Item = Vec<Vec<f64>>>,
) -> Result<Shape, SourceError> {
    let mut points: Vec<(f64, f64)> = Vec::new();
    let mut parts: Vec<usize> = Vec::new();

    for ring in rings {
        if ring.is_empty() {
            continue;
        }
        parts.push(points.len());
        for position in ring {
            if position.len() < 2 {
                return Err(SourceError::MalformedPosition);
            }
            points.push((position[0], position[1]));
        }
    }

    if points.is_empty() {
        return Err(SourceError::EmptyGeometry);
    }

    Ok(Shape::new(points, parts))
}
