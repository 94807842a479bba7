//! Decoded GeoJSON input, restricted to the geometry kinds that have a shape counterpart.

use geo::{Coord, LineString, MultiPoint, Point};
use geojson::{GeoJson, JsonObject, Position, Value as GeoJsonValue};
use log::debug;
use serde_json::Value as JsonValue;

use crate::error::{Result, ShapeError};

/// A single input geometry, optionally wrapped in a feature.
///
/// Polygon rings are kept as plain line strings so that open rings survive a
/// round trip unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point<f64>),
    MultiPoint(MultiPoint<f64>),
    LineString(LineString<f64>),
    Polygon(Vec<LineString<f64>>),
    Feature(Box<Feature>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: JsonObject,
}

/// GeoJSON geometry kinds shapes are written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    MultiPoint,
    LineString,
    Polygon,
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::Feature(_) => "Feature",
        }
    }

    // looks through feature wrappers
    pub fn inner(&self) -> &Geometry {
        match self {
            Geometry::Feature(feature) => feature.geometry.inner(),
            other => other,
        }
    }

    pub fn properties(&self) -> Option<&JsonObject> {
        match self {
            Geometry::Feature(feature) => Some(&feature.properties),
            _ => None,
        }
    }

    // feature wrappers and their properties are kept
    pub fn map_inner(self, f: impl FnOnce(Geometry) -> Geometry) -> Geometry {
        match self {
            Geometry::Feature(feature) => {
                let Feature { geometry, properties } = *feature;
                Geometry::Feature(Box::new(Feature {
                    geometry: geometry.map_inner(f),
                    properties,
                }))
            }
            other => f(other),
        }
    }
}

fn value_type_name(value: &GeoJsonValue) -> &'static str {
    match value {
        GeoJsonValue::Point(_) => "Point",
        GeoJsonValue::MultiPoint(_) => "MultiPoint",
        GeoJsonValue::LineString(_) => "LineString",
        GeoJsonValue::MultiLineString(_) => "MultiLineString",
        GeoJsonValue::Polygon(_) => "Polygon",
        GeoJsonValue::MultiPolygon(_) => "MultiPolygon",
        GeoJsonValue::GeometryCollection(_) => "GeometryCollection",
    }
}

fn to_coord(position: &Position) -> Result<Coord<f64>> {
    match position.as_slice() {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        other => Err(ShapeError::InvalidPosition(other.len())),
    }
}

fn to_line_string(positions: &[Position]) -> Result<LineString<f64>> {
    Ok(LineString::new(
        positions.iter().map(to_coord).collect::<Result<Vec<_>>>()?,
    ))
}

impl TryFrom<GeoJsonValue> for Geometry {
    type Error = ShapeError;

    fn try_from(value: GeoJsonValue) -> Result<Self> {
        match &value {
            GeoJsonValue::Point(position) => Ok(Geometry::Point(to_coord(position)?.into())),
            GeoJsonValue::MultiPoint(positions) => Ok(Geometry::MultiPoint(MultiPoint::new(
                positions
                    .iter()
                    .map(|p| to_coord(p).map(Point::from))
                    .collect::<Result<Vec<_>>>()?,
            ))),
            GeoJsonValue::LineString(positions) => Ok(Geometry::LineString(to_line_string(positions)?)),
            GeoJsonValue::Polygon(rings) => Ok(Geometry::Polygon(
                rings
                    .iter()
                    .map(|ring| to_line_string(ring))
                    .collect::<Result<Vec<_>>>()?,
            )),
            other => Err(ShapeError::UnsupportedGeometryKind(
                value_type_name(other).to_string(),
            )),
        }
    }
}

impl TryFrom<geojson::Geometry> for Geometry {
    type Error = ShapeError;

    fn try_from(geometry: geojson::Geometry) -> Result<Self> {
        Geometry::try_from(geometry.value)
    }
}

impl TryFrom<geojson::Feature> for Geometry {
    type Error = ShapeError;

    fn try_from(feature: geojson::Feature) -> Result<Self> {
        let geometry = feature
            .geometry
            .ok_or_else(|| ShapeError::UnsupportedGeometryKind("null".to_string()))?;
        Ok(Geometry::Feature(Box::new(Feature {
            geometry: Geometry::try_from(geometry)?,
            properties: feature.properties.unwrap_or_default(),
        })))
    }
}

/// Flatten one GeoJSON object into geometries, unpacking collections.
fn collect_geojson(geojson: GeoJson, geometries: &mut Vec<Geometry>) -> Result<()> {
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            debug!("Unpacking FeatureCollection with {} features", collection.features.len());
            for feature in collection.features {
                geometries.push(Geometry::try_from(feature)?);
            }
        }
        GeoJson::Feature(feature) => geometries.push(Geometry::try_from(feature)?),
        GeoJson::Geometry(geometry) => match geometry.value {
            GeoJsonValue::GeometryCollection(members) => {
                debug!("Unpacking GeometryCollection with {} geometries", members.len());
                for member in members {
                    geometries.push(Geometry::try_from(member)?);
                }
            }
            value => geometries.push(Geometry::try_from(value)?),
        },
    }
    Ok(())
}

/// Normalise a decoded document into an ordered list of geometries.
///
/// The top level may be a bare geometry, a feature, a `FeatureCollection`, a
/// `GeometryCollection` or a plain JSON list of any of those.
pub fn from_json_value(value: JsonValue) -> Result<Vec<Geometry>> {
    let mut geometries = Vec::new();
    match value {
        JsonValue::Array(items) => {
            for item in items {
                collect_geojson(GeoJson::from_json_value(item)?, &mut geometries)?;
            }
        }
        other => collect_geojson(GeoJson::from_json_value(other)?, &mut geometries)?,
    }
    Ok(geometries)
}

pub fn from_str(content: &str) -> Result<Vec<Geometry>> {
    from_json_value(serde_json::from_str(content)?)
}
