//! Layer data to GeoJSON file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use geojson::{Feature, Geometry as GeoJsonGeometry, JsonObject, Value as GeoJsonValue};
use log::{debug, info};
use serde_json::Value;

use crate::classifier::geometry_kind;
use crate::coords::{ellipse_to_polygon, AxisOrder};
use crate::error::{Result, ShapeError};
use crate::geometry::GeometryKind;
use crate::options::ConversionOptions;
use crate::shape::{LayerData, LayerPayload, ShapeKind, Vertex};

/// Write all layers into a single file as a list of features.
///
/// Returns `Ok(None)` without touching the file system when the path is not a
/// GeoJSON file. Nothing is written if any shape fails to convert.
pub fn write_layers(path: &Path, layers: &[LayerData], options: &ConversionOptions) -> Result<Option<PathBuf>> {
    if !options.accepts_path(path) {
        debug!("Not writing {}: unsupported extension", path.display());
        return Ok(None);
    }

    let features = layers_to_features(layers, options)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &features)?;
    writer.flush()?;

    info!("Written {} features to {}", features.len(), path.display());
    Ok(Some(path.to_path_buf()))
}

pub fn to_string(layers: &[LayerData], options: &ConversionOptions) -> Result<String> {
    Ok(serde_json::to_string(&layers_to_features(layers, options)?)?)
}

/// Convert every layer into features, layers in order.
pub fn layers_to_features(layers: &[LayerData], options: &ConversionOptions) -> Result<Vec<Feature>> {
    let axis = options.axis_order;
    let mut features = Vec::new();
    for layer in layers {
        match &layer.data {
            LayerPayload::Points(points) => {
                // swapped back like shapes, so points read by this crate round-trip
                debug!("Writing points layer with {} points as one MultiPoint", points.len());
                features.push(to_feature(points_geometry(points, axis), options));
            }
            LayerPayload::Shapes(shapes) => {
                let kinds = &layer.meta.shape_type;
                if shapes.len() != kinds.len() {
                    return Err(ShapeError::LayerMismatch {
                        records: shapes.len(),
                        kinds: kinds.len(),
                    });
                }
                debug!("Writing shapes layer with {} shapes", shapes.len());
                for (vertices, kind) in shapes.iter().zip(kinds) {
                    features.push(to_feature(shape_geometry(vertices, *kind, axis)?, options));
                }
            }
        }
    }
    Ok(features)
}

fn positions(vertices: &[Vertex], axis: AxisOrder) -> Vec<Vec<f64>> {
    vertices.iter().map(|v| axis.to_position(*v)).collect()
}

fn points_geometry(points: &[Vertex], axis: AxisOrder) -> GeoJsonGeometry {
    GeoJsonGeometry::new(GeoJsonValue::MultiPoint(positions(points, axis)))
}

/// GeoJSON geometry for a single shape.
///
/// Polygon-like shapes use their vertices as the only ring, which is left open.
pub fn shape_geometry(vertices: &[Vertex], kind: ShapeKind, axis: AxisOrder) -> Result<GeoJsonGeometry> {
    let value = match geometry_kind(kind) {
        GeometryKind::Polygon => {
            let ring = match kind {
                ShapeKind::Ellipse => positions(&ellipse_to_polygon(vertices)?, axis),
                _ => positions(vertices, axis),
            };
            GeoJsonValue::Polygon(vec![ring])
        }
        GeometryKind::LineString => GeoJsonValue::LineString(positions(vertices, axis)),
        GeometryKind::MultiPoint => GeoJsonValue::MultiPoint(positions(vertices, axis)),
    };
    Ok(GeoJsonGeometry::new(value))
}

/// Wrap a geometry in a feature with the attributes annotation tools expect.
fn to_feature(geometry: GeoJsonGeometry, options: &ConversionOptions) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("object_type".to_string(), Value::from(options.object_type.clone()));
    properties.insert("isLocked".to_string(), Value::from(options.is_locked));

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
