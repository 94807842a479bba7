//! GeoJSON file to layer data.

use std::fs::File;
use std::io::BufReader;
use std::iter;
use std::path::Path;

use log::{debug, info, warn};

use crate::classifier::Classifier;
use crate::coords::{extract, extract_rings, point_to_polygon, AxisOrder};
use crate::error::Result;
use crate::geometry::{self, Geometry};
use crate::options::{ConversionOptions, PointStrategy};
use crate::partitioner::partition;
use crate::properties::aggregate;
use crate::shape::{LayerData, Vertex};

/// Read one or more files into layers, in input order.
///
/// Returns `Ok(None)` when the first path is not a GeoJSON file so the caller
/// can try another reader.
pub fn read_layers<P: AsRef<Path>>(paths: &[P], options: &ConversionOptions) -> Result<Option<Vec<LayerData>>> {
    let Some(first) = paths.first() else {
        return Ok(None);
    };
    if !options.accepts_path(first.as_ref()) {
        debug!("Not reading {}: unsupported extension", first.as_ref().display());
        return Ok(None);
    }

    let mut layers = Vec::new();
    for path in paths {
        layers.extend(read_path(path.as_ref(), options)?);
    }
    Ok(Some(layers))
}

/// Read a single file regardless of its extension.
pub fn read_path(path: &Path, options: &ConversionOptions) -> Result<Vec<LayerData>> {
    info!("Loading file: {}", path.display());
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let value: serde_json::Value = serde_json::from_reader(reader)?;

    let geometries = geometry::from_json_value(value)?;
    info!("Found {} geometries in {}", geometries.len(), path.display());
    layers_from_geometries(geometries, options)
}

pub fn read_str(content: &str, options: &ConversionOptions) -> Result<Vec<LayerData>> {
    layers_from_geometries(geometry::from_str(content)?, options)
}

/// Build layers from decoded geometries.
///
/// Layer order is fixed: one points layer per multipoint, then the combined
/// points layer if there are any points, then the shapes layer.
pub fn layers_from_geometries(geometries: Vec<Geometry>, options: &ConversionOptions) -> Result<Vec<LayerData>> {
    let geometries: Vec<Geometry> = match options.point_strategy {
        PointStrategy::PointsLayer => geometries,
        PointStrategy::SquarePolygon { width } => geometries
            .into_iter()
            .map(|g| {
                g.map_inner(|inner| match inner {
                    Geometry::Point(point) => point_to_polygon(point, width),
                    other => other,
                })
            })
            .collect(),
    };

    let axis = options.axis_order;
    let policy = options.attribute_policy;
    let split = partition(geometries, &Classifier::new(options.detect_rectangles));
    let mut layers = Vec::with_capacity(split.multipoints.len() + 2);

    for multipoint in &split.multipoints {
        let points = extract(multipoint, axis);
        debug!("Points layer from multipoint with {} points", points.len());
        layers.push(LayerData::points(points, aggregate(iter::once(multipoint), policy)?));
    }

    if !split.points.is_empty() {
        let points = split.points.iter().flat_map(|p| extract(p, axis)).collect::<Vec<_>>();
        debug!("Points layer with {} points", points.len());
        layers.push(LayerData::points(points, aggregate(&split.points, policy)?));
    }

    let shapes = split.shapes.iter().map(|c| shape_vertices(&c.geometry, axis)).collect::<Vec<_>>();
    let shape_type = split.shapes.iter().map(|c| c.kind).collect::<Vec<_>>();
    let properties = aggregate(split.shapes.iter().map(|c| &c.geometry), policy)?;
    debug!("Shapes layer with {} shapes", shapes.len());
    layers.push(LayerData::shapes(shapes, shape_type, properties));

    Ok(layers)
}

// Shapes hold a single vertex list, holes are appended after the exterior.
fn shape_vertices(geometry: &Geometry, axis: AxisOrder) -> Vec<Vertex> {
    let rings = extract_rings(geometry, axis);
    if rings.len() > 1 {
        warn!("Flattening polygon with {} rings into one shape, holes will not survive a write", rings.len());
    }
    rings.concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{LayerKind, LayerPayload, ShapeKind};

    const MIXED: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"name":"p1"},"geometry":{"type":"Point","coordinates":[1,2]}},
        {"type":"Feature","properties":{"name":"l1"},"geometry":{"type":"LineString","coordinates":[[0,0],[1,1],[2,0]]}},
        {"type":"Feature","properties":{"name":"g1"},"geometry":{"type":"Polygon","coordinates":[[[0,0],[0,4],[4,4],[4,0]]]}}
    ]}"#;

    #[test]
    fn test_point_line_polygon() {
        let layers = read_str(MIXED, &ConversionOptions::default()).unwrap();
        assert_eq!(layers.len(), 2);

        assert_eq!(layers[0].kind(), LayerKind::Points);
        assert_eq!(layers[0].data, LayerPayload::Points(vec![[2.0, 1.0]]));
        assert_eq!(layers[0].meta.properties.column("name").unwrap(), &["p1"]);

        assert_eq!(layers[1].kind(), LayerKind::Shapes);
        assert_eq!(layers[1].meta.shape_type, vec![ShapeKind::Path, ShapeKind::Polygon]);
        assert_eq!(layers[1].meta.properties.column("name").unwrap(), &["l1", "g1"]);
    }

    #[test]
    fn test_native_axis_order() {
        let options = ConversionOptions {
            axis_order: AxisOrder::Native,
            ..Default::default()
        };
        let layers = read_str(MIXED, &options).unwrap();
        assert_eq!(layers[0].data, LayerPayload::Points(vec![[1.0, 2.0]]));
    }

    #[test]
    fn test_square_polygon_strategy() {
        let options = ConversionOptions {
            point_strategy: PointStrategy::SquarePolygon { width: 2.0 },
            axis_order: AxisOrder::Native,
            ..Default::default()
        };
        let layers = read_str(MIXED, &options).unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(
            layers[0].meta.shape_type,
            vec![ShapeKind::Polygon, ShapeKind::Path, ShapeKind::Polygon]
        );
        match &layers[0].data {
            LayerPayload::Shapes(shapes) => {
                assert_eq!(shapes[0], vec![[0.0, 1.0], [0.0, 3.0], [2.0, 3.0], [2.0, 1.0]])
            }
            other => panic!("unexpected payload {other:?}"),
        }
        assert_eq!(layers[0].meta.properties.column("name").unwrap(), &["p1", "l1", "g1"]);
    }

    #[test]
    fn test_polygon_with_hole_is_flattened() {
        let json = r#"{"type":"Polygon","coordinates":[
            [[0,0],[0,10],[10,10],[10,0],[0,0]],
            [[2,2],[2,3],[3,3],[2,2]]
        ]}"#;
        let options = ConversionOptions {
            axis_order: AxisOrder::Native,
            ..Default::default()
        };
        let layers = read_str(json, &options).unwrap();
        assert_eq!(layers[0].meta.shape_type, vec![ShapeKind::Polygon]);
        match &layers[0].data {
            LayerPayload::Shapes(shapes) => {
                assert_eq!(shapes[0].len(), 9);
                assert_eq!(shapes[0][4], [0.0, 0.0]);
                assert_eq!(shapes[0][5], [2.0, 2.0]);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_detect_rectangles() {
        let options = ConversionOptions {
            detect_rectangles: true,
            ..Default::default()
        };
        let layers = read_str(MIXED, &options).unwrap();
        assert_eq!(layers[1].meta.shape_type, vec![ShapeKind::Path, ShapeKind::Rectangle]);
    }

    #[test]
    fn test_only_shapes_layer_without_points() {
        let json = r#"[{"type":"LineString","coordinates":[[0,0],[1,1]]}]"#;
        let layers = read_str(json, &ConversionOptions::default()).unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].meta.shape_type, vec![ShapeKind::Line]);
        assert!(layers[0].meta.properties.is_empty());
    }

    #[test]
    fn test_declines_other_extensions() {
        let layers = read_layers(&["x.shp"], &ConversionOptions::default()).unwrap();
        assert!(layers.is_none());
        let none: [&str; 0] = [];
        assert!(read_layers(&none, &ConversionOptions::default()).unwrap().is_none());
    }
}
