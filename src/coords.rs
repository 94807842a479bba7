//! Coordinate extraction between GeoJSON geometries and viewer vertices.

use geo::{Coord, LineString, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShapeError};
use crate::geometry::Geometry;
use crate::shape::Vertex;

/// Axis order of viewer vertices relative to GeoJSON positions.
///
/// GeoJSON stores `x, y` while the viewer works in `row, column`, so the
/// default swaps the two ordinates. Swapping is its own inverse, the same
/// value is used for reading and writing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    Native,
    #[default]
    Swapped,
}

impl AxisOrder {
    pub fn to_vertex(self, coord: Coord<f64>) -> Vertex {
        match self {
            AxisOrder::Native => [coord.x, coord.y],
            AxisOrder::Swapped => [coord.y, coord.x],
        }
    }

    pub fn to_coord(self, vertex: Vertex) -> Coord<f64> {
        match self {
            AxisOrder::Native => Coord { x: vertex[0], y: vertex[1] },
            AxisOrder::Swapped => Coord { x: vertex[1], y: vertex[0] },
        }
    }

    pub fn to_position(self, vertex: Vertex) -> Vec<f64> {
        let coord = self.to_coord(vertex);
        vec![coord.x, coord.y]
    }
}

fn ring_vertices(ring: &LineString<f64>, axis: AxisOrder) -> Vec<Vertex> {
    ring.coords().map(|c| axis.to_vertex(*c)).collect()
}

/// All vertices of a geometry in source order.
///
/// Polygon rings are flattened exterior first, closing vertices included.
pub fn extract(geometry: &Geometry, axis: AxisOrder) -> Vec<Vertex> {
    match geometry {
        Geometry::Point(point) => vec![axis.to_vertex(point.0)],
        Geometry::MultiPoint(points) => points.iter().map(|p| axis.to_vertex(p.0)).collect(),
        Geometry::LineString(line) => ring_vertices(line, axis),
        Geometry::Polygon(rings) => rings.iter().flat_map(|ring| ring_vertices(ring, axis)).collect(),
        Geometry::Feature(feature) => extract(&feature.geometry, axis),
    }
}

/// Vertices grouped per ring; non-polygons yield a single group.
pub fn extract_rings(geometry: &Geometry, axis: AxisOrder) -> Vec<Vec<Vertex>> {
    match geometry.inner() {
        Geometry::Polygon(rings) => rings.iter().map(|ring| ring_vertices(ring, axis)).collect(),
        other => vec![extract(other, axis)],
    }
}

/// Axis-aligned square of side `width` centred on the point, as an open ring.
///
/// Used when points are shown as polygon shapes instead of a points layer.
pub fn point_to_polygon(point: Point<f64>, width: f64) -> Geometry {
    let half = width / 2.0;
    let rect = Rect::new(
        Coord { x: point.x() - half, y: point.y() - half },
        Coord { x: point.x() + half, y: point.y() + half },
    );
    let (min, max) = (rect.min(), rect.max());
    Geometry::Polygon(vec![LineString::new(vec![
        Coord { x: min.x, y: min.y },
        Coord { x: min.x, y: max.y },
        Coord { x: max.x, y: max.y },
        Coord { x: max.x, y: min.y },
    ])])
}

/// Polygon approximation of an ellipse given by its bounding box vertices.
pub fn ellipse_to_polygon(_vertices: &[Vertex]) -> Result<Vec<Vertex>> {
    Err(ShapeError::NotSupported("ellipse to polygon conversion".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    #[test]
    fn test_extract_swaps_axes() {
        let line = geometry::from_str(r#"{"type":"LineString","coordinates":[[1,2],[3,4],[5,6]]}"#)
            .unwrap()
            .remove(0);
        assert_eq!(extract(&line, AxisOrder::Swapped), vec![[2.0, 1.0], [4.0, 3.0], [6.0, 5.0]]);
        assert_eq!(extract(&line, AxisOrder::Native), vec![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    }

    #[test]
    fn test_extract_polygon_rings() {
        let polygon = geometry::from_str(
            r#"{"type":"Feature","properties":{},"geometry":{"type":"Polygon","coordinates":[
                [[0,0],[0,10],[10,10],[10,0],[0,0]],
                [[2,2],[2,3],[3,3],[2,2]]
            ]}}"#,
        )
        .unwrap()
        .remove(0);
        assert_eq!(extract(&polygon, AxisOrder::Native).len(), 9);
        let rings = extract_rings(&polygon, AxisOrder::Native);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[1][1], [2.0, 3.0]);
    }

    #[test]
    fn test_axis_order_is_reversible() {
        let vertex = [3.5, -1.25];
        for axis in [AxisOrder::Native, AxisOrder::Swapped] {
            assert_eq!(axis.to_vertex(axis.to_coord(vertex)), vertex);
        }
        assert_eq!(AxisOrder::Swapped.to_position(vertex), vec![-1.25, 3.5]);
    }

    #[test]
    fn test_point_to_polygon() {
        let square = point_to_polygon(Point::new(10.0, 20.0), 1.0);
        let vertices = extract(&square, AxisOrder::Native);
        assert_eq!(vertices.len(), 4);
        assert_relative_eq!(vertices[0][0], 9.5);
        assert_relative_eq!(vertices[0][1], 19.5);
        assert_relative_eq!(vertices[1][1], 20.5);
        assert_relative_eq!(vertices[2][0], 10.5);
        assert_relative_eq!(vertices[3][1], 19.5);

        let wide = extract(&point_to_polygon(Point::new(0.0, 0.0), 4.0), AxisOrder::Native);
        assert_relative_eq!(wide[2][0] - wide[0][0], 4.0);
    }

    #[test]
    fn test_ellipse_not_supported() {
        assert_matches!(
            ellipse_to_polygon(&[[0.0, 0.0], [0.0, 5.0], [5.0, 5.0], [5.0, 0.0]]),
            Err(ShapeError::NotSupported(_))
        );
    }
}
