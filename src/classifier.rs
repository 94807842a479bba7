//! Mapping between GeoJSON geometry kinds and viewer shape kinds.

use geo::algorithm::bounding_rect::BoundingRect;
use geo::LineString;

use crate::geometry::{Geometry, GeometryKind};
use crate::shape::ShapeKind;

/// Forward mapping, geometry to shape kind.
///
/// Rectangle detection is off by default: polygons always come out as
/// `polygon` and the viewer re-derives rectangles itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    pub detect_rectangles: bool,
}

impl Classifier {
    pub fn new(detect_rectangles: bool) -> Self {
        Classifier { detect_rectangles }
    }

    pub fn classify(&self, geometry: &Geometry) -> ShapeKind {
        match geometry {
            Geometry::Polygon(rings) => {
                if self.detect_rectangles && is_rectangle(rings) {
                    ShapeKind::Rectangle
                } else {
                    ShapeKind::Polygon
                }
            }
            Geometry::LineString(line) => {
                if is_polyline(line) {
                    ShapeKind::Path
                } else {
                    ShapeKind::Line
                }
            }
            Geometry::Point(_) => ShapeKind::Point,
            Geometry::MultiPoint(_) => ShapeKind::MultiPoint,
            Geometry::Feature(feature) => self.classify(&feature.geometry),
        }
    }
}

/// Shape kind with the default classifier.
pub fn classify(geometry: &Geometry) -> ShapeKind {
    Classifier::default().classify(geometry)
}

/// Line strings with more than two positions are paths.
pub fn is_polyline(line: &LineString<f64>) -> bool {
    line.0.len() > 2
}

/// Single open or closed ring of four axis-aligned corners.
pub fn is_rectangle(rings: &[LineString<f64>]) -> bool {
    let [ring] = rings else {
        return false;
    };
    let mut corners = ring.0.as_slice();
    if corners.len() == 5 && corners.first() == corners.last() {
        corners = &corners[..4];
    }
    if corners.len() != 4 {
        return false;
    }
    let Some(bounds) = ring.bounding_rect() else {
        return false;
    };
    if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return false;
    }
    let (min, max) = (bounds.min(), bounds.max());
    let on_corner = corners
        .iter()
        .all(|c| (c.x == min.x || c.x == max.x) && (c.y == min.y || c.y == max.y));
    let axis_aligned_edges = (0..4).all(|i| {
        let (a, b) = (corners[i], corners[(i + 1) % 4]);
        (a.x == b.x) != (a.y == b.y)
    });
    on_corner && axis_aligned_edges
}

/// Reverse mapping, shape kind to the geometry kind it is written as.
///
/// Unknown kind names are rejected earlier, when parsing a [`ShapeKind`].
pub fn geometry_kind(shape_kind: ShapeKind) -> GeometryKind {
    match shape_kind {
        ShapeKind::Rectangle | ShapeKind::Polygon | ShapeKind::Ellipse => GeometryKind::Polygon,
        ShapeKind::Line | ShapeKind::Path => GeometryKind::LineString,
        ShapeKind::Point | ShapeKind::MultiPoint => GeometryKind::MultiPoint,
    }
}
