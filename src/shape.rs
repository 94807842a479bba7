//! Viewer side of the conversion: shape kinds and layer data.

use std::fmt;
use std::str::FromStr;

use crate::error::ShapeError;
use crate::properties::AttributeTable;

pub type Vertex = [f64; 2];

/// The viewer's classification of a displayable shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle,
    Polygon,
    Line,
    Path,
    Ellipse,
    Point,
    MultiPoint,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Line => "line",
            ShapeKind::Path => "path",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Point => "point",
            ShapeKind::MultiPoint => "multipoint",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(ShapeKind::Rectangle),
            "polygon" => Ok(ShapeKind::Polygon),
            "line" => Ok(ShapeKind::Line),
            "path" => Ok(ShapeKind::Path),
            "ellipse" => Ok(ShapeKind::Ellipse),
            "point" => Ok(ShapeKind::Point),
            "multipoint" => Ok(ShapeKind::MultiPoint),
            other => Err(ShapeError::UnsupportedShapeKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Shapes,
    Points,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Shapes => "shapes",
            LayerKind::Points => "points",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerPayload {
    Shapes(Vec<Vec<Vertex>>),
    Points(Vec<Vertex>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerMeta {
    // parallel to the shapes payload, empty for points layers
    pub shape_type: Vec<ShapeKind>,
    pub properties: AttributeTable,
}

/// The unit exchanged with the viewer: `(data, meta, kind)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerData {
    pub data: LayerPayload,
    pub meta: LayerMeta,
}

impl LayerData {
    pub fn shapes(shapes: Vec<Vec<Vertex>>, shape_type: Vec<ShapeKind>, properties: AttributeTable) -> Self {
        LayerData {
            data: LayerPayload::Shapes(shapes),
            meta: LayerMeta { shape_type, properties },
        }
    }

    pub fn points(points: Vec<Vertex>, properties: AttributeTable) -> Self {
        LayerData {
            data: LayerPayload::Points(points),
            meta: LayerMeta {
                shape_type: Vec::new(),
                properties,
            },
        }
    }

    pub fn kind(&self) -> LayerKind {
        match self.data {
            LayerPayload::Shapes(_) => LayerKind::Shapes,
            LayerPayload::Points(_) => LayerKind::Points,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            LayerPayload::Shapes(shapes) => shapes.len(),
            LayerPayload::Points(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_shape_kind_names() {
        for kind in [
            ShapeKind::Rectangle,
            ShapeKind::Polygon,
            ShapeKind::Line,
            ShapeKind::Path,
            ShapeKind::Ellipse,
            ShapeKind::Point,
            ShapeKind::MultiPoint,
        ] {
            assert_eq!(kind.as_str().parse::<ShapeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_shape_kind() {
        assert_matches!(
            "circle".parse::<ShapeKind>(),
            Err(ShapeError::UnsupportedShapeKind(name)) if name == "circle"
        );
    }

    #[test]
    fn test_layer_kind_follows_payload() {
        let points = LayerData::points(vec![[1.0, 2.0]], AttributeTable::default());
        assert_eq!(points.kind(), LayerKind::Points);
        assert_eq!(points.len(), 1);

        let shapes = LayerData::shapes(Vec::new(), Vec::new(), AttributeTable::default());
        assert_eq!(shapes.kind(), LayerKind::Shapes);
        assert!(shapes.is_empty());
    }
}
