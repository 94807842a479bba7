use log::debug;

use crate::classifier::Classifier;
use crate::geometry::Geometry;
use crate::shape::ShapeKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub geometry: Geometry,
    pub kind: ShapeKind,
}

#[derive(Debug, Default, PartialEq)]
pub struct Partition {
    // one points layer each
    pub multipoints: Vec<Geometry>,
    // share a single points layer
    pub points: Vec<Geometry>,
    // everything else, relative order kept
    pub shapes: Vec<Classified>,
}

// Single pass, each geometry classified exactly once.
pub fn partition(geometries: Vec<Geometry>, classifier: &Classifier) -> Partition {
    let mut output = Partition::default();
    for geometry in geometries {
        match classifier.classify(&geometry) {
            ShapeKind::MultiPoint => output.multipoints.push(geometry),
            ShapeKind::Point => output.points.push(geometry),
            kind => output.shapes.push(Classified { geometry, kind }),
        }
    }
    debug!(
        "Partitioned into {} multipoints, {} points, {} shapes",
        output.multipoints.len(),
        output.points.len(),
        output.shapes.len()
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;

    #[test]
    fn test_partition_mixed_collection() {
        let json = r#"{"type":"GeometryCollection","geometries":[
            {"type":"Polygon","coordinates":[[[0,0],[0,1],[1,1]]]},
            {"type":"Point","coordinates":[1,1]},
            {"type":"MultiPoint","coordinates":[[0,0],[2,2]]},
            {"type":"LineString","coordinates":[[0,0],[3,3]]},
            {"type":"Polygon","coordinates":[[[0,0],[0,2],[2,2]]]},
            {"type":"Point","coordinates":[2,2]},
            {"type":"Polygon","coordinates":[[[0,0],[0,3],[3,3]]]}
        ]}"#;
        let geometries = geometry::from_str(json).unwrap();
        let partition = partition(geometries, &Classifier::default());

        assert_eq!(partition.multipoints.len(), 1);
        assert_eq!(partition.points.len(), 2);
        assert_eq!(partition.shapes.len(), 4);
        let kinds: Vec<_> = partition.shapes.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ShapeKind::Polygon, ShapeKind::Line, ShapeKind::Polygon, ShapeKind::Polygon]
        );
        // relative order of points is kept
        assert_eq!(partition.points[0], Geometry::Point(geo::Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_partition_empty() {
        assert_eq!(partition(Vec::new(), &Classifier::default()), Partition::default());
    }
}
