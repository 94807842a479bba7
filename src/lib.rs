use std::path::{Path, PathBuf};

pub mod classifier;
pub mod coords;
pub mod error;
pub mod geometry;
pub mod options;
pub mod partitioner;
pub mod properties;
pub mod reader;
pub mod shape;
pub mod writer;

pub use classifier::{classify, Classifier};
pub use coords::AxisOrder;
pub use error::{Result, ShapeError};
pub use geometry::{Feature, Geometry, GeometryKind};
pub use options::{ConversionOptions, PointStrategy};
pub use properties::{AttributePolicy, AttributeTable};
pub use shape::{LayerData, LayerKind, LayerMeta, LayerPayload, ShapeKind, Vertex};

/// Read GeoJSON files into layer data, `None` if the files are not GeoJSON.
pub fn read_files<P: AsRef<Path>>(paths: &[P], options: &ConversionOptions) -> Result<Option<Vec<LayerData>>> {
    reader::read_layers(paths, options)
}

/// Write layer data to a GeoJSON file, `None` if the path is not GeoJSON.
pub fn write_file(path: &Path, layers: &[LayerData], options: &ConversionOptions) -> Result<Option<PathBuf>> {
    writer::write_layers(path, layers, options)
}
