//! Error type shared by the reader and writer pipelines.

use thiserror::Error;

/// Everything that can go wrong while converting between GeoJSON and layer data.
///
/// A path with the wrong extension is not an error: the entry points return
/// `Ok(None)` so the caller can try another handler.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// A GeoJSON geometry kind with no shape counterpart (e.g. `MultiPolygon`).
    #[error("no matching shape for geometry type `{0}`")]
    UnsupportedGeometryKind(String),

    /// A shape kind string the writer does not know.
    #[error("shape type `{0}` not supported")]
    UnsupportedShapeKind(String),

    /// A conversion that exists in the mapping but is not implemented.
    #[error("{0} is not supported yet")]
    NotSupported(String),

    /// An attribute column does not hold one value per geometry.
    #[error("attribute column `{column}` has {found} values, expected {expected}")]
    MalformedAttributes {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A position with fewer than two ordinates.
    #[error("position has {0} ordinates, at least 2 are required")]
    InvalidPosition(usize),

    /// Record and shape type lists of a layer differ in length.
    #[error("layer has {records} records but {kinds} shape types")]
    LayerMismatch { records: usize, kinds: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, ShapeError>;
