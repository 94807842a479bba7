//! Conversion settings shared by the reader and writer.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::coords::AxisOrder;
use crate::error::Result;
use crate::properties::AttributePolicy;

pub const GEOJSON_SUFFIX: &str = ".geojson";
pub const JSON_SUFFIX: &str = ".json";

fn default_point_width() -> f64 {
    1.0
}

/// How point geometries are turned into layer data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointStrategy {
    /// Points go to a dedicated points layer.
    #[default]
    PointsLayer,
    /// Legacy fallback: each point becomes a square polygon in the shapes layer.
    SquarePolygon {
        #[serde(default = "default_point_width")]
        width: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub axis_order: AxisOrder,
    pub point_strategy: PointStrategy,
    pub detect_rectangles: bool,
    pub accept_json_extension: bool,
    pub attribute_policy: AttributePolicy,
    /// `object_type` written into every feature.
    pub object_type: String,
    /// `isLocked` written into every feature.
    pub is_locked: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            axis_order: AxisOrder::default(),
            point_strategy: PointStrategy::default(),
            detect_rectangles: false,
            accept_json_extension: false,
            attribute_policy: AttributePolicy::default(),
            object_type: "annotation".to_string(),
            is_locked: false,
        }
    }
}

impl ConversionOptions {
    /// Load options from a JSON file; missing fields take their defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        info!("Loading options from {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Whether the reader and writer handle this path at all.
    ///
    /// Matches on the file name suffix, so a file named just `.geojson` counts.
    pub fn accepts_path(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let name = name.to_ascii_lowercase();
        name.ends_with(GEOJSON_SUFFIX) || (self.accept_json_extension && name.ends_with(JSON_SUFFIX))
    }
}
