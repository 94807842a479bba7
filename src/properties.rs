//! Columnar attribute table built from feature properties.

use log::warn;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, ShapeError};
use crate::geometry::Geometry;

/// Property key holding per-shape measurement lists exported by annotation tools.
pub const MEASUREMENTS_KEY: &str = "measurements";

/// How to treat columns that do not have one value per geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributePolicy {
    /// Pad missing values with `null` and log a warning.
    #[default]
    Backfill,
    /// Fail with [`ShapeError::MalformedAttributes`].
    Strict,
}

/// Attribute name to values, one value per geometry, columns in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
    columns: Vec<(String, Vec<Value>)>,
    rows: usize,
}

impl AttributeTable {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(key, _)| key.as_str())
    }

    fn column_mut(&mut self, name: &str) -> &mut Vec<Value> {
        let index = match self.columns.iter().position(|(key, _)| key == name) {
            Some(index) => index,
            None => {
                self.columns.push((name.to_string(), Vec::new()));
                self.columns.len() - 1
            }
        };
        &mut self.columns[index].1
    }

    /// Append one geometry's attributes. Later entries with the same name win.
    fn push_row(&mut self, row: Vec<(String, Value)>, policy: AttributePolicy) -> Result<()> {
        let row_index = self.rows;
        self.rows += 1;
        for (name, value) in row {
            let column = self.column_mut(&name);
            if column.len() > row_index {
                column[row_index] = value;
                continue;
            }
            if column.len() < row_index {
                match policy {
                    AttributePolicy::Strict => {
                        return Err(ShapeError::MalformedAttributes {
                            column: name,
                            expected: row_index,
                            found: column.len(),
                        })
                    }
                    AttributePolicy::Backfill => {
                        warn!("Attribute `{name}` missing for {} geometries, filling with null", row_index - column.len());
                        column.resize(row_index, Value::Null);
                    }
                }
            }
            column.push(value);
        }
        self.pad(policy)
    }

    fn pad(&mut self, policy: AttributePolicy) -> Result<()> {
        let rows = self.rows;
        for (name, column) in self.columns.iter_mut().filter(|(_, c)| c.len() < rows) {
            match policy {
                AttributePolicy::Strict => {
                    return Err(ShapeError::MalformedAttributes {
                        column: name.clone(),
                        expected: rows,
                        found: column.len(),
                    })
                }
                AttributePolicy::Backfill => {
                    warn!("Attribute `{name}` missing for geometry {}, filling with null", rows - 1);
                    column.resize(rows, Value::Null);
                }
            }
        }
        Ok(())
    }
}

impl Serialize for AttributeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, values) in &self.columns {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

// List form `[{"name": .., "value": ..}]` or map form; list entries missing
// `name` or `value` are skipped, non-string names are used in their JSON form.
fn unpack_measurements(measurements: &Value, row: &mut Vec<(String, Value)>) {
    match measurements {
        Value::Array(entries) => {
            for entry in entries {
                match (entry.get("name"), entry.get("value")) {
                    (Some(Value::String(name)), Some(value)) => row.push((name.clone(), value.clone())),
                    (Some(name), Some(value)) => row.push((name.to_string(), value.clone())),
                    _ => warn!("Skipping measurement without name or value: {entry}"),
                }
            }
        }
        Value::Object(entries) => {
            row.extend(entries.iter().map(|(name, value)| (name.clone(), value.clone())));
        }
        other => row.push((MEASUREMENTS_KEY.to_string(), other.clone())),
    }
}

/// Collect the properties of every geometry into a table.
///
/// A single bare geometry without a properties map makes the whole table
/// empty rather than partially filled.
pub fn aggregate<'a>(
    geometries: impl IntoIterator<Item = &'a Geometry>,
    policy: AttributePolicy,
) -> Result<AttributeTable> {
    let mut table = AttributeTable::default();
    for geometry in geometries {
        let Some(properties) = geometry.properties() else {
            warn!("{} without properties, dropping all attributes", geometry.type_name());
            return Ok(AttributeTable::default());
        };
        let mut row = Vec::with_capacity(properties.len());
        for (key, value) in properties {
            if key == MEASUREMENTS_KEY {
                unpack_measurements(value, &mut row);
            } else {
                row.push((key.clone(), value.clone()));
            }
        }
        table.push_row(row, policy)?;
    }
    Ok(table)
}
