//! Attribute tree used to persist objects.
//!
//! An [`ObjectNode`] is an ordered list of named attributes, each carrying
//! one or more typed data values. Nodes serialize to JSON for storage.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Attribute access errors.
#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("attribute has no data")]
    Empty,
    #[error("expected {expected} data, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("unknown object type: {0}")]
    UnknownType(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for attribute operations.
pub type AttributeResult<T> = Result<T, AttributeError>;

/// A single typed value stored in an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DataValue {
    Real(f64),
    Int(i64),
    Bool(bool),
    String(String),
    Point(Point),
    Rectangle(Rect),
}

impl DataValue {
    /// Name of the data type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Real(_) => "real",
            DataValue::Int(_) => "int",
            DataValue::Bool(_) => "bool",
            DataValue::String(_) => "string",
            DataValue::Point(_) => "point",
            DataValue::Rectangle(_) => "rectangle",
        }
    }
}

/// A named attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub data: Vec<DataValue>,
}

impl Attribute {
    /// The first data value, if any.
    pub fn first_data(&self) -> Option<&DataValue> {
        self.data.first()
    }
}

/// Serialized form of one object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectNode {
    /// Registered type name of the object, e.g. `"Standard - Box"`.
    pub type_name: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    attributes: Vec<Attribute>,
}

impl ObjectNode {
    /// Create an empty node for an object type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            version: 0,
            attributes: Vec::new(),
        }
    }

    /// Start a fresh attribute named `name` and return it for filling.
    ///
    /// An existing attribute with the same name is emptied and reused.
    pub fn new_attribute(&mut self, name: &str) -> &mut Attribute {
        match self.attributes.iter().position(|a| a.name == name) {
            Some(index) => {
                let attr = &mut self.attributes[index];
                attr.data.clear();
                attr
            }
            None => {
                self.attributes.push(Attribute {
                    name: name.to_string(),
                    data: Vec::new(),
                });
                let last = self.attributes.len() - 1;
                &mut self.attributes[last]
            }
        }
    }

    /// Find an attribute by name.
    pub fn find_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// All attributes in insertion order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> AttributeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> AttributeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the node as JSON to `path`.
    pub fn write_to(&self, path: &Path) -> AttributeResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a node from a JSON file.
    pub fn read_from(path: &Path) -> AttributeResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

pub fn data_add_point(attr: &mut Attribute, point: Point) {
    attr.data.push(DataValue::Point(point));
}

pub fn data_add_real(attr: &mut Attribute, value: f64) {
    attr.data.push(DataValue::Real(value));
}

pub fn data_add_int(attr: &mut Attribute, value: i64) {
    attr.data.push(DataValue::Int(value));
}

pub fn data_add_rectangle(attr: &mut Attribute, rect: Rect) {
    attr.data.push(DataValue::Rectangle(rect));
}

/// Read a point.
pub fn data_point(data: &DataValue) -> AttributeResult<Point> {
    match data {
        DataValue::Point(p) => Ok(*p),
        other => Err(wrong_type("point", other)),
    }
}

/// Read a real. Integers are widened.
pub fn data_real(data: &DataValue) -> AttributeResult<f64> {
    match data {
        DataValue::Real(v) => Ok(*v),
        DataValue::Int(v) => Ok(*v as f64),
        other => Err(wrong_type("real", other)),
    }
}

/// Read an integer.
pub fn data_int(data: &DataValue) -> AttributeResult<i64> {
    match data {
        DataValue::Int(v) => Ok(*v),
        other => Err(wrong_type("int", other)),
    }
}

/// Read a rectangle.
pub fn data_rectangle(data: &DataValue) -> AttributeResult<Rect> {
    match data {
        DataValue::Rectangle(r) => Ok(*r),
        other => Err(wrong_type("rectangle", other)),
    }
}

fn wrong_type(expected: &'static str, found: &DataValue) -> AttributeError {
    AttributeError::WrongType {
        expected,
        found: found.type_name(),
    }
}

/// Read attribute `name` with `read`, falling back to `default`.
///
/// A missing attribute yields the default silently. An attribute that is
/// present but empty or of the wrong type is logged and also defaults.
pub fn read_or<T>(
    node: &ObjectNode,
    name: &str,
    default: T,
    read: impl FnOnce(&DataValue) -> AttributeResult<T>,
) -> T {
    let Some(attr) = node.find_attribute(name) else {
        return default;
    };
    match attr.first_data().ok_or(AttributeError::Empty).and_then(read) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Attribute '{}' of {}: {}", name, node.type_name, e);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_attribute_and_find() {
        let mut node = ObjectNode::new("Test");
        data_add_real(node.new_attribute("width"), 2.5);
        let attr = node.find_attribute("width").unwrap();
        assert_eq!(attr.first_data(), Some(&DataValue::Real(2.5)));
        assert!(node.find_attribute("height").is_none());
    }

    #[test]
    fn test_new_attribute_replaces_existing() {
        let mut node = ObjectNode::new("Test");
        data_add_real(node.new_attribute("width"), 1.0);
        data_add_real(node.new_attribute("width"), 3.0);
        assert_eq!(node.attributes().len(), 1);
        let data = node.find_attribute("width").unwrap().first_data().unwrap();
        assert_eq!(data_real(data).unwrap(), 3.0);
    }

    #[test]
    fn test_data_real_widens_int() {
        assert_eq!(data_real(&DataValue::Int(4)).unwrap(), 4.0);
    }

    #[test]
    fn test_wrong_type() {
        let err = data_point(&DataValue::Real(1.0)).unwrap_err();
        assert!(matches!(
            err,
            AttributeError::WrongType { expected: "point", found: "real" }
        ));
    }

    #[test]
    fn test_read_or_defaults() {
        let mut node = ObjectNode::new("Test");
        node.new_attribute("empty");
        data_add_point(node.new_attribute("bad"), Point::new(1.0, 1.0));

        assert_eq!(read_or(&node, "missing", 1.0, data_real), 1.0);
        assert_eq!(read_or(&node, "empty", 1.0, data_real), 1.0);
        assert_eq!(read_or(&node, "bad", 1.0, data_real), 1.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut node = ObjectNode::new("Test");
        data_add_point(node.new_attribute("corner"), Point::new(0.1, -7.3));
        data_add_rectangle(node.new_attribute("bb"), Rect::new(0.0, 1.0, 2.0, 3.0));
        let json = node.to_json().unwrap();
        assert_eq!(ObjectNode::from_json(&json).unwrap(), node);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("node.json");
        let mut node = ObjectNode::new("Test");
        data_add_int(node.new_attribute("aspect"), 2);
        node.write_to(&path).unwrap();
        assert_eq!(ObjectNode::read_from(&path).unwrap(), node);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let result = ObjectNode::read_from(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(AttributeError::Io(_))));
    }
}
