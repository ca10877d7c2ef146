//! Canonical form for perimeter and area answers.
//!
//! Over time the lesson editors have produced two encodings for geometric answers:
//!
//! - **shapes array**: `{ "shapes": [{ "sideLengths": [3, 4, 5] }] }`, or a bare array of shape
//!   descriptors (how expected solutions are usually stored);
//! - **legacy**: flat fields on the object, `{ "perimeter": 12, "sides": [3, 4, 5] }`.
//!
//! [`Measurement::from_value`] sniffs the encoding once and every validator reads from the
//! normalized [`Measurement`] afterwards.

use crate::numeric::{parse_field, parse_number};
use crate::shape::{Point, ShapeData};
use serde_json::{Map, Value};

/// One shape drawn or described by a student. Missing numbers read as `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDescriptor {
    pub perimeter: f64,
    pub area: f64,
    pub side_lengths: Option<Vec<f64>>,
    pub vertices: Option<Vec<Point>>,
}

impl ShapeDescriptor {
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(obj) => Self::from_map(obj),
            None => Self {
                perimeter: f64::NAN,
                area: f64::NAN,
                side_lengths: None,
                vertices: None,
            },
        }
    }

    fn from_map(obj: &Map<String, Value>) -> Self {
        let side_lengths = obj
            .get("sideLengths")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(parse_number).collect());
        let vertices = obj
            .get("vertices")
            .and_then(Value::as_array)
            .and_then(|items| items.iter().map(Point::from_value).collect());

        Self {
            perimeter: parse_field(obj.get("perimeter")),
            area: parse_field(obj.get("area")),
            side_lengths,
            vertices,
        }
    }

    /// Sum of the side lengths when present, otherwise the stated perimeter.
    pub fn perimeter(&self) -> f64 {
        match &self.side_lengths {
            Some(sides) => sides.iter().sum(),
            None => self.perimeter,
        }
    }

    pub fn shape_data(&self) -> Option<ShapeData> {
        if let Some(points) = &self.vertices {
            return Some(ShapeData::Vertices(points.clone()));
        }
        self.side_lengths.clone().map(ShapeData::Sides)
    }
}

/// Flat fields of the legacy encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyMeasurement {
    pub perimeter: f64,
    pub area: f64,
    pub shape_data: Option<ShapeData>,
}

impl LegacyMeasurement {
    pub fn from_value(value: &Value) -> Self {
        let obj = value.as_object();
        let field = |name: &str| obj.and_then(|o| o.get(name)).filter(|v| !v.is_null());

        Self {
            perimeter: parse_field(field("perimeter")),
            area: parse_field(field("area")),
            shape_data: top_level_shape_data(value),
        }
    }
}

/// `vertices ?? sides` read from the top level of an answer object.
fn top_level_shape_data(value: &Value) -> Option<ShapeData> {
    let obj = value.as_object()?;
    let field = |name: &str| obj.get(name).filter(|v| !v.is_null());
    field("vertices")
        .or_else(|| field("sides"))
        .and_then(ShapeData::from_value)
}

/// A perimeter/area answer in either encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    /// `shape_data` holds top-level `vertices`/`sides` sent alongside the shapes, if any.
    ShapeArray {
        shapes: Vec<ShapeDescriptor>,
        shape_data: Option<ShapeData>,
    },
    Legacy(LegacyMeasurement),
}

impl Measurement {
    pub fn from_value(value: &Value) -> Self {
        let shapes = match value {
            Value::Array(items) => Some(items),
            Value::Object(obj) => obj.get("shapes").and_then(Value::as_array),
            _ => None,
        };

        match shapes {
            Some(items) if !items.is_empty() => Measurement::ShapeArray {
                shapes: items.iter().map(ShapeDescriptor::from_value).collect(),
                shape_data: top_level_shape_data(value),
            },
            _ => Measurement::Legacy(LegacyMeasurement::from_value(value)),
        }
    }

    /// Only the first shape of a shapes array is graded.
    fn first_shape(&self) -> Option<&ShapeDescriptor> {
        match self {
            Measurement::ShapeArray { shapes, .. } => shapes.first(),
            Measurement::Legacy(_) => None,
        }
    }

    pub fn perimeter(&self) -> f64 {
        match self {
            Measurement::Legacy(flat) => flat.perimeter,
            _ => self.first_shape().map_or(f64::NAN, ShapeDescriptor::perimeter),
        }
    }

    /// Areas are read as stated; they are never derived from side lengths.
    pub fn area(&self) -> f64 {
        match self {
            Measurement::Legacy(flat) => flat.area,
            _ => self.first_shape().map_or(f64::NAN, |s| s.area),
        }
    }

    /// Geometry to run a shape constraint check against.
    ///
    /// Top-level `vertices ?? sides` come first; a shapes array falls back to its first shape.
    pub fn shape_data(&self) -> Option<ShapeData> {
        match self {
            Measurement::Legacy(flat) => flat.shape_data.clone(),
            Measurement::ShapeArray { shape_data, .. } => shape_data
                .clone()
                .or_else(|| self.first_shape().and_then(ShapeDescriptor::shape_data)),
        }
    }
}
