//! # Shape Constraint Validator
//!
//! Checks whether a set of side lengths (or polygon vertices) forms the shape a problem asks
//! for. Used by the perimeter and area validators as a secondary gate once the measurement
//! itself is already correct.
//!
//! ## Rules
//!
//! - **square**: exactly 4 sides, all mutually equal within tolerance; optionally four right angles.
//! - **rectangle**: exactly 4 sides, opposite sides equal; optionally not a square; optionally
//!   four right angles.
//! - **triangle**: exactly 3 sides satisfying the triangle inequality.
//! - anything else: no constraint, always valid.
//!
//! Failures are returned as data in a [`ShapeValidation`]; this module never panics or errors.

use crate::numeric::{parse_number, within_tolerance};
use crate::rules::{RequiredProperties, ShapeConstraint};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A polygon vertex in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Read `{ "x": .., "y": .. }`, coercing both coordinates leniently.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            x: parse_number(obj.get("x")?),
            y: parse_number(obj.get("y")?),
        })
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Raw geometry submitted for a shape check.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeData {
    Sides(Vec<f64>),
    Vertices(Vec<Point>),
}

impl ShapeData {
    /// Accepts a bare array of numbers, an array of points, or an object carrying a
    /// `sides` or `vertices` array. Returns `None` for anything else.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Self::from_items(items),
            Value::Object(obj) => obj
                .get("sides")
                .or_else(|| obj.get("vertices"))
                .and_then(Self::from_value),
            _ => None,
        }
    }

    fn from_items(items: &[Value]) -> Option<Self> {
        if !items.is_empty() && items.iter().all(Value::is_object) {
            let points = items.iter().map(Point::from_value).collect::<Option<Vec<_>>>()?;
            return Some(ShapeData::Vertices(points));
        }
        Some(ShapeData::Sides(items.iter().map(parse_number).collect()))
    }

    /// Side lengths in order. Vertices are walked as a closed polygon.
    pub fn side_lengths(&self) -> Vec<f64> {
        match self {
            ShapeData::Sides(sides) => sides.clone(),
            ShapeData::Vertices(points) => points
                .iter()
                .enumerate()
                .map(|(i, p)| p.distance_to(&points[(i + 1) % points.len()]))
                .collect(),
        }
    }

    pub fn vertices(&self) -> Option<&[Point]> {
        match self {
            ShapeData::Vertices(points) => Some(points),
            ShapeData::Sides(_) => None,
        }
    }
}

/// Outcome of a shape check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ShapeValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}

/// Validate `data` against `constraint`.
///
/// `props.vertices` takes precedence over vertices carried by `data` for the right-angle check.
pub fn validate_shape(
    data: Option<&ShapeData>,
    constraint: Option<&ShapeConstraint>,
    props: &RequiredProperties,
) -> ShapeValidation {
    let Some(data) = data else {
        return ShapeValidation::invalid("No shape data provided");
    };

    let sides = data.side_lengths();
    let vertices = props.vertices.as_deref().or_else(|| data.vertices());

    let result = match constraint {
        Some(ShapeConstraint::Square) => validate_square(&sides, vertices, props),
        Some(ShapeConstraint::Rectangle) => validate_rectangle(&sides, vertices, props),
        Some(ShapeConstraint::Triangle) => validate_triangle(&sides),
        Some(ShapeConstraint::Other(_)) | None => Ok(()),
    };

    match result {
        Ok(()) => ShapeValidation::valid(),
        Err(error) => {
            tracing::debug!(
                shape = constraint.map(ShapeConstraint::as_str).unwrap_or("none"),
                %error,
                "shape constraint rejected"
            );
            ShapeValidation::invalid(error)
        }
    }
}

fn validate_square(
    sides: &[f64],
    vertices: Option<&[Point]>,
    props: &RequiredProperties,
) -> Result<(), String> {
    expect_side_count("square", sides, 4)?;
    expect_positive(sides)?;

    let tolerance = props.shape_tolerance();
    if !all_equal(sides, tolerance) {
        return Err("A square must have all sides equal. The provided sides appear to be a \
                    rectangle or other quadrilateral"
            .to_string());
    }

    if props.check_angles {
        if let Some(points) = vertices {
            check_right_angles("square", points, props.right_angle_tolerance())?;
        }
    }
    Ok(())
}

fn validate_rectangle(
    sides: &[f64],
    vertices: Option<&[Point]>,
    props: &RequiredProperties,
) -> Result<(), String> {
    expect_side_count("rectangle", sides, 4)?;
    expect_positive(sides)?;

    let tolerance = props.shape_tolerance();
    let opposite_equal = within_tolerance(sides[0], sides[2], tolerance)
        && within_tolerance(sides[1], sides[3], tolerance);
    if !opposite_equal {
        return Err("A rectangle must have opposite sides equal".to_string());
    }

    if props.reject_square && all_equal(sides, tolerance) {
        return Err("This is a square, not a rectangle".to_string());
    }

    if props.check_angles {
        if let Some(points) = vertices {
            check_right_angles("rectangle", points, props.right_angle_tolerance())?;
        }
    }
    Ok(())
}

fn validate_triangle(sides: &[f64]) -> Result<(), String> {
    expect_side_count("triangle", sides, 3)?;
    expect_positive(sides)?;

    let (a, b, c) = (sides[0], sides[1], sides[2]);
    if a + b <= c || b + c <= a || a + c <= b {
        return Err("The provided sides do not satisfy the triangle inequality".to_string());
    }
    Ok(())
}

fn expect_side_count(shape: &str, sides: &[f64], expected: usize) -> Result<(), String> {
    if sides.len() == expected {
        Ok(())
    } else {
        Err(format!(
            "A {shape} must have exactly {expected} sides, but {} were provided",
            sides.len()
        ))
    }
}

fn expect_positive(sides: &[f64]) -> Result<(), String> {
    if sides.iter().all(|s| s.is_finite() && *s > 0.0) {
        Ok(())
    } else {
        Err("Side lengths must be positive numbers".to_string())
    }
}

fn all_equal(sides: &[f64], tolerance: f64) -> bool {
    sides.iter().enumerate().all(|(i, a)| {
        sides[i + 1..]
            .iter()
            .all(|b| within_tolerance(*a, *b, tolerance))
    })
}

/// Every corner of a quadrilateral must be perpendicular: the angle between the two edges
/// meeting at a vertex has to be within `tolerance_degrees` of 90.
fn check_right_angles(shape: &str, points: &[Point], tolerance_degrees: f64) -> Result<(), String> {
    if points.len() != 4 {
        return Err(format!(
            "A right-angle check needs exactly 4 vertices, but {} were provided",
            points.len()
        ));
    }

    let n = points.len();
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];

        let (ux, uy) = (prev.x - cur.x, prev.y - cur.y);
        let (vx, vy) = (next.x - cur.x, next.y - cur.y);
        let norm = ux.hypot(uy) * vx.hypot(vy);
        if norm.is_nan() || norm <= 0.0 {
            return Err(format!("A {shape} cannot have coincident vertices"));
        }

        let cosine = ((ux * vx + uy * vy) / norm).clamp(-1.0, 1.0);
        let corner = cosine.acos().to_degrees();
        if !within_tolerance(corner, 90.0, tolerance_degrees) {
            return Err(format!("A {shape} must have four right angles"));
        }
    }
    Ok(())
}
