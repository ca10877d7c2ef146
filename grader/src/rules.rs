//! Typed grading configuration.
//!
//! Problems store their grading options in a loosely defined `grading_rules` blob that may arrive
//! already structured or as a JSON-encoded string. [`RawGradingRules`] captures both encodings and
//! [`RawGradingRules::parse`] turns them into a [`GradingRules`] once, at the dispatcher boundary.
//! Validators only ever see the typed form.
//!
//! Only text that is not JSON fails to parse. Fields are read leniently: null or missing fields
//! take their defaults, flags follow JSON truthiness, and tolerances are coerced with
//! [`parse_number`] like every other number.
//!
//! ```json
//! {
//!   "tolerance": 0.01,
//!   "check_shape": true,
//!   "shape_constraint": "rectangle",
//!   "required_properties": { "tolerance": 0.05, "reject_square": true }
//! }
//! ```

use crate::error::GradingError;
use crate::numeric::parse_number;
use crate::shape::Point;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Default tolerance for angle answers, in degrees.
pub const DEFAULT_ANGLE_TOLERANCE: f64 = 0.1;
/// Default tolerance for perimeter, area and Pythagorean answers.
pub const DEFAULT_MEASUREMENT_TOLERANCE: f64 = 0.01;
/// Default tolerance used when comparing side lengths inside a shape check.
pub const DEFAULT_SHAPE_TOLERANCE: f64 = 0.01;
/// Default tolerance for each corner of a right-angle check, in degrees.
pub const DEFAULT_RIGHT_ANGLE_TOLERANCE: f64 = 0.5;

/// `grading_rules` as stored on the problem record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawGradingRules {
    /// Null or absent.
    #[default]
    Missing,
    /// A JSON-encoded string that still has to be parsed.
    Json(String),
    /// An already structured value.
    Structured(Value),
}

impl RawGradingRules {
    /// Parse into typed rules.
    ///
    /// # Errors
    ///
    /// Returns [`GradingError::Configuration`] when the string is not valid JSON.
    /// Anything that is not an object (a number, an array, `"null"`) yields the defaults.
    pub fn parse(&self) -> Result<GradingRules, GradingError> {
        let parsed;
        let value = match self {
            RawGradingRules::Missing => return Ok(GradingRules::default()),
            RawGradingRules::Json(s) => {
                parsed = serde_json::from_str::<Value>(s)?;
                &parsed
            }
            RawGradingRules::Structured(v) => v,
        };

        if !value.is_object() {
            return Ok(GradingRules::default());
        }
        Ok(GradingRules::deserialize(value)?)
    }
}

/// Shape a perimeter/area answer must also form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeConstraint {
    Square,
    Rectangle,
    Triangle,
    /// Any other tag; treated as "no constraint".
    Other(String),
}

impl From<&str> for ShapeConstraint {
    fn from(tag: &str) -> Self {
        match tag {
            "square" => ShapeConstraint::Square,
            "rectangle" => ShapeConstraint::Rectangle,
            "triangle" => ShapeConstraint::Triangle,
            other => ShapeConstraint::Other(other.to_string()),
        }
    }
}

impl ShapeConstraint {
    pub fn as_str(&self) -> &str {
        match self {
            ShapeConstraint::Square => "square",
            ShapeConstraint::Rectangle => "rectangle",
            ShapeConstraint::Triangle => "triangle",
            ShapeConstraint::Other(tag) => tag,
        }
    }
}

/// Empty strings, null and non-strings all mean "no constraint configured".
fn deserialize_constraint<'de, D>(deserializer: D) -> Result<Option<ShapeConstraint>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(tag)) if !tag.is_empty() => Some(ShapeConstraint::from(tag.as_str())),
        _ => None,
    })
}

/// Null reads as unset; numeric strings are coerced. Unparsable values also read as unset.
fn deserialize_tolerance<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| parse_number(&v)).filter(|t| !t.is_nan()))
}

/// JSON truthiness: null, `false`, `0` and `""` are off, anything else is on.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|x| x != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    })
}

fn deserialize_comparison<'de, D>(deserializer: D) -> Result<ComparisonMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

/// Only an array made entirely of `{x, y}` points counts.
fn deserialize_vertices<'de, D>(deserializer: D) -> Result<Option<Vec<Point>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_array)
        .and_then(|items| items.iter().map(Point::from_value).collect()))
}

/// A non-object `required_properties` reads as "none required".
fn deserialize_properties<'de, D>(deserializer: D) -> Result<RequiredProperties, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value) if value.is_object() => {
            RequiredProperties::deserialize(&value).map_err(serde::de::Error::custom)
        }
        _ => Ok(RequiredProperties::default()),
    }
}

/// How the general validator compares a submission with the expected solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMode {
    /// Serialized-string equality; key order and number formatting matter.
    #[default]
    Strict,
    /// Deep structural equality ignoring key order, numbers compared within tolerance.
    Semantic,
}

/// Extra properties consulted by the shape constraint check.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequiredProperties {
    #[serde(default, deserialize_with = "deserialize_tolerance")]
    pub tolerance: Option<f64>,

    /// Verify right angles from `vertices` for squares and rectangles.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub check_angles: bool,

    /// Allowed deviation of each corner from 90 degrees.
    #[serde(default, deserialize_with = "deserialize_tolerance")]
    pub angle_tolerance: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_vertices")]
    pub vertices: Option<Vec<Point>>,

    /// Reject rectangles whose four sides are all equal.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub reject_square: bool,
}

impl RequiredProperties {
    pub fn shape_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_SHAPE_TOLERANCE)
    }

    pub fn right_angle_tolerance(&self) -> f64 {
        self.angle_tolerance.unwrap_or(DEFAULT_RIGHT_ANGLE_TOLERANCE)
    }
}

/// Parsed `grading_rules` of a problem.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GradingRules {
    #[serde(default, deserialize_with = "deserialize_tolerance")]
    pub tolerance: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub check_shape: bool,

    #[serde(default, deserialize_with = "deserialize_constraint")]
    pub shape_constraint: Option<ShapeConstraint>,

    #[serde(default, deserialize_with = "deserialize_properties")]
    pub required_properties: RequiredProperties,

    #[serde(default, deserialize_with = "deserialize_comparison")]
    pub comparison: ComparisonMode,
}

impl GradingRules {
    /// Configured tolerance, or the validator's own default.
    pub fn tolerance_or(&self, default: f64) -> f64 {
        self.tolerance.unwrap_or(default)
    }

    /// The constraint to enforce, if shape checking is switched on and a shape is named.
    pub fn active_constraint(&self) -> Option<&ShapeConstraint> {
        if self.check_shape {
            self.shape_constraint.as_ref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_rules_use_defaults() {
        let rules = RawGradingRules::Missing.parse().unwrap();
        assert_eq!(rules, GradingRules::default());
        assert_eq!(rules.tolerance_or(DEFAULT_ANGLE_TOLERANCE), 0.1);
        assert!(rules.active_constraint().is_none());
    }

    #[test]
    fn test_json_string_rules() {
        let raw = RawGradingRules::Json(
            r#"{"tolerance":0.05,"check_shape":true,"shape_constraint":"square"}"#.to_string(),
        );
        let rules = raw.parse().unwrap();
        assert_eq!(rules.tolerance, Some(0.05));
        assert_eq!(rules.active_constraint(), Some(&ShapeConstraint::Square));
    }

    #[test]
    fn test_structured_rules_with_required_properties() {
        let raw = RawGradingRules::Structured(json!({
            "check_shape": true,
            "shape_constraint": "rectangle",
            "required_properties": { "tolerance": 0.2, "reject_square": true }
        }));
        let rules = raw.parse().unwrap();
        assert_eq!(rules.shape_constraint, Some(ShapeConstraint::Rectangle));
        assert!(rules.required_properties.reject_square);
        assert_eq!(rules.required_properties.shape_tolerance(), 0.2);
        assert_eq!(
            rules.required_properties.right_angle_tolerance(),
            DEFAULT_RIGHT_ANGLE_TOLERANCE
        );
    }

    #[test]
    fn test_angle_tolerance_is_separate_from_side_tolerance() {
        let raw = RawGradingRules::Structured(json!({
            "required_properties": { "tolerance": 0.5, "angle_tolerance": 2 }
        }));
        let props = raw.parse().unwrap().required_properties;
        assert_eq!(props.shape_tolerance(), 0.5);
        assert_eq!(props.right_angle_tolerance(), 2.0);
    }

    #[test]
    fn test_malformed_json_string_is_configuration_error() {
        let raw = RawGradingRules::Json("{\"tolerance\":".to_string());
        assert!(matches!(raw.parse(), Err(GradingError::Configuration(_))));
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let raw = RawGradingRules::Structured(json!({
            "tolerance": null,
            "check_shape": null,
            "shape_constraint": null,
            "required_properties": null,
            "comparison": null
        }));
        assert_eq!(raw.parse().unwrap(), GradingRules::default());

        let raw = RawGradingRules::Json(
            r#"{"check_shape":true,"shape_constraint":"square","required_properties":{"check_angles":null,"tolerance":null}}"#
                .to_string(),
        );
        let rules = raw.parse().unwrap();
        assert_eq!(rules.active_constraint(), Some(&ShapeConstraint::Square));
        assert!(!rules.required_properties.check_angles);
        assert_eq!(rules.required_properties.shape_tolerance(), DEFAULT_SHAPE_TOLERANCE);
    }

    #[test]
    fn test_string_tolerance_is_coerced() {
        let raw = RawGradingRules::Structured(json!({
            "tolerance": "0.5",
            "required_properties": { "tolerance": "0.2mm" }
        }));
        let rules = raw.parse().unwrap();
        assert_eq!(rules.tolerance, Some(0.5));
        assert_eq!(rules.required_properties.shape_tolerance(), 0.2);
    }

    #[test]
    fn test_unparsable_tolerance_falls_back_to_default() {
        let raw = RawGradingRules::Structured(json!({ "tolerance": "loose" }));
        let rules = raw.parse().unwrap();
        assert_eq!(rules.tolerance, None);
        assert_eq!(rules.tolerance_or(DEFAULT_MEASUREMENT_TOLERANCE), 0.01);
    }

    #[test]
    fn test_flags_follow_json_truthiness() {
        let raw = RawGradingRules::Structured(json!({
            "check_shape": 1,
            "shape_constraint": "rectangle",
            "required_properties": { "reject_square": "yes", "check_angles": 0 }
        }));
        let rules = raw.parse().unwrap();
        assert!(rules.check_shape);
        assert!(rules.required_properties.reject_square);
        assert!(!rules.required_properties.check_angles);
    }

    #[test]
    fn test_oddly_typed_fields_never_fail() {
        let raw = RawGradingRules::Structured(json!({
            "shape_constraint": 4,
            "required_properties": "strict",
            "comparison": "fuzzy"
        }));
        let rules = raw.parse().unwrap();
        assert!(rules.shape_constraint.is_none());
        assert_eq!(rules.required_properties, RequiredProperties::default());
        assert_eq!(rules.comparison, ComparisonMode::Strict);
    }

    #[test]
    fn test_non_object_rules_use_defaults() {
        for raw in [
            RawGradingRules::Json("5".to_string()),
            RawGradingRules::Json("null".to_string()),
            RawGradingRules::Structured(json!([1, 2])),
        ] {
            assert_eq!(raw.parse().unwrap(), GradingRules::default());
        }
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let raw = RawGradingRules::Structured(json!({ "hint": "use a ruler", "tolerance": 1 }));
        assert_eq!(raw.parse().unwrap().tolerance, Some(1.0));
    }

    #[test]
    fn test_empty_constraint_is_unset() {
        let raw = RawGradingRules::Structured(json!({ "check_shape": true, "shape_constraint": "" }));
        let rules = raw.parse().unwrap();
        assert!(rules.shape_constraint.is_none());
        assert!(rules.active_constraint().is_none());
    }

    #[test]
    fn test_constraint_ignored_without_check_shape() {
        let raw = RawGradingRules::Structured(json!({ "shape_constraint": "triangle" }));
        let rules = raw.parse().unwrap();
        assert_eq!(rules.shape_constraint, Some(ShapeConstraint::Triangle));
        assert!(rules.active_constraint().is_none());
    }

    #[test]
    fn test_unrecognized_constraint_is_kept() {
        let raw = RawGradingRules::Structured(json!({ "shape_constraint": "hexagon" }));
        let rules = raw.parse().unwrap();
        assert_eq!(
            rules.shape_constraint,
            Some(ShapeConstraint::Other("hexagon".to_string()))
        );
    }

    #[test]
    fn test_raw_rules_deserialize_from_either_encoding() {
        let from_string: RawGradingRules = serde_json::from_value(json!("{\"tolerance\":1}")).unwrap();
        assert!(matches!(from_string, RawGradingRules::Json(_)));
        let from_object: RawGradingRules = serde_json::from_value(json!({"tolerance": 1})).unwrap();
        assert!(matches!(from_object, RawGradingRules::Structured(_)));
        let from_null: RawGradingRules = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(from_null, RawGradingRules::Missing);
    }

    #[test]
    fn test_comparison_mode() {
        let raw = RawGradingRules::Structured(json!({ "comparison": "semantic" }));
        assert_eq!(raw.parse().unwrap().comparison, ComparisonMode::Semantic);
    }
}
