//! Problem records and problem type tags.

use crate::error::GradingError;
use crate::rules::RawGradingRules;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shape named by a shape-specific problem type alias such as `perimeter_square`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Square,
    Rectangle,
    Triangle,
}

/// What kind of answer a problem expects, parsed from its `problem_type` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemType {
    AngleComplementary,
    AngleSupplementary,
    AngleSum,
    PythagoreanTheorem,
    /// `perimeter` or one of its shape aliases. The shape hint is carried along but not
    /// consulted by grading; constraints come from `grading_rules`.
    Perimeter(Option<ShapeKind>),
    Area(Option<ShapeKind>),
    /// Explicit `general`, or no tag at all.
    General,
    /// A tag this grader does not know. Graded like [`ProblemType::General`].
    Unrecognized(String),
}

impl ProblemType {
    pub fn parse(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return ProblemType::General;
        };
        match tag {
            "angle_complementary" => ProblemType::AngleComplementary,
            "angle_supplementary" => ProblemType::AngleSupplementary,
            "angle_sum" => ProblemType::AngleSum,
            "pythagorean_theorem" => ProblemType::PythagoreanTheorem,
            "perimeter" => ProblemType::Perimeter(None),
            "perimeter_square" => ProblemType::Perimeter(Some(ShapeKind::Square)),
            "perimeter_rectangle" => ProblemType::Perimeter(Some(ShapeKind::Rectangle)),
            "perimeter_triangle" => ProblemType::Perimeter(Some(ShapeKind::Triangle)),
            "area" => ProblemType::Area(None),
            "area_square" => ProblemType::Area(Some(ShapeKind::Square)),
            "area_rectangle" => ProblemType::Area(Some(ShapeKind::Rectangle)),
            "area_triangle" => ProblemType::Area(Some(ShapeKind::Triangle)),
            "general" => ProblemType::General,
            other => ProblemType::Unrecognized(other.to_string()),
        }
    }
}

/// A stored problem, as handed over by the submission service.
///
/// Only the fields the grader reads are modelled; anything else on the record is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default)]
    pub problem_type: Option<String>,

    #[serde(default)]
    pub grading_rules: RawGradingRules,

    #[serde(default)]
    pub expected_solution: Value,
}

impl Problem {
    pub fn new(
        problem_type: impl Into<String>,
        grading_rules: RawGradingRules,
        expected_solution: Value,
    ) -> Self {
        Self {
            problem_type: Some(problem_type.into()),
            grading_rules,
            expected_solution,
        }
    }

    /// Build a problem from an untyped record.
    pub fn from_value(value: Value) -> Result<Self, GradingError> {
        serde_json::from_value(value).map_err(|e| GradingError::InvalidProblem(e.to_string()))
    }

    /// Build a problem from its JSON text, as stored by the submission service.
    pub fn from_json_str(raw: &str) -> Result<Self, GradingError> {
        serde_json::from_str(raw).map_err(|e| GradingError::InvalidProblem(e.to_string()))
    }

    pub fn kind(&self) -> ProblemType {
        ProblemType::parse(self.problem_type.as_deref())
    }
}
