//! # Grader Library
//!
//! This crate scores student answers to geometry problems: angle relationships, Pythagorean
//! values, perimeters and areas (optionally with a shape constraint), and a general equality
//! fallback. Grading is a pure function of `(problem, submission)`: no I/O, no shared state,
//! no clock, so the same inputs always produce the same [`GradingResult`].
//!
//! ## Key Concepts
//! - **Dispatcher**: [`grade_problem`] parses the grading rules once and routes by problem type.
//! - **Validators**: one [`Validator`] strategy per family of problem types.
//! - **Shape constraints**: a secondary square/rectangle/triangle check worth the other half of
//!   the marks on perimeter and area problems.
//! - **Results**: always the same four-field [`GradingResult`], scored 0, 50 or 100.
//!
//! ## Example
//!
//! ```rust
//! use grader::{grade_problem, problem::Problem, rules::RawGradingRules, scorer::Score};
//! use serde_json::json;
//!
//! let problem = Problem::new(
//!     "perimeter_square",
//!     RawGradingRules::Json(
//!         r#"{"tolerance":0.01,"check_shape":true,"shape_constraint":"square"}"#.to_string(),
//!     ),
//!     json!([{ "sideLengths": [5, 5, 5, 5] }]),
//! );
//! let submission = json!({ "shapes": [{ "sideLengths": [5, 5, 5, 5] }] });
//!
//! let result = grade_problem(&problem, &submission).unwrap();
//! assert!(result.is_correct);
//! assert_eq!(result.score, Score::Full);
//! ```

pub mod error;
pub mod feedback;
pub mod measurement;
pub mod numeric;
pub mod problem;
pub mod report;
pub mod rules;
pub mod scorer;
pub mod shape;
pub mod traits;
pub mod validators;

use crate::error::GradingError;
use crate::problem::{Problem, ProblemType};
use crate::report::GradingResult;
use crate::traits::validator::{GradingContext, Validator};
use crate::validators::angle::{
    AngleSumValidator, ComplementaryAngleValidator, SupplementaryAngleValidator,
};
use crate::validators::general::GeneralValidator;
use crate::validators::measured::MeasurementValidator;
use crate::validators::pythagorean::PythagoreanValidator;
use serde_json::Value;

/// The validator responsible for a problem type.
///
/// Unrecognized types fall back to the general validator so every problem stays gradable.
pub fn validator_for(problem_type: &ProblemType) -> &'static dyn Validator {
    match problem_type {
        ProblemType::AngleComplementary => &ComplementaryAngleValidator,
        ProblemType::AngleSupplementary => &SupplementaryAngleValidator,
        ProblemType::AngleSum => &AngleSumValidator,
        ProblemType::PythagoreanTheorem => &PythagoreanValidator,
        ProblemType::Perimeter(_) => &MeasurementValidator::PERIMETER,
        ProblemType::Area(_) => &MeasurementValidator::AREA,
        ProblemType::General | ProblemType::Unrecognized(_) => &GeneralValidator,
    }
}

/// Grade one submission against a stored problem.
///
/// # Errors
///
/// Returns [`GradingError::Configuration`] when `grading_rules` is a string that is not valid
/// JSON. Oddly typed rule fields fall back to defaults, and nothing about the submission itself
/// can make grading fail.
pub fn grade_problem(problem: &Problem, submission: &Value) -> Result<GradingResult, GradingError> {
    let rules = problem.grading_rules.parse()?;
    let problem_type = problem.kind();

    if let ProblemType::Unrecognized(tag) = &problem_type {
        tracing::warn!(problem_type = %tag, "unrecognized problem type, grading with general equality");
    }

    let ctx = GradingContext {
        rules: &rules,
        expected: &problem.expected_solution,
        problem_type: &problem_type,
    };
    let result = validator_for(&problem_type).validate(&ctx, submission);

    tracing::debug!(
        ?problem_type,
        is_correct = result.is_correct,
        score = %result.score,
        "graded submission"
    );
    Ok(result)
}

/// Grade several `(problem, submission)` pairs independently.
///
/// A configuration error on one problem does not affect the others.
pub fn grade_batch(items: &[(Problem, Value)]) -> Vec<Result<GradingResult, GradingError>> {
    items
        .iter()
        .map(|(problem, submission)| grade_problem(problem, submission))
        .collect()
}
