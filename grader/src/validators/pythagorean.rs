//! Pythagorean theorem validator.
//!
//! The lesson computes which side is missing; the student only supplies its length. This
//! validator compares that single `value` and does not reason about the triangle itself.

use super::first_field;
use crate::feedback;
use crate::numeric::{parse_field, within_tolerance};
use crate::report::{GradingResult, MeasuredDetails, PropertyChecked, ValidationDetails};
use crate::rules::DEFAULT_MEASUREMENT_TOLERANCE;
use crate::scorer::Score;
use crate::traits::validator::{GradingContext, Validator};
use serde_json::Value;

pub struct PythagoreanValidator;

impl Validator for PythagoreanValidator {
    fn validate(&self, ctx: &GradingContext<'_>, submission: &Value) -> GradingResult {
        let submitted = parse_field(first_field(submission, &["value"]));
        let expected = parse_field(first_field(ctx.expected, &["value"]));
        let tolerance = ctx.rules.tolerance_or(DEFAULT_MEASUREMENT_TOLERANCE);
        let is_correct = within_tolerance(submitted, expected, tolerance);

        GradingResult {
            is_correct,
            score: Score::binary(is_correct),
            feedback: feedback::pythagorean(is_correct, submitted, expected),
            validation_details: ValidationDetails::Measured(MeasuredDetails {
                property_checked: PropertyChecked::PythagoreanTheorem,
                submitted_value: submitted,
                expected_value: expected,
                tolerance,
                difference: None,
                shape_validation: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ProblemType;
    use crate::rules::GradingRules;
    use crate::validators::test_support::run;
    use serde_json::json;

    fn grade(expected: Value, submission: Value) -> GradingResult {
        run(
            &PythagoreanValidator,
            &GradingRules::default(),
            ProblemType::PythagoreanTheorem,
            &expected,
            &submission,
        )
    }

    #[test]
    fn test_hypotenuse_matches() {
        let result = grade(json!({ "value": 5 }), json!({ "value": 5.0 }));
        assert!(result.is_correct);
        assert_eq!(result.score, Score::Full);
        assert_eq!(result.feedback, "Correct! The value is 5.");
    }

    #[test]
    fn test_default_tolerance_is_tight() {
        let root_two = 2f64.sqrt();
        assert!(grade(json!({ "value": root_two }), json!({ "value": "1.41" })).is_correct);
        assert!(!grade(json!({ "value": root_two }), json!({ "value": "1.4" })).is_correct);
    }

    #[test]
    fn test_details_have_four_fields() {
        let result = grade(json!({ "value": 13 }), json!({ "value": 12 }));
        assert!(!result.is_correct);
        let value = serde_json::to_value(&result.validation_details).unwrap();
        let details = value.as_object().unwrap();
        assert_eq!(details.len(), 4);
        assert_eq!(details["property_checked"], "pythagorean_theorem");
        assert_eq!(details["submitted_value"], 12.0);
        assert_eq!(details["expected_value"], 13.0);
        assert_eq!(details["tolerance"], 0.01);
    }

    #[test]
    fn test_angle_field_is_not_read() {
        let result = grade(json!({ "value": 5 }), json!({ "angle": 5 }));
        assert!(!result.is_correct);
    }
}
