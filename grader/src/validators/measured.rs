//! Perimeter and area validator.
//!
//! Both submission and expected solution are normalized through [`Measurement`], compared within
//! tolerance, and only then (when the rules ask for it) checked against a shape constraint.
//! A wrong value fails fast: the shape is never looked at and no partial credit is given.

use crate::feedback;
use crate::measurement::Measurement;
use crate::numeric::within_tolerance;
use crate::report::{GradingResult, MeasuredDetails, PropertyChecked, ValidationDetails};
use crate::rules::DEFAULT_MEASUREMENT_TOLERANCE;
use crate::scorer::Score;
use crate::shape::validate_shape;
use crate::traits::validator::{GradingContext, Validator};
use serde_json::Value;

/// Grades a perimeter or an area, depending on `property`.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementValidator {
    property: PropertyChecked,
}

impl MeasurementValidator {
    pub const PERIMETER: MeasurementValidator = MeasurementValidator {
        property: PropertyChecked::Perimeter,
    };

    pub const AREA: MeasurementValidator = MeasurementValidator {
        property: PropertyChecked::Area,
    };

    fn read(&self, measurement: &Measurement) -> f64 {
        match self.property {
            PropertyChecked::Area => measurement.area(),
            _ => measurement.perimeter(),
        }
    }
}

impl Validator for MeasurementValidator {
    fn validate(&self, ctx: &GradingContext<'_>, submission: &Value) -> GradingResult {
        let submitted_measurement = Measurement::from_value(submission);
        let submitted = self.read(&submitted_measurement);
        let expected = self.read(&Measurement::from_value(ctx.expected));
        let tolerance = ctx.rules.tolerance_or(DEFAULT_MEASUREMENT_TOLERANCE);

        let mut details = MeasuredDetails {
            property_checked: self.property,
            submitted_value: submitted,
            expected_value: expected,
            tolerance,
            difference: None,
            shape_validation: None,
        };

        if !within_tolerance(submitted, expected, tolerance) {
            return GradingResult {
                is_correct: false,
                score: Score::Zero,
                feedback: feedback::measurement_mismatch(self.property, submitted, expected),
                validation_details: ValidationDetails::Measured(details),
            };
        }

        let Some(constraint) = ctx.rules.active_constraint() else {
            return GradingResult {
                is_correct: true,
                score: Score::Full,
                feedback: feedback::measurement_correct(self.property, submitted),
                validation_details: ValidationDetails::Measured(details),
            };
        };

        let shape = validate_shape(
            submitted_measurement.shape_data().as_ref(),
            Some(constraint),
            &ctx.rules.required_properties,
        );
        let feedback = if shape.is_valid {
            feedback::measurement_with_valid_shape(self.property, submitted, constraint)
        } else {
            feedback::measurement_with_invalid_shape(
                self.property,
                submitted,
                shape.error.as_deref(),
            )
        };
        let is_correct = shape.is_valid;
        details.shape_validation = Some(shape);

        GradingResult {
            is_correct,
            score: Score::after_shape_check(is_correct),
            feedback,
            validation_details: ValidationDetails::Measured(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{ProblemType, ShapeKind};
    use crate::rules::{GradingRules, RequiredProperties, ShapeConstraint};
    use crate::validators::test_support::run;
    use serde_json::json;

    fn square_rules() -> GradingRules {
        GradingRules {
            tolerance: Some(0.01),
            check_shape: true,
            shape_constraint: Some(ShapeConstraint::Square),
            ..Default::default()
        }
    }

    fn perimeter(rules: &GradingRules, expected: Value, submission: Value) -> GradingResult {
        run(
            &MeasurementValidator::PERIMETER,
            rules,
            ProblemType::Perimeter(Some(ShapeKind::Square)),
            &expected,
            &submission,
        )
    }

    #[test]
    fn test_perimeter_from_side_lengths() {
        let result = perimeter(
            &GradingRules::default(),
            json!({ "perimeter": 12 }),
            json!({ "shapes": [{ "sideLengths": [3, 4, 5] }] }),
        );
        assert!(result.is_correct);
        let details = result.validation_details.as_measured().unwrap();
        assert_eq!(details.submitted_value, 12.0);
        assert_eq!(details.tolerance, 0.01);
        assert!(details.shape_validation.is_none());
    }

    #[test]
    fn test_wrong_value_skips_shape_check() {
        let result = perimeter(
            &square_rules(),
            json!([{ "sideLengths": [5, 5, 5, 5] }]),
            json!({ "shapes": [{ "sideLengths": [5, 5, 5, 6] }] }),
        );
        assert!(!result.is_correct);
        assert_eq!(result.score, Score::Zero);
        assert!(result.feedback.contains("Expected 20, but you submitted 21"));
        let details = result.validation_details.as_measured().unwrap();
        assert!(details.shape_validation.is_none());
    }

    #[test]
    fn test_partial_credit_for_invalid_shape() {
        let result = perimeter(
            &square_rules(),
            json!({ "perimeter": 13 }),
            json!({ "perimeter": 13, "sides": [3, 3, 3, 4] }),
        );
        assert!(!result.is_correct);
        assert_eq!(result.score, Score::Partial);
        assert!(result.feedback.contains("all sides equal"));
        let shape = result
            .validation_details
            .as_measured()
            .and_then(|d| d.shape_validation.clone())
            .unwrap();
        assert!(!shape.is_valid);
    }

    #[test]
    fn test_valid_shape_earns_full_marks() {
        let result = perimeter(
            &square_rules(),
            json!([{ "sideLengths": [5, 5, 5, 5] }]),
            json!({ "shapes": [{ "sideLengths": [5, 5, 5, 5] }] }),
        );
        assert!(result.is_correct);
        assert_eq!(result.score, Score::Full);
        let shape = result
            .validation_details
            .as_measured()
            .and_then(|d| d.shape_validation.clone())
            .unwrap();
        assert!(shape.is_valid);
    }

    #[test]
    fn test_missing_shape_data_is_partial() {
        let result = perimeter(&square_rules(), json!({ "perimeter": 20 }), json!({ "perimeter": 20 }));
        assert_eq!(result.score, Score::Partial);
        assert!(result.feedback.contains("No shape data provided"));
    }

    #[test]
    fn test_rectangle_reject_square_through_rules() {
        let rules = GradingRules {
            check_shape: true,
            shape_constraint: Some(ShapeConstraint::Rectangle),
            required_properties: RequiredProperties {
                reject_square: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = perimeter(&rules, json!({ "perimeter": 16 }), json!({ "perimeter": 16, "sides": [4, 4, 4, 4] }));
        assert_eq!(result.score, Score::Partial);
        assert!(result.feedback.contains("square, not a rectangle"));
    }

    #[test]
    fn test_area_is_read_directly() {
        let result = run(
            &MeasurementValidator::AREA,
            &GradingRules::default(),
            ProblemType::Area(None),
            &json!([{ "area": 24, "sideLengths": [4, 6, 4, 6] }]),
            &json!({ "shapes": [{ "area": "24.004", "sideLengths": [4, 6, 4, 6] }] }),
        );
        assert!(result.is_correct);
        let details = result.validation_details.as_measured().unwrap();
        assert_eq!(details.property_checked, PropertyChecked::Area);
    }

    #[test]
    fn test_area_outside_tolerance() {
        let result = run(
            &MeasurementValidator::AREA,
            &GradingRules::default(),
            ProblemType::Area(None),
            &json!({ "area": 24 }),
            &json!({ "area": 24.5 }),
        );
        assert!(!result.is_correct);
        assert_eq!(result.feedback, "Incorrect area. Expected 24, but you submitted 24.5.");
    }

    #[test]
    fn test_unknown_constraint_accepts_any_shape_data() {
        let rules = GradingRules {
            check_shape: true,
            shape_constraint: Some(ShapeConstraint::Other("hexagon".to_string())),
            ..Default::default()
        };
        let with_sides = perimeter(&rules, json!({ "perimeter": 6 }), json!({ "perimeter": 6, "sides": [1, 1, 1, 1, 1, 1] }));
        assert_eq!(with_sides.score, Score::Full);
    }
}
