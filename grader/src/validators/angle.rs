//! Angle validators.
//!
//! Complementary and supplementary problems ask for the missing angle of a pair; angle-sum
//! problems ask for the total of several angles. All three compare a single number in degrees
//! and award no partial credit.

use super::first_field;
use crate::feedback;
use crate::numeric::{parse_field, within_tolerance};
use crate::report::{GradingResult, MeasuredDetails, PropertyChecked, ValidationDetails};
use crate::rules::DEFAULT_ANGLE_TOLERANCE;
use crate::scorer::Score;
use crate::traits::validator::{GradingContext, Validator};
use serde_json::Value;

const ANGLE_FIELDS: &[&str] = &["angle", "value"];
const ANGLE_SUM_FIELDS: &[&str] = &["angle_sum"];

/// Grades the complement of an angle (the pair sums to 90°).
pub struct ComplementaryAngleValidator;

/// Grades the supplement of an angle (the pair sums to 180°).
pub struct SupplementaryAngleValidator;

/// Grades the sum of a set of angles, read from `angle_sum`.
pub struct AngleSumValidator;

impl Validator for ComplementaryAngleValidator {
    fn validate(&self, ctx: &GradingContext<'_>, submission: &Value) -> GradingResult {
        grade_paired_angle(ctx, submission, PropertyChecked::ComplementaryAngle, 90.0)
    }
}

impl Validator for SupplementaryAngleValidator {
    fn validate(&self, ctx: &GradingContext<'_>, submission: &Value) -> GradingResult {
        grade_paired_angle(ctx, submission, PropertyChecked::SupplementaryAngle, 180.0)
    }
}

impl Validator for AngleSumValidator {
    fn validate(&self, ctx: &GradingContext<'_>, submission: &Value) -> GradingResult {
        let submitted = parse_field(first_field(submission, ANGLE_SUM_FIELDS));
        let expected = parse_field(first_field(ctx.expected, ANGLE_SUM_FIELDS));
        let tolerance = ctx.rules.tolerance_or(DEFAULT_ANGLE_TOLERANCE);
        let is_correct = within_tolerance(submitted, expected, tolerance);

        GradingResult {
            is_correct,
            score: Score::binary(is_correct),
            feedback: feedback::angle_sum(is_correct, submitted, expected),
            validation_details: ValidationDetails::Measured(MeasuredDetails {
                property_checked: PropertyChecked::AngleSum,
                submitted_value: submitted,
                expected_value: expected,
                tolerance,
                difference: None,
                shape_validation: None,
            }),
        }
    }
}

fn grade_paired_angle(
    ctx: &GradingContext<'_>,
    submission: &Value,
    property: PropertyChecked,
    total: f64,
) -> GradingResult {
    let submitted = parse_field(first_field(submission, ANGLE_FIELDS));
    let expected = parse_field(first_field(ctx.expected, ANGLE_FIELDS));
    let tolerance = ctx.rules.tolerance_or(DEFAULT_ANGLE_TOLERANCE);
    let difference = (submitted - expected).abs();
    let is_correct = within_tolerance(submitted, expected, tolerance);

    GradingResult {
        is_correct,
        score: Score::binary(is_correct),
        feedback: feedback::paired_angle(property, total, is_correct, submitted, expected),
        validation_details: ValidationDetails::Measured(MeasuredDetails {
            property_checked: property,
            submitted_value: submitted,
            expected_value: expected,
            tolerance,
            difference: Some(difference),
            shape_validation: None,
        }),
    }
}
