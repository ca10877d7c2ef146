//! # Feedback Templates
//!
//! Student-facing sentences for every validator. Each template names the submitted and the
//! expected value so the student can see how far off the answer was.

use crate::report::PropertyChecked;
use crate::rules::ShapeConstraint;

/// Render a value for display: at most four decimals, trailing zeros dropped.
pub fn display_number(value: f64) -> String {
    if !value.is_finite() {
        return "an invalid number".to_string();
    }
    let fixed = format!("{value:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn degrees(value: f64) -> String {
    if value.is_finite() {
        format!("{}°", display_number(value))
    } else {
        display_number(value)
    }
}

fn property_name(property: PropertyChecked) -> &'static str {
    match property {
        PropertyChecked::ComplementaryAngle => "complementary angle",
        PropertyChecked::SupplementaryAngle => "supplementary angle",
        PropertyChecked::AngleSum => "angle sum",
        PropertyChecked::PythagoreanTheorem => "value",
        PropertyChecked::Perimeter => "perimeter",
        PropertyChecked::Area => "area",
    }
}

/// Complementary and supplementary angle answers.
pub fn paired_angle(
    property: PropertyChecked,
    total: f64,
    is_correct: bool,
    submitted: f64,
    expected: f64,
) -> String {
    let name = property_name(property);
    if is_correct {
        format!(
            "Correct! {} is the {name}. Together the angles make {}.",
            degrees(submitted),
            degrees(total)
        )
    } else {
        format!(
            "Incorrect. You entered {}, but the {name} is {}. Remember that {name}s add up to {}.",
            degrees(submitted),
            degrees(expected),
            degrees(total)
        )
    }
}

pub fn angle_sum(is_correct: bool, submitted: f64, expected: f64) -> String {
    if is_correct {
        format!("Correct! The angles add up to {}.", degrees(expected))
    } else {
        format!(
            "Incorrect. You entered {}, but the angles add up to {}.",
            degrees(submitted),
            degrees(expected)
        )
    }
}

pub fn pythagorean(is_correct: bool, submitted: f64, expected: f64) -> String {
    if is_correct {
        format!("Correct! The value is {}.", display_number(expected))
    } else {
        format!(
            "Incorrect. You entered {}, but the correct value is {}. Remember that a² + b² = c².",
            display_number(submitted),
            display_number(expected)
        )
    }
}

/// The measured value itself was wrong; shape checks never ran.
pub fn measurement_mismatch(property: PropertyChecked, submitted: f64, expected: f64) -> String {
    format!(
        "Incorrect {}. Expected {}, but you submitted {}.",
        property_name(property),
        display_number(expected),
        display_number(submitted)
    )
}

pub fn measurement_correct(property: PropertyChecked, submitted: f64) -> String {
    format!(
        "Correct! The {} is {}.",
        property_name(property),
        display_number(submitted)
    )
}

pub fn measurement_with_valid_shape(
    property: PropertyChecked,
    submitted: f64,
    shape: &ShapeConstraint,
) -> String {
    format!(
        "Correct! Your {} of {} is right and your shape is a valid {}.",
        property_name(property),
        display_number(submitted),
        shape.as_str()
    )
}

pub fn measurement_with_invalid_shape(
    property: PropertyChecked,
    submitted: f64,
    error: Option<&str>,
) -> String {
    format!(
        "Your {} of {} is correct, but the shape is not valid: {}",
        property_name(property),
        display_number(submitted),
        error.unwrap_or("shape check failed")
    )
}

pub fn general(is_correct: bool) -> String {
    if is_correct {
        "Correct!".to_string()
    } else {
        "Incorrect. Your answer does not match the expected solution.".to_string()
    }
}
