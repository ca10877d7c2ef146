//! General (fallback) validator.
//!
//! Used for `general` problems and for any problem type the grader does not recognise.
//!
//! By default both values are serialized and the strings compared, so key order, array order
//! and number formatting all matter (`{"a":1,"b":2}` does not match `{"b":2,"a":1}`). Setting
//! `"comparison": "semantic"` in the grading rules switches to a deep comparison that ignores
//! object key order and compares numbers within `tolerance` (default 0).

use crate::feedback;
use crate::numeric::within_tolerance;
use crate::report::{GradingResult, StructuralDetails, ValidationDetails};
use crate::rules::ComparisonMode;
use crate::scorer::Score;
use crate::traits::validator::{GradingContext, Validator};
use serde_json::Value;

pub struct GeneralValidator;

impl Validator for GeneralValidator {
    fn validate(&self, ctx: &GradingContext<'_>, submission: &Value) -> GradingResult {
        let is_correct = match ctx.rules.comparison {
            ComparisonMode::Strict => serialized_equal(submission, ctx.expected),
            ComparisonMode::Semantic => {
                semantic_equal(submission, ctx.expected, ctx.rules.tolerance_or(0.0))
            }
        };

        GradingResult {
            is_correct,
            score: Score::binary(is_correct),
            feedback: feedback::general(is_correct),
            validation_details: ValidationDetails::Structural(StructuralDetails {
                submission: submission.clone(),
                expected: ctx.expected.clone(),
            }),
        }
    }
}

fn serialized_equal(a: &Value, b: &Value) -> bool {
    match (serde_json::to_string(a), serde_json::to_string(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn semantic_equal(a: &Value, b: &Value, tolerance: f64) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => within_tolerance(x, y, tolerance),
            _ => false,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys)
                    .all(|(x, y)| semantic_equal(x, y, tolerance))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs.iter().all(|(key, x)| {
                    ys.get(key)
                        .is_some_and(|y| semantic_equal(x, y, tolerance))
                })
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ProblemType;
    use crate::rules::GradingRules;
    use crate::validators::test_support::run;
    use serde_json::json;

    fn parse(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    fn grade(rules: &GradingRules, expected: &Value, submission: &Value) -> GradingResult {
        run(&GeneralValidator, rules, ProblemType::General, expected, submission)
    }

    fn semantic(tolerance: Option<f64>) -> GradingRules {
        GradingRules {
            comparison: ComparisonMode::Semantic,
            tolerance,
            ..Default::default()
        }
    }

    #[test]
    fn test_identical_objects_match() {
        let v = parse(r#"{"a":1,"b":2}"#);
        let result = grade(&GradingRules::default(), &v, &v.clone());
        assert!(result.is_correct);
        assert_eq!(result.score, Score::Full);
        assert_eq!(result.feedback, "Correct!");
    }

    #[test]
    fn test_strict_comparison_is_key_order_sensitive() {
        let expected = parse(r#"{"a":1,"b":2}"#);
        let submission = parse(r#"{"b":2,"a":1}"#);
        let result = grade(&GradingRules::default(), &expected, &submission);
        assert!(!result.is_correct);
        assert_eq!(result.score, Score::Zero);
    }

    #[test]
    fn test_strict_comparison_is_number_format_sensitive() {
        let result = grade(&GradingRules::default(), &json!(1), &json!(1.0));
        assert!(!result.is_correct);
    }

    #[test]
    fn test_details_embed_raw_values() {
        let expected = json!({ "answer": "B" });
        let submission = json!({ "answer": "C" });
        let result = grade(&GradingRules::default(), &expected, &submission);
        let value = serde_json::to_value(&result.validation_details).unwrap();
        assert_eq!(value["submission"], submission);
        assert_eq!(value["expected"], expected);
    }

    #[test]
    fn test_semantic_ignores_key_order() {
        let expected = parse(r#"{"a":1,"b":[1,2]}"#);
        let submission = parse(r#"{"b":[1,2],"a":1.0}"#);
        assert!(grade(&semantic(None), &expected, &submission).is_correct);
    }

    #[test]
    fn test_semantic_keeps_array_order() {
        let result = grade(&semantic(None), &json!([1, 2]), &json!([2, 1]));
        assert!(!result.is_correct);
    }

    #[test]
    fn test_semantic_numeric_tolerance() {
        let expected = json!({ "x": 3.14159 });
        assert!(grade(&semantic(Some(0.01)), &expected, &json!({ "x": 3.14 })).is_correct);
        assert!(!grade(&semantic(None), &expected, &json!({ "x": 3.14 })).is_correct);
    }

    #[test]
    fn test_semantic_rejects_extra_keys() {
        let result = grade(&semantic(None), &json!({ "a": 1 }), &json!({ "a": 1, "b": 2 }));
        assert!(!result.is_correct);
    }
}
