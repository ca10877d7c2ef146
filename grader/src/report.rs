//! # Grading Report Module
//!
//! This module defines the data structures returned to callers of the grader, and the response
//! envelope used when results are handed to an API layer or printed by the `grade` binary.
//!
//! ## Overview
//!
//! - [`GradingResult`]: the four-field outcome of grading one submission. Every problem type
//!   produces this same shape, so callers never need to switch on the type.
//! - [`ValidationDetails`]: diagnostics explaining how the result was reached.
//! - [`GradingResponse`]: wraps a [`GradingResult`] with `success` and `message` fields.
//! - [`BatchReport`]: per-case outcomes of a batch, where a case whose rules do not parse is
//!   reported as `{ "error": ... }` without affecting the others.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Grading complete.",
//!   "data": {
//!     "is_correct": false,
//!     "score": 50,
//!     "feedback": "Your perimeter of 12 is correct, but ...",
//!     "validation_details": {
//!       "property_checked": "perimeter",
//!       "submitted_value": 12.0,
//!       "expected_value": 12.0,
//!       "tolerance": 0.01,
//!       "shape_validation": { "is_valid": false, "error": "..." }
//!     }
//!   }
//! }
//! ```

use crate::error::GradingError;
use crate::scorer::{Score, average_score};
use crate::shape::ShapeValidation;
use serde::Serialize;
use serde_json::Value;

/// The quantity a numeric validator compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyChecked {
    ComplementaryAngle,
    SupplementaryAngle,
    AngleSum,
    PythagoreanTheorem,
    Perimeter,
    Area,
}

/// Diagnostics for a numeric comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasuredDetails {
    pub property_checked: PropertyChecked,
    pub submitted_value: f64,
    pub expected_value: f64,
    pub tolerance: f64,
    /// Absolute difference; only reported by the complementary and supplementary validators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<f64>,
    /// Present only when the value matched and a shape constraint was checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_validation: Option<ShapeValidation>,
}

/// Diagnostics for the general validator: both values verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralDetails {
    pub submission: Value,
    pub expected: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidationDetails {
    Measured(MeasuredDetails),
    Structural(StructuralDetails),
}

impl ValidationDetails {
    pub fn as_measured(&self) -> Option<&MeasuredDetails> {
        match self {
            ValidationDetails::Measured(details) => Some(details),
            ValidationDetails::Structural(_) => None,
        }
    }
}

/// Outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradingResult {
    pub is_correct: bool,
    pub score: Score,
    pub feedback: String,
    pub validation_details: ValidationDetails,
}

/// The API response envelope for a single grading result.
#[derive(Debug, Serialize)]
pub struct GradingResponse {
    pub success: bool,
    pub message: String,
    pub data: GradingResult,
}

impl From<GradingResult> for GradingResponse {
    fn from(result: GradingResult) -> Self {
        GradingResponse {
            success: true,
            message: "Grading complete.".to_string(),
            data: result,
        }
    }
}

/// One case of a batch: its result, or why it could not be graded.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Graded(GradingResult),
    Failed { error: String },
}

/// Results for several submissions graded together.
///
/// `average_score` covers the graded cases only.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub average_score: u32,
    pub graded: usize,
    pub failed: usize,
    pub results: Vec<BatchEntry>,
}

impl From<Vec<Result<GradingResult, GradingError>>> for BatchReport {
    fn from(outcomes: Vec<Result<GradingResult, GradingError>>) -> Self {
        let results: Vec<BatchEntry> = outcomes
            .into_iter()
            .map(|outcome| match outcome {
                Ok(result) => BatchEntry::Graded(result),
                Err(e) => BatchEntry::Failed {
                    error: e.to_string(),
                },
            })
            .collect();

        let scores: Vec<Score> = results
            .iter()
            .filter_map(|entry| match entry {
                BatchEntry::Graded(result) => Some(result.score),
                BatchEntry::Failed { .. } => None,
            })
            .collect();

        BatchReport {
            average_score: average_score(&scores),
            graded: scores.len(),
            failed: results.len() - scores.len(),
            results,
        }
    }
}
