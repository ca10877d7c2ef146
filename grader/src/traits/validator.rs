//! Validator Trait
//!
//! [`Validator`] is the strategy trait behind the grading dispatcher. Each implementation grades
//! one family of problem types and always produces a complete [`GradingResult`]: a malformed
//! submission is graded as wrong, never reported as an error.
//!
//! # Example
//!
//! ```rust
//! use grader::report::{GradingResult, StructuralDetails, ValidationDetails};
//! use grader::scorer::Score;
//! use grader::traits::validator::{GradingContext, Validator};
//! use serde_json::Value;
//!
//! /// Accepts any non-null answer.
//! struct Participation;
//!
//! impl Validator for Participation {
//!     fn validate(&self, ctx: &GradingContext<'_>, submission: &Value) -> GradingResult {
//!         let is_correct = !submission.is_null();
//!         GradingResult {
//!             is_correct,
//!             score: Score::binary(is_correct),
//!             feedback: String::new(),
//!             validation_details: ValidationDetails::Structural(StructuralDetails {
//!                 submission: submission.clone(),
//!                 expected: ctx.expected.clone(),
//!             }),
//!         }
//!     }
//! }
//! ```

use crate::problem::ProblemType;
use crate::report::GradingResult;
use crate::rules::GradingRules;
use serde_json::Value;

/// Everything a validator may read about the problem being graded.
#[derive(Debug, Clone, Copy)]
pub struct GradingContext<'a> {
    /// Rules parsed once by the dispatcher.
    pub rules: &'a GradingRules,
    /// The problem's `expected_solution`, untouched.
    pub expected: &'a Value,
    /// The resolved problem type, including any shape alias.
    pub problem_type: &'a ProblemType,
}

/// Grades a submission for one family of problem types.
pub trait Validator: Send + Sync {
    /// Compare `submission` with `ctx.expected` under `ctx.rules`.
    fn validate(&self, ctx: &GradingContext<'_>, submission: &Value) -> GradingResult;
}
