//! Grader Error Types
//!
//! This module defines the [`GradingError`] enum, the only failure type the grading engine
//! surfaces. Grading itself is fail-closed: malformed numbers or missing shape data produce an
//! incorrect result rather than an error. The only failures are configuration problems that
//! the caller must fix before a problem can be graded at all.
//!
//! # Example
//!
//! ```rust
//! use grader::error::GradingError;
//! use grader::rules::RawGradingRules;
//!
//! let raw = RawGradingRules::Json("{not json".to_string());
//! assert!(matches!(raw.parse(), Err(GradingError::Configuration(_))));
//! ```

use thiserror::Error;

/// Represents all error types that can occur in the grader.
#[derive(Debug, Error)]
pub enum GradingError {
    /// `grading_rules` could not be parsed into a [`crate::rules::GradingRules`].
    #[error("Invalid grading rules: {0}")]
    Configuration(#[from] serde_json::Error),

    /// The problem record is not shaped like a problem.
    #[error("Invalid problem record: {0}")]
    InvalidProblem(String),
}
