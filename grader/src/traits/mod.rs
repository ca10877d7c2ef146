//!
//! Traits Module
//!
//! Core traits used throughout the grader for extensibility.
//!
//! - [`validator`]: the per-problem-type validation strategy the dispatcher selects.

pub mod validator;
