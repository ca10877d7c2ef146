//! Runtime support shared by the grader binaries: environment configuration and logging.

pub mod config;
pub mod logger;
