//! Process configuration for the grader binaries.
//!
//! Values come from a `.env` file (if present) and the environment, and are loaded once.
//! Grading behaviour is never configured here; it travels with each problem's `grading_rules`.

use once_cell::sync::OnceCell;
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Read the configuration from the environment without caching it.
    pub fn from_env() -> Self {
        Config {
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "geometry-grader".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "logs/grader.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Load `.env` from `env_path` (missing files are fine) and cache the result.
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();
        CONFIG.get_or_init(Config::from_env)
    }
}
