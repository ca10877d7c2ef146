//! # Scorer Module
//!
//! A graded answer earns one of three fixed scores. Correctness is the conjunction of at most
//! two gates (the value itself, then an optional shape check), so the score is never a blend:
//!
//! | value | shape   | score |
//! |-------|---------|-------|
//! | wrong | skipped | 0     |
//! | right | invalid | 50    |
//! | right | valid / not checked | 100 |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete score awarded for a single problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Score {
    Zero,
    /// Right value, wrong shape.
    Partial,
    Full,
}

impl Score {
    /// Full marks for a correct answer, nothing otherwise.
    pub fn binary(is_correct: bool) -> Self {
        if is_correct { Score::Full } else { Score::Zero }
    }

    /// Score once the value already matched and a shape check ran.
    pub fn after_shape_check(shape_valid: bool) -> Self {
        if shape_valid {
            Score::Full
        } else {
            Score::Partial
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Score::Zero => 0,
            Score::Partial => 50,
            Score::Full => 100,
        }
    }
}

impl From<Score> for u32 {
    fn from(score: Score) -> Self {
        score.points()
    }
}

impl TryFrom<u32> for Score {
    type Error = String;

    fn try_from(points: u32) -> Result<Self, Self::Error> {
        match points {
            0 => Ok(Score::Zero),
            50 => Ok(Score::Partial),
            100 => Ok(Score::Full),
            other => Err(format!("score must be 0, 50 or 100, got {other}")),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.points())
    }
}

/// Average of a set of scores as a percentage, rounded to the nearest integer.
///
/// Used to summarise a batch of graded problems. Returns 0 for an empty batch.
pub fn average_score(scores: &[Score]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let total: u32 = scores.iter().map(|s| s.points()).sum();
    (total as f64 / scores.len() as f64).round() as u32
}
