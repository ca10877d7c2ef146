//! # Validators
//!
//! One [`Validator`](crate::traits::validator::Validator) implementation per family of problem
//! types. The dispatcher in the crate root picks one from the problem's type tag.
//!
//! - [`angle`]: complementary, supplementary and angle-sum answers (default tolerance 0.1°).
//! - [`pythagorean`]: a single hypotenuse or leg value (default tolerance 0.01).
//! - [`measured`]: perimeter and area answers, optionally gated by a shape constraint.
//! - [`general`]: fallback equality for every other problem type.

pub mod angle;
pub mod general;
pub mod measured;
pub mod pythagorean;

use serde_json::Value;

/// Read the first present, non-null field among `names`.
pub(crate) fn first_field<'a>(value: &'a Value, names: &[&str]) -> Option<&'a Value> {
    let obj = value.as_object()?;
    names
        .iter()
        .find_map(|name| obj.get(*name).filter(|v| !v.is_null()))
}
