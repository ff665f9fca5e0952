use std::str::FromStr;

use crate::prelude::*;

/// Parses a fraction from the open interval `(0, 1)`.
pub fn fraction(value: &str) -> Result<f64> {
    match f64::from_str(value)? {
        value if value > 0.0 && value < 1.0 => Ok(value),
        value => Err(anyhow!("{} is not within (0, 1)", value)),
    }
}
