//! Rating weight value object (0 to 1000).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Expertise weight a contributed rating carries in aggregation.
///
/// A weight of 0 keeps the rating on record without influence. Omitted
/// weights default to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingWeight(u32);

impl RatingWeight {
    pub const MIN: u32 = 0;
    pub const MAX: u32 = 1000;

    /// Creates a RatingWeight from an integer, returning error if out of range.
    pub fn try_from_i64(value: i64) -> Result<Self, ValidationError> {
        if value < Self::MIN as i64 || value > Self::MAX as i64 {
            return Err(ValidationError::out_of_range(
                "weight",
                Self::MIN as i64,
                Self::MAX as i64,
                value,
            ));
        }
        Ok(Self(value as u32))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns the value as a float for aggregation math.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

impl Default for RatingWeight {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for RatingWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
