//! Rating value object (0 to 4 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Strength of a connection as judged by one contributor: 0 (none) to 4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingValue(u8);

impl RatingValue {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 4;

    /// Creates a RatingValue from an integer, returning error if out of range.
    pub fn try_from_i64(value: i64) -> Result<Self, ValidationError> {
        if value < Self::MIN as i64 || value > Self::MAX as i64 {
            return Err(ValidationError::out_of_range(
                "rating",
                Self::MIN as i64,
                Self::MAX as i64,
                value,
            ));
        }
        Ok(Self(value as u8))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a float for aggregation math.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_value_accepts_full_range() {
        for value in 0..=4 {
            assert_eq!(RatingValue::try_from_i64(value).unwrap().value() as i64, value);
        }
    }

    #[test]
    fn rating_value_rejects_out_of_range_values() {
        assert!(RatingValue::try_from_i64(-1).is_err());
        assert!(RatingValue::try_from_i64(5).is_err());
        match RatingValue::try_from_i64(7) {
            Err(ValidationError::OutOfRange {
                field,
                min,
                max,
                actual,
            }) => {
                assert_eq!(field, "rating");
                assert_eq!((min, max, actual), (0, 4, 7));
            }
            _ => panic!("Expected OutOfRange error"),
        }
    }

    #[test]
    fn rating_value_default_is_zero() {
        assert_eq!(RatingValue::default().value(), 0);
    }

    #[test]
    fn rating_value_serializes_as_number() {
        let rating = RatingValue::try_from_i64(3).unwrap();
        assert_eq!(serde_json::to_string(&rating).unwrap(), "3");
    }
}
