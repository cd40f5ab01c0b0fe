//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Failures raised synchronously at the point where an input is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A required object is missing, e.g. an unknown object or force id.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A polygon is too small, self-intersecting or has no area.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A numeric parameter is outside its allowed range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, PhysicsError>;

/// Fails with `InvalidParameter` unless `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidParameter {
            name,
            value,
            reason: "must be a finite value greater than zero",
        })
    }
}

/// Fails with `InvalidParameter` unless `value` is finite and not negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidParameter {
            name,
            value,
            reason: "must be a finite value of zero or more",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("mass", 2.0), Ok(2.0));
        assert!(require_positive("mass", 0.0).is_err());
        assert!(require_positive("mass", -1.0).is_err());
        assert!(require_positive("mass", f64::NAN).is_err());
        assert!(require_positive("mass", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert_eq!(require_non_negative("time", 0.0), Ok(0.0));
        match require_non_negative("time", -0.5) {
            Err(PhysicsError::InvalidParameter { name, value, .. }) => {
                assert_eq!(name, "time");
                assert_eq!(value, -0.5);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_error_messages() {
        let err = PhysicsError::InvalidGeometry("polygon needs at least 3 points".into());
        assert_eq!(err.to_string(), "invalid geometry: polygon needs at least 3 points");
    }
}
