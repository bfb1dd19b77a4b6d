//! Content version value type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A published-content version number.
///
/// Versions start at 1 and only ever move forward; a rollback restores old
/// field values under a *new* version, so no version number is ever reused
/// for different content. Constructing a `Version` from zero or a negative
/// value fails validation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Version(i32);

impl Version {
    /// The first version every published entity starts at.
    pub const INITIAL: Version = Version(1);

    /// Create a version from a raw integer.
    pub fn new(value: i32) -> Result<Self, AppError> {
        if value < 1 {
            return Err(AppError::validation(format!(
                "Invalid version: {value}. Versions must be >= 1"
            )));
        }
        Ok(Self(value))
    }

    /// Return the raw integer value.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Return the version that follows this one, without mutating `self`.
    pub fn next(&self) -> Version {
        Version(self.0 + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Version {
    type Error = AppError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        assert!(Version::new(0).is_err());
        assert!(Version::new(-3).is_err());
        assert!(Version::new(1).is_ok());
    }

    #[test]
    fn test_next_does_not_mutate() {
        let v = Version::new(2).unwrap();
        let n = v.next();
        assert_eq!(v.value(), 2);
        assert_eq!(n.value(), 3);
    }

    #[test]
    fn test_ordering() {
        assert!(Version::new(1).unwrap() < Version::new(5).unwrap());
        assert_eq!(Version::INITIAL.value(), 1);
    }
}
