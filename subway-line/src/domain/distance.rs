//! Section distance type.

use std::fmt;
use std::num::NonZeroU32;

/// Error returned when constructing a zero distance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid distance {value}: must be a positive integer")]
pub struct InvalidDistance {
    value: u32,
}

/// A positive section length.
///
/// Zero is rejected at construction, so any `Distance` is usable as an
/// edge weight without further checks.
///
/// # Examples
///
/// ```
/// use subway_line::domain::Distance;
///
/// let ten = Distance::new(10).unwrap();
/// let three = Distance::new(3).unwrap();
/// assert_eq!(ten.checked_sub(three).unwrap().get(), 7);
///
/// // The remainder must stay positive
/// assert!(three.checked_sub(three).is_none());
/// assert!(Distance::new(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(NonZeroU32);

impl Distance {
    /// Creates a distance from a raw value.
    pub fn new(value: u32) -> Result<Self, InvalidDistance> {
        NonZeroU32::new(value)
            .map(Distance)
            .ok_or(InvalidDistance { value })
    }

    /// Returns the raw value.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Subtracts `other`, returning `None` unless the result is positive.
    pub fn checked_sub(self, other: Distance) -> Option<Distance> {
        self.get()
            .checked_sub(other.get())
            .and_then(NonZeroU32::new)
            .map(Distance)
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({})", self.get())
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
