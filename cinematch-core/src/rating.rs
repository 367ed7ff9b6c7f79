//! Explicit ratings and the raw rows handed over by the data loader.

use std::fmt;

use thiserror::Error;

use crate::{ItemId, UserId};

/// A validated explicit rating in the inclusive range `1..=5`.
///
/// # Examples
/// ```
/// use cinematch_core::Rating;
///
/// let rating = Rating::try_from(4_i64).expect("in range");
/// assert_eq!(rating.value(), 4);
/// assert!(Rating::try_from(6_i64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "u8"))]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating a user can give.
    pub const MIN: u8 = 1;
    /// Highest rating a user can give.
    pub const MAX: u8 = 5;

    /// Return the rating as an integer.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Return the rating as a float for distance and score arithmetic.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

/// Errors returned when a raw value cannot become a [`Rating`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RatingError {
    /// The value lies outside `1..=5`.
    #[error("rating {value} is outside the range 1..=5")]
    OutOfRange {
        /// Raw value supplied by the loader.
        value: i64,
    },
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|raw| (Self::MIN..=Self::MAX).contains(raw))
            .map(Self)
            .ok_or(RatingError::OutOfRange { value })
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One parsed `(user, item, rating, timestamp)` tuple.
///
/// The rating is kept raw; the store validates it on attach. The timestamp
/// is carried for completeness and ignored by every computation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatingRow {
    /// User who gave the rating.
    pub user_id: UserId,
    /// Item that was rated.
    pub item_id: ItemId,
    /// Raw rating value.
    pub rating: i64,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

impl RatingRow {
    /// Build a row with a zero timestamp.
    #[must_use]
    pub fn new(user_id: impl Into<UserId>, item_id: impl Into<ItemId>, rating: i64) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            rating,
            timestamp: 0,
        }
    }

    /// Attach a timestamp while returning `self` for chaining.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }
}
