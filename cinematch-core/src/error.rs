//! Errors raised while loading or querying the rating store.

use std::fmt;

use thiserror::Error;

use crate::{ItemId, RatingError, UserId};

/// The owner of a rating set that statistics were requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingSubject {
    /// A user's ratings.
    User(UserId),
    /// An item's ratings.
    Item(ItemId),
}

impl fmt::Display for RatingSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user {id}"),
            Self::Item(id) => write!(f, "item {id}"),
        }
    }
}

/// Errors raised by [`RatingStore`](crate::RatingStore) and its records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A rating row names a user the store does not know about.
    #[error("rating of item {item_id} references unknown user {user_id}")]
    UnknownUserReference {
        /// User named by the rating row.
        user_id: UserId,
        /// Item named by the rating row.
        item_id: ItemId,
    },
    /// A lookup named a user the store does not know about.
    #[error("unknown user {user_id}")]
    UnknownUser {
        /// Requested user.
        user_id: UserId,
    },
    /// Statistics were requested over an empty rating set.
    #[error("{subject} has no ratings")]
    EmptyRatingSet {
        /// Owner of the empty rating set.
        subject: RatingSubject,
    },
    /// A rating row carried a value outside the rating domain.
    #[error("invalid rating by user {user_id} for item {item_id}")]
    InvalidRating {
        /// User named by the rating row.
        user_id: UserId,
        /// Item named by the rating row.
        item_id: ItemId,
        /// Validation failure.
        #[source]
        source: RatingError,
    },
}
