//! Errors raised by the similarity and recommendation engines.

use cinematch_core::{StoreError, UserId};
use thiserror::Error;

/// Errors surfaced to callers of [`Recommender`](crate::Recommender).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// Similarities were requested before a batch computation ran.
    #[error("similarity scores have not been computed yet")]
    SimilarityNotComputed,
    /// The queried user is not in the rating store.
    #[error("unknown user {user_id}")]
    UnknownUser {
        /// Requested user.
        user_id: UserId,
    },
    /// A similarity was requested between a user and itself; only distinct
    /// pairs are stored.
    #[error("no similarity is stored between user {user_id} and itself")]
    SelfSimilarity {
        /// User named by both arguments.
        user_id: UserId,
    },
    /// The requested recommendation mode does not exist.
    #[error("unknown recommendation mode {mode:?}")]
    InvalidMode {
        /// Mode name as supplied by the caller.
        mode: String,
    },
    /// The rating store rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised while building or validating a
/// [`RecommenderConfig`](crate::RecommenderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The default neighbour count must be positive.
    #[error("default neighbour count must be at least 1")]
    ZeroNeighbours,
    /// The configuration document could not be parsed.
    #[cfg(feature = "serde")]
    #[error("failed to parse recommender configuration")]
    Parse {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}
