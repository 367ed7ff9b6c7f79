//! Facade crate for the Cinematch recommendation engine.
//!
//! This crate re-exports the rating store from `cinematch-core` and the
//! similarity and recommendation engine from `cinematch-scorer`. Fixture
//! helpers are available behind the `test-support` feature.

#![forbid(unsafe_code)]

pub use cinematch_core::{
    Item, ItemId, Rating, RatingError, RatingRow, RatingStore, RatingSubject, StoreError, User,
    UserId, top_n,
};

pub use cinematch_scorer::{
    ConfigError, DuplicatePolicy, EuclideanSimilarity, RecommendError, RecommendationMode,
    Recommender, RecommenderConfig, SimilarityMatrix, SimilarityMetric, SimilarityRecord,
    UserPair,
};

#[cfg(feature = "test-support")]
pub use cinematch_core::test_support;
