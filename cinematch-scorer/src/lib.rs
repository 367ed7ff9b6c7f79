//! Similarity and recommendation engines for Cinematch.
//!
//! The crate provides two complementary capabilities over a
//! [`RatingStore`](cinematch_core::RatingStore):
//! - **Batch similarity computation** compares every unordered pair of users
//!   with a [`SimilarityMetric`] (by default the normalised inverse Euclidean
//!   distance over commonly rated items) and stores the result in a
//!   [`SimilarityMatrix`]. The matrix is recomputed in full on demand; there
//!   is no incremental update path.
//! - **Per-query recommendation** ranks a user's nearest neighbours and
//!   scores the items those neighbours rated, dropping anything the user has
//!   already seen. A popularity ranking by average rating is available as
//!   well.
//!
//! # Examples
//!
//! ```
//! use cinematch_core::{Item, RatingRow, RatingStore, User};
//! use cinematch_scorer::{RecommendationMode, Recommender};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RatingStore::from_records(
//!     [User::new("1"), User::new("2")],
//!     [Item::new("9"), Item::new("10")],
//!     &[
//!         RatingRow::new("1", "1", 4),
//!         RatingRow::new("2", "1", 4),
//!         RatingRow::new("2", "9", 4),
//!         RatingRow::new("2", "10", 2),
//!     ],
//! )?;
//! let mut recommender = Recommender::new(store);
//! recommender.compute_all_similarities();
//! recommender.similar_users("1", 5, 1)?;
//! let mode: RecommendationMode = "simple".parse()?;
//! let picks = recommender.recommend("1", 5, mode, 1)?;
//! let items: Vec<&str> = picks.iter().map(|(item, _)| item.as_str()).collect();
//! assert_eq!(items, ["9", "10"]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;
mod matrix;
mod mode;
mod recommender;
mod similarity;

pub use config::{DuplicatePolicy, RecommenderConfig};
pub use error::{ConfigError, RecommendError};
pub use matrix::{SimilarityMatrix, UserPair};
pub use mode::RecommendationMode;
pub use recommender::Recommender;
pub use similarity::{EuclideanSimilarity, SimilarityMetric, SimilarityRecord};
