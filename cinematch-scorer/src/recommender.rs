//! The aggregate that owns the rating store and its derived similarity data.

use std::collections::HashMap;

use cinematch_core::{ItemId, Rating, RatingRow, RatingStore, User, UserId, top_n};
use log::debug;

use crate::{
    ConfigError, DuplicatePolicy, EuclideanSimilarity, RecommendError, RecommendationMode,
    RecommenderConfig, SimilarityMatrix, SimilarityMetric, SimilarityRecord,
};

/// Collaborative-filtering recommender over an in-memory rating store.
///
/// The similarity matrix is a derived cache: it is absent until
/// [`Recommender::compute_all_similarities`] runs and is dropped again by
/// any rating change made through [`Recommender::insert_rating`].
///
/// # Examples
/// ```
/// use cinematch_core::test_support::store_from_ratings;
/// use cinematch_scorer::{RecommendationMode, Recommender};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = store_from_ratings(&[
///     ("ann", &[("1", 5), ("2", 4)]),
///     ("bob", &[("1", 5), ("2", 4), ("3", 5)]),
/// ])?;
/// let mut recommender = Recommender::new(store);
/// recommender.compute_all_similarities();
/// recommender.similar_users("ann", 5, 1)?;
/// let picks = recommender.recommend("ann", 3, RecommendationMode::Simple, 1)?;
/// assert_eq!(picks.first().map(|(item, _)| item.as_str()), Some("3"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Recommender<M = EuclideanSimilarity> {
    store: RatingStore,
    metric: M,
    config: RecommenderConfig,
    similarities: Option<SimilarityMatrix>,
}

impl Recommender<EuclideanSimilarity> {
    /// Construct a recommender using Euclidean similarity and defaults.
    #[must_use]
    pub fn new(store: RatingStore) -> Self {
        Self {
            store,
            metric: EuclideanSimilarity,
            config: RecommenderConfig::default(),
            similarities: None,
        }
    }
}

impl<M> Recommender<M>
where
    M: SimilarityMetric,
{
    /// Construct a recommender with an explicit metric and configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the configuration fails validation.
    pub fn with_config(
        store: RatingStore,
        metric: M,
        config: RecommenderConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            store,
            metric,
            config: config.validate()?,
            similarities: None,
        })
    }

    /// Borrow the underlying rating store.
    #[must_use]
    pub const fn store(&self) -> &RatingStore {
        &self.store
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// The current similarity matrix, if one has been computed.
    #[must_use]
    pub const fn similarities(&self) -> Option<&SimilarityMatrix> {
        self.similarities.as_ref()
    }

    /// Record a rating and invalidate every derived similarity cache.
    ///
    /// Returns the rating it replaced, if any.
    ///
    /// # Errors
    /// Returns [`RecommendError::Store`] when the store rejects the row; the
    /// caches are left untouched in that case.
    pub fn insert_rating(&mut self, row: &RatingRow) -> Result<Option<Rating>, RecommendError> {
        let previous = self.store.insert_rating(row)?;
        if self.similarities.take().is_some() {
            debug!(
                "rating by user {} for item {} invalidated the similarity matrix",
                row.user_id, row.item_id
            );
        }
        self.store.clear_similar();
        Ok(previous)
    }

    /// Recompute the similarity of every unordered pair of users.
    ///
    /// The previous matrix, if any, is replaced wholesale. Cached neighbour
    /// lists stay in place until the next [`Recommender::similar_users`]
    /// call for that user.
    pub fn compute_all_similarities(&mut self) -> &SimilarityMatrix {
        self.similarities
            .insert(SimilarityMatrix::compute(&self.store, &self.metric))
    }

    /// Return the similarity record for two distinct users.
    ///
    /// # Errors
    /// Returns [`RecommendError::SimilarityNotComputed`] before the first
    /// batch computation, [`RecommendError::UnknownUser`] when either user
    /// is missing from the matrix, and [`RecommendError::SelfSimilarity`]
    /// when both arguments name the same user.
    pub fn similarity(&self, a: &str, b: &str) -> Result<SimilarityRecord, RecommendError> {
        let matrix = self.matrix()?;
        for user in [a, b] {
            self.known_user(user)?;
        }
        if a == b {
            return Err(RecommendError::SelfSimilarity {
                user_id: UserId::from(a),
            });
        }
        matrix
            .get(a, b)
            .ok_or_else(|| RecommendError::UnknownUser {
                user_id: UserId::from(b),
            })
    }

    /// Find the `n` users most similar to `user`.
    ///
    /// Only neighbours sharing at least `min_shared` rated items qualify.
    /// Results are ordered by descending similarity, ties by user id, and
    /// are cached on the user for later recommendations.
    ///
    /// # Errors
    /// Returns [`RecommendError::SimilarityNotComputed`] before the first
    /// batch computation and [`RecommendError::UnknownUser`] for an unknown
    /// user.
    pub fn similar_users(
        &mut self,
        user: &str,
        n: usize,
        min_shared: usize,
    ) -> Result<Vec<(UserId, f64)>, RecommendError> {
        let matrix = self.matrix()?;
        self.known_user(user)?;
        let candidates: Vec<(UserId, f64)> = matrix
            .neighbours_of(user)
            .into_iter()
            .filter(|(_, record)| record.num_shared >= min_shared)
            .map(|(other, record)| (other.clone(), record.distance))
            .collect();
        let ranked = top_n(candidates, n);

        if let Some(target) = self.store.user_mut(user) {
            target.set_similar(ranked.clone());
        }
        Ok(ranked)
    }

    /// Rank items by average rating.
    ///
    /// Only items with at least `min_ratings` ratings qualify; items nobody
    /// rated have no average and never appear, even when `min_ratings` is
    /// zero. With `exclude_for`, items that user already rated are dropped
    /// before truncating to `n`. Ties are ordered by item id.
    ///
    /// # Errors
    /// Returns [`RecommendError::UnknownUser`] when `exclude_for` names an
    /// unknown user.
    pub fn top_rated_items(
        &self,
        n: usize,
        min_ratings: usize,
        exclude_for: Option<&str>,
    ) -> Result<Vec<(ItemId, f64)>, RecommendError> {
        let excluded = exclude_for.map(|id| self.known_user(id)).transpose()?;
        let mut items: Vec<_> = self
            .store
            .items()
            .filter(|item| item.num_ratings() > 0 && item.num_ratings() >= min_ratings)
            .filter(|item| excluded.is_none_or(|user| !user.has_rated(item.id().as_str())))
            .collect();
        items.sort_by(|a, b| a.id().cmp(b.id()));

        let averages = items
            .into_iter()
            .map(|item| {
                item.avg_rating()
                    .map(|average| (item.id().clone(), average))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(top_n(averages, n))
    }

    /// Recommend up to `n` items `user` has not rated yet.
    ///
    /// When the user has no cached neighbour list, one is computed with the
    /// configured defaults first; this requires the similarity matrix.
    ///
    /// # Errors
    /// Returns [`RecommendError::UnknownUser`] for an unknown user and
    /// [`RecommendError::SimilarityNotComputed`] when neighbours must be
    /// found but no matrix exists.
    pub fn recommend(
        &mut self,
        user: &str,
        n: usize,
        mode: RecommendationMode,
        num_similar_users: usize,
    ) -> Result<Vec<(ItemId, f64)>, RecommendError> {
        if self.known_user(user)?.similar().is_none() {
            debug!(
                "user {user} has no cached neighbours; looking up {} with at least {} shared items",
                self.config.default_neighbours, self.config.default_min_shared
            );
            self.similar_users(
                user,
                self.config.default_neighbours,
                self.config.default_min_shared,
            )?;
        }
        let target = self.known_user(user)?;
        let candidates = match mode {
            RecommendationMode::Simple => self.simple_candidates(target, num_similar_users),
        };
        let unseen = merge_duplicates(candidates, self.config.duplicate_policy)
            .into_iter()
            .filter(|(item, _)| !target.has_rated(item.as_str()))
            .collect();
        Ok(top_n(unseen, n))
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "candidate scores weight ratings by similarity"
    )]
    fn simple_candidates(&self, target: &User, num_similar_users: usize) -> Vec<(ItemId, f64)> {
        let neighbours = target.similar().unwrap_or_default();
        let mut candidates = Vec::new();
        for (neighbour_id, similarity) in neighbours.iter().take(num_similar_users) {
            let Some(neighbour) = self.store.user(neighbour_id.as_str()) else {
                continue;
            };
            let mut rated: Vec<(&ItemId, Rating)> = neighbour.ratings().collect();
            rated.sort_by(|(a, _), (b, _)| a.cmp(b));
            candidates.extend(
                rated
                    .into_iter()
                    .map(|(item, rating)| (item.clone(), similarity * rating.as_f64())),
            );
        }
        candidates
    }

    fn matrix(&self) -> Result<&SimilarityMatrix, RecommendError> {
        self.similarities
            .as_ref()
            .ok_or(RecommendError::SimilarityNotComputed)
    }

    fn known_user(&self, user: &str) -> Result<&User, RecommendError> {
        self.store
            .user(user)
            .ok_or_else(|| RecommendError::UnknownUser {
                user_id: UserId::from(user),
            })
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "summing duplicate candidate scores"
)]
fn merge_duplicates(
    candidates: Vec<(ItemId, f64)>,
    policy: DuplicatePolicy,
) -> Vec<(ItemId, f64)> {
    if policy == DuplicatePolicy::Keep {
        return candidates;
    }
    let mut positions: HashMap<ItemId, usize> = HashMap::new();
    let mut merged: Vec<(ItemId, f64)> = Vec::with_capacity(candidates.len());
    for (item, score) in candidates {
        let existing = positions
            .get(&item)
            .copied()
            .and_then(|position| merged.get_mut(position));
        if let Some((_, current)) = existing {
            *current = match policy {
                DuplicatePolicy::Sum => *current + score,
                DuplicatePolicy::Max | DuplicatePolicy::Keep => current.max(score),
            };
        } else {
            positions.insert(item.clone(), merged.len());
            merged.push((item, score));
        }
    }
    merged
}
