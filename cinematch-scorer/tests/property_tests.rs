//! Property-based tests for similarity and recommendation invariants.
//!
//! # Invariants tested
//!
//! - **Range:** distances lie in `(0, 1]` with shared items and are exactly
//!   zero without.
//! - **Symmetry:** either query order yields the same stored record.
//! - **Identity:** identical shared ratings give a distance of one.
//! - **Neighbour bounds:** lookups never return the user itself, never
//!   exceed `n`, and honour the shared-item threshold.
//! - **Exclusion:** popularity rankings never contain items the user rated.
//! - **Idempotence:** recomputing without rating changes yields the same
//!   matrix.


use std::cmp::Ordering;

use cinematch_core::{Rating, User};
use cinematch_scorer::{EuclideanSimilarity, Recommender, SimilarityMetric, SimilarityRecord};
use proptest::prelude::*;

use proptest_support::{build_store, ratings_strategy, user_id};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: every stored record respects the distance range.
    #[test]
    fn distances_stay_in_range(ratings in ratings_strategy(2, 8)) {
        let mut recommender = Recommender::new(build_store(&ratings));
        let matrix = recommender.compute_all_similarities();

        for (_, record) in matrix.iter() {
            if record.num_shared == 0 {
                prop_assert_eq!(*record, SimilarityRecord::NO_OVERLAP);
            } else {
                prop_assert!(record.distance > 0.0 && record.distance <= 1.0);
            }
        }
    }

    /// Property: one record per unordered pair, identical in both orders.
    #[test]
    fn similarity_is_symmetric(ratings in ratings_strategy(2, 8)) {
        let user_count = ratings.len();
        let mut recommender = Recommender::new(build_store(&ratings));
        let matrix = recommender.compute_all_similarities();

        let expected_pairs: usize = (0..user_count).sum();
        prop_assert_eq!(matrix.len(), expected_pairs);
        for a in 0..user_count {
            for b in 0..user_count {
                let forward = matrix.get(&user_id(a), &user_id(b));
                let backward = matrix.get(&user_id(b), &user_id(a));
                prop_assert_eq!(forward, backward);
                prop_assert_eq!(forward.is_none(), a == b);
            }
        }
    }

    /// Property: copying a user's ratings yields a perfect match.
    #[test]
    fn identical_ratings_are_perfectly_similar(ratings in ratings_strategy(1, 1)) {
        let mut source_user = User::new("source");
        let mut copy = User::new("copy");
        for (item, raw) in ratings.iter().flatten() {
            let rating =
                Rating::try_from(*raw).map_err(|err| TestCaseError::fail(err.to_string()))?;
            source_user.rate(item.to_string().into(), rating);
            copy.rate(item.to_string().into(), rating);
        }

        let record = EuclideanSimilarity.compare(&source_user, &copy);

        if source_user.num_ratings() == 0 {
            prop_assert_eq!(record, SimilarityRecord::NO_OVERLAP);
        } else {
            prop_assert_eq!(record.num_shared, source_user.num_ratings());
            prop_assert_eq!(record.distance.total_cmp(&1.0), Ordering::Equal);
        }
    }

    /// Property: neighbour lookups exclude the user and honour both limits.
    #[test]
    fn similar_users_respect_bounds(
        ratings in ratings_strategy(2, 8),
        n in 0_usize..6,
        min_shared in 0_usize..4,
    ) {
        let user_count = ratings.len();
        let mut recommender = Recommender::new(build_store(&ratings));
        recommender.compute_all_similarities();

        for index in 0..user_count {
            let me = user_id(index);
            let ranked = recommender
                .similar_users(&me, n, min_shared)
                .map_err(|err| TestCaseError::fail(err.to_string()))?;
            prop_assert!(ranked.len() <= n);
            for (other, _) in &ranked {
                prop_assert_ne!(other.as_str(), me.as_str());
                let record = recommender
                    .similarity(&me, other.as_str())
                    .map_err(|err| TestCaseError::fail(err.to_string()))?;
                prop_assert!(record.num_shared >= min_shared);
            }
            let descending = ranked.windows(2).all(|pair| match pair {
                [(_, a), (_, b)] => a >= b,
                _ => true,
            });
            prop_assert!(descending, "neighbours out of order: {:?}", ranked);
        }
    }

    /// Property: popularity rankings never contain already-rated items.
    #[test]
    fn top_rated_items_exclude_seen(ratings in ratings_strategy(1, 8), n in 0_usize..12) {
        let recommender = Recommender::new(build_store(&ratings));

        for index in 0..ratings.len() {
            let me = user_id(index);
            let ranked = recommender
                .top_rated_items(n, 1, Some(&me))
                .map_err(|err| TestCaseError::fail(err.to_string()))?;
            prop_assert!(ranked.len() <= n);
            let Some(user) = recommender.store().user(&me) else {
                return Err(TestCaseError::fail("generated user missing"));
            };
            for (item, _) in &ranked {
                prop_assert!(!user.has_rated(item.as_str()));
            }
        }
    }

    /// Property: recomputation without rating changes is idempotent.
    #[test]
    fn recomputation_is_idempotent(ratings in ratings_strategy(2, 8)) {
        let mut recommender = Recommender::new(build_store(&ratings));
        let first = recommender.compute_all_similarities().clone();
        let second = recommender.compute_all_similarities().clone();
        prop_assert_eq!(first, second);
    }
}
