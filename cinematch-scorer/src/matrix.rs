//! The batch-computed similarity matrix over unordered user pairs.

use std::collections::HashMap;

use cinematch_core::{RatingStore, UserId};
use log::info;

use crate::{SimilarityMetric, SimilarityRecord};

/// An unordered pair of distinct users.
///
/// The smaller identifier is always stored first, so `(a, b)` and `(b, a)`
/// produce the same key.
///
/// # Examples
/// ```
/// use cinematch_scorer::UserPair;
///
/// let forward = UserPair::new("7", "3").expect("distinct users");
/// let backward = UserPair::new("3", "7").expect("distinct users");
/// assert_eq!(forward, backward);
/// assert!(UserPair::new("3", "3").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserPair {
    first: UserId,
    second: UserId,
}

impl UserPair {
    /// Build the pair for two users, or `None` when they are the same user.
    #[must_use]
    pub fn new(a: impl Into<UserId>, b: impl Into<UserId>) -> Option<Self> {
        let left = a.into();
        let right = b.into();
        match left.cmp(&right) {
            std::cmp::Ordering::Less => Some(Self {
                first: left,
                second: right,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                first: right,
                second: left,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The user with the smaller identifier.
    #[must_use]
    pub const fn first(&self) -> &UserId {
        &self.first
    }

    /// The user with the larger identifier.
    #[must_use]
    pub const fn second(&self) -> &UserId {
        &self.second
    }

    /// Return the member of the pair that is not `user`, if `user` is a member.
    #[must_use]
    pub fn other(&self, user: &str) -> Option<&UserId> {
        if self.first.as_str() == user {
            Some(&self.second)
        } else if self.second.as_str() == user {
            Some(&self.first)
        } else {
            None
        }
    }
}

/// Similarity records for every unordered pair of distinct users.
///
/// A matrix is immutable once computed; a rating change calls for a full
/// recomputation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    records: HashMap<UserPair, SimilarityRecord>,
}

impl SimilarityMatrix {
    /// Compare every unordered pair of users in `store` using `metric`.
    ///
    /// Users are visited in identifier order. The cost is quadratic in the
    /// number of users.
    #[must_use]
    pub fn compute<M>(store: &RatingStore, metric: &M) -> Self
    where
        M: SimilarityMetric + ?Sized,
    {
        let users = store.users_by_id();
        let mut records = HashMap::new();
        for (offset, left) in users.iter().enumerate() {
            for right in users.iter().skip(offset + 1) {
                let Some(pair) = UserPair::new(left.id().clone(), right.id().clone()) else {
                    continue;
                };
                records.insert(pair, metric.compare(left, right));
            }
        }
        info!(
            "computed similarity for {} user pairs across {} users",
            records.len(),
            users.len()
        );
        Self { records }
    }

    /// Return the record for two users in either order.
    ///
    /// `None` when either user is unknown or both name the same user.
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<SimilarityRecord> {
        UserPair::new(a, b).and_then(|pair| self.records.get(&pair).copied())
    }

    /// Every other user paired with `user`, ordered by that user's identifier.
    #[must_use]
    pub fn neighbours_of(&self, user: &str) -> Vec<(&UserId, SimilarityRecord)> {
        let mut neighbours: Vec<(&UserId, SimilarityRecord)> = self
            .records
            .iter()
            .filter_map(|(pair, record)| pair.other(user).map(|other| (other, *record)))
            .collect();
        neighbours.sort_by(|(a, _), (b, _)| a.cmp(b));
        neighbours
    }

    /// Iterate over all pairs and their records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&UserPair, &SimilarityRecord)> {
        self.records.iter()
    }

    /// Number of stored pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Report whether the matrix holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
