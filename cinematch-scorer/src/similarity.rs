//! Pairwise user similarity over commonly rated items.

use cinematch_core::User;

/// Similarity between two users and the evidence it rests on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimilarityRecord {
    /// Similarity in `(0.0, 1.0]`, or exactly `0.0` when nothing is shared.
    pub distance: f64,
    /// Number of items both users rated.
    pub num_shared: usize,
}

impl SimilarityRecord {
    /// Record for two users without a single commonly rated item.
    pub const NO_OVERLAP: Self = Self {
        distance: 0.0,
        num_shared: 0,
    };
}

/// Compare two users' rating vectors.
///
/// Implementations must be symmetric: `compare(a, b) == compare(b, a)`.
/// They must return [`SimilarityRecord::NO_OVERLAP`] when the users share no
/// rated item and a distance in `(0.0, 1.0]` otherwise.
///
/// # Examples
///
/// ```
/// use cinematch_core::User;
/// use cinematch_scorer::{SimilarityMetric, SimilarityRecord};
///
/// struct Overlap;
///
/// impl SimilarityMetric for Overlap {
///     fn compare(&self, a: &User, b: &User) -> SimilarityRecord {
///         let num_shared = a.rated_items().filter(|item| b.has_rated(item.as_str())).count();
///         if num_shared == 0 {
///             return SimilarityRecord::NO_OVERLAP;
///         }
///         SimilarityRecord { distance: 1.0, num_shared }
///     }
/// }
///
/// let a = User::new("a");
/// let b = User::new("b");
/// assert_eq!(Overlap.compare(&a, &b), SimilarityRecord::NO_OVERLAP);
/// ```
pub trait SimilarityMetric: Send + Sync {
    /// Return the similarity record for the pair `(a, b)`.
    fn compare(&self, a: &User, b: &User) -> SimilarityRecord;
}

/// Normalised inverse Euclidean distance.
///
/// Over the shared items, `distance = 1 / (1 + sqrt(Σ (a_i - b_i)²))`: `1.0`
/// for identical ratings on every shared item, approaching `0.0` as the
/// users diverge.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanSimilarity;

impl SimilarityMetric for EuclideanSimilarity {
    #[expect(
        clippy::float_arithmetic,
        reason = "euclidean distance sums squared rating differences"
    )]
    fn compare(&self, a: &User, b: &User) -> SimilarityRecord {
        let (smaller, larger) = if a.num_ratings() <= b.num_ratings() {
            (a, b)
        } else {
            (b, a)
        };

        let (sum_of_squares, num_shared) = smaller
            .ratings()
            .filter_map(|(item, rating)| {
                larger
                    .rating_of(item.as_str())
                    .map(|other| rating.as_f64() - other.as_f64())
            })
            .fold((0.0_f64, 0_usize), |(sum, count), diff| {
                (sum + diff * diff, count + 1)
            });

        if num_shared == 0 {
            return SimilarityRecord::NO_OVERLAP;
        }
        SimilarityRecord {
            distance: 1.0 / (1.0 + sum_of_squares.sqrt()),
            num_shared,
        }
    }
}
