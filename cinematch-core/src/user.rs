//! Users and their explicit ratings.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::{ItemId, Rating, RatingSubject, StoreError, UserId};

/// A user together with every rating they have given.
///
/// Demographic attributes are opaque pass-through data. Two derived caches
/// hang off the record: `sorted_ratings` is rebuilt on demand after any
/// rating change, and `similar` holds the last neighbour list computed by a
/// similarity engine until it is explicitly cleared.
///
/// # Examples
/// ```
/// use cinematch_core::{Rating, User};
///
/// let mut user = User::new("1").with_attribute("job", "technician");
/// user.rate("50".into(), Rating::try_from(5_i64).expect("valid"));
/// assert_eq!(user.num_ratings(), 1);
/// assert_eq!(user.attribute("job"), Some("technician"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    attributes: BTreeMap<String, String>,
    ratings: HashMap<ItemId, Rating>,
    sorted_ratings: OnceLock<Vec<ItemId>>,
    similar: Option<Vec<(UserId, f64)>>,
}

impl User {
    /// Create a user without attributes or ratings.
    #[must_use]
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
            ratings: HashMap::new(),
            sorted_ratings: OnceLock::new(),
            similar: None,
        }
    }

    /// Add an opaque attribute while returning `self` for chaining.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Identifier of this user.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Look up an opaque attribute such as `age` or `zipcode`.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Record a rating, replacing any earlier rating of the same item.
    ///
    /// Returns the replaced rating, if any.
    pub fn rate(&mut self, item_id: ItemId, rating: Rating) -> Option<Rating> {
        self.sorted_ratings.take();
        self.ratings.insert(item_id, rating)
    }

    /// Return this user's rating of `item_id`, if present.
    #[must_use]
    pub fn rating_of(&self, item_id: &str) -> Option<Rating> {
        self.ratings.get(item_id).copied()
    }

    /// Report whether this user has rated `item_id`.
    #[must_use]
    pub fn has_rated(&self, item_id: &str) -> bool {
        self.ratings.contains_key(item_id)
    }

    /// Iterate over the identifiers of every rated item.
    pub fn rated_items(&self) -> impl Iterator<Item = &ItemId> {
        self.ratings.keys()
    }

    /// Iterate over every `(item, rating)` pair in arbitrary order.
    pub fn ratings(&self) -> impl Iterator<Item = (&ItemId, Rating)> {
        self.ratings.iter().map(|(item, rating)| (item, *rating))
    }

    /// Number of items this user has rated.
    #[must_use]
    pub fn num_ratings(&self) -> usize {
        self.ratings.len()
    }

    /// Arithmetic mean of this user's ratings.
    ///
    /// # Errors
    /// Returns [`StoreError::EmptyRatingSet`] when the user has rated nothing.
    pub fn avg_rating(&self) -> Result<f64, StoreError> {
        mean(self.ratings.values().copied()).ok_or_else(|| StoreError::EmptyRatingSet {
            subject: RatingSubject::User(self.id.clone()),
        })
    }

    /// Return the user's own `n` highest-rated items.
    ///
    /// Equal ratings are ordered by item id.
    #[must_use]
    pub fn favorites(&self, n: usize) -> Vec<(ItemId, Rating)> {
        self.sorted_ratings()
            .iter()
            .take(n)
            .filter_map(|item| {
                self.rating_of(item.as_str())
                    .map(|rating| (item.clone(), rating))
            })
            .collect()
    }

    fn sorted_ratings(&self) -> &[ItemId] {
        self.sorted_ratings.get_or_init(|| {
            let mut items: Vec<ItemId> = self.ratings.keys().cloned().collect();
            items.sort_by(|a, b| {
                let by_rating = self.ratings.get(b).cmp(&self.ratings.get(a));
                by_rating.then_with(|| a.cmp(b))
            });
            items
        })
    }

    /// The cached neighbour list, most similar first, if one was computed.
    #[must_use]
    pub fn similar(&self) -> Option<&[(UserId, f64)]> {
        self.similar.as_deref()
    }

    /// Replace the cached neighbour list.
    pub fn set_similar(&mut self, similar: Vec<(UserId, f64)>) {
        self.similar = Some(similar);
    }

    /// Drop the cached neighbour list.
    pub fn clear_similar(&mut self) {
        self.similar = None;
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averaging ratings divides a float sum by the rating count"
)]
pub(crate) fn mean(ratings: impl Iterator<Item = Rating>) -> Option<f64> {
    let (sum, count) = ratings.fold((0.0_f64, 0_usize), |(sum, count), rating| {
        (sum + rating.as_f64(), count + 1)
    });
    (count > 0).then(|| sum / count as f64)
}
