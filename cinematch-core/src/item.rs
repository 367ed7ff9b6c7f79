//! Rated items and their per-user ratings.

use std::collections::{BTreeMap, HashMap};

use crate::user::mean;
use crate::{ItemId, Rating, RatingSubject, StoreError, UserId};

/// An item (a movie in the MovieLens data) and the ratings it received.
///
/// Items created on the fly from rating rows carry no title or attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    title: Option<String>,
    attributes: BTreeMap<String, String>,
    ratings: HashMap<UserId, Rating>,
}

impl Item {
    /// Create an item without metadata or ratings.
    #[must_use]
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            attributes: BTreeMap::new(),
            ratings: HashMap::new(),
        }
    }

    /// Set the display title while returning `self` for chaining.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add an opaque attribute (release date, genre flags, ...).
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Identifier of this item.
    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.id
    }

    /// Display title, when the loader supplied one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Look up an opaque attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Record a rating, replacing any earlier rating from the same user.
    pub fn rate(&mut self, user_id: UserId, rating: Rating) -> Option<Rating> {
        self.ratings.insert(user_id, rating)
    }

    /// Iterate over the users who rated this item.
    pub fn raters(&self) -> impl Iterator<Item = &UserId> {
        self.ratings.keys()
    }

    /// Return the rating `user_id` gave this item, if present.
    #[must_use]
    pub fn rating_by(&self, user_id: &str) -> Option<Rating> {
        self.ratings.get(user_id).copied()
    }

    /// Number of ratings received.
    #[must_use]
    pub fn num_ratings(&self) -> usize {
        self.ratings.len()
    }

    /// Arithmetic mean of the ratings received.
    ///
    /// # Errors
    /// Returns [`StoreError::EmptyRatingSet`] when nobody rated the item.
    pub fn avg_rating(&self) -> Result<f64, StoreError> {
        mean(self.ratings.values().copied()).ok_or_else(|| StoreError::EmptyRatingSet {
            subject: RatingSubject::Item(self.id.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(&[5], 5.0)]
    #[case(&[4, 2], 3.0)]
    #[case(&[1, 2, 2], 5.0 / 3.0)]
    #[expect(
        clippy::float_arithmetic,
        reason = "assertions compare floating-point scores"
    )]
    fn average_rating(#[case] ratings: &[i64], #[case] expected: f64) {
        let mut item = Item::new("242");
        for (idx, raw) in ratings.iter().enumerate() {
            let rating = Rating::try_from(*raw).expect("valid rating");
            item.rate(UserId::new(idx.to_string()), rating);
        }
        assert_eq!(item.num_ratings(), ratings.len());
        let avg = item.avg_rating().expect("ratings present");
        assert!((avg - expected).abs() < 1e-12, "got {avg}");
    }

    #[rstest]
    fn unrated_item_has_no_average() {
        let err = Item::new("1682").avg_rating().expect_err("no ratings");
        assert!(matches!(
            err,
            StoreError::EmptyRatingSet {
                subject: RatingSubject::Item(_)
            }
        ));
    }

    #[rstest]
    fn metadata_is_passed_through() {
        let item = Item::new("1")
            .with_title("Toy Story (1995)")
            .with_attribute("Animation", "1");
        assert_eq!(item.title(), Some("Toy Story (1995)"));
        assert_eq!(item.attribute("Animation"), Some("1"));
        assert_eq!(item.attribute("Horror"), None);
    }
}
