//! In-memory rating store.
//!
//! The store owns every [`User`] and [`Item`] and attaches parsed rating rows
//! to both sides. Users must be known up front; items may be inferred from
//! rating rows alone, in which case a bare placeholder is created.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::{Item, ItemId, Rating, RatingRow, StoreError, User, UserId};

/// Users, items, and the sparse rating matrix that links them.
///
/// # Examples
/// ```
/// use cinematch_core::{Item, RatingRow, RatingStore, User};
///
/// # fn main() -> Result<(), cinematch_core::StoreError> {
/// let store = RatingStore::from_records(
///     [User::new("1"), User::new("2")],
///     [Item::new("50").with_title("Star Wars (1977)")],
///     &[RatingRow::new("1", "50", 5), RatingRow::new("2", "172", 4)],
/// )?;
/// assert_eq!(store.rating_of("1", "50").map(|r| r.value()), Some(5));
/// assert_eq!(store.title_of("50"), "Star Wars (1977)");
/// assert_eq!(store.title_of("172"), "172");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    users: HashMap<UserId, User>,
    items: HashMap<ItemId, Item>,
}

impl RatingStore {
    /// Build a store from already-parsed user and item records.
    ///
    /// Later records replace earlier ones with the same identifier.
    #[must_use]
    pub fn new<U, I>(users: U, items: I) -> Self
    where
        U: IntoIterator<Item = User>,
        I: IntoIterator<Item = Item>,
    {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.id().clone(), user))
                .collect(),
            items: items
                .into_iter()
                .map(|item| (item.id().clone(), item))
                .collect(),
        }
    }

    /// Build a store and attach `rows` to both users and items.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownUserReference`] when a row names a user
    /// absent from `users`, or [`StoreError::InvalidRating`] when a row
    /// carries a value outside `1..=5`.
    pub fn from_records<U, I>(users: U, items: I, rows: &[RatingRow]) -> Result<Self, StoreError>
    where
        U: IntoIterator<Item = User>,
        I: IntoIterator<Item = Item>,
    {
        let mut store = Self::new(users, items);
        store.attach_user_ratings(rows)?;
        store.attach_item_ratings(rows)?;
        Ok(store)
    }

    /// Attach every row to the rating map of the user it names.
    ///
    /// All rows are validated before any is applied, so a failing call
    /// leaves the store untouched.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownUserReference`] for a row naming an
    /// unknown user and [`StoreError::InvalidRating`] for an out-of-range
    /// value.
    pub fn attach_user_ratings(&mut self, rows: &[RatingRow]) -> Result<(), StoreError> {
        let validated = self.validate_rows(rows)?;
        for (row, rating) in validated {
            if let Some(user) = self.users.get_mut(row.user_id.as_str()) {
                user.rate(row.item_id.clone(), rating);
            }
        }
        Ok(())
    }

    /// Attach every row to the rating map of the item it names.
    ///
    /// Unknown items are created as bare placeholders. Users are not
    /// checked here; the user side of the load reports unknown users.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidRating`] for an out-of-range value.
    pub fn attach_item_ratings(&mut self, rows: &[RatingRow]) -> Result<(), StoreError> {
        let validated = rows
            .iter()
            .map(|row| validate_rating(row).map(|rating| (row, rating)))
            .collect::<Result<Vec<_>, _>>()?;
        for (row, rating) in validated {
            self.item_entry(&row.item_id)
                .rate(row.user_id.clone(), rating);
        }
        Ok(())
    }

    /// Attach a single rating to both its user and its item.
    ///
    /// Returns the rating it replaced, if the user had already rated the item.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownUserReference`] or
    /// [`StoreError::InvalidRating`] without modifying the store.
    pub fn insert_rating(&mut self, row: &RatingRow) -> Result<Option<Rating>, StoreError> {
        let rating = validate_rating(row)?;
        let user = self
            .users
            .get_mut(row.user_id.as_str())
            .ok_or_else(|| unknown_reference(row))?;
        let previous = user.rate(row.item_id.clone(), rating);
        self.item_entry(&row.item_id)
            .rate(row.user_id.clone(), rating);
        Ok(previous)
    }

    fn validate_rows<'a>(
        &self,
        rows: &'a [RatingRow],
    ) -> Result<Vec<(&'a RatingRow, Rating)>, StoreError> {
        rows.iter()
            .map(|row| {
                if !self.users.contains_key(row.user_id.as_str()) {
                    return Err(unknown_reference(row));
                }
                validate_rating(row).map(|rating| (row, rating))
            })
            .collect()
    }

    fn item_entry(&mut self, item_id: &ItemId) -> &mut Item {
        self.items.entry(item_id.clone()).or_insert_with(|| {
            debug!("creating placeholder for unlisted item {item_id}");
            Item::new(item_id.clone())
        })
    }

    /// Look up a user.
    #[must_use]
    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    /// Look up a user for mutation of its derived caches.
    #[must_use]
    pub fn user_mut(&mut self, user_id: &str) -> Option<&mut User> {
        self.users.get_mut(user_id)
    }

    /// Look up an item.
    #[must_use]
    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.get(item_id)
    }

    /// Iterate over all users in arbitrary order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Iterate over all items in arbitrary order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Return every user sorted by identifier.
    #[must_use]
    pub fn users_by_id(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by(|a, b| a.id().cmp(b.id()));
        users
    }

    /// Number of known users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of known items, placeholders included.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Return the set of items rated by `user_id`.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownUser`] when the user is not in the store.
    pub fn rated_items_of(&self, user_id: &str) -> Result<HashSet<&ItemId>, StoreError> {
        self.users
            .get(user_id)
            .map(|user| user.rated_items().collect())
            .ok_or_else(|| StoreError::UnknownUser {
                user_id: UserId::from(user_id),
            })
    }

    /// Return the rating `user_id` gave `item_id`, if both exist and are linked.
    #[must_use]
    pub fn rating_of(&self, user_id: &str, item_id: &str) -> Option<Rating> {
        self.users
            .get(user_id)
            .and_then(|user| user.rating_of(item_id))
    }

    /// Display title for an item, falling back to its identifier.
    #[must_use]
    pub fn title_of<'a>(&'a self, item_id: &'a str) -> &'a str {
        self.items
            .get(item_id)
            .and_then(Item::title)
            .unwrap_or(item_id)
    }

    /// Drop every user's cached neighbour list.
    pub fn clear_similar(&mut self) {
        for user in self.users.values_mut() {
            user.clear_similar();
        }
    }
}

fn validate_rating(row: &RatingRow) -> Result<Rating, StoreError> {
    Rating::try_from(row.rating).map_err(|source| StoreError::InvalidRating {
        user_id: row.user_id.clone(),
        item_id: row.item_id.clone(),
        source,
    })
}

fn unknown_reference(row: &RatingRow) -> StoreError {
    StoreError::UnknownUserReference {
        user_id: row.user_id.clone(),
        item_id: row.item_id.clone(),
    }
}
