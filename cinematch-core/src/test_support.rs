//! In-memory fixtures shared by unit tests, behaviour tests, and benches.

use crate::{Item, RatingRow, RatingStore, StoreError, User};

/// Build a store whose users are exactly those named in `ratings`.
///
/// Each entry is `(user, &[(item, rating)])`; users with an empty slice are
/// still registered. Items are inferred from the rows.
///
/// # Errors
/// Propagates [`StoreError::InvalidRating`] for out-of-range values.
pub fn store_from_ratings(ratings: &[(&str, &[(&str, i64)])]) -> Result<RatingStore, StoreError> {
    let users = ratings.iter().map(|(user, _)| User::new(*user));
    let rows: Vec<RatingRow> = ratings
        .iter()
        .flat_map(|(user, items)| {
            items
                .iter()
                .map(move |(item, rating)| RatingRow::new(*user, *item, *rating))
        })
        .collect();
    RatingStore::from_records(users, std::iter::empty::<Item>(), &rows)
}

/// Build rating rows for one user.
#[must_use]
pub fn rows_for(user: &str, ratings: &[(&str, i64)]) -> Vec<RatingRow> {
    ratings
        .iter()
        .map(|(item, rating)| RatingRow::new(user, *item, *rating))
        .collect()
}
