//! Core domain types for the Cinematch recommendation engine.
//!
//! The crate holds the rating store (users, items, and the sparse matrix of
//! explicit `1..=5` ratings between them) together with the shared top-N
//! ranking helper. Parsing of the on-disk dataset happens elsewhere; the
//! store consumes already-parsed [`User`] and [`Item`] records plus a slice
//! of [`RatingRow`]s.
//!
//! # Examples
//!
//! ```
//! use cinematch_core::{Item, RatingRow, RatingStore, User};
//!
//! # fn main() -> Result<(), cinematch_core::StoreError> {
//! let store = RatingStore::from_records(
//!     [User::new("1").with_attribute("age", "24")],
//!     [Item::new("61").with_title("Three Colors: White (1994)")],
//!     &[RatingRow::new("1", "61", 4).with_timestamp(878_542_420)],
//! )?;
//! let rated = store.rated_items_of("1")?;
//! assert_eq!(rated.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod ids;
mod item;
mod ranking;
mod rating;
mod store;
mod user;

/// Fixtures for building small stores in tests and benches.
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use error::{RatingSubject, StoreError};
pub use ids::{ItemId, UserId};
pub use item::Item;
pub use ranking::top_n;
pub use rating::{Rating, RatingError, RatingRow};
pub use store::RatingStore;
pub use user::User;
