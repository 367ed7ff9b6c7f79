//! Behavioural coverage for attaching parsed ratings to the store.

use std::cell::RefCell;

use cinematch_core::{Item, RatingRow, RatingStore, StoreError, User};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Store under test, populated by the `given` step.
#[fixture]
pub fn store() -> RefCell<RatingStore> {
    RefCell::new(RatingStore::default())
}

/// Outcome of the most recent load.
#[fixture]
pub fn load_result() -> RefCell<Option<Result<(), StoreError>>> {
    RefCell::new(None)
}

#[given("a store with users 1 and 2 and one listed item")]
fn store_with_users(store: &RefCell<RatingStore>) {
    *store.borrow_mut() = RatingStore::new(
        [User::new("1"), User::new("2")],
        [Item::new("100").with_title("Fargo (1996)")],
    );
}

#[when("I attach ratings that mention an unlisted item")]
fn attach_with_unlisted_item(
    store: &RefCell<RatingStore>,
    load_result: &RefCell<Option<Result<(), StoreError>>>,
) {
    let rows = [
        RatingRow::new("1", "100", 5),
        RatingRow::new("2", "100", 3),
        RatingRow::new("2", "258", 4),
    ];
    let mut guard = store.borrow_mut();
    let result = guard
        .attach_user_ratings(&rows)
        .and_then(|()| guard.attach_item_ratings(&rows));
    *load_result.borrow_mut() = Some(result);
}

#[when("I attach ratings from an unknown user")]
fn attach_from_unknown_user(
    store: &RefCell<RatingStore>,
    load_result: &RefCell<Option<Result<(), StoreError>>>,
) {
    let rows = [RatingRow::new("1", "100", 5), RatingRow::new("943", "100", 2)];
    let result = store.borrow_mut().attach_user_ratings(&rows);
    *load_result.borrow_mut() = Some(result);
}

#[then("the unlisted item exists with one rating")]
fn unlisted_item_exists(
    store: &RefCell<RatingStore>,
    load_result: &RefCell<Option<Result<(), StoreError>>>,
) {
    match load_result.borrow().as_ref() {
        Some(Ok(())) => {}
        Some(Err(err)) => panic!("load should succeed, got {err}"),
        None => panic!("load result must be recorded"),
    }
    let guard = store.borrow();
    let Some(item) = guard.item("258") else {
        panic!("placeholder item should exist")
    };
    assert_eq!(item.num_ratings(), 1);
    assert!(item.title().is_none());
}

#[then("the listed item's average rating is 4")]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores"
)]
fn listed_item_average(store: &RefCell<RatingStore>) {
    let guard = store.borrow();
    let Some(item) = guard.item("100") else {
        panic!("listed item should exist")
    };
    match item.avg_rating() {
        Ok(avg) => assert!((avg - 4.0).abs() < 1e-12, "expected 4, got {avg}"),
        Err(err) => panic!("item has ratings, got {err}"),
    }
}

#[then("the load fails naming the unknown user")]
fn load_fails(load_result: &RefCell<Option<Result<(), StoreError>>>) {
    match load_result.borrow().as_ref() {
        Some(Err(StoreError::UnknownUserReference { user_id, .. })) => {
            assert_eq!(user_id.as_str(), "943");
        }
        Some(Err(other)) => panic!("unexpected error: {other}"),
        Some(Ok(())) => panic!("expected the load to fail"),
        None => panic!("load result must be recorded"),
    }
}

#[scenario(path = "tests/features/rating_store.feature", index = 0)]
fn unlisted_items_become_placeholders(
    store: RefCell<RatingStore>,
    load_result: RefCell<Option<Result<(), StoreError>>>,
) {
    let _ = (store, load_result);
}

#[scenario(path = "tests/features/rating_store.feature", index = 1)]
fn unknown_users_are_rejected(
    store: RefCell<RatingStore>,
    load_result: RefCell<Option<Result<(), StoreError>>>,
) {
    let _ = (store, load_result);
}
