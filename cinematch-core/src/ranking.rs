//! Shared top-N ranking over `(key, score)` pairs.

use std::cmp::Ordering;

/// Return the first `n` entries ordered by descending score.
///
/// The sort is stable: entries with equal scores keep their input order, so
/// callers control tie-breaking by how they order the input. `NaN` scores
/// compare as smaller than every finite score and sink to the end.
///
/// # Examples
/// ```
/// use cinematch_core::top_n;
///
/// let ranked = top_n(vec![("a", 1.0), ("b", 3.0), ("c", 3.0), ("d", 2.0)], 3);
/// assert_eq!(ranked, vec![("b", 3.0), ("c", 3.0), ("d", 2.0)]);
/// ```
#[must_use]
pub fn top_n<K>(mut entries: Vec<(K, f64)>, n: usize) -> Vec<(K, f64)> {
    entries.sort_by(|(_, a), (_, b)| descending(*a, *b));
    entries.truncate(n);
    entries
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}
