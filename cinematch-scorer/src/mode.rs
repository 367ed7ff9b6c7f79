//! Named strategies for scoring candidate items.

use std::fmt;
use std::str::FromStr;

use crate::RecommendError;

/// Strategy used by [`Recommender::recommend`](crate::Recommender::recommend).
///
/// # Examples
/// ```
/// use cinematch_scorer::{RecommendError, RecommendationMode};
///
/// assert_eq!("simple".parse::<RecommendationMode>(), Ok(RecommendationMode::Simple));
/// assert!(matches!(
///     "slope-one".parse::<RecommendationMode>(),
///     Err(RecommendError::InvalidMode { .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecommendationMode {
    /// Score each item a neighbour rated by `similarity × rating`.
    #[default]
    Simple,
}

impl RecommendationMode {
    /// Canonical name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
        }
    }
}

impl fmt::Display for RecommendationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationMode {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            other => Err(RecommendError::InvalidMode {
                mode: other.to_owned(),
            }),
        }
    }
}
