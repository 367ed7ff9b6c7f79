//! Tunables for the recommendation engine.

use crate::ConfigError;

/// How candidate items suggested by several neighbours are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DuplicatePolicy {
    /// Keep one candidate per `(neighbour, item)`; an item may repeat.
    #[default]
    Keep,
    /// Keep only the best score per item.
    Max,
    /// Sum the scores per item.
    Sum,
}

/// Configuration for [`Recommender`](crate::Recommender).
///
/// # Examples
/// ```
/// use cinematch_scorer::{DuplicatePolicy, RecommenderConfig};
///
/// let config = RecommenderConfig {
///     duplicate_policy: DuplicatePolicy::Max,
///     ..RecommenderConfig::default()
/// };
/// assert_eq!(config.default_neighbours, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RecommenderConfig {
    /// Neighbour list length used when a recommendation finds no cached
    /// neighbours for the user.
    pub default_neighbours: usize,
    /// Minimum number of shared items for those implicit neighbour lookups.
    pub default_min_shared: usize,
    /// Treatment of items suggested by more than one neighbour.
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            default_neighbours: 5,
            default_min_shared: 3,
            duplicate_policy: DuplicatePolicy::Keep,
        }
    }
}

impl RecommenderConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroNeighbours`] when `default_neighbours` is 0.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.default_neighbours == 0 {
            return Err(ConfigError::ZeroNeighbours);
        }
        Ok(self)
    }

    /// Parse a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields,
    /// and any error raised by [`RecommenderConfig::validate`].
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse { source })?;
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn defaults_match_implicit_neighbour_lookup() {
        let config = RecommenderConfig::default();
        assert_eq!(config.default_neighbours, 5);
        assert_eq!(config.default_min_shared, 3);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Keep);
    }

    #[rstest]
    fn zero_neighbours_is_rejected() {
        let err = RecommenderConfig {
            default_neighbours: 0,
            ..RecommenderConfig::default()
        }
        .validate()
        .expect_err("zero neighbours should be invalid");
        assert!(matches!(err, ConfigError::ZeroNeighbours));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case("{}", RecommenderConfig::default())]
    #[case(
        r#"{"duplicate_policy":"sum","default_min_shared":1}"#,
        RecommenderConfig {
            default_neighbours: 5,
            default_min_shared: 1,
            duplicate_policy: DuplicatePolicy::Sum,
        }
    )]
    fn parses_json_with_defaults(#[case] json: &str, #[case] expected: RecommenderConfig) {
        let parsed = RecommenderConfig::from_json_str(json).expect("valid configuration");
        assert_eq!(parsed, expected);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(r#"{"neighbours":5}"#)]
    #[case(r#"{"duplicate_policy":"average"}"#)]
    #[case("not json")]
    fn rejects_malformed_json(#[case] json: &str) {
        let err = RecommenderConfig::from_json_str(json).expect_err("invalid configuration");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn parsed_configuration_is_validated() {
        let err = RecommenderConfig::from_json_str(r#"{"default_neighbours":0}"#)
            .expect_err("zero neighbours should be invalid");
        assert!(matches!(err, ConfigError::ZeroNeighbours));
    }
}
