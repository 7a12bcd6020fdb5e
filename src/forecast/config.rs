//! Forecast pipeline configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{BayesFuseError, Result};

/// Configuration for a [`super::ForecastPipeline`].
///
/// Every field has a default, so a partial JSON document is a valid config.
///
/// # Example
///
/// ```
/// use bayesfuse::forecast::ForecastConfig;
///
/// let config = ForecastConfig::from_json(r#"{ "sample_count": 10, "seed": 7 }"#)
///     .expect("valid config");
/// assert_eq!(config.target_hypothesis, "UP");
/// assert_eq!(config.sample_count, 10);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Hypothesis whose posterior mass is reported (default: "UP")
    pub target_hypothesis: String,

    /// Unnormalized prior table (default: UP 0.5, DOWN 0.5)
    pub priors: BTreeMap<String, f64>,

    /// Added to every fitted variance (default: 1e-6)
    pub variance_regularizer: f64,

    /// Number of posterior evaluations per forecast (default: 50)
    pub sample_count: usize,

    /// Random seed for synthetic evidence draws
    pub seed: Option<u64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            target_hypothesis: "UP".to_string(),
            priors: BTreeMap::from([("UP".to_string(), 0.5), ("DOWN".to_string(), 0.5)]),
            variance_regularizer: 1e-6,
            sample_count: 50,
            seed: None,
        }
    }
}

impl ForecastConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON config; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for malformed JSON or a config that fails
    /// [`ForecastConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            BayesFuseError::invalid_parameter("config", e, "valid ForecastConfig JSON")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Set the reported hypothesis.
    #[must_use]
    pub fn with_target(mut self, hypothesis: impl Into<String>) -> Self {
        self.target_hypothesis = hypothesis.into();
        self
    }

    /// Replace the prior table.
    #[must_use]
    pub fn with_priors<I, S>(mut self, priors: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.priors = priors.into_iter().map(|(h, p)| (h.into(), p)).collect();
        self
    }

    #[must_use]
    pub fn with_variance_regularizer(mut self, regularizer: f64) -> Self {
        self.variance_regularizer = regularizer;
        self
    }

    #[must_use]
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks field constraints.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a non-positive regularizer, zero sample count or
    /// empty target name; `EmptyPriors` for an empty prior table.
    pub fn validate(&self) -> Result<()> {
        if !(self.variance_regularizer > 0.0 && self.variance_regularizer.is_finite()) {
            return Err(BayesFuseError::invalid_parameter(
                "variance_regularizer",
                self.variance_regularizer,
                "finite and > 0",
            ));
        }
        if self.sample_count == 0 {
            return Err(BayesFuseError::invalid_parameter(
                "sample_count",
                self.sample_count,
                ">= 1",
            ));
        }
        if self.target_hypothesis.is_empty() {
            return Err(BayesFuseError::invalid_parameter(
                "target_hypothesis",
                "\"\"",
                "non-empty name",
            ));
        }
        if self.priors.is_empty() {
            return Err(BayesFuseError::EmptyPriors);
        }
        Ok(())
    }
}
