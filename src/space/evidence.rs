//! Evidence records and posterior tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::distribution::Observation;

/// Observed values keyed by modality name.
///
/// # Example
///
/// ```
/// use bayesfuse::space::Evidence;
///
/// let evidence = Evidence::new()
///     .with("trajectory", 0.2)
///     .with("regime", vec![0.6, 0.3, 0.1]);
/// assert_eq!(evidence.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evidence {
    values: BTreeMap<String, Observation>,
}

impl Evidence {
    /// Creates an empty evidence record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, modality: impl Into<String>, value: impl Into<Observation>) -> Self {
        self.insert(modality, value);
        self
    }

    /// Inserts or replaces the observation for `modality`.
    pub fn insert(&mut self, modality: impl Into<String>, value: impl Into<Observation>) {
        self.values.insert(modality.into(), value.into());
    }

    /// Observation recorded for `modality`.
    #[must_use]
    pub fn get(&self, modality: &str) -> Option<&Observation> {
        self.values.get(modality)
    }

    /// Iterates `(modality, observation)` pairs in modality-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Observation)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of observed modalities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when nothing was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S, O> FromIterator<(S, O)> for Evidence
where
    S: Into<String>,
    O: Into<Observation>,
{
    fn from_iter<I: IntoIterator<Item = (S, O)>>(iter: I) -> Self {
        let mut evidence = Evidence::new();
        for (modality, value) in iter {
            evidence.insert(modality, value);
        }
        evidence
    }
}

/// Normalized posterior P(hypothesis | evidence).
///
/// Entries are non-negative and sum to one. When no hypothesis had any
/// support under the evidence the table is uniform and
/// [`Posterior::is_degenerate`] reports `true`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Posterior {
    probabilities: BTreeMap<String, f64>,
    degenerate: bool,
}

impl Posterior {
    pub(crate) fn new(probabilities: BTreeMap<String, f64>, degenerate: bool) -> Self {
        Self {
            probabilities,
            degenerate,
        }
    }

    /// Probability of `hypothesis`, if it is part of the hypothesis set.
    #[must_use]
    pub fn get(&self, hypothesis: &str) -> Option<f64> {
        self.probabilities.get(hypothesis).copied()
    }

    /// Iterates `(hypothesis, probability)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.probabilities.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Number of hypotheses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Returns true for an empty hypothesis set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sum of all entries (1 up to rounding).
    #[must_use]
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// True when the uniform fallback was used.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Hypothesis with the largest posterior mass. Ties resolve to the
    /// lexicographically first name.
    #[must_use]
    pub fn most_probable(&self) -> Option<(&str, f64)> {
        self.iter()
            .fold(None, |best: Option<(&str, f64)>, (h, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((h, p)),
            })
    }

    /// Consumes the posterior, returning the underlying table.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, f64> {
        self.probabilities
    }
}

impl std::ops::Index<&str> for Posterior {
    type Output = f64;

    /// # Panics
    ///
    /// Panics if `hypothesis` is not in the table.
    fn index(&self, hypothesis: &str) -> &f64 {
        &self.probabilities[hypothesis]
    }
}
