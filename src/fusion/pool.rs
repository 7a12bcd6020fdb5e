//! Log-linear opinion pooling.

use std::collections::BTreeMap;

use tracing::debug;

use crate::distribution::{Density, Distribution, Observation};
use crate::{BayesFuseError, Result};

/// One modality's belief and its (unnormalized) pooling weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalityBelief {
    /// The modality's belief.
    pub distribution: Distribution,
    /// Raw weight, normalized by [`multimodal_fusion`].
    pub weight: f64,
}

impl ModalityBelief {
    /// Pairs a belief with its raw (unnormalized) weight.
    #[must_use]
    pub fn new(distribution: impl Into<Distribution>, weight: f64) -> Self {
        Self {
            distribution: distribution.into(),
            weight,
        }
    }
}

/// Weighted geometric mean of per-modality densities.
///
/// `p(x) = Π pₘ(x)^wₘ` with Σwₘ = 1, evaluated as `exp(Σ wₘ · ln pₘ(x))`
/// so a single near-zero density does not underflow the product. The pooled
/// function is not renormalized over x.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLinearPool {
    components: BTreeMap<String, ModalityBelief>,
}

impl LogLinearPool {
    /// Log of the pooled value at `x`.
    ///
    /// Components with zero weight are skipped.
    ///
    /// # Errors
    ///
    /// Propagates shape/dimension errors from the component densities.
    pub fn log_density(&self, x: &Observation) -> Result<f64> {
        let mut total = 0.0;
        for belief in self.components.values().filter(|b| b.weight > 0.0) {
            total += belief.weight * belief.distribution.log_density(x)?;
        }
        Ok(total)
    }

    /// Pooled value at `x`.
    ///
    /// # Errors
    ///
    /// Same as [`LogLinearPool::log_density`].
    pub fn density(&self, x: &Observation) -> Result<f64> {
        Ok(self.log_density(x)?.exp())
    }

    /// Normalized weight of `modality`.
    #[must_use]
    pub fn weight(&self, modality: &str) -> Option<f64> {
        self.components.get(modality).map(|b| b.weight)
    }

    /// `(modality, normalized weight)` pairs in modality-name order.
    pub fn weights(&self) -> impl Iterator<Item = (&str, f64)> {
        self.components.iter().map(|(m, b)| (m.as_str(), b.weight))
    }

    /// Number of pooled modalities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true when the pool has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Converts the pool into a plain callable `x -> p(x)`.
    pub fn into_fn(self) -> impl Fn(&Observation) -> Result<f64> {
        move |x: &Observation| self.density(x)
    }
}

/// Builds a log-linear pool from per-modality beliefs.
///
/// Weights are normalized to sum to one. A repeated modality name keeps the
/// last belief.
///
/// # Errors
///
/// `EmptyInput` for no beliefs; `InvalidParameter` for a negative or
/// non-finite weight, or weights summing to zero.
///
/// # Example
///
/// ```
/// use bayesfuse::distribution::{Gaussian, Observation};
/// use bayesfuse::fusion::{multimodal_fusion, ModalityBelief};
///
/// let a = Gaussian::new(0.0, 1.0).expect("valid");
/// let b = Gaussian::new(5.0, 4.0).expect("valid");
/// let expected = a.pdf(1.0).sqrt() * b.pdf(1.0).sqrt();
///
/// let pool = multimodal_fusion([
///     ("A", ModalityBelief::new(a, 1.0)),
///     ("B", ModalityBelief::new(b, 1.0)),
/// ])
/// .expect("valid weights");
/// let value = pool.density(&Observation::Scalar(1.0)).expect("scalar");
/// assert!((value - expected).abs() < 1e-12);
/// ```
pub fn multimodal_fusion<I, S>(beliefs: I) -> Result<LogLinearPool>
where
    I: IntoIterator<Item = (S, ModalityBelief)>,
    S: Into<String>,
{
    let mut components: BTreeMap<String, ModalityBelief> = beliefs
        .into_iter()
        .map(|(m, b)| (m.into(), b))
        .collect();
    if components.is_empty() {
        return Err(BayesFuseError::empty_input("multimodal fusion"));
    }
    if let Some((m, b)) = components
        .iter()
        .find(|(_, b)| !(b.weight >= 0.0 && b.weight.is_finite()))
    {
        return Err(BayesFuseError::invalid_parameter(
            &format!("weight[{m}]"),
            b.weight,
            "finite and >= 0",
        ));
    }
    let total: f64 = components.values().map(|b| b.weight).sum();
    if total <= 0.0 {
        return Err(BayesFuseError::invalid_parameter(
            "weights",
            total,
            "sum > 0",
        ));
    }
    for belief in components.values_mut() {
        belief.weight /= total;
    }
    debug!(modalities = components.len(), "built log-linear pool");
    Ok(LogLinearPool { components })
}
