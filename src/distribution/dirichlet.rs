//! Dirichlet distribution over the probability simplex.

use rand::Rng;

use super::special::{ln_multivariate_beta, xlogy};
use super::{population_moments, sampling, Density, Observation};
use crate::{BayesFuseError, Result};

/// Dirichlet(α₁, ..., αₖ).
///
/// Dimensionality is fixed at construction. Densities are evaluated on
/// probability vectors of the same length. A component outside `[0, 1]` has
/// zero density; the unit-sum constraint is not checked.
///
/// # Example
///
/// ```
/// use bayesfuse::distribution::Dirichlet;
///
/// let d = Dirichlet::new(vec![1.0, 1.0, 1.0]).expect("positive concentrations");
/// // Dirichlet(1, 1, 1) is uniform on the 2-simplex with density Γ(3) = 2.
/// let p = d.pdf(&[0.2, 0.3, 0.5]).expect("matching dimension");
/// assert!((p - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dirichlet {
    alpha: Vec<f64>,
}

impl Dirichlet {
    /// Creates Dirichlet(α).
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `alpha` is empty or any entry is not a
    /// finite positive number.
    pub fn new(alpha: Vec<f64>) -> Result<Self> {
        if alpha.is_empty() {
            return Err(BayesFuseError::invalid_parameter(
                "alpha",
                "[]",
                "at least one concentration",
            ));
        }
        if let Some(&bad) = alpha.iter().find(|&&a| !(a > 0.0 && a.is_finite())) {
            return Err(BayesFuseError::invalid_parameter(
                "alpha",
                bad,
                "all entries finite and > 0",
            ));
        }
        Ok(Self { alpha })
    }

    /// Symmetric Dirichlet(c, ..., c) with `k` components.
    ///
    /// # Errors
    ///
    /// Same as [`Dirichlet::new`].
    pub fn symmetric(k: usize, concentration: f64) -> Result<Self> {
        Self::new(vec![concentration; k])
    }

    /// Method-of-moments fit to a set of simplex vectors.
    ///
    /// Component means mₖ give the direction; the total concentration is
    /// the average over components of `mₖ(1-mₖ)/vₖ - 1`, where vₖ is the
    /// regularized population variance of component k.
    ///
    /// # Errors
    ///
    /// `EmptyInput` for no vectors, `DimensionMismatch` for ragged input,
    /// `InvalidParameter` when no positive concentration is implied.
    pub fn fit_moments(vectors: &[Vec<f64>], regularizer: f64) -> Result<Self> {
        let first = vectors
            .first()
            .ok_or_else(|| BayesFuseError::empty_input("dirichlet fit"))?;
        let k = first.len();
        if let Some(bad) = vectors.iter().find(|v| v.len() != k) {
            return Err(BayesFuseError::DimensionMismatch {
                expected: k,
                actual: bad.len(),
            });
        }

        let mut means = Vec::with_capacity(k);
        let mut precision_sum = 0.0;
        let mut informative = 0usize;
        for j in 0..k {
            let column: Vec<f64> = vectors.iter().map(|v| v[j]).collect();
            let (mean, variance) = population_moments(&column)
                .ok_or_else(|| BayesFuseError::empty_input("dirichlet fit"))?;
            if mean > 0.0 && mean < 1.0 {
                precision_sum += mean * (1.0 - mean) / (variance + regularizer) - 1.0;
                informative += 1;
            }
            means.push(mean);
        }
        if informative == 0 {
            return Err(BayesFuseError::invalid_parameter(
                "component means",
                format!("{means:?}"),
                "at least one in (0, 1)",
            ));
        }
        let total = precision_sum / informative as f64;
        Self::new(means.iter().map(|m| m * total).collect())
    }

    /// Concentration vector α.
    #[must_use]
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    /// Number of components k.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.alpha.len()
    }

    /// α₀ = Σαᵢ.
    #[must_use]
    pub fn concentration(&self) -> f64 {
        self.alpha.iter().sum()
    }

    /// E[Xᵢ] = αᵢ/α₀.
    #[must_use]
    pub fn mean(&self) -> Vec<f64> {
        let total = self.concentration();
        self.alpha.iter().map(|a| a / total).collect()
    }

    /// Var[Xᵢ] = αᵢ(α₀-αᵢ)/[α₀²(α₀+1)].
    #[must_use]
    pub fn variance(&self) -> Vec<f64> {
        let total = self.concentration();
        let denom = total * total * (total + 1.0);
        self.alpha.iter().map(|a| a * (total - a) / denom).collect()
    }

    /// Log density at the probability vector `x`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `x.len()` differs from [`Dirichlet::dim`].
    pub fn ln_pdf(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.dim() {
            return Err(BayesFuseError::DimensionMismatch {
                expected: self.dim(),
                actual: x.len(),
            });
        }
        if x.iter().any(|xi| !(0.0..=1.0).contains(xi)) {
            return Ok(f64::NEG_INFINITY);
        }
        let kernel: f64 = self
            .alpha
            .iter()
            .zip(x)
            .map(|(&a, &xi)| xlogy(a - 1.0, xi))
            .sum();
        Ok(kernel - ln_multivariate_beta(&self.alpha))
    }

    /// Density at the probability vector `x`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `x.len()` differs from [`Dirichlet::dim`].
    pub fn pdf(&self, x: &[f64]) -> Result<f64> {
        Ok(self.ln_pdf(x)?.exp())
    }

    /// Draws `n` simplex vectors by normalizing independent Gamma(αᵢ) draws.
    pub fn sample_n<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Vec<f64>> {
        (0..n)
            .map(|_| {
                let draws: Vec<f64> = self
                    .alpha
                    .iter()
                    .map(|&a| sampling::gamma(a, rng))
                    .collect();
                let sum: f64 = draws.iter().sum();
                if sum <= 0.0 {
                    // Every component underflowed; fall back to the mean.
                    return self.mean();
                }
                draws.into_iter().map(|g| g / sum).collect()
            })
            .collect()
    }
}

impl Density for Dirichlet {
    fn log_density(&self, x: &Observation) -> Result<f64> {
        self.ln_pdf(x.as_vector()?)
    }

    fn sample_with<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Observation> {
        self.sample_n(n, rng)
            .into_iter()
            .map(Observation::Vector)
            .collect()
    }
}
