//! Univariate normal distribution.

use rand::Rng;

use super::{population_moments, sampling, Density, Observation};
use crate::{BayesFuseError, Result};

const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

/// Gaussian N(mean, variance).
///
/// # Example
///
/// ```
/// use bayesfuse::distribution::Gaussian;
///
/// let g = Gaussian::new(5.0, 4.0).expect("positive variance");
/// assert_eq!(g.std_dev(), 2.0);
/// assert!((g.pdf(5.0) - 0.199_471_140_2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Gaussian {
    mean: f64,
    variance: f64,
}

impl Gaussian {
    /// Creates N(mean, variance).
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `variance` is not a finite positive
    /// number or `mean` is not finite.
    pub fn new(mean: f64, variance: f64) -> Result<Self> {
        if !mean.is_finite() {
            return Err(BayesFuseError::invalid_parameter("mean", mean, "finite"));
        }
        if !(variance > 0.0 && variance.is_finite()) {
            return Err(BayesFuseError::invalid_parameter(
                "variance",
                variance,
                "finite and > 0",
            ));
        }
        Ok(Self { mean, variance })
    }

    /// Standard normal N(0, 1).
    #[must_use]
    pub fn standard() -> Self {
        Self {
            mean: 0.0,
            variance: 1.0,
        }
    }

    /// Fits N(x̄, s² + regularizer) to raw samples.
    ///
    /// `s²` is the population variance (divides by n). The regularizer keeps
    /// a constant sample set from producing a zero-variance distribution.
    ///
    /// # Errors
    ///
    /// `EmptyInput` for no samples; `InvalidParameter` if the regularized
    /// variance is not positive.
    pub fn fit(samples: &[f64], regularizer: f64) -> Result<Self> {
        let (mean, variance) =
            population_moments(samples).ok_or_else(|| BayesFuseError::empty_input("gaussian fit"))?;
        Self::new(mean, variance + regularizer)
    }

    /// Returns the mean μ.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the variance σ².
    #[must_use]
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Returns the standard deviation σ.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Precision 1/σ².
    #[must_use]
    pub fn precision(&self) -> f64 {
        1.0 / self.variance
    }

    /// Log density at `x`.
    #[must_use]
    pub fn ln_pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev();
        -0.5 * z * z - self.std_dev().ln() - LN_SQRT_2PI
    }

    /// Density at `x`.
    #[must_use]
    pub fn pdf(&self, x: f64) -> f64 {
        self.ln_pdf(x).exp()
    }

    /// Draws `n` independent realizations.
    pub fn sample_n<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        let std = self.std_dev();
        (0..n)
            .map(|_| self.mean + std * sampling::standard_normal(rng))
            .collect()
    }
}

impl Density for Gaussian {
    fn log_density(&self, x: &Observation) -> Result<f64> {
        Ok(self.ln_pdf(x.as_scalar()?))
    }

    fn sample_with<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Observation> {
        self.sample_n(n, rng)
            .into_iter()
            .map(Observation::Scalar)
            .collect()
    }
}
