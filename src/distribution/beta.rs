//! Beta distribution on the unit interval.

use rand::Rng;

use super::special::{ln_beta, xlogy};
use super::{population_moments, sampling, Density, Observation};
use crate::{BayesFuseError, Result};

/// Beta(a, b) over `[0, 1]`.
///
/// Density: p(x) = x^(a-1) (1-x)^(b-1) / B(a, b). Points outside the unit
/// interval have zero density.
///
/// # Example
///
/// ```
/// use bayesfuse::distribution::Beta;
///
/// let beta = Beta::new(2.0, 5.0).expect("positive shapes");
/// // p(0.5) = 30 * 0.5 * 0.5^4
/// assert!((beta.pdf(0.5) - 0.9375).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Beta {
    a: f64,
    b: f64,
}

impl Beta {
    /// Creates Beta(a, b).
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` unless both shapes are finite and > 0.
    pub fn new(a: f64, b: f64) -> Result<Self> {
        if !(a > 0.0 && b > 0.0 && a.is_finite() && b.is_finite()) {
            return Err(BayesFuseError::invalid_parameter(
                "a, b",
                format!("({a}, {b})"),
                "both finite and > 0",
            ));
        }
        Ok(Self { a, b })
    }

    /// Method-of-moments fit to samples in `(0, 1)`.
    ///
    /// With sample mean m and regularized variance v, the shared factor
    /// `c = m(1-m)/v - 1` gives `a = m·c`, `b = (1-m)·c`.
    ///
    /// # Errors
    ///
    /// `EmptyInput` for no samples; `InvalidParameter` when the samples are
    /// too dispersed for any Beta (c ≤ 0) or the mean lies outside (0, 1).
    pub fn fit_moments(samples: &[f64], regularizer: f64) -> Result<Self> {
        let (mean, variance) =
            population_moments(samples).ok_or_else(|| BayesFuseError::empty_input("beta fit"))?;
        if !(mean > 0.0 && mean < 1.0) {
            return Err(BayesFuseError::invalid_parameter("sample mean", mean, "in (0, 1)"));
        }
        let common = mean * (1.0 - mean) / (variance + regularizer) - 1.0;
        Self::new(mean * common, (1.0 - mean) * common)
    }

    /// Returns the α shape parameter.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Returns the β shape parameter.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// E[X] = a/(a+b).
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.a / (self.a + self.b)
    }

    /// Var[X] = ab/[(a+b)²(a+b+1)].
    #[must_use]
    pub fn variance(&self) -> f64 {
        let sum = self.a + self.b;
        (self.a * self.b) / (sum * sum * (sum + 1.0))
    }

    /// Log density at `x`; `-inf` outside `[0, 1]`.
    #[must_use]
    pub fn ln_pdf(&self, x: f64) -> f64 {
        if !(0.0..=1.0).contains(&x) {
            return f64::NEG_INFINITY;
        }
        xlogy(self.a - 1.0, x) + xlogy(self.b - 1.0, 1.0 - x) - ln_beta(self.a, self.b)
    }

    /// Density at `x`; zero outside `[0, 1]`.
    #[must_use]
    pub fn pdf(&self, x: f64) -> f64 {
        self.ln_pdf(x).exp()
    }

    /// Draws `n` realizations as X/(X+Y) with X ~ Gamma(a), Y ~ Gamma(b).
    pub fn sample_n<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        (0..n)
            .map(|_| {
                let x = sampling::gamma(self.a, rng);
                let y = sampling::gamma(self.b, rng);
                let sum = x + y;
                // Both gamma draws can underflow for tiny shapes.
                if sum <= 0.0 {
                    return 0.5;
                }
                (x / sum).clamp(0.0, 1.0)
            })
            .collect()
    }
}

impl Density for Beta {
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
