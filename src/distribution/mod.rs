//! Parametric probability distributions.
//!
//! The supported families form a closed set: [`Gaussian`], [`Beta`] and
//! [`Dirichlet`]. Each implements the [`Density`] capability (density, log
//! density, sampling) over an [`Observation`], and the [`Distribution`] enum
//! tags them so heterogeneous collections (e.g. per-modality models) can be
//! stored side by side.
//!
//! All distributions are immutable once constructed. Fusion operators in
//! [`crate::fusion`] build new instances rather than mutating their inputs.
//!
//! # Example
//!
//! ```
//! use bayesfuse::distribution::{Density, Distribution, Observation};
//!
//! let g = Distribution::gaussian(0.0, 1.0).expect("valid parameters");
//! let x = Observation::Scalar(0.0);
//! let p = g.density(&x).expect("scalar observation");
//! assert!((p - 0.398_942_280_4).abs() < 1e-9);
//!
//! // Log density agrees with the log of the density.
//! let lp = g.log_density(&x).expect("scalar observation");
//! assert!((lp - p.ln()).abs() < 1e-12);
//! ```

mod beta;
mod dirichlet;
mod gaussian;
pub mod sampling;
pub mod special;

pub use beta::Beta;
pub use dirichlet::Dirichlet;
pub use gaussian::Gaussian;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::space::LikelihoodFn;
use crate::{BayesFuseError, Result};

/// A single observed value: a scalar for Gaussian/Beta modalities, a
/// probability vector for Dirichlet modalities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Observation {
    /// Real-valued observation.
    Scalar(f64),
    /// Vector-valued observation (e.g. a point on the simplex).
    Vector(Vec<f64>),
}

impl Observation {
    /// Returns the scalar value.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if this is a vector observation.
    pub fn as_scalar(&self) -> Result<f64> {
        match self {
            Observation::Scalar(x) => Ok(*x),
            Observation::Vector(_) => Err(BayesFuseError::ShapeMismatch {
                expected: "scalar",
                found: "vector",
            }),
        }
    }

    /// Returns the vector components.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if this is a scalar observation.
    pub fn as_vector(&self) -> Result<&[f64]> {
        match self {
            Observation::Vector(v) => Ok(v.as_slice()),
            Observation::Scalar(_) => Err(BayesFuseError::ShapeMismatch {
                expected: "vector",
                found: "scalar",
            }),
        }
    }
}

impl From<f64> for Observation {
    fn from(x: f64) -> Self {
        Observation::Scalar(x)
    }
}

impl From<Vec<f64>> for Observation {
    fn from(v: Vec<f64>) -> Self {
        Observation::Vector(v)
    }
}

impl From<&[f64]> for Observation {
    fn from(v: &[f64]) -> Self {
        Observation::Vector(v.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Observation {
    fn from(v: [f64; N]) -> Self {
        Observation::Vector(v.to_vec())
    }
}

/// Capability shared by every distribution family.
pub trait Density {
    /// Log density at `x`.
    ///
    /// Computed directly in log space; prefer it over `density(x).ln()` when
    /// multiplying or pooling densities.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` or `DimensionMismatch` when `x` does not fit the
    /// family's support shape.
    fn log_density(&self, x: &Observation) -> Result<f64>;

    /// Density at `x`.
    ///
    /// # Errors
    ///
    /// Same as [`Density::log_density`].
    fn density(&self, x: &Observation) -> Result<f64> {
        Ok(self.log_density(x)?.exp())
    }

    /// Draws `n` independent realizations using the supplied RNG.
    fn sample_with<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Observation>;

    /// Draws `n` independent realizations from an entropy-seeded RNG.
    fn sample(&self, n: usize) -> Vec<Observation> {
        let mut rng = sampling::seeded_rng(None);
        self.sample_with(n, &mut rng)
    }
}

/// Closed set of supported distribution families.
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    /// Univariate normal.
    Gaussian(Gaussian),
    /// Beta on `[0, 1]`.
    Beta(Beta),
    /// Dirichlet on the simplex.
    Dirichlet(Dirichlet),
}

impl Distribution {
    /// Creates a Gaussian variant.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for non-positive variance.
    pub fn gaussian(mean: f64, variance: f64) -> Result<Self> {
        Gaussian::new(mean, variance).map(Distribution::Gaussian)
    }

    /// Creates a Beta variant.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for non-positive shapes.
    pub fn beta(a: f64, b: f64) -> Result<Self> {
        Beta::new(a, b).map(Distribution::Beta)
    }

    /// Creates a Dirichlet variant.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for empty or non-positive concentrations.
    pub fn dirichlet(alpha: Vec<f64>) -> Result<Self> {
        Dirichlet::new(alpha).map(Distribution::Dirichlet)
    }

    /// Non-parametric construction from an arbitrary density function.
    ///
    /// Only the parametric families are supported; this always fails.
    ///
    /// # Errors
    ///
    /// Always returns `NotImplemented`.
    pub fn non_parametric<F>(_pdf: F) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        Err(BayesFuseError::NotImplemented(
            "general non-parametric pdf construction".to_string(),
        ))
    }

    /// Family name, for logging and diagnostics.
    #[must_use]
    pub fn family(&self) -> &'static str {
        match self {
            Distribution::Gaussian(_) => "gaussian",
            Distribution::Beta(_) => "beta",
            Distribution::Dirichlet(_) => "dirichlet",
        }
    }

    /// Wraps this distribution as a hypothesis-independent likelihood
    /// function: `f(x, _) = density(x)`.
    ///
    /// An observation of the wrong shape has zero support.
    #[must_use]
    pub fn into_likelihood(self) -> LikelihoodFn {
        Box::new(move |x: &Observation, _hypothesis: &str| match self.density(x) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(family = self.family(), %err, "observation rejected by likelihood");
                0.0
            }
        })
    }
}

impl Density for Distribution {
    fn log_density(&self, x: &Observation) -> Result<f64> {
        match self {
            Distribution::Gaussian(d) => d.log_density(x),
            Distribution::Beta(d) => d.log_density(x),
            Distribution::Dirichlet(d) => d.log_density(x),
        }
    }

    fn sample_with<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Observation> {
        match self {
            Distribution::Gaussian(d) => d.sample_with(n, rng),
            Distribution::Beta(d) => d.sample_with(n, rng),
            Distribution::Dirichlet(d) => d.sample_with(n, rng),
        }
    }
}

impl From<Gaussian> for Distribution {
    fn from(d: Gaussian) -> Self {
        Distribution::Gaussian(d)
    }
}

impl From<Beta> for Distribution {
    fn from(d: Beta) -> Self {
        Distribution::Beta(d)
    }
}

impl From<Dirichlet> for Distribution {
    fn from(d: Dirichlet) -> Self {
        Distribution::Dirichlet(d)
    }
}

/// Mean and population variance (divide by n), `None` for empty input.
pub(crate) fn population_moments(xs: &[f64]) -> Option<(f64, f64)> {
    if xs.is_empty() {
        return None;
    }
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let variance = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance))
}

#[cfg(test)]
mod tests;
