//! Likelihood-function contract and closed-form likelihood helpers.
//!
//! A likelihood function maps `(evidence value, hypothesis name)` to a
//! non-negative real interpreted as P(evidence | hypothesis). It may be any
//! user logic; [`crate::distribution::Distribution::into_likelihood`] is one
//! common producer.

use crate::distribution::{Beta, Dirichlet, Gaussian, Observation};
use crate::{BayesFuseError, Result};

/// Stored likelihood function for one modality.
///
/// `Send + Sync` so a fully configured space can be shared across threads
/// behind external synchronization.
pub type LikelihoodFn = Box<dyn Fn(&Observation, &str) -> f64 + Send + Sync>;

/// Normal density N(mean, std²) at `x`.
///
/// # Errors
///
/// `InvalidParameter` if `std` is not positive.
///
/// # Example
///
/// ```
/// use bayesfuse::space::gaussian_likelihood;
///
/// let p = gaussian_likelihood(0.0, 0.0, 1.0).expect("positive std");
/// assert!((p - 0.398_942_280_4).abs() < 1e-9);
/// ```
pub fn gaussian_likelihood(x: f64, mean: f64, std: f64) -> Result<f64> {
    if !(std > 0.0) {
        return Err(BayesFuseError::invalid_parameter("std", std, "> 0"));
    }
    Ok(Gaussian::new(mean, std * std)?.pdf(x))
}

/// Beta(a, b) density at `x`.
///
/// # Errors
///
/// `InvalidParameter` for non-positive shapes.
pub fn beta_likelihood(x: f64, a: f64, b: f64) -> Result<f64> {
    Ok(Beta::new(a, b)?.pdf(x))
}

/// Dirichlet(alpha) density at the probability vector `x`.
///
/// # Errors
///
/// `InvalidParameter` for invalid concentrations, `DimensionMismatch` when
/// `x` and `alpha` differ in length.
pub fn dirichlet_likelihood(x: &[f64], alpha: &[f64]) -> Result<f64> {
    Dirichlet::new(alpha.to_vec())?.pdf(x)
}
