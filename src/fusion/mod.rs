//! Evidence fusion operators.
//!
//! Three pure operators that combine several beliefs into one:
//!
//! - [`fuse_gaussians`]: precision-weighted combination of independent
//!   Gaussian estimates of the same latent quantity. The product of Gaussian
//!   densities is Gaussian with
//!   `1/σ² = Σ 1/σᵢ²` and `μ = σ² · Σ μᵢ/σᵢ²`.
//! - [`fuse_dirichlet`] / [`fuse_concentrations`]: additive pooling of
//!   Dirichlet concentrations, `α = Σ αᵢ` element-wise.
//! - [`multimodal_fusion`]: log-linear opinion pool over heterogeneous
//!   distributions, `p(x) ∝ Π pₘ(x)^wₘ` with weights normalized to one.
//!
//! All three depend only on sums, so the result does not depend on input
//! order beyond floating-point rounding.
//!
//! The log-linear pool combines *already computed* per-modality beliefs. It
//! is not a Bayesian posterior: use [`crate::space::ProbabilitySpace::posterior`]
//! to combine raw likelihoods with priors.
//!
//! # Example
//!
//! ```
//! use bayesfuse::distribution::Gaussian;
//! use bayesfuse::fusion::fuse_gaussians;
//!
//! let a = Gaussian::new(10.0, 4.0).expect("valid");
//! let b = Gaussian::new(14.0, 9.0).expect("valid");
//! let fused = fuse_gaussians(&[a, b]).expect("non-empty");
//!
//! let var = 1.0 / (1.0 / 4.0 + 1.0 / 9.0);
//! assert!((fused.variance() - var).abs() < 1e-12);
//! assert!((fused.mean() - var * (10.0 / 4.0 + 14.0 / 9.0)).abs() < 1e-12);
//! ```

mod pool;

pub use pool::{multimodal_fusion, LogLinearPool, ModalityBelief};

use tracing::debug;

use crate::distribution::{Dirichlet, Gaussian};
use crate::{BayesFuseError, Result};

/// Precision-weighted fusion of Gaussian estimates.
///
/// # Errors
///
/// `EmptyInput` when `gaussians` is empty (zero total precision).
pub fn fuse_gaussians(gaussians: &[Gaussian]) -> Result<Gaussian> {
    if gaussians.is_empty() {
        return Err(BayesFuseError::empty_input("gaussian fusion"));
    }
    let precision: f64 = gaussians.iter().map(Gaussian::precision).sum();
    let weighted_means: f64 = gaussians.iter().map(|g| g.mean() / g.variance()).sum();
    let variance = 1.0 / precision;
    let fused = Gaussian::new(variance * weighted_means, variance)?;
    debug!(
        inputs = gaussians.len(),
        mean = fused.mean(),
        variance = fused.variance(),
        "fused gaussians"
    );
    Ok(fused)
}

/// Additive fusion of Dirichlet distributions: α = Σ αᵢ.
///
/// # Errors
///
/// `EmptyInput` for no inputs; `DimensionMismatch` when the inputs differ in
/// dimensionality.
pub fn fuse_dirichlet(dirichlets: &[Dirichlet]) -> Result<Dirichlet> {
    let alphas: Vec<&[f64]> = dirichlets.iter().map(Dirichlet::alpha).collect();
    fuse_concentrations(&alphas)
}

/// Additive fusion of raw concentration (pseudo-count) vectors.
///
/// Unlike [`fuse_dirichlet`], individual inputs may contain zeros (an
/// observation that adds no mass to a component); only the fused vector has
/// to be strictly positive.
///
/// # Errors
///
/// `EmptyInput` for no inputs; `DimensionMismatch` for differing lengths;
/// `InvalidParameter` for negative/non-finite entries or a fused component
/// that is still zero.
///
/// # Example
///
/// ```
/// use bayesfuse::fusion::fuse_concentrations;
///
/// let fused = fuse_concentrations(&[[1.0, 2.0, 3.0], [4.0, 1.0, 0.0]]).expect("same dimension");
/// assert_eq!(fused.alpha(), &[5.0, 3.0, 3.0]);
/// ```
pub fn fuse_concentrations<A: AsRef<[f64]>>(alphas: &[A]) -> Result<Dirichlet> {
    let first = alphas
        .first()
        .ok_or_else(|| BayesFuseError::empty_input("dirichlet fusion"))?;
    let dim = first.as_ref().len();
    let mut fused = vec![0.0; dim];
    for alpha in alphas {
        let alpha = alpha.as_ref();
        if alpha.len() != dim {
            return Err(BayesFuseError::DimensionMismatch {
                expected: dim,
                actual: alpha.len(),
            });
        }
        for (acc, &a) in fused.iter_mut().zip(alpha) {
            if !(a >= 0.0 && a.is_finite()) {
                return Err(BayesFuseError::invalid_parameter(
                    "concentration",
                    a,
                    "finite and >= 0",
                ));
            }
            *acc += a;
        }
    }
    debug!(inputs = alphas.len(), alpha = ?fused, "fused dirichlet concentrations");
    Dirichlet::new(fused)
}

#[cfg(test)]
mod tests;
