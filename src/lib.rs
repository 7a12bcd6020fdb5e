//! Bayesfuse: Bayesian hypothesis inference over multiple observation channels.
//!
//! Each modality (an independent sensor or feature) is modeled by a
//! parametric distribution. Per-modality evidence is combined through Bayes'
//! rule into a posterior over a small, caller-defined set of hypotheses,
//! and a forecast pipeline reports the posterior mass on a target hypothesis
//! together with an uncertainty summary.
//!
//! # Quick Start
//!
//! ```
//! use bayesfuse::prelude::*;
//!
//! let mut space = ProbabilitySpace::new();
//! space.set_priors([("UP", 0.6), ("DOWN", 0.4)]).unwrap();
//! space.register_likelihood("trajectory", |x, h| {
//!     let mean = if h == "UP" { 0.0 } else { 3.0 };
//!     let x = x.as_scalar().unwrap_or(f64::NAN);
//!     gaussian_likelihood(x, mean, 1.0).unwrap_or(0.0)
//! });
//!
//! let posterior = space.posterior(&Evidence::new().with("trajectory", 0.2)).unwrap();
//! assert!(posterior["UP"] > posterior["DOWN"]);
//! ```
//!
//! # Modules
//!
//! - [`distribution`]: Gaussian, Beta and Dirichlet families with density,
//!   log density, sampling and moment fitting
//! - [`fusion`]: Gaussian precision fusion, Dirichlet concentration fusion and
//!   the log-linear opinion pool
//! - [`space`]: Prior table, likelihood registry and posterior computation
//! - [`forecast`]: Fit-register-forecast pipeline with uncertainty reporting
//! - [`error`]: Crate-wide error type

pub mod distribution;
pub mod error;
pub mod forecast;
pub mod fusion;
pub mod prelude;
pub mod space;

pub use error::{BayesFuseError, Result};
