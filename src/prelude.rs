//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use bayesfuse::prelude::*;
//! ```

pub use crate::distribution::{Beta, Density, Dirichlet, Distribution, Gaussian, Observation};
pub use crate::error::{BayesFuseError, Result};
pub use crate::forecast::{
    estimate_uncertainty, ForecastConfig, ForecastPipeline, ForecastReport, ModalitySamples,
    UncertaintyReport,
};
pub use crate::fusion::{
    fuse_concentrations, fuse_dirichlet, fuse_gaussians, multimodal_fusion, LogLinearPool,
    ModalityBelief,
};
pub use crate::space::{
    beta_likelihood, dirichlet_likelihood, gaussian_likelihood, Evidence, Posterior,
    ProbabilitySpace,
};
