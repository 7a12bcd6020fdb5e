//! End-to-end forecasting over fitted modality models.
//!
//! A [`ForecastPipeline`] owns a [`ProbabilitySpace`] seeded with the
//! configured priors. Callers fit one distribution per modality from raw
//! samples ([`ForecastPipeline::fit_modality`]); each fit is registered as
//! the modality's likelihood function. [`ForecastPipeline::forecast`] then
//! reports the posterior mass on the target hypothesis with an uncertainty
//! summary.
//!
//! # Example
//!
//! ```
//! use bayesfuse::forecast::{ForecastConfig, ForecastPipeline, ModalitySamples};
//! use bayesfuse::space::Evidence;
//!
//! let mut pipeline = ForecastPipeline::new(ForecastConfig::default()).expect("valid config");
//! pipeline
//!     .fit_labeled_modality(
//!         "trajectory",
//!         ModalitySamples::Scalar(vec![0.4, 0.6, 0.5, -0.5, -0.4, -0.6]),
//!         &["UP", "UP", "UP", "DOWN", "DOWN", "DOWN"],
//!     )
//!     .expect("labels match hypotheses");
//!
//! let report = pipeline
//!     .forecast(&Evidence::new().with("trajectory", 0.45), 10)
//!     .expect("fitted modality");
//! assert!(report.point_estimate > 0.5);
//! assert!(report.uncertainty.variance < 1e-24);
//! ```

mod config;
mod fit;

pub use config::ForecastConfig;
pub use fit::{FittedModality, ModalitySamples};

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::distribution::{sampling, Density};
use crate::space::{Evidence, Posterior, ProbabilitySpace};
use crate::{BayesFuseError, Result};

/// Summary statistics of a set of posterior evaluations.
///
/// `aleatoric` and `epistemic` are a fixed 50/50 split of `variance`. This
/// partition is a reporting heuristic, not a derived decomposition of
/// uncertainty sources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UncertaintyReport {
    /// Mean of the evaluations.
    pub mean: f64,
    /// Population variance (divides by n).
    pub variance: f64,
    /// Half of `variance`.
    pub aleatoric: f64,
    /// The other half of `variance`.
    pub epistemic: f64,
    /// Equal to `variance`.
    pub total: f64,
}

/// Result of [`ForecastPipeline::forecast`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    /// Hypothesis the estimate refers to.
    pub target: String,
    /// Mean posterior mass on `target`.
    pub point_estimate: f64,
    /// Spread of the repeated evaluations.
    pub uncertainty: UncertaintyReport,
    /// True when the posterior fell back to uniform.
    pub degenerate: bool,
}

/// Mean, population variance and the heuristic 50/50 split of `values`.
///
/// # Errors
///
/// `EmptyInput` for an empty slice.
///
/// # Example
///
/// ```
/// use bayesfuse::forecast::estimate_uncertainty;
///
/// let report = estimate_uncertainty(&[0.2, 0.4]).expect("non-empty");
/// assert!((report.mean - 0.3).abs() < 1e-12);
/// assert!((report.variance - 0.01).abs() < 1e-12);
/// assert_eq!(report.aleatoric, report.epistemic);
/// ```
pub fn estimate_uncertainty(values: &[f64]) -> Result<UncertaintyReport> {
    let (mean, variance) = crate::distribution::population_moments(values)
        .ok_or_else(|| BayesFuseError::empty_input("uncertainty estimate"))?;
    Ok(UncertaintyReport {
        mean,
        variance,
        aleatoric: variance * 0.5,
        epistemic: variance * 0.5,
        total: variance,
    })
}

/// Fitted modality models plus the probability space they feed.
#[derive(Debug)]
pub struct ForecastPipeline {
    config: ForecastConfig,
    space: ProbabilitySpace,
    models: BTreeMap<String, FittedModality>,
}

impl ForecastPipeline {
    /// Creates a pipeline whose space holds `config.priors`.
    ///
    /// # Errors
    ///
    /// Any [`ForecastConfig::validate`] failure, prior-table errors from
    /// [`ProbabilitySpace::set_priors`], or `UnknownHypothesis` when the
    /// target is not one of the priors.
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        let mut space = ProbabilitySpace::new();
        space.set_priors(config.priors.iter().map(|(h, &p)| (h.as_str(), p)))?;
        if !space.priors().contains_key(&config.target_hypothesis) {
            return Err(BayesFuseError::UnknownHypothesis(
                config.target_hypothesis.clone(),
            ));
        }
        Ok(Self {
            config,
            space,
            models: BTreeMap::new(),
        })
    }

    /// Configuration the pipeline was built with.
    #[must_use]
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Underlying probability space.
    #[must_use]
    pub fn space(&self) -> &ProbabilitySpace {
        &self.space
    }

    /// Direct access for custom likelihoods or prior changes.
    pub fn space_mut(&mut self) -> &mut ProbabilitySpace {
        &mut self.space
    }

    /// Fitted models for `modality`, if it was fitted through the pipeline.
    #[must_use]
    pub fn model(&self, modality: &str) -> Option<&FittedModality> {
        self.models.get(modality)
    }

    /// Fits one distribution to all samples and registers it as a
    /// hypothesis-independent likelihood for `modality`.
    ///
    /// # Errors
    ///
    /// Fitting errors from the sample family.
    pub fn fit_modality(&mut self, modality: impl Into<String>, samples: ModalitySamples) -> Result<()> {
        let fitted = FittedModality::pooled(&samples, self.config.variance_regularizer)?;
        self.install(modality.into(), fitted, samples.len());
        Ok(())
    }

    /// Fits one distribution per hypothesis from labelled samples and
    /// registers `f(x, h) = p_h(x)` for `modality`.
    ///
    /// Hypotheses with no labelled samples use the fit over all samples.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` when `labels` and `samples` differ in length,
    /// `UnknownHypothesis` for a label outside the prior table, or fitting
    /// errors for any group.
    pub fn fit_labeled_modality<S: AsRef<str>>(
        &mut self,
        modality: impl Into<String>,
        samples: ModalitySamples,
        labels: &[S],
    ) -> Result<()> {
        let hypotheses: Vec<&str> = self.space.hypotheses().collect();
        let fitted = FittedModality::labeled(
            &samples,
            labels,
            &hypotheses,
            self.config.variance_regularizer,
        )?;
        self.install(modality.into(), fitted, samples.len());
        Ok(())
    }

    fn install(&mut self, modality: String, fitted: FittedModality, n: usize) {
        debug!(
            modality = %modality,
            samples = n,
            family = fitted.pooled_model().family(),
            labeled = fitted.is_labeled(),
            "fitted modality"
        );
        self.space
            .register_likelihood_fn(modality.clone(), fitted.likelihood());
        self.models.insert(modality, fitted);
    }

    /// Posterior over every hypothesis for `evidence`.
    ///
    /// # Errors
    ///
    /// See [`ProbabilitySpace::posterior`].
    pub fn compute_posterior(&self, evidence: &Evidence) -> Result<Posterior> {
        self.space.posterior(evidence)
    }

    /// Evaluates the posterior `sample_count` times and summarizes the mass
    /// on the target hypothesis.
    ///
    /// The model parameters are fixed, so every evaluation returns the same
    /// value and the reported variance is zero. Parameter re-sampling between
    /// evaluations is not performed.
    ///
    /// # Errors
    ///
    /// `EmptyInput` when `sample_count` is zero, `UnknownHypothesis` when the
    /// target is no longer in the prior table, and any posterior error.
    pub fn forecast(&self, evidence: &Evidence, sample_count: usize) -> Result<ForecastReport> {
        if sample_count == 0 {
            return Err(BayesFuseError::empty_input("forecast sample count"));
        }
        let target = self.config.target_hypothesis.as_str();

        let mut samples = Vec::with_capacity(sample_count);
        let mut degenerate = false;
        for _ in 0..sample_count {
            let posterior = self.compute_posterior(evidence)?;
            let p = posterior
                .get(target)
                .ok_or_else(|| BayesFuseError::UnknownHypothesis(target.to_string()))?;
            degenerate |= posterior.is_degenerate();
            samples.push(p);
        }

        let uncertainty = estimate_uncertainty(&samples)?;
        debug!(
            hypothesis = target,
            sample_count,
            point_estimate = uncertainty.mean,
            variance = uncertainty.variance,
            "forecast complete"
        );
        Ok(ForecastReport {
            target: target.to_string(),
            point_estimate: uncertainty.mean,
            uncertainty,
            degenerate,
        })
    }

    /// [`ForecastPipeline::forecast`] with the configured sample count.
    ///
    /// # Errors
    ///
    /// Same as [`ForecastPipeline::forecast`].
    pub fn run(&self, evidence: &Evidence) -> Result<ForecastReport> {
        self.forecast(evidence, self.config.sample_count)
    }

    /// Draws `n` synthetic evidence records from the models fitted for
    /// `hypothesis`.
    ///
    /// Uses `config.seed` when set, so repeated calls with a seed return the
    /// same records. Modalities registered directly on the space have no
    /// model and are left out.
    ///
    /// # Errors
    ///
    /// `UnknownHypothesis` if `hypothesis` is not in the prior table.
    pub fn sample_evidence(&self, hypothesis: &str, n: usize) -> Result<Vec<Evidence>> {
        if !self.space.priors().contains_key(hypothesis) {
            return Err(BayesFuseError::UnknownHypothesis(hypothesis.to_string()));
        }
        let mut rng = sampling::seeded_rng(self.config.seed);
        let mut records = Vec::with_capacity(n);
        for _ in 0..n {
            let mut evidence = Evidence::new();
            for (modality, model) in &self.models {
                let draw = model.for_hypothesis(hypothesis).sample_with(1, &mut rng);
                if let Some(value) = draw.into_iter().next() {
                    evidence.insert(modality.as_str(), value);
                }
            }
            records.push(evidence);
        }
        Ok(records)
    }
}
