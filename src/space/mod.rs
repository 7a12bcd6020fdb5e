//! Hypothesis priors, per-modality likelihoods and posterior inference.
//!
//! A [`ProbabilitySpace`] owns two pieces of mutable state: the prior table
//! P(h) over a caller-defined hypothesis set, and a registry of likelihood
//! functions keyed by modality name. Given an [`Evidence`] record it applies
//! Bayes' rule with modalities treated as conditionally independent:
//!
//! ```text
//! P(h | e) = P(h) · Πₘ fₘ(eₘ, h) / Z,   Z = Σₕ P(h) · Πₘ fₘ(eₘ, h)
//! ```
//!
//! Each space is an explicitly owned value; independent spaces can coexist
//! in one process. The space performs no locking of its own. To query it
//! from several threads either finish setup and share it immutably (it is
//! `Send + Sync`), or wrap it in a `Mutex`/`RwLock`.
//!
//! # Example
//!
//! ```
//! use bayesfuse::space::{gaussian_likelihood, Evidence, ProbabilitySpace};
//!
//! let mut space = ProbabilitySpace::new();
//! space.set_priors([("UP", 0.6), ("DOWN", 0.4)]).expect("non-empty priors");
//! space.register_likelihood("trajectory", |x, h| {
//!     let x = x.as_scalar().unwrap_or(f64::NAN);
//!     let mean = if h == "UP" { 0.0 } else { 3.0 };
//!     gaussian_likelihood(x, mean, 1.0).unwrap_or(0.0)
//! });
//!
//! let posterior = space
//!     .posterior(&Evidence::new().with("trajectory", 0.2))
//!     .expect("registered modality");
//! assert!(posterior["UP"] > posterior["DOWN"]);
//! assert!((posterior.total() - 1.0).abs() < 1e-9);
//! ```

mod evidence;
mod likelihood;

pub use evidence::{Evidence, Posterior};
pub use likelihood::{beta_likelihood, dirichlet_likelihood, gaussian_likelihood, LikelihoodFn};

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::{debug, trace, warn};

use crate::distribution::Observation;
use crate::{BayesFuseError, Result};

/// Prior table plus likelihood registry.
#[derive(Default)]
pub struct ProbabilitySpace {
    priors: BTreeMap<String, f64>,
    likelihoods: HashMap<String, LikelihoodFn>,
    /// Modality names in first-registration order.
    modalities: Vec<String>,
}

impl fmt::Debug for ProbabilitySpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbabilitySpace")
            .field("priors", &self.priors)
            .field("modalities", &self.modalities)
            .finish_non_exhaustive()
    }
}

impl ProbabilitySpace {
    /// Creates an empty space with no hypotheses and no modalities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the prior table, normalizing it to sum to one.
    ///
    /// Repeated names keep the last value.
    ///
    /// # Errors
    ///
    /// `EmptyPriors` if the mapping is empty or sums to zero;
    /// `InvalidParameter` for negative or non-finite values. The existing
    /// table is left untouched on error.
    pub fn set_priors<I, S>(&mut self, priors: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let table: BTreeMap<String, f64> =
            priors.into_iter().map(|(h, p)| (h.into(), p)).collect();
        self.priors = normalize_priors(table)?;
        debug!(priors = ?self.priors, "prior table set");
        Ok(())
    }

    /// Adds (or overwrites) one hypothesis, then renormalizes the whole table.
    ///
    /// # Errors
    ///
    /// Same as [`ProbabilitySpace::set_priors`].
    pub fn add_hypothesis(&mut self, name: impl Into<String>, prior: f64) -> Result<()> {
        let mut table = self.priors.clone();
        table.insert(name.into(), prior);
        self.priors = normalize_priors(table)?;
        debug!(priors = ?self.priors, "hypothesis added");
        Ok(())
    }

    /// Registers the likelihood function for `modality`, replacing any
    /// previous one.
    ///
    /// The function receives the observed value and a hypothesis name and
    /// must return P(value | hypothesis) ≥ 0.
    pub fn register_likelihood<F>(&mut self, modality: impl Into<String>, likelihood: F)
    where
        F: Fn(&Observation, &str) -> f64 + Send + Sync + 'static,
    {
        self.register_likelihood_fn(modality, Box::new(likelihood));
    }

    /// [`ProbabilitySpace::register_likelihood`] for an already boxed function.
    pub fn register_likelihood_fn(&mut self, modality: impl Into<String>, likelihood: LikelihoodFn) {
        let modality = modality.into();
        if !self.likelihoods.contains_key(&modality) {
            self.modalities.push(modality.clone());
        }
        debug!(modality = %modality, "likelihood registered");
        self.likelihoods.insert(modality, likelihood);
    }

    /// Normalized prior table.
    #[must_use]
    pub fn priors(&self) -> &BTreeMap<String, f64> {
        &self.priors
    }

    /// Hypothesis names in sorted order.
    pub fn hypotheses(&self) -> impl Iterator<Item = &str> {
        self.priors.keys().map(String::as_str)
    }

    /// Registered modality names in first-registration order.
    #[must_use]
    pub fn modalities(&self) -> &[String] {
        &self.modalities
    }

    /// Returns true if `modality` has a likelihood function.
    #[must_use]
    pub fn is_registered(&self, modality: &str) -> bool {
        self.likelihoods.contains_key(modality)
    }

    /// Joint likelihood L(evidence | hypothesis) = Πₘ fₘ(eₘ, hypothesis).
    ///
    /// Empty evidence has likelihood one.
    ///
    /// # Errors
    ///
    /// `UnregisteredModality` if any evidence key has no likelihood function;
    /// `InvalidParameter` if a likelihood function returns a negative or NaN
    /// value.
    pub fn joint_likelihood(&self, evidence: &Evidence, hypothesis: &str) -> Result<f64> {
        let mut joint = 1.0;
        for (modality, value) in evidence.iter() {
            let likelihood = self
                .likelihoods
                .get(modality)
                .ok_or_else(|| BayesFuseError::UnregisteredModality(modality.to_string()))?;
            let p = likelihood(value, hypothesis);
            if !(p >= 0.0) {
                return Err(BayesFuseError::invalid_parameter(
                    &format!("likelihood[{modality}]"),
                    p,
                    "non-negative real",
                ));
            }
            joint *= p;
        }
        Ok(joint)
    }

    /// Posterior P(h | evidence) over every hypothesis in the prior table.
    ///
    /// If Z = 0 (no hypothesis has any support under the evidence) the result
    /// is the uniform distribution over the hypothesis set, flagged via
    /// [`Posterior::is_degenerate`]. This is a defined outcome, not an error.
    ///
    /// Densities can be infinite on the edge of their support (a U-shaped
    /// Beta at 0 or 1, a Dirichlet with αᵢ < 1 at a zero component). When
    /// some weights P(h)·L(e|h) are infinite the result is the limit of the
    /// normalized weights: all mass goes to those hypotheses, split in
    /// proportion to their priors. Hypotheses with zero prior keep zero mass
    /// whatever their likelihood.
    ///
    /// # Errors
    ///
    /// `UnregisteredModality` for unknown evidence keys (checked before any
    /// likelihood is evaluated); `EmptyPriors` if no priors were set;
    /// `InvalidParameter` for negative/NaN likelihoods, or a joint
    /// likelihood that multiplies an infinite factor by zero.
    pub fn posterior(&self, evidence: &Evidence) -> Result<Posterior> {
        if let Some((modality, _)) = evidence.iter().find(|(m, _)| !self.is_registered(m)) {
            return Err(BayesFuseError::UnregisteredModality(modality.to_string()));
        }
        if self.priors.is_empty() {
            return Err(BayesFuseError::EmptyPriors);
        }

        let mut weights = BTreeMap::new();
        for (hypothesis, &prior) in &self.priors {
            let joint = self.joint_likelihood(evidence, hypothesis)?;
            let weight = if prior == 0.0 { 0.0 } else { joint * prior };
            if weight.is_nan() {
                return Err(BayesFuseError::invalid_parameter(
                    &format!("joint likelihood[{hypothesis}]"),
                    joint,
                    "not an infinite factor times zero",
                ));
            }
            trace!(hypothesis = %hypothesis, weight, "unnormalized posterior weight");
            weights.insert(hypothesis.clone(), weight);
        }

        if weights.values().any(|w| w.is_infinite()) {
            return Ok(self.limit_posterior(weights));
        }

        let z: f64 = weights.values().sum();
        if z == 0.0 {
            warn!(
                hypotheses = weights.len(),
                "evidence gives zero support to every hypothesis; using uniform posterior"
            );
            let uniform = 1.0 / weights.len() as f64;
            let table = weights.into_keys().map(|h| (h, uniform)).collect();
            return Ok(Posterior::new(table, true));
        }

        let table = weights.into_iter().map(|(h, w)| (h, w / z)).collect();
        Ok(Posterior::new(table, false))
    }

    /// Splits all mass over the infinite-weight hypotheses by prior.
    fn limit_posterior(&self, weights: BTreeMap<String, f64>) -> Posterior {
        let mass: f64 = weights
            .iter()
            .filter(|(_, w)| w.is_infinite())
            .map(|(h, _)| self.priors[h])
            .sum();
        debug!(
            hypotheses = weights.values().filter(|w| w.is_infinite()).count(),
            "infinite likelihood; posterior is the prior restricted to those hypotheses"
        );
        let table = weights
            .into_iter()
            .map(|(h, w)| {
                let p = if w.is_infinite() { self.priors[&h] / mass } else { 0.0 };
                (h, p)
            })
            .collect();
        Posterior::new(table, false)
    }
}

fn normalize_priors(table: BTreeMap<String, f64>) -> Result<BTreeMap<String, f64>> {
    if table.is_empty() {
        return Err(BayesFuseError::EmptyPriors);
    }
    if let Some((h, &p)) = table.iter().find(|&(_, &p)| !(p >= 0.0 && p.is_finite())) {
        return Err(BayesFuseError::invalid_parameter(
            &format!("prior[{h}]"),
            p,
            "finite and >= 0",
        ));
    }
    let z: f64 = table.values().sum();
    if z == 0.0 {
        return Err(BayesFuseError::EmptyPriors);
    }
    Ok(table.into_iter().map(|(h, p)| (h, p / z)).collect())
}
