//! Fitting per-modality distributions from raw observation samples.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::distribution::{Beta, Density, Dirichlet, Distribution, Gaussian, Observation};
use crate::space::LikelihoodFn;
use crate::{BayesFuseError, Result};

/// Raw observations for one modality; the variant picks the fitted family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModalitySamples {
    /// Unbounded reals, fitted with a Gaussian.
    Scalar(Vec<f64>),
    /// Values in `(0, 1)`, fitted with a Beta by method of moments.
    Proportion(Vec<f64>),
    /// Probability vectors, fitted with a Dirichlet by method of moments.
    Simplex(Vec<Vec<f64>>),
}

impl ModalitySamples {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ModalitySamples::Scalar(xs) | ModalitySamples::Proportion(xs) => xs.len(),
            ModalitySamples::Simplex(vs) => vs.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fits the family implied by the variant.
    ///
    /// # Errors
    ///
    /// Propagates the family's fitting errors (`EmptyInput`,
    /// `InvalidParameter`, `DimensionMismatch`).
    pub fn fit(&self, regularizer: f64) -> Result<Distribution> {
        let fitted = match self {
            ModalitySamples::Scalar(xs) => Gaussian::fit(xs, regularizer)?.into(),
            ModalitySamples::Proportion(xs) => Beta::fit_moments(xs, regularizer)?.into(),
            ModalitySamples::Simplex(vs) => Dirichlet::fit_moments(vs, regularizer)?.into(),
        };
        Ok(fitted)
    }

    /// Samples at `indices`, same variant.
    fn select(&self, indices: &[usize]) -> Self {
        match self {
            ModalitySamples::Scalar(xs) => {
                ModalitySamples::Scalar(indices.iter().map(|&i| xs[i]).collect())
            }
            ModalitySamples::Proportion(xs) => {
                ModalitySamples::Proportion(indices.iter().map(|&i| xs[i]).collect())
            }
            ModalitySamples::Simplex(vs) => {
                ModalitySamples::Simplex(indices.iter().map(|&i| vs[i].clone()).collect())
            }
        }
    }
}

/// Distributions fitted for one modality.
///
/// `pooled` is fitted to every sample. `by_hypothesis` holds class-conditional
/// fits when the samples were labelled; it is empty otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModality {
    pooled: Distribution,
    by_hypothesis: BTreeMap<String, Distribution>,
}

impl FittedModality {
    /// Fit ignoring labels: every hypothesis shares one model.
    pub(crate) fn pooled(samples: &ModalitySamples, regularizer: f64) -> Result<Self> {
        Ok(Self {
            pooled: samples.fit(regularizer)?,
            by_hypothesis: BTreeMap::new(),
        })
    }

    /// Fit one model per label, plus the pooled fallback.
    ///
    /// Every label must be in `hypotheses`.
    pub(crate) fn labeled<S: AsRef<str>>(
        samples: &ModalitySamples,
        labels: &[S],
        hypotheses: &[&str],
        regularizer: f64,
    ) -> Result<Self> {
        if labels.len() != samples.len() {
            return Err(BayesFuseError::DimensionMismatch {
                expected: samples.len(),
                actual: labels.len(),
            });
        }
        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, label) in labels.iter().enumerate() {
            let label = label.as_ref();
            if !hypotheses.contains(&label) {
                return Err(BayesFuseError::UnknownHypothesis(label.to_string()));
            }
            groups.entry(label).or_default().push(i);
        }

        let pooled = samples.fit(regularizer)?;
        let mut by_hypothesis = BTreeMap::new();
        for (hypothesis, indices) in groups {
            let fitted = samples.select(&indices).fit(regularizer)?;
            by_hypothesis.insert(hypothesis.to_string(), fitted);
        }
        Ok(Self {
            pooled,
            by_hypothesis,
        })
    }

    /// Model used for `hypothesis`; the pooled fit when it has none of its own.
    #[must_use]
    pub fn for_hypothesis(&self, hypothesis: &str) -> &Distribution {
        self.by_hypothesis.get(hypothesis).unwrap_or(&self.pooled)
    }

    #[must_use]
    pub fn pooled_model(&self) -> &Distribution {
        &self.pooled
    }

    /// Whether class-conditional models were fitted.
    #[must_use]
    pub fn is_labeled(&self) -> bool {
        !self.by_hypothesis.is_empty()
    }

    /// Likelihood `f(x, h) = p_h(x)` over the fitted models.
    ///
    /// Unlabelled fits ignore `h`. A wrong-shape observation has zero support.
    pub(crate) fn likelihood(&self) -> LikelihoodFn {
        if !self.is_labeled() {
            return self.pooled.clone().into_likelihood();
        }
        let model = self.clone();
        Box::new(move |x: &Observation, hypothesis: &str| {
            let distribution = model.for_hypothesis(hypothesis);
            match distribution.density(x) {
                Ok(p) => p,
                Err(err) => {
                    tracing::warn!(family = distribution.family(), %err, "observation rejected by likelihood");
                    0.0
                }
            }
        })
    }
}
