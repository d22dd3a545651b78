// src/scorer.rs
//! Opaque scoring boundary.
//!
//! The pipeline only sees the `Scorer` trait: one pure function from a
//! fixed-length index sequence to a probability of the content being fake.
//! `BayesScorer` is the trained implementation shipped with the crate;
//! `FixedScorer` is the deterministic stub handlers and tests inject when no
//! trained artifact should be involved.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::PAD_INDEX;
use crate::vocab::EncodedSequence;

/// Trained classifier, consumed read-only. Implementations must be pure:
/// the same sequence always scores the same probability.
pub trait Scorer: Send + Sync {
    /// Probability in [0,1] that the encoded content is fake.
    fn score(&self, seq: &EncodedSequence) -> f32;

    /// Implementation name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Per-token log-odds model: `p = sigmoid(bias + sum(weights[idx]))` over
/// non-padding indices. `weights` is indexed by vocabulary index; the two
/// reserved indices carry zero weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BayesScorer {
    weights: Vec<f32>,
    bias: f32,
}

impl BayesScorer {
    pub fn new(weights: Vec<f32>, bias: f32) -> Self {
        Self { weights, bias }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        if let Some(dir) = path.as_ref().parent() {
            fs::create_dir_all(dir).context("creating model directory")?;
        }
        let data = serde_json::to_string(self).context("serializing model")?;
        fs::write(path, data).context("writing model artifact")?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("reading model artifact {}", path.as_ref().display()))?;
        serde_json::from_str(&data).context("parsing model artifact")
    }
}

impl Scorer for BayesScorer {
    fn score(&self, seq: &EncodedSequence) -> f32 {
        let sum: f32 = seq
            .iter()
            .filter(|&&idx| idx != PAD_INDEX)
            .map(|&idx| self.weights.get(idx as usize).copied().unwrap_or(0.0))
            .sum();
        sigmoid(self.bias + sum)
    }

    fn name(&self) -> &'static str {
        "bayes"
    }
}

/// Stub scorer returning a constant probability regardless of input.
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer(pub f32);

impl Scorer for FixedScorer {
    fn score(&self, _seq: &EncodedSequence) -> f32 {
        self.0.clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
