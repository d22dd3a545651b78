// src/train.rs
//! Batch training: fit the vocabulary and the per-token log-odds scorer from
//! a labeled corpus, persist both artifacts, report training-set accuracy.
//!
//! Input schema keeps the historical on-disk form: `{texts: [string],
//! labels: [0|1]}` with 0 = fake and 1 = real. The canonical probability
//! polarity everywhere else in the crate is P(fake), so label 0 maps to
//! target "fake" here.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{Settings, MAX_SEQUENCE_LEN, PAD_INDEX, VOCAB_SIZE};
use crate::normalize::{normalize, NormalizedText};
use crate::scorer::{BayesScorer, Scorer};
use crate::vocab::{encode, Vocabulary};

/// Labeled training corpus as read from disk. 0 = fake, 1 = real.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingData {
    pub texts: Vec<String>,
    pub labels: Vec<u8>,
}

/// JSON report printed by the CLI `train` mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    pub accuracy: f32,
    pub examples: usize,
    pub vocab_size: usize,
    pub model_path: String,
    pub tokenizer_path: String,
}

pub fn train_from_file(path: &Path, settings: &Settings) -> anyhow::Result<TrainReport> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading training data {}", path.display()))?;
    let data: TrainingData = serde_json::from_str(&raw).context("parsing training data")?;
    train(&data, settings)
}

pub fn train(data: &TrainingData, settings: &Settings) -> anyhow::Result<TrainReport> {
    if data.texts.is_empty() {
        bail!("training data contains no texts");
    }
    if data.texts.len() != data.labels.len() {
        bail!(
            "texts/labels length mismatch: {} vs {}",
            data.texts.len(),
            data.labels.len()
        );
    }
    if let Some(bad) = data.labels.iter().find(|l| **l > 1) {
        bail!("labels must be 0 (fake) or 1 (real), got {bad}");
    }

    let corpus: Vec<NormalizedText> = data.texts.iter().map(|t| normalize(t)).collect();
    let vocab = Vocabulary::fit(&corpus, VOCAB_SIZE);

    let scorer = fit_log_odds(&corpus, &data.labels, &vocab);

    let encoded: Vec<_> = corpus
        .iter()
        .map(|doc| encode(doc, &vocab, MAX_SEQUENCE_LEN))
        .collect();
    let mut correct = 0usize;
    for (seq, label) in encoded.iter().zip(&data.labels) {
        let predicted_fake = scorer.score(seq) > 0.5;
        let is_fake = *label == 0;
        if predicted_fake == is_fake {
            correct += 1;
        }
    }
    let accuracy = correct as f32 / data.texts.len() as f32;

    vocab.save(&settings.tokenizer_path)?;
    scorer.save(&settings.model_path)?;
    info!(
        examples = data.texts.len(),
        vocab_size = vocab.len(),
        accuracy,
        "training finished, artifacts written"
    );

    Ok(TrainReport {
        accuracy,
        examples: data.texts.len(),
        vocab_size: vocab.len(),
        model_path: settings.model_path.clone(),
        tokenizer_path: settings.tokenizer_path.clone(),
    })
}

/// Laplace-smoothed per-index log-odds toward the fake class, plus a class
/// prior bias. Documents normalize/encode exactly as they will at inference.
fn fit_log_odds(corpus: &[NormalizedText], labels: &[u8], vocab: &Vocabulary) -> BayesScorer {
    let vocab_len = vocab.len();
    let mut fake_counts = vec![0u64; vocab_len];
    let mut real_counts = vec![0u64; vocab_len];
    let mut fake_total = 0u64;
    let mut real_total = 0u64;
    let mut fake_docs = 0u64;
    let mut real_docs = 0u64;

    for (doc, label) in corpus.iter().zip(labels) {
        let is_fake = *label == 0;
        if is_fake {
            fake_docs += 1;
        } else {
            real_docs += 1;
        }
        for tok in doc.tokens() {
            let idx = vocab.lookup(tok) as usize;
            if is_fake {
                fake_counts[idx] += 1;
                fake_total += 1;
            } else {
                real_counts[idx] += 1;
                real_total += 1;
            }
        }
    }

    let v = vocab_len as f64;
    let mut weights = vec![0.0f32; vocab_len];
    for idx in (PAD_INDEX as usize + 1)..vocab_len {
        let p_fake = (fake_counts[idx] as f64 + 1.0) / (fake_total as f64 + v);
        let p_real = (real_counts[idx] as f64 + 1.0) / (real_total as f64 + v);
        weights[idx] = (p_fake.ln() - p_real.ln()) as f32;
    }
    // Padding never carries signal.
    weights[PAD_INDEX as usize] = 0.0;

    let bias = ((fake_docs.max(1) as f64) / (real_docs.max(1) as f64)).ln() as f32;
    BayesScorer::new(weights, bias)
}
