// src/vocab.rs
//! Frozen vocabulary and fixed-length sequence encoding.
//!
//! The vocabulary is fitted once at training time and loaded read-only at
//! inference; the encoder never mutates it. Index 0 is padding, index 1 the
//! out-of-vocabulary marker, real tokens start at 2. Sequences are padded and
//! truncated on the tail (post/post), padded with `PAD_INDEX`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::{FIRST_TOKEN_INDEX, OOV_INDEX, PAD_INDEX};
use crate::normalize::NormalizedText;

/// Fixed-length ordered sequence of vocabulary indices.
pub type EncodedSequence = Vec<u32>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    index: HashMap<String, u32>,
    max_words: usize,
}

impl Vocabulary {
    /// Fit on a preprocessed corpus: the `max_words - 2` most frequent tokens
    /// get indices from `FIRST_TOKEN_INDEX` up. Ties break alphabetically so
    /// fitting the same corpus twice yields the same mapping.
    pub fn fit(corpus: &[NormalizedText], max_words: usize) -> Self {
        let mut freqs: HashMap<&str, u64> = HashMap::new();
        for doc in corpus {
            for tok in doc.tokens() {
                *freqs.entry(tok.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, u64)> = freqs.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let capacity = max_words.saturating_sub(FIRST_TOKEN_INDEX as usize);
        let index = ranked
            .into_iter()
            .take(capacity)
            .enumerate()
            .map(|(i, (tok, _))| (tok.to_string(), FIRST_TOKEN_INDEX + i as u32))
            .collect();

        Self { index, max_words }
    }

    /// Vocabulary index for a token, or `OOV_INDEX` if absent.
    pub fn lookup(&self, token: &str) -> u32 {
        self.index.get(token).copied().unwrap_or(OOV_INDEX)
    }

    /// Number of assigned indices including the two reserved ones.
    pub fn len(&self) -> usize {
        self.index.len() + FIRST_TOKEN_INDEX as usize
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        if let Some(dir) = path.as_ref().parent() {
            fs::create_dir_all(dir).context("creating tokenizer directory")?;
        }
        let data = serde_json::to_string(self).context("serializing tokenizer")?;
        fs::write(path, data).context("writing tokenizer artifact")?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(&path).with_context(|| {
            format!("reading tokenizer artifact {}", path.as_ref().display())
        })?;
        serde_json::from_str(&data).context("parsing tokenizer artifact")
    }
}

/// Encode a normalized token sequence into exactly `max_len` indices.
/// Shorter inputs are zero-padded on the tail, longer ones truncated on the
/// tail. The output length is `max_len` for every input, including empty.
pub fn encode(tokens: &NormalizedText, vocab: &Vocabulary, max_len: usize) -> EncodedSequence {
    let mut seq: EncodedSequence = tokens
        .tokens()
        .iter()
        .take(max_len)
        .map(|t| vocab.lookup(t))
        .collect();
    seq.resize(max_len, PAD_INDEX);
    seq
}
