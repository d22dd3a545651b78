// src/normalize.rs
//! Text normalizer: deterministic cleaning, tokenization and lemmatization.
//!
//! Normalization is a pure function of the input plus the embedded stopword
//! set and the rule lemmatizer — identical input always yields identical
//! output, and the same code path runs at training and inference time.
//!
//! Pipeline, in fixed order: lowercase → strip URLs / @mentions / #hashtags →
//! strip everything outside `[a-z \s]` → collapse whitespace → split →
//! drop stopwords and tokens shorter than 3 chars → lemmatize.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let raw = include_str!("../stopwords.json");
    serde_json::from_str::<Vec<&str>>(raw)
        .expect("valid stopword list")
        .into_iter()
        .collect()
});

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:https?|www)\S+").expect("url regex"));
static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[@#]\w+").expect("tag regex"));
static RE_NON_ALPHA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z\s]").expect("non-alpha regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Tokens shorter than this are dropped after stopword removal.
const MIN_TOKEN_LEN: usize = 3;

/// Ordered sequence of cleaned, lowercase, lemmatized tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    tokens: Vec<String>,
}

impl NormalizedText {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Space-joined form for display and for the `cleaned_text` result field.
    pub fn as_joined(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Normalize raw text into a canonical token sequence.
pub fn normalize(text: &str) -> NormalizedText {
    let lowered = text.to_lowercase();
    let stripped = RE_URL.replace_all(&lowered, " ");
    let stripped = RE_TAG.replace_all(&stripped, " ");
    let stripped = RE_NON_ALPHA.replace_all(&stripped, "");
    let collapsed = RE_WS.replace_all(&stripped, " ");

    // The filter runs on lemmas too: a lemma can itself be a stopword
    // ("wills" -> "will"), and re-normalizing normalized output must be a
    // no-op.
    let tokens = collapsed
        .trim()
        .split(' ')
        .filter(|t| !t.is_empty() && t.len() >= MIN_TOKEN_LEN && !STOPWORDS.contains(t))
        .map(lemmatize)
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !STOPWORDS.contains(t.as_str()))
        .collect();

    NormalizedText { tokens }
}

// Irregular plurals the suffix rules cannot reach.
static IRREGULAR_NOUNS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
    ])
});

// Words that end in 's' but are not plurals; stripping them would corrupt
// the token (and break idempotence against their own output).
static NON_PLURALS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "news", "series", "species", "always", "perhaps", "whereas", "bias",
        "canvas", "chaos", "corpus", "census", "virus", "lens", "versus",
    ])
});

/// Deterministic noun lemmatizer: irregular map first, then suffix rules.
/// Idempotent — every output maps to itself.
pub fn lemmatize(token: &str) -> String {
    if let Some(base) = IRREGULAR_NOUNS.get(token) {
        return (*base).to_string();
    }
    if NON_PLURALS.contains(token) {
        return token.to_string();
    }

    let n = token.len();
    if n > 4 && token.ends_with("ies") {
        // studies -> study
        return format!("{}y", &token[..n - 3]);
    }
    if n > 4
        && ["ches", "shes", "sses", "xes", "zes"]
            .iter()
            .any(|suf| token.ends_with(suf))
    {
        // churches -> church, boxes -> box, classes -> class
        return token[..n - 2].to_string();
    }
    if token.ends_with("ss") || token.ends_with("us") || token.ends_with("is") {
        // class, virus, analysis
        return token.to_string();
    }
    if n > MIN_TOKEN_LEN && token.ends_with('s') {
        // reports -> report
        return token[..n - 1].to_string();
    }
    token.to_string()
}
