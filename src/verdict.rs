// src/verdict.rs
//! Verdict engine: pure mapping from a probability to the user-facing
//! verdict, confidence, explanation and factor scores.
//!
//! Threshold bands are the entire user-facing semantics and must not drift:
//! p > 0.7 is fake (confidence p*100), p < 0.3 is real (confidence
//! (1-p)*100), everything in between is uncertain at exactly 50.0. The same
//! policy applies to every entry point (HTTP and CLI).

use serde::{Deserialize, Serialize};

pub const FAKE_THRESHOLD: f32 = 0.7;
pub const REAL_THRESHOLD: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Fake,
    Real,
    Uncertain,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::Fake => "fake",
            Verdict::Real => "real",
            Verdict::Uncertain => "uncertain",
        };
        f.write_str(s)
    }
}

/// Illustrative factor scores derived from the probability alone. Two are
/// linear transforms of p, two are fixed constants; they are presentation
/// signals, not independently computed features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Factors {
    pub language_pattern: f32,
    pub account_credibility: f32,
    pub content_consistency: f32,
    pub temporal_analysis: f32,
}

impl Factors {
    fn from_probability(p: f32) -> Self {
        Self {
            language_pattern: round2((p * 100.0).min(95.0)),
            account_credibility: 75.0,
            content_consistency: round2(((1.0 - p) * 100.0).max(25.0)),
            temporal_analysis: 60.0,
        }
    }
}

/// Complete decision for one probability. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub verdict: Verdict,
    /// Confidence in percent, [0,100], rounded to 2 decimals.
    pub confidence: f32,
    /// Raw scorer output passed through unchanged, rounded to 4 decimals.
    pub probability: f32,
    pub explanation: String,
    pub factors: Factors,
}

/// Map a probability to a verdict. `p` is expected in [0,1]; values exactly
/// at a threshold fall into the uncertain band.
pub fn decide(p: f32) -> Assessment {
    let (verdict, confidence) = if p > FAKE_THRESHOLD {
        (Verdict::Fake, p * 100.0)
    } else if p < REAL_THRESHOLD {
        (Verdict::Real, (1.0 - p) * 100.0)
    } else {
        (Verdict::Uncertain, 50.0)
    };

    Assessment {
        verdict,
        confidence: round2(confidence),
        probability: round4(p),
        explanation: explanation(verdict, p).to_string(),
        factors: Factors::from_probability(p),
    }
}

/// Banded free-text explanation keyed by probability sub-ranges.
fn explanation(verdict: Verdict, p: f32) -> &'static str {
    match verdict {
        Verdict::Fake => {
            if p > 0.9 {
                "This content shows strong indicators of misinformation with highly suspicious language patterns and claims that contradict established facts."
            } else {
                "This content appears to be fake news based on unusual language patterns, sensationalist claims, and lack of credible sources."
            }
        }
        Verdict::Real => {
            if p < 0.1 {
                "This content appears to be from credible sources with factual information and proper attribution."
            } else {
                "This content shows characteristics of legitimate news with reasonable claims and language patterns."
            }
        }
        Verdict::Uncertain => {
            "This content is ambiguous and requires additional context or verification to determine its authenticity."
        }
    }
}

fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

fn round4(x: f32) -> f32 {
    (x * 10_000.0).round() / 10_000.0
}
