// src/detector.rs
//! End-to-end analysis pipeline shared by the HTTP API and the CLI:
//! normalize → encode → score → decide, plus result metadata.
//!
//! A `Detector` is built once at startup from the persisted artifacts and
//! used read-only by every request; nothing here mutates after construction.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::config::{Settings, MAX_SEQUENCE_LEN};
use crate::error::AnalyzeError;
use crate::normalize::normalize;
use crate::scorer::{BayesScorer, Scorer};
use crate::source::ExtractedContent;
use crate::verdict::{decide, Assessment};
use crate::vocab::{encode, Vocabulary};

/// Chars of cleaned text echoed back in the result.
const CLEANED_TEXT_PREVIEW: usize = 200;
/// Chars of raw extracted text echoed back for URL analyses.
const EXTRACTED_TEXT_PREVIEW: usize = 500;

/// Source metadata attached to URL analyses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetMetadata {
    pub author: Option<String>,
    pub timestamp: Option<String>,
}

/// Immutable per-request analysis outcome returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    #[serde(flatten)]
    pub assessment: Assessment,
    pub cleaned_text: String,
    pub input_type: String,
    pub timestamp: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet_metadata: Option<TweetMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
}

/// Read-only Scorer + Vocabulary bundle.
pub struct Detector {
    vocab: Vocabulary,
    scorer: Arc<dyn Scorer>,
    max_len: usize,
}

impl Detector {
    pub fn new(vocab: Vocabulary, scorer: Arc<dyn Scorer>, max_len: usize) -> Self {
        Self {
            vocab,
            scorer,
            max_len,
        }
    }

    /// Load both artifacts from disk. Any missing or unreadable artifact is
    /// `ModelUnavailable`; callers at startup treat that as fatal.
    pub fn load(settings: &Settings) -> Result<Self, AnalyzeError> {
        let vocab = Vocabulary::load(&settings.tokenizer_path).map_err(|e| {
            tracing::error!(error = %e, path = %settings.tokenizer_path, "tokenizer load failed");
            AnalyzeError::ModelUnavailable
        })?;
        let scorer = BayesScorer::load(&settings.model_path).map_err(|e| {
            tracing::error!(error = %e, path = %settings.model_path, "model load failed");
            AnalyzeError::ModelUnavailable
        })?;
        info!(
            vocab_size = vocab.len(),
            scorer = scorer.name(),
            "model and tokenizer loaded"
        );
        Ok(Self::new(vocab, Arc::new(scorer), MAX_SEQUENCE_LEN))
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    /// Analyze free text. Blank input and input that normalizes to nothing
    /// are typed failures, never panics.
    pub fn analyze_text(&self, text: &str) -> Result<AnalysisResult, AnalyzeError> {
        if text.trim().is_empty() {
            return Err(AnalyzeError::invalid("Text content cannot be empty"));
        }
        self.run(text, "text")
    }

    /// Analyze content resolved from a URL; attaches source metadata.
    pub fn analyze_resolved(
        &self,
        content: &ExtractedContent,
        url: &str,
    ) -> Result<AnalysisResult, AnalyzeError> {
        let mut result = self.run(&content.text, "url")?;
        result.source_url = Some(url.to_string());
        result.tweet_metadata = Some(TweetMetadata {
            author: content.author.clone(),
            timestamp: content.timestamp.clone(),
        });
        result.extracted_text = Some(truncate_chars(&content.text, EXTRACTED_TEXT_PREVIEW));
        Ok(result)
    }

    fn run(&self, text: &str, input_type: &str) -> Result<AnalysisResult, AnalyzeError> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(AnalyzeError::EmptyContent);
        }

        let sequence = encode(&normalized, &self.vocab, self.max_len);
        let probability = self.scorer.score(&sequence);
        let assessment = decide(probability);

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let id = short_id(text, &timestamp);
        info!(
            %id,
            verdict = %assessment.verdict,
            probability = assessment.probability,
            tokens = normalized.len(),
            input_type,
            "analysis complete"
        );

        Ok(AnalysisResult {
            success: true,
            assessment,
            cleaned_text: truncate_chars(&normalized.as_joined(), CLEANED_TEXT_PREVIEW),
            input_type: input_type.to_string(),
            timestamp,
            id,
            source_url: None,
            tweet_metadata: None,
            extracted_text: None,
        })
    }
}

// Short hex request id; hashed so raw text never leaks into logs.
fn short_id(text: &str, timestamp: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(timestamp.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out: String = s.chars().take(max).collect();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::FixedScorer;
    use crate::verdict::Verdict;

    fn stub_detector(p: f32) -> Detector {
        let vocab = Vocabulary::fit(&[normalize("breaking alien spaceship spotted")], 100);
        Detector::new(vocab, Arc::new(FixedScorer(p)), MAX_SEQUENCE_LEN)
    }

    #[test]
    fn high_probability_text_is_fake_with_matching_confidence() {
        let detector = stub_detector(0.95);
        let result = detector
            .analyze_text("BREAKING: Alien spaceship spotted over the capital!")
            .expect("analysis");

        assert!(result.success);
        assert_eq!(result.assessment.verdict, Verdict::Fake);
        assert_eq!(result.assessment.confidence, 95.0);
        assert!(result.assessment.explanation.contains("strong indicators"));
        assert_eq!(result.input_type, "text");
        assert!(result.cleaned_text.starts_with("breaking alien spaceship"));
        assert!(result.source_url.is_none());
    }

    #[test]
    fn midband_probability_is_uncertain_regardless_of_text() {
        let detector = stub_detector(0.5);
        for text in ["completely ordinary report", "shocking secret revealed"] {
            let result = detector.analyze_text(text).expect("analysis");
            assert_eq!(result.assessment.verdict, Verdict::Uncertain);
            assert_eq!(result.assessment.confidence, 50.0);
        }
    }

    #[test]
    fn blank_and_contentless_inputs_are_typed_errors() {
        let detector = stub_detector(0.5);
        assert_eq!(
            detector.analyze_text("   "),
            Err(AnalyzeError::invalid("Text content cannot be empty"))
        );
        assert_eq!(
            detector.analyze_text("the of and to"),
            Err(AnalyzeError::EmptyContent)
        );
        assert_eq!(
            detector.analyze_text("!!! 123 ???"),
            Err(AnalyzeError::EmptyContent)
        );
    }

    #[test]
    fn resolved_content_carries_source_metadata() {
        let detector = stub_detector(0.2);
        let content = ExtractedContent {
            text: "Local council approves new library budget after public hearing".into(),
            author: Some("mock_user".into()),
            timestamp: Some("2024-01-01T00:00:00Z".into()),
            placeholder: true,
        };
        let result = detector
            .analyze_resolved(&content, "https://twitter.com/a/status/1")
            .expect("analysis");

        assert_eq!(result.input_type, "url");
        assert_eq!(
            result.source_url.as_deref(),
            Some("https://twitter.com/a/status/1")
        );
        let meta = result.tweet_metadata.expect("metadata");
        assert_eq!(meta.author.as_deref(), Some("mock_user"));
        assert!(result.extracted_text.is_some());
    }

    #[test]
    fn cleaned_text_preview_is_truncated() {
        let detector = stub_detector(0.5);
        let long = "token ".repeat(100);
        let result = detector.analyze_text(&long).expect("analysis");
        assert!(result.cleaned_text.chars().count() <= CLEANED_TEXT_PREVIEW + 3);
        assert!(result.cleaned_text.ends_with("..."));
    }
}
