// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod detector;
pub mod error;
pub mod normalize;
pub mod scorer;
pub mod source;
pub mod train;
pub mod verdict;
pub mod vocab;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::detector::{AnalysisResult, Detector};
pub use crate::error::AnalyzeError;
pub use crate::scorer::{BayesScorer, FixedScorer, Scorer};
pub use crate::source::{ContentSource, ExtractedContent, TwitterSource, WebPageSource};
pub use crate::verdict::{decide, Assessment, Verdict};
pub use crate::vocab::{encode, EncodedSequence, Vocabulary};
