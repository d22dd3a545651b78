// src/config.rs
//! Contract constants and env-driven runtime settings.
//!
//! `MAX_SEQUENCE_LEN` and the pad/truncate side are part of the
//! training/inference contract: a trained model artifact is only valid for
//! the exact values it was trained with, so they are single-sourced here and
//! never read from the environment.

use std::time::Duration;

/// Fixed encoder output length, shared by training and inference.
pub const MAX_SEQUENCE_LEN: usize = 300;

/// Vocabulary cap used when fitting the tokenizer (most frequent tokens win).
pub const VOCAB_SIZE: usize = 10_000;

/// Reserved sequence indices. Real tokens start at `FIRST_TOKEN_INDEX`.
pub const PAD_INDEX: u32 = 0;
pub const OOV_INDEX: u32 = 1;
pub const FIRST_TOKEN_INDEX: u32 = 2;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_MODEL_PATH: &str = "ml_model/model.json";
pub const DEFAULT_TOKENIZER_PATH: &str = "ml_model/tokenizer.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_MODEL_PATH: &str = "MODEL_PATH";
pub const ENV_TOKENIZER_PATH: &str = "TOKENIZER_PATH";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";

/// Runtime settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub model_path: String,
    pub tokenizer_path: String,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            model_path: DEFAULT_MODEL_PATH.to_string(),
            tokenizer_path: DEFAULT_TOKENIZER_PATH.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var(ENV_BIND_ADDR).unwrap_or(defaults.bind_addr),
            model_path: std::env::var(ENV_MODEL_PATH).unwrap_or(defaults.model_path),
            tokenizer_path: std::env::var(ENV_TOKENIZER_PATH).unwrap_or(defaults.tokenizer_path),
            request_timeout: parse_timeout_env(
                std::env::var(ENV_REQUEST_TIMEOUT_SECS).ok(),
            )
            .unwrap_or(defaults.request_timeout),
        }
    }
}

// parse optional seconds env; zero and garbage fall back to the default
fn parse_timeout_env(raw: Option<String>) -> Option<Duration> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_env_parses_and_rejects_zero() {
        assert_eq!(
            parse_timeout_env(Some("15".into())),
            Some(Duration::from_secs(15))
        );
        assert_eq!(parse_timeout_env(Some("0".into())), None);
        assert_eq!(parse_timeout_env(Some("abc".into())), None);
        assert_eq!(parse_timeout_env(None), None);
    }

    #[test]
    fn reserved_indices_do_not_collide() {
        assert_ne!(PAD_INDEX, OOV_INDEX);
        assert!(FIRST_TOKEN_INDEX > OOV_INDEX);
        assert!(VOCAB_SIZE > FIRST_TOKEN_INDEX as usize);
    }
}
