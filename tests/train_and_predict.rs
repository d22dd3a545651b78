// tests/train_and_predict.rs
//
// End-to-end batch path: fit artifacts from a labeled corpus, reload them
// from disk the way the service does at startup, and score fresh inputs.

use std::fs;

use fake_news_analyzer::config::{Settings, MAX_SEQUENCE_LEN};
use fake_news_analyzer::detector::Detector;
use fake_news_analyzer::error::AnalyzeError;
use fake_news_analyzer::train::{train, train_from_file, TrainingData};
use fake_news_analyzer::verdict::Verdict;

fn corpus() -> TrainingData {
    TrainingData {
        texts: vec![
            "SHOCKING miracle cure doctors hate this one secret trick exposed".into(),
            "aliens secretly control the government shocking revelation leaked".into(),
            "unbelievable shocking secret miracle discovered celebrities furious".into(),
            "you will not believe this shocking trick exposed by insiders".into(),
            "city council approved the annual budget on tuesday evening".into(),
            "the central bank held interest rates steady this quarter".into(),
            "researchers published peer reviewed findings in the science journal".into(),
            "the transport ministry announced scheduled maintenance for the bridge".into(),
        ],
        labels: vec![0, 0, 0, 0, 1, 1, 1, 1],
    }
}

fn temp_settings(dir: &tempfile::TempDir) -> Settings {
    Settings {
        model_path: dir.path().join("model.json").display().to_string(),
        tokenizer_path: dir.path().join("tokenizer.json").display().to_string(),
        ..Settings::default()
    }
}

#[test]
fn trained_artifacts_reload_and_score_deterministically() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = temp_settings(&dir);

    let report = train(&corpus(), &settings).expect("train");
    assert!(report.accuracy >= 0.5, "training-set accuracy too low");

    let detector = Detector::load(&settings).expect("load artifacts");

    let a = detector
        .analyze_text("shocking secret miracle trick exposed")
        .expect("analyze");
    let b = detector
        .analyze_text("shocking secret miracle trick exposed")
        .expect("analyze again");
    // Same input, same probability: the pipeline is pure modulo metadata.
    assert_eq!(a.assessment.probability, b.assessment.probability);
    assert!((0.0..=1.0).contains(&a.assessment.probability));
    assert!((0.0..=100.0).contains(&a.assessment.confidence));
}

#[test]
fn trained_model_leans_fake_for_fake_phrasing_and_real_for_real() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = temp_settings(&dir);
    train(&corpus(), &settings).expect("train");
    let detector = Detector::load(&settings).expect("load artifacts");

    let fake_like = detector
        .analyze_text("shocking miracle trick secretly exposed")
        .expect("analyze fake-like");
    let real_like = detector
        .analyze_text("council approved the budget this quarter")
        .expect("analyze real-like");

    assert!(fake_like.assessment.probability > real_like.assessment.probability);
    assert_ne!(fake_like.assessment.verdict, Verdict::Real);
    assert_ne!(real_like.assessment.verdict, Verdict::Fake);
}

#[test]
fn train_mode_reads_the_json_schema_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = temp_settings(&dir);

    let path = dir.path().join("training.json");
    let data = corpus();
    fs::write(
        &path,
        serde_json::json!({ "texts": data.texts, "labels": data.labels }).to_string(),
    )
    .expect("write corpus");

    let report = train_from_file(&path, &settings).expect("train from file");
    assert_eq!(report.examples, 8);
    assert!(report.vocab_size > 2);
}

#[test]
fn missing_artifacts_fail_fast_with_model_unavailable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = temp_settings(&dir);
    assert_eq!(
        Detector::load(&settings).err(),
        Some(AnalyzeError::ModelUnavailable)
    );
}

#[test]
fn cli_empty_content_contract_holds_after_training() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = temp_settings(&dir);
    train(&corpus(), &settings).expect("train");
    let detector = Detector::load(&settings).expect("load artifacts");

    assert_eq!(
        detector.analyze_text("the of and to"),
        Err(AnalyzeError::EmptyContent)
    );
    assert_eq!(detector.analyze_text("").err().map(|e| e.to_string()),
        Some("Text content cannot be empty".to_string()));

    // Contract: encoded length never varies, so the scorer input is always
    // MAX_SEQUENCE_LEN wide regardless of text size.
    let long = "budget ".repeat(2 * MAX_SEQUENCE_LEN);
    assert!(detector.analyze_text(&long).is_ok());
}
