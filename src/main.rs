//! Fake-News Analyzer — Binary Entrypoint
//! Boots the Axum HTTP server, or runs one of the batch CLI modes
//! (predict-text, predict-url, train) that print a single JSON object on
//! stdout.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fake_news_analyzer::api::{self, AppState};
use fake_news_analyzer::config::Settings;
use fake_news_analyzer::detector::Detector;
use fake_news_analyzer::source::{ContentSource, TwitterSource, WebPageSource};
use fake_news_analyzer::train;

#[derive(Parser)]
#[command(name = "fake-news-analyzer", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP analysis service (default).
    Serve,
    /// Classify a piece of text; prints one AnalysisResult JSON.
    #[command(alias = "predict_text")]
    PredictText { text: String },
    /// Fetch a web page, classify its text; prints one AnalysisResult JSON.
    #[command(alias = "predict_url")]
    PredictUrl { url: String },
    /// Fit and persist the model + tokenizer from a labeled JSON corpus
    /// ({texts: [string], labels: [0|1]}, 0 = fake, 1 = real).
    Train { path: PathBuf },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fake_news_analyzer=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env();
    match Cli::parse().command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings).await,
        Command::PredictText { text } => {
            let detector = load_or_exit(&settings);
            emit(detector.analyze_text(&text));
            Ok(())
        }
        Command::PredictUrl { url } => {
            let detector = load_or_exit(&settings);
            let web = WebPageSource::new(settings.request_timeout);
            let resolved = match web.resolve(&url).await {
                Ok(content) => content,
                Err(e) => {
                    emit::<fake_news_analyzer::AnalysisResult>(Err(e));
                    return Ok(());
                }
            };
            emit(detector.analyze_resolved(&resolved, &url));
            Ok(())
        }
        Command::Train { path } => {
            match train::train_from_file(&path, &settings) {
                Ok(report) => println!("{}", serde_json::to_string(&report)?),
                Err(e) => {
                    println!("{}", serde_json::json!({ "error": e.to_string() }));
                    std::process::exit(1);
                }
            }
            Ok(())
        }
    }
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    // A service without a usable model must not accept traffic: loading
    // failure is a clean, logged exit before the listener binds.
    let detector = Detector::load(&settings)
        .map_err(|e| anyhow::anyhow!("startup aborted: {e}"))?;

    let state = AppState {
        detector: Arc::new(detector),
        url_source: Arc::new(TwitterSource) as Arc<dyn ContentSource>,
        request_timeout: settings.request_timeout,
    };
    let router = api::router(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("binding {}", settings.bind_addr))?;
    info!(addr = %settings.bind_addr, "fake-news analyzer listening");
    axum::serve(listener, router).await.context("serving")?;
    Ok(())
}

/// Batch modes fail fast like the server does, but report on stdout.
fn load_or_exit(settings: &Settings) -> Detector {
    match Detector::load(settings) {
        Ok(d) => d,
        Err(e) => {
            println!("{}", serde_json::json!({ "error": e.to_string() }));
            std::process::exit(1);
        }
    }
}

fn emit<T: serde::Serialize>(result: Result<T, fake_news_analyzer::AnalyzeError>) {
    match result {
        Ok(value) => match serde_json::to_string(&value) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
                std::process::exit(1);
            }
        },
        Err(e) => {
            println!("{}", serde_json::json!({ "error": e.to_string() }));
            std::process::exit(1);
        }
    }
}
