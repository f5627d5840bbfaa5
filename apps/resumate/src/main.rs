mod config;
mod errors;
mod export;
mod layout;
mod models;
mod patch;
mod render;
mod review;
mod session;
mod store;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::PdfExporter;
use crate::review::{AnthropicReviewer, SuggestionBackend};
use crate::session::{EditorSession, Notice};
use crate::store::{LocalStorage, ResumeStore, StyleStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResuMate v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("preview");

    let data_dir = config.resolve_data_dir();
    let session = build_session(&config, command)?;

    match command {
        "preview" => {
            let pages = session.refresh_preview();
            let record = session.resume();
            // Fit against a common laptop viewport so the reported zoom
            // matches what the editor would open with.
            let fit = session
                .zoom_to_fit(layout::Size {
                    width: 1280.0,
                    height: 800.0,
                })
                .await;
            info!(
                template = %session.template_id(),
                pages,
                zoom = fit,
                data_dir = %data_dir.display(),
                empty = record.is_empty(),
                "rendered preview"
            );
            println!(
                "{} page(s) at template '{}' (fit zoom {:.2})",
                pages,
                session.template_id(),
                fit
            );
        }
        "export" => match session.export_pdf().await {
            Ok(path) => {
                let notice = Notice::export_saved();
                println!("{} {}", notice.title, path.display());
            }
            Err(e) => {
                let notice = Notice::failure(format!("Failed to export the resume: {e}"));
                eprintln!("{} {}", notice.title, notice.message);
                std::process::exit(1);
            }
        },
        "review" => match session.request_review().await {
            Ok(suggestions) => {
                println!("{} suggestion(s):", suggestions.len());
                for s in &suggestions {
                    println!("  {} -> {}", s.field, s.suggestion);
                }
            }
            Err(e) => {
                let notice = Notice::failure(format!("Failed to get AI suggestions: {e}"));
                eprintln!("{} {}", notice.title, notice.message);
                std::process::exit(1);
            }
        },
        other => {
            eprintln!("unknown command '{other}'; expected preview, export, or review");
            std::process::exit(2);
        }
    }

    Ok(())
}

fn build_session(config: &Config, command: &str) -> Result<EditorSession> {
    let data_dir = config.resolve_data_dir();
    let resume = ResumeStore::load(LocalStorage::new(data_dir.clone()));
    let styles = StyleStore::load(LocalStorage::new(data_dir));

    // The key is only required for the one command that talks to the API.
    let backend: Arc<dyn SuggestionBackend> = match &config.anthropic_api_key {
        Some(key) => Arc::new(AnthropicReviewer::new(key.clone())),
        None if command == "review" => {
            anyhow::bail!("ANTHROPIC_API_KEY is required for the review command")
        }
        None => Arc::new(AnthropicReviewer::new(String::new())),
    };

    Ok(EditorSession::new(
        resume,
        styles,
        backend,
        PdfExporter::new(config.resolve_export_dir()),
    ))
}
