//! Wiring & DI. Entry point: load config, bootstrap adapters, inject into the
//! link policy, run the front end. No business logic here.
//!
//! Usage:
//!   pods-links                          interactive prompt
//!   pods-links <URL>...                 open each link
//!   pods-links citations <file.json>    open each citation in a JSON array

use dotenv::dotenv;
use pods_links::adapters::mock::{FixedSurfaceLocator, RecordingBrowser, ScriptedConfirmation};
use pods_links::adapters::system::{TerminalBrowser, TerminalSurfaceLocator};
use pods_links::adapters::ui::tui::{InquireConfirmation, TuiInputPort};
use pods_links::domain::{Citation, SurfaceHandle};
use pods_links::ports::{BrowserPort, ConfirmationPort, InputPort, SurfaceLocator};
use pods_links::shared::config::AppConfig;
use pods_links::usecases::LinkResolutionPolicy;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = &env_loaded {
        info!(path = %path.display(), "loaded .env");
    }

    let cfg = AppConfig::load()?;
    let registry = Arc::new(cfg.build_registry()?);
    info!(domains = registry.domains().len(), "trusted domains loaded");

    // --- Host capabilities: real terminal, or recorders for a dry run ---
    let (surfaces, browser, confirmer): (
        Arc<dyn SurfaceLocator>,
        Arc<dyn BrowserPort>,
        Arc<dyn ConfirmationPort>,
    ) = if cfg.is_dry_run() {
        info!("dry run: links are logged, not opened; confirmations are accepted");
        (
            Arc::new(FixedSurfaceLocator::new(Some(SurfaceHandle::new("dry-run")))),
            Arc::new(RecordingBrowser::new()),
            Arc::new(ScriptedConfirmation::new(Some(1))),
        )
    } else {
        (
            Arc::new(TerminalSurfaceLocator::new()),
            Arc::new(TerminalBrowser::new()),
            Arc::new(InquireConfirmation::new()),
        )
    };

    let policy = LinkResolutionPolicy::new(registry, surfaces, browser, confirmer)
        .with_style(cfg.browser_style());
    policy.set_confirmation_enabled(cfg.confirmation_enabled_or_default());
    info!(
        confirmation_enabled = policy.confirmation_enabled(),
        "link policy ready"
    );

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(Arc::new(policy)));

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            pods_links::adapters::ui::init_ui();
            input_port.run().await?;
        }
        [cmd, path] if cmd == "citations" => {
            let citations = read_citations(path)?;
            info!(count = citations.len(), path = %path, "loaded citations");
            input_port.open_citations(&citations).await?;
        }
        [cmd, ..] if cmd == "citations" => {
            anyhow::bail!("usage: pods-links citations <file.json>");
        }
        urls => input_port.open_links(urls).await?,
    }

    Ok(())
}

fn read_citations(path: &str) -> anyhow::Result<Vec<Citation>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read citations {}: {}", path, e))?;
    let citations = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("parse citations {}: {}", path, e))?;
    Ok(citations)
}
