//! Implements InputPort and ConfirmationPort. Inquire-based interactive prompts.

use crate::domain::{Alert, Citation, LinkError, LinkOutcome, SurfaceHandle};
use crate::ports::{ConfirmationPort, InputPort};
use crate::usecases::LinkResolutionPolicy;
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};
use inquire::{Select, Text};
use std::sync::Arc;
use tracing::{info, warn};

/// Applies the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let accent = Color::Rgb {
        r: 0x1c,
        g: 0x7e,
        b: 0xf2,
    };
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(accent))
        .with_highlighted_option_prefix(Styled::new(">").with_fg(accent))
        .with_selected_option(Some(StyleSheet::new().with_fg(accent)));
    inquire::set_global_render_config(config);
}

/// Confirmation dialog as a select prompt over the alert's actions.
#[derive(Default)]
pub struct InquireConfirmation;

impl InquireConfirmation {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConfirmationPort for InquireConfirmation {
    async fn present_alert(
        &self,
        _surface: &SurfaceHandle,
        alert: &Alert,
    ) -> Result<Option<usize>, LinkError> {
        let labels: Vec<String> = alert.actions.iter().map(|a| a.label.clone()).collect();
        let prompt = format!("{} {}", alert.title, alert.message);
        match Select::new(&prompt, labels).raw_prompt() {
            Ok(choice) => Ok(Some(choice.index)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(LinkError::Confirmation(e.to_string())),
        }
    }
}

/// TUI adapter. Feeds typed or passed-in links through the policy.
pub struct TuiInputPort {
    policy: Arc<LinkResolutionPolicy>,
}

impl TuiInputPort {
    pub fn new(policy: Arc<LinkResolutionPolicy>) -> Self {
        Self { policy }
    }

    async fn open_one(&self, raw: &str) -> Result<(), LinkError> {
        match self.policy.handle_str(raw, None).await {
            Ok(outcome) => {
                report(raw, outcome);
                Ok(())
            }
            Err(LinkError::UnparseableUrl(url)) => {
                warn!(url = %url, "not a valid link, ignoring");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

fn report(url: &str, outcome: LinkOutcome) {
    match outcome {
        LinkOutcome::OpenedInApp => info!(url, "opened"),
        LinkOutcome::OpenedExternally => info!(url, "opened in system browser"),
        LinkOutcome::Cancelled => info!(url, "not opened"),
        LinkOutcome::Skipped => info!(url, "skipped"),
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), LinkError> {
        loop {
            let line = match Text::new("Link to open (empty to quit):").prompt() {
                Ok(line) => line,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    break;
                }
                Err(e) => return Err(LinkError::Confirmation(e.to_string())),
            };
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            self.open_one(line).await?;
        }
        Ok(())
    }

    async fn open_links(&self, urls: &[String]) -> Result<(), LinkError> {
        for url in urls {
            self.open_one(url).await?;
        }
        Ok(())
    }

    async fn open_citations(&self, citations: &[Citation]) -> Result<(), LinkError> {
        for citation in citations {
            let outcome = self.policy.resolve_citation(citation, None).await?;
            let label = citation
                .title
                .as_deref()
                .or(citation.url.as_deref())
                .unwrap_or("<untitled>");
            report(label, outcome);
        }
        Ok(())
    }
}
