//! Domain entities. Pure data structures for link handling.
//!
//! No terminal/IO types here; adapters map to and from these.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Opaque handle to "where to present things now". Only adapters interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(String);

impl SurfaceHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A link the user tapped, optionally scoped to the surface it came from.
#[derive(Debug, Clone)]
pub struct LinkRequest {
    pub url: Url,
    pub surface: Option<SurfaceHandle>,
}

impl LinkRequest {
    pub fn new(url: Url) -> Self {
        Self { url, surface: None }
    }

    pub fn with_surface(mut self, surface: SurfaceHandle) -> Self {
        self.surface = Some(surface);
        self
    }
}

/// Outcome of evaluating a [`LinkRequest`]. Consumed once by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDecision {
    OpenDirectly(Url),
    NeedsConfirmation { url: Url, display_domain: String },
}

impl LinkDecision {
    pub fn url(&self) -> &Url {
        match self {
            LinkDecision::OpenDirectly(url) => url,
            LinkDecision::NeedsConfirmation { url, .. } => url,
        }
    }

    /// Start the confirmation flow for this decision.
    pub fn into_flow(self) -> ConfirmationFlow {
        match self {
            LinkDecision::OpenDirectly(url) => ConfirmationFlow::Ready(url),
            LinkDecision::NeedsConfirmation {
                url,
                display_domain,
            } => ConfirmationFlow::Pending(PendingConfirmation {
                url,
                display_domain,
            }),
        }
    }
}

/// First step after a decision: either open now, or wait for the user.
#[derive(Debug)]
pub enum ConfirmationFlow {
    Ready(Url),
    Pending(PendingConfirmation),
}

/// A link waiting on the user's choice. Confirming or cancelling consumes it,
/// so a pending link can be acted on at most once.
#[derive(Debug)]
pub struct PendingConfirmation {
    url: Url,
    display_domain: String,
}

impl PendingConfirmation {
    pub fn display_domain(&self) -> &str {
        &self.display_domain
    }

    /// Build the prompt shown to the user. Action 0 cancels, action 1 opens.
    pub fn alert(&self) -> Alert {
        Alert {
            title: "Open External Link?".to_string(),
            message: format!(
                "You are about to leave Pods and visit {}. Do you want to continue?",
                self.display_domain
            ),
            actions: vec![
                AlertAction::cancel("Cancel"),
                AlertAction::default_action("Open Link"),
            ],
        }
    }

    pub fn confirm(self) -> Url {
        self.url
    }

    pub fn cancel(self) {}
}

/// External record that may reference a URL (e.g. a study behind a pod column).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Citation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Citation {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            title: None,
            url: Some(url.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DismissStyle {
    #[default]
    Done,
    Close,
    Cancel,
}

impl DismissStyle {
    pub fn label(self) -> &'static str {
        match self {
            DismissStyle::Done => "Done",
            DismissStyle::Close => "Close",
            DismissStyle::Cancel => "Cancel",
        }
    }
}

/// Look of the in-app browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserStyle {
    /// Hex color, `#RRGGBB`.
    pub tint_color: String,
    pub dismiss_style: DismissStyle,
}

impl Default for BrowserStyle {
    fn default() -> Self {
        Self {
            tint_color: "#1C7EF2".to_string(),
            dismiss_style: DismissStyle::Done,
        }
    }
}

impl BrowserStyle {
    /// Tint as RGB; `None` when the configured color is not `#RRGGBB`.
    pub fn tint_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.tint_color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

/// Confirmation dialog content handed to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub actions: Vec<AlertAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertAction {
    pub label: String,
    pub is_cancel: bool,
}

impl AlertAction {
    pub fn cancel(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_cancel: true,
        }
    }

    pub fn default_action(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_cancel: false,
        }
    }
}

/// What happened to a link after the full flow ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    OpenedInApp,
    OpenedExternally,
    Cancelled,
    /// Nothing to open (citation without a usable URL).
    Skipped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_confirmation_alert_names_domain() {
        let url = Url::parse("https://randomblog.net/article").unwrap();
        let flow = LinkDecision::NeedsConfirmation {
            url: url.clone(),
            display_domain: "randomblog.net".to_string(),
        }
        .into_flow();

        let ConfirmationFlow::Pending(pending) = flow else {
            panic!("expected pending confirmation");
        };
        let alert = pending.alert();
        assert!(alert.message.contains("randomblog.net"));
        assert_eq!(alert.actions.len(), 2);
        assert!(alert.actions[0].is_cancel);
        assert!(!alert.actions[1].is_cancel);
        assert_eq!(pending.confirm(), url);
    }

    #[test]
    fn open_directly_is_ready() {
        let url = Url::parse("https://nih.gov").unwrap();
        let flow = LinkDecision::OpenDirectly(url.clone()).into_flow();
        assert!(matches!(flow, ConfirmationFlow::Ready(u) if u == url));
    }

    #[test]
    fn tint_rgb_parses_hex() {
        let style = BrowserStyle::default();
        assert_eq!(style.tint_rgb(), Some((0x1C, 0x7E, 0xF2)));

        let bad = BrowserStyle {
            tint_color: "blue".to_string(),
            ..BrowserStyle::default()
        };
        assert_eq!(bad.tint_rgb(), None);
    }

    #[test]
    fn citation_deserializes_without_url() {
        let citations: Vec<Citation> =
            serde_json::from_str(r#"[{"title": "Sleep study"}, {"url": "https://nih.gov"}]"#)
                .unwrap();
        assert!(citations[0].url.is_none());
        assert_eq!(citations[1].url.as_deref(), Some("https://nih.gov"));
    }
}
