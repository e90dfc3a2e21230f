//! Recording adapters for dry runs and tests.
//!
//! Nothing here launches a browser; every call is logged and kept for inspection.

use crate::domain::{Alert, BrowserStyle, LinkError, SurfaceHandle};
use crate::ports::{BrowserPort, ConfirmationPort, SurfaceLocator};
use std::sync::Mutex;
use tracing::info;
use url::Url;

/// Always reports the same surface (or none).
pub struct FixedSurfaceLocator {
    surface: Option<SurfaceHandle>,
}

impl FixedSurfaceLocator {
    pub fn new(surface: Option<SurfaceHandle>) -> Self {
        Self { surface }
    }
}

#[async_trait::async_trait]
impl SurfaceLocator for FixedSurfaceLocator {
    async fn current_presentation_surface(&self) -> Option<SurfaceHandle> {
        self.surface.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserCall {
    InApp { url: String, surface: String },
    External { url: String },
}

/// Browser that records opens instead of performing them.
#[derive(Default)]
pub struct RecordingBrowser {
    calls: Mutex<Vec<BrowserCall>>,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<BrowserCall> {
        self.calls
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: BrowserCall) -> Result<(), LinkError> {
        self.calls
            .lock()
            .map_err(|e| LinkError::Browser(e.to_string()))?
            .push(call);
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserPort for RecordingBrowser {
    async fn present_browser(
        &self,
        url: &Url,
        surface: &SurfaceHandle,
        style: &BrowserStyle,
    ) -> Result<(), LinkError> {
        info!(
            url = %url,
            surface = %surface,
            tint = %style.tint_color,
            "[DRY RUN] present in-app browser"
        );
        self.record(BrowserCall::InApp {
            url: url.to_string(),
            surface: surface.to_string(),
        })
    }

    async fn open_externally(&self, url: &Url) -> Result<(), LinkError> {
        info!(url = %url, "[DRY RUN] open in system browser");
        self.record(BrowserCall::External {
            url: url.to_string(),
        })
    }
}

/// Answers every alert with the same choice and remembers what was asked.
pub struct ScriptedConfirmation {
    answer: Option<usize>,
    prompts: Mutex<Vec<Alert>>,
}

impl ScriptedConfirmation {
    /// `answer` is the action index to pick; `None` dismisses.
    pub fn new(answer: Option<usize>) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<Alert> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ConfirmationPort for ScriptedConfirmation {
    async fn present_alert(
        &self,
        surface: &SurfaceHandle,
        alert: &Alert,
    ) -> Result<Option<usize>, LinkError> {
        info!(surface = %surface, title = %alert.title, answer = ?self.answer, "[DRY RUN] alert");
        self.prompts
            .lock()
            .map_err(|e| LinkError::Confirmation(e.to_string()))?
            .push(alert.clone());
        Ok(self.answer)
    }
}
