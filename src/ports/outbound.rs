//! Outbound ports. The link policy calls into the host UI through these.
//!
//! Implemented by adapters.

use crate::domain::{Alert, BrowserStyle, LinkError, SurfaceHandle};
use url::Url;

/// Finds the currently appropriate place to present UI (topmost modal,
/// visible navigation entry, selected tab). The policy never walks the
/// hierarchy itself.
#[async_trait::async_trait]
pub trait SurfaceLocator: Send + Sync {
    /// `None` when no surface is active (app in background, headless run).
    async fn current_presentation_surface(&self) -> Option<SurfaceHandle>;
}

/// Opens URLs, either embedded in the app or through the OS.
#[async_trait::async_trait]
pub trait BrowserPort: Send + Sync {
    /// Open `url` in an embedded browser scoped to `surface`.
    async fn present_browser(
        &self,
        url: &Url,
        surface: &SurfaceHandle,
        style: &BrowserStyle,
    ) -> Result<(), LinkError>;

    /// Fallback when there is nowhere to present: hand the URL to the OS.
    async fn open_externally(&self, url: &Url) -> Result<(), LinkError>;
}

/// Presents a confirmation dialog and reports the user's choice.
#[async_trait::async_trait]
pub trait ConfirmationPort: Send + Sync {
    /// Returns the index into `alert.actions` the user picked, or `None` if the
    /// dialog was dismissed without a choice.
    async fn present_alert(
        &self,
        surface: &SurfaceHandle,
        alert: &Alert,
    ) -> Result<Option<usize>, LinkError>;
}
