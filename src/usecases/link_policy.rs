//! Decides whether a link opens straight away or asks the user first, then
//! opens it through the host's browser ports.
//!
//! - Trusted hosts, or any host when confirmation is disabled: open directly
//! - Everything else: confirmation alert, open only on an explicit "open"
//! - No surface to present on: fall back to the OS browser

use crate::domain::{
    BrowserStyle, Citation, ConfirmationFlow, DomainTrustRegistry, LinkDecision, LinkError,
    LinkOutcome, LinkRequest, SurfaceHandle,
};
use crate::ports::{BrowserPort, ConfirmationPort, SurfaceLocator};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};
use url::Url;

/// Link resolution policy. One instance per app, owned by the composition root.
pub struct LinkResolutionPolicy {
    registry: Arc<DomainTrustRegistry>,
    surfaces: Arc<dyn SurfaceLocator>,
    browser: Arc<dyn BrowserPort>,
    confirmer: Arc<dyn ConfirmationPort>,
    style: BrowserStyle,
    confirmation_enabled: AtomicBool,
}

impl LinkResolutionPolicy {
    pub fn new(
        registry: Arc<DomainTrustRegistry>,
        surfaces: Arc<dyn SurfaceLocator>,
        browser: Arc<dyn BrowserPort>,
        confirmer: Arc<dyn ConfirmationPort>,
    ) -> Self {
        Self {
            registry,
            surfaces,
            browser,
            confirmer,
            style: BrowserStyle::default(),
            confirmation_enabled: AtomicBool::new(true),
        }
    }

    pub fn with_style(mut self, style: BrowserStyle) -> Self {
        self.style = style;
        self
    }

    pub fn registry(&self) -> &DomainTrustRegistry {
        &self.registry
    }

    pub fn confirmation_enabled(&self) -> bool {
        self.confirmation_enabled.load(Ordering::Relaxed)
    }

    /// Turn the confirmation prompt on or off (off in automated runs).
    pub fn set_confirmation_enabled(&self, enabled: bool) {
        self.confirmation_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn resolve(&self, request: &LinkRequest) -> LinkDecision {
        let url = &request.url;
        if !self.confirmation_enabled() || self.registry.is_trusted(url) {
            debug!(url = %url, "link opens directly");
            return LinkDecision::OpenDirectly(url.clone());
        }
        let display_domain = self.registry.display_domain(url);
        debug!(url = %url, domain = %display_domain, "link needs confirmation");
        LinkDecision::NeedsConfirmation {
            url: url.clone(),
            display_domain,
        }
    }

    /// Open `url` in the in-app browser on `surface` (or the current one), or
    /// through the OS when no surface is available.
    pub async fn open(
        &self,
        url: &Url,
        surface: Option<&SurfaceHandle>,
    ) -> Result<LinkOutcome, LinkError> {
        match self.surface_for(surface).await {
            Ok(surface) => {
                self.browser
                    .present_browser(url, &surface, &self.style)
                    .await?;
                info!(url = %url, surface = %surface, "opened link in app");
                Ok(LinkOutcome::OpenedInApp)
            }
            Err(e) => {
                warn!(url = %url, reason = %e, "falling back to system browser");
                self.browser.open_externally(url).await?;
                info!(url = %url, "opened link externally");
                Ok(LinkOutcome::OpenedExternally)
            }
        }
    }

    /// Resolve, confirm if needed, and open.
    pub async fn handle(&self, request: LinkRequest) -> Result<LinkOutcome, LinkError> {
        let pending = match self.resolve(&request).into_flow() {
            ConfirmationFlow::Ready(url) => {
                return self.open(&url, request.surface.as_ref()).await;
            }
            ConfirmationFlow::Pending(pending) => pending,
        };

        // Without a surface the prompt cannot be shown; never skip it.
        let surface = match self.surface_for(request.surface.as_ref()).await {
            Ok(surface) => surface,
            Err(e) => {
                warn!(
                    domain = pending.display_domain(),
                    reason = %e,
                    "cannot ask for confirmation, discarding link"
                );
                pending.cancel();
                return Ok(LinkOutcome::Cancelled);
            }
        };

        let alert = pending.alert();
        let choice = self.confirmer.present_alert(&surface, &alert).await?;
        let confirmed = choice
            .and_then(|i| alert.actions.get(i))
            .is_some_and(|action| !action.is_cancel);

        if !confirmed {
            debug!(domain = pending.display_domain(), "user cancelled link");
            pending.cancel();
            return Ok(LinkOutcome::Cancelled);
        }

        let url = pending.confirm();
        self.open(&url, Some(&surface)).await
    }

    /// Parse `url` and run [`Self::handle`].
    pub async fn handle_str(
        &self,
        url: &str,
        surface: Option<SurfaceHandle>,
    ) -> Result<LinkOutcome, LinkError> {
        let url = Url::parse(url.trim()).map_err(|_| LinkError::UnparseableUrl(url.to_string()))?;
        let mut request = LinkRequest::new(url);
        request.surface = surface;
        self.handle(request).await
    }

    /// Open a citation's link. Missing or malformed URLs are skipped silently.
    pub async fn resolve_citation(
        &self,
        citation: &Citation,
        surface: Option<SurfaceHandle>,
    ) -> Result<LinkOutcome, LinkError> {
        let Some(raw) = citation.url.as_deref() else {
            return Ok(LinkOutcome::Skipped);
        };
        match self.handle_str(raw, surface).await {
            Err(LinkError::UnparseableUrl(_)) => {
                debug!(url = raw, "skipping citation with unparseable url");
                Ok(LinkOutcome::Skipped)
            }
            other => other,
        }
    }

    async fn surface_for(
        &self,
        explicit: Option<&SurfaceHandle>,
    ) -> Result<SurfaceHandle, LinkError> {
        if let Some(surface) = explicit {
            return Ok(surface.clone());
        }
        self.surfaces
            .current_presentation_surface()
            .await
            .ok_or(LinkError::NoPresentationSurface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{
        BrowserCall, FixedSurfaceLocator, RecordingBrowser, ScriptedConfirmation,
    };

    struct Harness {
        policy: LinkResolutionPolicy,
        browser: Arc<RecordingBrowser>,
        confirmer: Arc<ScriptedConfirmation>,
    }

    fn harness(surface: Option<&str>, answer: Option<usize>) -> Harness {
        let browser = Arc::new(RecordingBrowser::new());
        let confirmer = Arc::new(ScriptedConfirmation::new(answer));
        let policy = LinkResolutionPolicy::new(
            Arc::new(DomainTrustRegistry::default()),
            Arc::new(FixedSurfaceLocator::new(surface.map(SurfaceHandle::new))),
            browser.clone(),
            confirmer.clone(),
        );
        Harness {
            policy,
            browser,
            confirmer,
        }
    }

    fn request(url: &str) -> LinkRequest {
        LinkRequest::new(Url::parse(url).unwrap())
    }

    #[test]
    fn trusted_subdomain_opens_directly() {
        let h = harness(Some("feed"), None);
        let url = "https://pubmed.ncbi.nlm.nih.gov/12345";
        assert_eq!(
            h.policy.resolve(&request(url)),
            LinkDecision::OpenDirectly(Url::parse(url).unwrap())
        );
    }

    #[test]
    fn untrusted_needs_confirmation_with_domain() {
        let h = harness(Some("feed"), None);
        match h.policy.resolve(&request("https://randomblog.net/article")) {
            LinkDecision::NeedsConfirmation { display_domain, .. } => {
                assert_eq!(display_domain, "randomblog.net")
            }
            other => panic!("unexpected decision: {other:?}"),
        }
    }

    #[test]
    fn disabled_confirmation_always_opens_directly() {
        let h = harness(Some("feed"), None);
        h.policy.set_confirmation_enabled(false);
        assert!(!h.policy.confirmation_enabled());
        for url in ["https://randomblog.net/article", "mailto:a@b.c", "https://nih.gov"] {
            assert!(matches!(
                h.policy.resolve(&request(url)),
                LinkDecision::OpenDirectly(_)
            ));
        }
    }

    #[tokio::test]
    async fn disabled_confirmation_opens_untrusted_without_prompt() {
        let h = harness(Some("feed"), Some(0));
        h.policy.set_confirmation_enabled(false);
        let outcome = h
            .policy
            .handle(request("https://randomblog.net/article"))
            .await
            .unwrap();

        assert_eq!(outcome, LinkOutcome::OpenedInApp);
        assert!(h.confirmer.prompts().is_empty());
        assert_eq!(
            h.browser.calls(),
            vec![BrowserCall::InApp {
                url: "https://randomblog.net/article".to_string(),
                surface: "feed".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn confirm_opens_exactly_once() {
        let h = harness(Some("feed"), Some(1));
        let outcome = h
            .policy
            .handle(request("https://randomblog.net/article"))
            .await
            .unwrap();

        assert_eq!(outcome, LinkOutcome::OpenedInApp);
        assert_eq!(h.confirmer.prompts().len(), 1);
        assert_eq!(
            h.browser.calls(),
            vec![BrowserCall::InApp {
                url: "https://randomblog.net/article".to_string(),
                surface: "feed".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn cancel_opens_nothing() {
        let h = harness(Some("feed"), Some(0));
        let outcome = h
            .policy
            .handle(request("https://randomblog.net/article"))
            .await
            .unwrap();
        assert_eq!(outcome, LinkOutcome::Cancelled);
        assert!(h.browser.calls().is_empty());
    }

    #[tokio::test]
    async fn dismissed_prompt_opens_nothing() {
        let h = harness(Some("feed"), None);
        let outcome = h
            .policy
            .handle(request("https://randomblog.net/article"))
            .await
            .unwrap();
        assert_eq!(outcome, LinkOutcome::Cancelled);
        assert!(h.browser.calls().is_empty());
    }

    #[tokio::test]
    async fn trusted_link_skips_prompt() {
        let h = harness(Some("feed"), Some(0));
        let outcome = h.policy.handle(request("https://www.cdc.gov/sleep")).await.unwrap();
        assert_eq!(outcome, LinkOutcome::OpenedInApp);
        assert!(h.confirmer.prompts().is_empty());
    }

    #[tokio::test]
    async fn explicit_surface_wins_over_locator() {
        let h = harness(Some("feed"), None);
        let req = request("https://nih.gov").with_surface(SurfaceHandle::new("profile-sheet"));
        h.policy.handle(req).await.unwrap();
        assert_eq!(
            h.browser.calls(),
            vec![BrowserCall::InApp {
                url: "https://nih.gov/".to_string(),
                surface: "profile-sheet".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn no_surface_falls_back_to_system_browser() {
        let h = harness(None, None);
        let outcome = h.policy.handle(request("https://nih.gov/health")).await.unwrap();
        assert_eq!(outcome, LinkOutcome::OpenedExternally);
        assert_eq!(
            h.browser.calls(),
            vec![BrowserCall::External {
                url: "https://nih.gov/health".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn no_surface_never_bypasses_confirmation() {
        let h = harness(None, Some(1));
        let outcome = h
            .policy
            .handle(request("https://randomblog.net/article"))
            .await
            .unwrap();
        assert_eq!(outcome, LinkOutcome::Cancelled);
        assert!(h.browser.calls().is_empty());
        assert!(h.confirmer.prompts().is_empty());
    }

    #[tokio::test]
    async fn citation_without_usable_url_is_skipped() {
        let h = harness(Some("feed"), Some(1));
        for citation in [
            Citation::default(),
            Citation::with_url("not a url"),
            Citation::with_url("/relative/path"),
        ] {
            let outcome = h.policy.resolve_citation(&citation, None).await.unwrap();
            assert_eq!(outcome, LinkOutcome::Skipped);
        }
        assert!(h.browser.calls().is_empty());
        assert!(h.confirmer.prompts().is_empty());
    }

    #[tokio::test]
    async fn citation_with_url_goes_through_policy() {
        let h = harness(Some("feed"), Some(1));
        let outcome = h
            .policy
            .resolve_citation(&Citation::with_url("https://randomblog.net/a"), None)
            .await
            .unwrap();
        assert_eq!(outcome, LinkOutcome::OpenedInApp);
        assert_eq!(h.confirmer.prompts().len(), 1);
    }

    #[tokio::test]
    async fn handle_str_rejects_garbage() {
        let h = harness(Some("feed"), None);
        let err = h.policy.handle_str("not a url", None).await.unwrap_err();
        assert!(matches!(err, LinkError::UnparseableUrl(_)));
    }
}
