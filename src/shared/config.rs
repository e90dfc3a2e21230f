//! Application configuration. Allowlist extensions, prompt behaviour, browser style.

use crate::domain::{BrowserStyle, DismissStyle, DomainTrustRegistry, LinkError};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Ask before opening untrusted links (default true). Read from PODS_LINKS_CONFIRMATION_ENABLED.
    #[serde(default)]
    pub confirmation_enabled: Option<bool>,

    /// JSON file `{"domains": [...]}` with extra trusted domains. Read from PODS_LINKS_TRUSTED_DOMAINS_FILE.
    #[serde(default)]
    pub trusted_domains_file: Option<String>,

    /// Comma-separated extra trusted domains. Read from PODS_LINKS_EXTRA_TRUSTED_DOMAINS.
    #[serde(default)]
    pub extra_trusted_domains: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // In-app browser
    // ─────────────────────────────────────────────────────────────────────────
    /// Hex tint, `#RRGGBB`. Read from PODS_LINKS_TINT_COLOR.
    #[serde(default)]
    pub tint_color: Option<String>,

    /// done | close | cancel. Read from PODS_LINKS_DISMISS_STYLE.
    #[serde(default)]
    pub dismiss_style: Option<DismissStyle>,

    /// Record opens instead of performing them. Read from PODS_LINKS_DRY_RUN.
    #[serde(default)]
    pub dry_run: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("PODS_LINKS_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("PODS_LINKS").try_parsing(true));
        c.build()?.try_deserialize()
    }

    /// Defaults to true if unset.
    pub fn confirmation_enabled_or_default(&self) -> bool {
        self.confirmation_enabled.unwrap_or(true)
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }

    /// Extra domains from PODS_LINKS_EXTRA_TRUSTED_DOMAINS, split on commas.
    pub fn extra_domains(&self) -> Vec<String> {
        self.extra_trusted_domains
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn browser_style(&self) -> BrowserStyle {
        let defaults = BrowserStyle::default();
        BrowserStyle {
            tint_color: self.tint_color.clone().unwrap_or(defaults.tint_color),
            dismiss_style: self.dismiss_style.unwrap_or(defaults.dismiss_style),
        }
    }

    /// Built-in allowlist plus configured extras.
    pub fn build_registry(&self) -> Result<DomainTrustRegistry, LinkError> {
        let mut extra = self.extra_domains();
        if let Some(path) = self.trusted_domains_file.as_deref() {
            extra.extend(DomainTrustRegistry::read_domain_file(Path::new(path))?);
        }
        DomainTrustRegistry::with_extra(extra)
    }
}
