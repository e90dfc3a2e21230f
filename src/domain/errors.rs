//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    /// Input is not a valid absolute URL. Classification treats this as untrusted.
    #[error("Unparseable URL: {0}")]
    UnparseableUrl(String),

    /// URL parsed but carries no host (e.g. `mailto:` or `file:///`).
    /// Classification maps this to "untrusted".
    #[error("URL has no host: {0}")]
    NoHost(String),

    /// No UI surface is active. Opening degrades to the system browser.
    #[error("No presentation surface available")]
    NoPresentationSurface,

    #[error("Invalid trusted domain entry: {0:?}")]
    InvalidDomain(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Confirmation prompt failed: {0}")]
    Confirmation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
