//! Inbound port. UI (adapter) calls into the application.

use crate::domain::{Citation, LinkError};

/// Input port: front ends feed user-supplied links into the policy.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Prompt for links until the user stops.
    async fn run(&self) -> Result<(), LinkError>;

    /// Handle each URL string in order.
    async fn open_links(&self, urls: &[String]) -> Result<(), LinkError>;

    /// Handle each citation in order; citations without a usable URL are skipped.
    async fn open_citations(&self, citations: &[Citation]) -> Result<(), LinkError>;
}
