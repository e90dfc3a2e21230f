//! Core domain layer. No external I/O dependencies beyond reading an allowlist file.
//!
//! Entities and the trust rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod trust;

pub use entities::{
    Alert, AlertAction, BrowserStyle, Citation, ConfirmationFlow, DismissStyle, LinkDecision,
    LinkOutcome, LinkRequest, PendingConfirmation, SurfaceHandle,
};
pub use errors::LinkError;
pub use trust::{DomainTrustRegistry, TrustedDomainSet, DEFAULT_TRUSTED_DOMAINS, UNKNOWN_DOMAIN};
