//! Application use cases. Orchestrate domain logic via ports.

pub mod link_policy;

pub use link_policy::LinkResolutionPolicy;
