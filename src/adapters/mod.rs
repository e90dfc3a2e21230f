//! Infrastructure adapters. Implement ports.
//!
//! Terminal host, interactive prompts, recorders. Map errors to LinkError.

pub mod mock;
pub mod system;
pub mod ui;
