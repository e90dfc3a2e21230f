//! Terminal host capabilities: surface lookup and link opening.

pub mod browser;
pub mod surface;

pub use browser::TerminalBrowser;
pub use surface::TerminalSurfaceLocator;
