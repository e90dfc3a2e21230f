//! Implements SurfaceLocator for a terminal host.

use crate::domain::SurfaceHandle;
use crate::ports::SurfaceLocator;
use async_trait::async_trait;
use std::io::IsTerminal;

/// Handle for the interactive terminal.
pub const TERMINAL_SURFACE: &str = "terminal";

/// Reports the terminal as the presentation surface while stdout is interactive.
#[derive(Default)]
pub struct TerminalSurfaceLocator;

impl TerminalSurfaceLocator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SurfaceLocator for TerminalSurfaceLocator {
    async fn current_presentation_surface(&self) -> Option<SurfaceHandle> {
        std::io::stdout()
            .is_terminal()
            .then(|| SurfaceHandle::new(TERMINAL_SURFACE))
    }
}
