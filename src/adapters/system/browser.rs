//! Implements BrowserPort for a terminal host.
//!
//! "In-app" presentation prints a tinted OSC 8 hyperlink; external open hands
//! the URL to the platform opener.

use crate::domain::{BrowserStyle, LinkError, SurfaceHandle};
use crate::ports::BrowserPort;
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};
use tokio::process::Command;
use tracing::debug;
use url::Url;

/// Terminal-backed browser.
pub struct TerminalBrowser {
    opener: Vec<String>,
}

impl TerminalBrowser {
    pub fn new() -> Self {
        Self {
            opener: default_opener(),
        }
    }

    /// Use a custom opener command; the URL is appended as the last argument.
    pub fn with_opener(opener: Vec<String>) -> Self {
        Self { opener }
    }
}

impl Default for TerminalBrowser {
    fn default() -> Self {
        Self::new()
    }
}

fn default_opener() -> Vec<String> {
    opener_for(std::env::consts::OS)
}

/// Opener argv for `os`. The URL is passed straight to the program, never
/// through a shell, so `&`, `|` and `^` in it stay literal.
fn opener_for(os: &str) -> Vec<String> {
    let cmd: &[&str] = match os {
        "macos" => &["open"],
        "windows" => &["rundll32", "url.dll,FileProtocolHandler"],
        _ => &["xdg-open"],
    };
    cmd.iter().map(|s| s.to_string()).collect()
}

/// OSC 8 hyperlink: clickable in most modern terminals, plain text elsewhere.
fn hyperlink(url: &Url) -> String {
    format!("\x1b]8;;{url}\x1b\\{url}\x1b]8;;\x1b\\")
}

#[async_trait]
impl BrowserPort for TerminalBrowser {
    async fn present_browser(
        &self,
        url: &Url,
        surface: &SurfaceHandle,
        style: &BrowserStyle,
    ) -> Result<(), LinkError> {
        debug!(url = %url, surface = %surface, "presenting link in terminal");
        let mut out = stdout();
        let io = |e: std::io::Error| LinkError::Browser(e.to_string());
        if let Some((r, g, b)) = style.tint_rgb() {
            out.execute(SetForegroundColor(Color::Rgb { r, g, b }))
                .map_err(io)?;
        }
        out.execute(Print(hyperlink(url))).map_err(io)?;
        out.execute(ResetColor).map_err(io)?;
        out.execute(Print(format!("  [{}]\r\n", style.dismiss_style.label())))
            .map_err(io)?;
        out.flush().map_err(io)
    }

    async fn open_externally(&self, url: &Url) -> Result<(), LinkError> {
        let (program, args) = self
            .opener
            .split_first()
            .ok_or_else(|| LinkError::Browser("no opener command configured".into()))?;
        let status = Command::new(program)
            .args(args)
            .arg(url.as_str())
            .status()
            .await
            .map_err(|e| LinkError::Browser(format!("spawn {program}: {e}")))?;
        if !status.success() {
            return Err(LinkError::Browser(format!("{program} exited with {status}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyperlink_wraps_url_in_osc8() {
        let url = Url::parse("https://nih.gov/").unwrap();
        let link = hyperlink(&url);
        assert!(link.starts_with("\x1b]8;;https://nih.gov/"));
        assert!(link.ends_with("\x1b]8;;\x1b\\"));
    }

    #[test]
    fn openers_never_go_through_a_shell() {
        for os in ["windows", "macos", "linux", "freebsd"] {
            let argv = opener_for(os);
            assert!(
                !argv.iter().any(|a| {
                    let a = a.to_ascii_lowercase();
                    a == "cmd" || a == "cmd.exe" || a.ends_with("sh") || a == "/c"
                }),
                "{os} opener runs through a shell: {argv:?}"
            );
        }
        assert_eq!(
            opener_for("windows"),
            vec!["rundll32", "url.dll,FileProtocolHandler"]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shell_metacharacters_reach_opener_as_one_argument() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("argv");
        let script = format!("printf '%s\\n' \"$@\" > {}", out.display());
        let browser = TerminalBrowser::with_opener(vec![
            "sh".to_string(),
            "-c".to_string(),
            script,
            "opener".to_string(),
        ]);
        let url = Url::parse("https://randomblog.net/a|id?x=1&calc").unwrap();
        browser.open_externally(&url).await.unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, "https://randomblog.net/a|id?x=1&calc\n");
    }

    #[tokio::test]
    async fn empty_opener_is_an_error() {
        let browser = TerminalBrowser::with_opener(Vec::new());
        let url = Url::parse("https://nih.gov/").unwrap();
        let err = browser.open_externally(&url).await.unwrap_err();
        assert!(matches!(err, LinkError::Browser(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_opener_reports_status() {
        let browser = TerminalBrowser::with_opener(vec!["false".to_string()]);
        let url = Url::parse("https://nih.gov/").unwrap();
        assert!(browser.open_externally(&url).await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_opener() {
        let browser = TerminalBrowser::with_opener(vec!["true".to_string()]);
        let url = Url::parse("https://nih.gov/").unwrap();
        browser.open_externally(&url).await.unwrap();
    }
}
