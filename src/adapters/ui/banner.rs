//! Startup banner with a gradient title line.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};

const TITLE: &str = "PODS LINKS";

/// Pods blue (#1c7ef2).
const PODS_BLUE: (u8, u8, u8) = (0x1c, 0x7e, 0xf2);
/// Mint (#2fd4a3).
const MINT: (u8, u8, u8) = (0x2f, 0xd4, 0xa3);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the title with a per-character gradient, then the version.
pub fn print_welcome() {
    let mut out = stdout();
    let total = TITLE.chars().count().max(2);
    for (i, ch) in TITLE.chars().enumerate() {
        let t = i as f64 / (total - 1) as f64;
        let (r, g, b) = lerp_rgb(PODS_BLUE, MINT, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(ch));
    }
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print(format!("  v{}\r\n", env!("CARGO_PKG_VERSION"))));
    let _ = out.flush();
}
