//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors, deletions
//! - Yellow: warnings
//! - Cyan: secret names, hints
//! - Bold: headers
//! - Dimmed: secondary info

use console::style;
use std::fmt::Display;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ synced 3 secrets to octo/app`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ put secret API_KEY failed: HTTP 422`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message (yellow).
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("⚠").yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ set GITHUB_TOKEN`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a bold section header.
pub fn header(title: &str) {
    if colors_enabled() {
        println!("{}", style(title).bold());
    } else {
        println!("{}", title);
    }
}

/// Print a label/value pair (label dimmed).
///
/// Example: `  API_KEY  updated 2024-01-10 14:59`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).cyan(), style(value).dim());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Print one planned action, e.g. `  - OLD_KEY (delete)`.
pub fn action(marker: char, name: &str, label: &str) {
    if !colors_enabled() {
        println!("  {} {} ({})", marker, name, label);
        return;
    }

    let marker = match marker {
        '+' => style(marker).green(),
        '-' => style(marker).red(),
        '~' => style(marker).yellow(),
        _ => style(marker).dim(),
    };
    println!("  {} {} {}", marker, style(name).cyan(), style(format!("({})", label)).dim());
}

/// Print a dimmed/secondary message.
///
/// Example: `no secrets stored`
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}
