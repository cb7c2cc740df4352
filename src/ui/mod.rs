pub mod browser;
pub mod help;
pub mod keybindings;
mod panels;
pub mod search_bar;
pub mod terminal_guard;

pub use browser::{Activation, Browser};
pub use help::HelpOverlay;
pub use panels::{HeaderBar, StatusBar};
pub use search_bar::SearchBar;
pub use terminal_guard::{install_panic_hook, TerminalGuard};

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

use helpcenter::view::is_openable_href;

#[cfg(target_os = "macos")]
fn opener(href: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(href);
    cmd
}

#[cfg(target_os = "windows")]
fn opener(href: &str) -> Command {
    // No shell in between, so `&` and `|` stay part of the URL
    let mut cmd = Command::new("rundll32");
    cmd.args(["url.dll,FileProtocolHandler", href]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(href: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(href);
    cmd
}

/// Hand a `tel:`, `mailto:` or web link to the desktop opener.
///
/// The opener's output is discarded so it cannot draw over the TUI.
pub fn open_external(href: &str) -> Result<()> {
    if !is_openable_href(href) {
        anyhow::bail!("Refusing to open '{href}'");
    }
    tracing::info!(href, "Opening link");

    opener(href)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("Failed to open link")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_external_rejects_unsafe_targets() {
        for href in ["file:///etc/passwd", "-n", "javascript:alert(1)"] {
            let err = open_external(href).unwrap_err();
            assert!(err.to_string().contains("Refusing"));
        }
    }

    #[test]
    fn test_opener_passes_href_as_single_argument() {
        let cmd = opener("https://a.example/?x=1&y=2");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(
            args.last().and_then(|a| a.to_str()),
            Some("https://a.example/?x=1&y=2")
        );
    }
}
