//! Terminal state guard that ensures cleanup on drop.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// RAII guard that restores terminal state on drop.
///
/// This ensures terminal cleanup happens even on:
/// - Early returns via `?` operator
/// - Panics (via panic hook)
/// - Normal scope exit
pub struct TerminalGuard {
    active: AtomicBool,
}

impl TerminalGuard {
    /// Enable raw mode, enter the alternate screen and build the terminal.
    pub fn enter() -> Result<(Self, Tui)> {
        enable_raw_mode()?;
        let guard = Self {
            active: AtomicBool::new(true),
        };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok((guard, terminal))
    }

    /// Manually cleanup (used by panic hook).
    pub fn cleanup() {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        let _ = io::stdout().flush();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active.swap(false, Ordering::SeqCst) {
            Self::cleanup();
        }
    }
}

/// Install panic hook that restores terminal before printing panic.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal first so panic message is readable
        TerminalGuard::cleanup();
        original_hook(panic_info);
    }));
}
