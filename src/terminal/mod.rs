//! crossterm backends for the input and render collaborators, plus the
//! raw-mode / alternate-screen lifecycle.

mod canvas;
mod input;

pub use canvas::TerminalCanvas;
pub use input::TerminalInput;

use std::io::{self, stdout};

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use tracing::{debug, warn};

/// Puts the terminal into game mode on creation and restores it on drop,
/// so an early `?` return still leaves a usable shell behind.
pub struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Key-release events only exist on kitty-protocol terminals; the
        // rest fall back to the hold window in `TerminalInput`.
        let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            out.execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        debug!(keyboard_enhanced, "terminal entered game mode");

        Ok(TerminalGuard { keyboard_enhanced })
    }

    /// Whether the terminal sends `Release` events for held keys.
    pub fn reports_key_releases(&self) -> bool {
        self.keyboard_enhanced
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        if let Err(error) = terminal::disable_raw_mode() {
            warn!(%error, "failed to leave raw mode");
        }
    }
}
