/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossterm::{cursor, execute, terminal};
use log::warn;
use std::io::stdout;

/// Puts the terminal in raw mode on an alternate screen until dropped.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn new() -> std::io::Result<TerminalGuard> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(stdout(), cursor::Show, terminal::LeaveAlternateScreen) {
            warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
    }
}
