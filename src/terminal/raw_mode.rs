//! Raw mode RAII guard.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode, is_raw_mode_enabled};
use std::io;

/// Raw mode for as long as the guard lives.
///
/// Leaves raw mode alone on drop if it was already on when entered, so
/// nested prompts do not switch it off under their caller.
pub struct RawMode {
    restore: bool,
}

impl RawMode {
    pub fn enter() -> io::Result<Self> {
        let already = is_raw_mode_enabled().unwrap_or(false);
        if !already {
            enable_raw_mode()?;
        }
        Ok(Self { restore: !already })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if self.restore {
            let _ = disable_raw_mode();
        }
    }
}
