//! Raw-mode terminal input.
//!
//! [`TerminalGuard`] switches the terminal into raw mode on the alternate
//! screen and restores it when dropped, including during a panic unwind.
//! While it is active, stderr diagnostics are dropped so they cannot draw
//! over the dashboard.

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// Source of single-byte commands. Must never block.
pub trait CommandSource {
    /// Returns the next pending command byte, if any.
    fn poll_command(&mut self) -> io::Result<Option<u8>>;
}

/// Byte that quits the monitor.
const QUIT_BYTE: u8 = b'q';

/// Set while the alternate screen is up.
static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

fn set_active(active: bool) {
    SCREEN_ACTIVE.store(active, Ordering::SeqCst);
}

/// True when stderr output would be visible to the user.
pub fn diagnostics_visible() -> bool {
    !SCREEN_ACTIVE.load(Ordering::SeqCst)
}

/// Writer for diagnostics without a log file: stderr, or nothing while the
/// dashboard owns the screen.
pub fn diagnostic_writer() -> Box<dyn io::Write> {
    if diagnostics_visible() {
        Box::new(io::stderr())
    } else {
        Box::new(io::sink())
    }
}

/// Maps a key event to a command byte.
///
/// Ctrl-C arrives as an ordinary key in raw mode and is treated as quit.
pub fn key_to_byte(key: &KeyEvent) -> Option<u8> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(QUIT_BYTE),
        KeyCode::Char(c) if c.is_ascii() => Some(c as u8),
        _ => None,
    }
}

/// Scoped raw-mode terminal.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Enables raw mode and enters the alternate screen.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // Constructed before the screen switch so a failure below still restores raw mode
        let guard = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        debug!("Terminal switched to raw mode");
        set_active(true);
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

impl CommandSource for TerminalGuard {
    fn poll_command(&mut self) -> io::Result<Option<u8>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(byte) = key_to_byte(&key) {
                    return Ok(Some(byte));
                }
            }
        }
        Ok(None)
    }
}

/// Puts the terminal back into cooked mode on the main screen.
fn restore() {
    set_active(false);
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Restores the terminal before the default panic message is printed.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use std::io::Write;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn press(c: char) -> KeyEvent {
        key(KeyCode::Char(c), KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(key_to_byte(&press('h')), Some(b'h'));
        assert_eq!(key_to_byte(&press('q')), Some(b'q'));
        assert_eq!(key_to_byte(&press('x')), Some(b'x'));
    }

    #[test]
    fn test_shifted_keys_keep_case() {
        let shifted = key(KeyCode::Char('H'), KeyModifiers::SHIFT, KeyEventKind::Press);
        assert_eq!(key_to_byte(&shifted), Some(b'H'));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(key_to_byte(&ctrl_c), Some(b'q'));
    }

    #[test]
    fn test_diagnostics_hidden_while_screen_active() {
        assert!(diagnostics_visible());
        set_active(true);
        assert!(!diagnostics_visible());
        // Swallowed rather than written over the screen
        assert!(diagnostic_writer().write_all(b"hidden\n").is_ok());
        set_active(false);
        assert!(diagnostics_visible());
    }

    #[test]
    fn test_ignored_keys() {
        assert_eq!(key_to_byte(&press('é')), None);
        let enter = key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(key_to_byte(&enter), None);
        let release = key(KeyCode::Char('h'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(key_to_byte(&release), None);
    }
}
