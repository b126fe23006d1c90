//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the keyboard and edit modules.
//! Provides event polling, conversion, and routing.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//! - `route_event` - Dispatch event to appropriate handler
//! - `enable_bracketed_paste` / `disable_bracketed_paste` - Control paste capture
//!
//! # Example
//!
//! ```ignore
//! use spark_otp::state::input::{poll_event, route_event};
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         route_event(event);
//!     }
//! }
//! ```

use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event as CrosstermEvent,
    KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers, poll, read,
};
use crossterm::execute;
use std::io::stdout;
use std::time::Duration;

use super::keyboard::{KeyState, KeyboardEvent, Modifiers};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Keyboard event (key press, release, etc.)
    Key(KeyboardEvent),
    /// Bracketed paste from the terminal
    Paste(String),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let mut modifiers = convert_modifiers(event.modifiers);

    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => {
            // Some terminals report Shift+Tab as BackTab without the modifier
            modifiers.shift = true;
            "Tab".to_string()
        }
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers,
        state,
    }
}

// =============================================================================
// MODIFIER CONVERSION
// =============================================================================

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: mods.contains(KeyModifiers::META) || mods.contains(KeyModifiers::SUPER),
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Convert a crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Paste(text) => InputEvent::Paste(text),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    Ok(convert_event(read()?))
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Route an event to the appropriate handler.
/// Returns true if the event was consumed or produced an edit.
pub fn route_event(event: InputEvent) -> bool {
    match event {
        InputEvent::Key(key) => super::global_keys::route_keyboard_event(key),
        InputEvent::Paste(text) => super::edit::apply_paste(&text),
        // Rendering reads the terminal size on every frame
        InputEvent::Resize(_, _) => false,
        InputEvent::None => false,
    }
}

// =============================================================================
// BRACKETED PASTE
// =============================================================================

/// Enable bracketed paste, so a pasted code arrives as one event.
pub fn enable_bracketed_paste() -> std::io::Result<()> {
    execute!(stdout(), EnableBracketedPaste)
}

/// Disable bracketed paste.
pub fn disable_bracketed_paste() -> std::io::Result<()> {
    execute!(stdout(), DisableBracketedPaste)
}

// =============================================================================
// TESTS
// =============================================================================
