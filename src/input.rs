//! OS-level keystroke injection using enigo
//!
//! Implements the [`Keyboard`] seam over enigo. Text can go in two ways:
//! - **Direct**: enigo's native text entry (default)
//! - **Clipboard**: copy to clipboard, paste, restore the old contents
//!   (more reliable for text with characters some layouts cannot type)

use std::thread;
use std::time::Duration;

use arboard::Clipboard;
use enigo::Keyboard as _;
use enigo::{Direction, Enigo, Key, Settings};
use log::warn;

use crate::action::{InputError, Keyboard};
use crate::keys::{KeyChord, KeyPress, Modifier};

/// Input method for typing text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMethod {
    #[default]
    Direct,
    Clipboard,
}

impl InputMethod {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "clipboard" => InputMethod::Clipboard,
            _ => InputMethod::Direct,
        }
    }
}

/// Keyboard backend that injects real OS input events.
pub struct EnigoKeyboard {
    enigo: Enigo,
    clipboard: Clipboard,
    method: InputMethod,
    chord_delay: Duration,
}

impl EnigoKeyboard {
    pub fn new(method: InputMethod, chord_delay_ms: u64) -> Result<Self, InputError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InputError::Backend(format!("failed to initialize enigo: {e}")))?;
        let clipboard = Clipboard::new()
            .map_err(|e| InputError::Clipboard(format!("failed to initialize: {e}")))?;
        Ok(Self {
            enigo,
            clipboard,
            method,
            chord_delay: Duration::from_millis(chord_delay_ms),
        })
    }

    fn key(&mut self, key: Key, direction: Direction) -> Result<(), InputError> {
        self.enigo
            .key(key, direction)
            .map_err(|e| InputError::Backend(e.to_string()))
    }

    fn type_direct(&mut self, text: &str) -> Result<(), InputError> {
        self.enigo
            .text(text)
            .map_err(|e| InputError::Backend(e.to_string()))
    }

    fn type_via_clipboard(&mut self, text: &str) -> Result<(), InputError> {
        // best effort: remember what was on the clipboard
        let old_content = self.clipboard.get_text().ok();

        self.clipboard
            .set_text(text)
            .map_err(|e| InputError::Clipboard(e.to_string()))?;
        thread::sleep(Duration::from_millis(50));

        let pasted = self.send_chord(&KeyChord {
            modifiers: vec![paste_modifier()],
            key: KeyPress::Char('v'),
        });
        thread::sleep(Duration::from_millis(100));

        if let Some(old) = old_content {
            let _ = self.clipboard.set_text(old);
        }
        pasted
    }
}

impl Keyboard for EnigoKeyboard {
    fn send_chord(&mut self, chord: &KeyChord) -> Result<(), InputError> {
        for modifier in &chord.modifiers {
            self.key(enigo_modifier(*modifier), Direction::Press)?;
        }
        if !chord.modifiers.is_empty() {
            // let the modifier register before the key lands
            thread::sleep(Duration::from_millis(10));
        }

        self.key(enigo_key(chord.key), Direction::Click)?;

        if !chord.modifiers.is_empty() {
            thread::sleep(Duration::from_millis(50));
        }
        for modifier in chord.modifiers.iter().rev() {
            self.key(enigo_modifier(*modifier), Direction::Release)?;
        }

        if !self.chord_delay.is_zero() {
            thread::sleep(self.chord_delay);
        }
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> Result<(), InputError> {
        if text.is_empty() {
            return Ok(());
        }
        match self.method {
            InputMethod::Direct => self.type_direct(text),
            InputMethod::Clipboard => match self.type_via_clipboard(text) {
                Ok(()) => Ok(()),
                Err(e) => {
                    warn!("clipboard method failed ({e}), typing directly");
                    self.type_direct(text)
                }
            },
        }
    }

    fn release_modifiers(&mut self) -> Result<(), InputError> {
        self.key(Key::Shift, Direction::Release)?;
        self.key(Key::Control, Direction::Release)?;
        Ok(())
    }
}

fn enigo_modifier(modifier: Modifier) -> Key {
    match modifier {
        Modifier::Shift => Key::Shift,
        Modifier::Control => Key::Control,
        Modifier::Alt => Key::Alt,
        Modifier::Meta => Key::Meta,
    }
}

fn enigo_key(press: KeyPress) -> Key {
    match press {
        KeyPress::Char(c) => Key::Unicode(c),
        KeyPress::Enter => Key::Return,
        KeyPress::Escape => Key::Escape,
        KeyPress::Tab => Key::Tab,
        KeyPress::Space => Key::Space,
        KeyPress::Backspace => Key::Backspace,
        KeyPress::Delete => Key::Delete,
        KeyPress::Up => Key::UpArrow,
        KeyPress::Down => Key::DownArrow,
        KeyPress::Left => Key::LeftArrow,
        KeyPress::Right => Key::RightArrow,
        KeyPress::Home => Key::Home,
        KeyPress::End => Key::End,
        KeyPress::PageUp => Key::PageUp,
        KeyPress::PageDown => Key::PageDown,
    }
}

/// Cmd on macOS, Ctrl elsewhere.
fn paste_modifier() -> Modifier {
    #[cfg(target_os = "macos")]
    {
        Modifier::Meta
    }
    #[cfg(not(target_os = "macos"))]
    {
        Modifier::Control
    }
}
