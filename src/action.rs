//! The action model
//!
//! An [`Action`] is an opaque executable unit: press these key chords, or
//! type this text. Actions compose sequentially with [`Action::then`], and
//! execute against a [`Keyboard`] backend so that recognition and injection
//! stay separable (the real backend lives in [`crate::input`]; tests use a
//! recording one).

use thiserror::Error;

use crate::keys::KeyChord;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("keyboard backend: {0}")]
    Backend(String),
    #[error("clipboard: {0}")]
    Clipboard(String),
}

/// Execution seam between resolved actions and OS-level injection.
pub trait Keyboard {
    fn send_chord(&mut self, chord: &KeyChord) -> Result<(), InputError>;

    fn type_text(&mut self, text: &str) -> Result<(), InputError>;

    /// Unconditionally release shift and control. Idempotent: releasing a
    /// key that is not held is harmless.
    fn release_modifiers(&mut self) -> Result<(), InputError>;
}

/// An executable unit: keystrokes, literal text, or a composite of both.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Keys(Vec<KeyChord>),
    Text(String),
    Seq(Vec<Action>),
}

impl Action {
    /// Sequential composition: the result executes `self` then `other`.
    pub fn then(self, other: Action) -> Action {
        match self {
            Action::Seq(mut parts) => {
                parts.push(other);
                Action::Seq(parts)
            }
            first => Action::Seq(vec![first, other]),
        }
    }

    /// Execute against a keyboard backend. Errors propagate; no retry.
    pub fn execute(&self, kb: &mut dyn Keyboard) -> Result<(), InputError> {
        match self {
            Action::Keys(chords) => {
                for chord in chords {
                    kb.send_chord(chord)?;
                }
                Ok(())
            }
            Action::Text(text) => kb.type_text(text),
            Action::Seq(parts) => {
                for part in parts {
                    part.execute(kb)?;
                }
                Ok(())
            }
        }
    }
}
