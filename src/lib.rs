//! Voice-command grammar for editor and terminal control
//!
//! Maps spoken phrases to keystroke and text-insertion actions, so a whole
//! editing phrase like "delete line slap out and repeat that 3 times"
//! becomes an ordered sequence of key events. Speech recognition itself is
//! external: this crate takes transcribed utterances and handles phrase
//! matching, slot filling (counts, spelled characters, dictation), action
//! resolution, and repeatable execution with modifier cleanup.

pub mod action;
pub mod config;
pub mod context;
pub mod executor;
pub mod extras;
pub mod format;
pub mod grammar;
pub mod input;
pub mod keys;
pub mod mapping;

pub use action::{Action, Keyboard};
pub use executor::execute_sequence;
pub use grammar::{Grammar, GrammarHandle, Recognition};
