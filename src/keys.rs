//! Key chords and keyspec parsing
//!
//! The mapping table describes keystrokes as compact spec strings like
//! `"c-w, v"`: comma-separated chords, each with optional modifier prefixes
//! (`c-` control, `s-` shift, `a-` alt, `m-` meta) and either a literal
//! character or a named key (`enter`, `escape`, `colon`, `dollar`, ...).

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Shift,
    Control,
    Alt,
    Meta,
}

/// A single key, either a printable character or a non-printing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    Enter,
    Escape,
    Tab,
    Space,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// One keystroke: zero or more modifiers held around a single key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub modifiers: Vec<Modifier>,
    pub key: KeyPress,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyspecError {
    #[error("unknown key token '{0}'")]
    UnknownToken(String),
    #[error("empty key spec")]
    Empty,
}

/// Parse a comma-separated chord spec into key chords.
///
/// Unknown tokens are an error so that typos in the static mapping table
/// fail at grammar build rather than silently dropping keystrokes.
pub fn parse_keyspec(spec: &str) -> Result<Vec<KeyChord>, KeyspecError> {
    let mut chords = Vec::new();
    for raw in spec.split(',') {
        let token = raw.trim();
        if token.is_empty() {
            return Err(KeyspecError::Empty);
        }

        let mut modifiers = Vec::new();
        let mut rest = token;
        while let Some((head, tail)) = rest.split_once('-') {
            let modifier = match head {
                "c" => Modifier::Control,
                "s" => Modifier::Shift,
                "a" => Modifier::Alt,
                "m" => Modifier::Meta,
                _ => break,
            };
            if tail.is_empty() {
                break;
            }
            modifiers.push(modifier);
            rest = tail;
        }

        let key =
            resolve_key(rest).ok_or_else(|| KeyspecError::UnknownToken(rest.to_string()))?;
        chords.push(KeyChord { modifiers, key });
    }

    if chords.is_empty() {
        return Err(KeyspecError::Empty);
    }
    Ok(chords)
}

fn resolve_key(token: &str) -> Option<KeyPress> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyPress::Char(c));
    }

    let key = match token {
        "enter" | "return" => KeyPress::Enter,
        "escape" | "esc" => KeyPress::Escape,
        "tab" => KeyPress::Tab,
        "space" => KeyPress::Space,
        "backspace" => KeyPress::Backspace,
        "delete" | "del" => KeyPress::Delete,
        "up" => KeyPress::Up,
        "down" => KeyPress::Down,
        "left" => KeyPress::Left,
        "right" => KeyPress::Right,
        "home" => KeyPress::Home,
        "end" => KeyPress::End,
        "pageup" => KeyPress::PageUp,
        "pagedown" => KeyPress::PageDown,
        other => KeyPress::Char(named_char(other)?),
    };
    Some(key)
}

/// Spelled-out punctuation names used by the mapping table.
fn named_char(name: &str) -> Option<char> {
    let c = match name {
        "colon" => ':',
        "semicolon" => ';',
        "comma" => ',',
        "dot" | "period" => '.',
        "slash" => '/',
        "backslash" => '\\',
        "dollar" => '$',
        "caret" => '^',
        "percent" => '%',
        "underscore" => '_',
        "equals" => '=',
        "plus" => '+',
        "minus" | "hyphen" => '-',
        "bang" => '!',
        "hash" => '#',
        "ampersand" => '&',
        "bar" => '|',
        "at" => '@',
        "asterisk" | "star" => '*',
        "tilde" => '~',
        "dquote" => '"',
        "squote" => '\'',
        "backtick" => '`',
        "lparen" => '(',
        "rparen" => ')',
        "lbracket" => '[',
        "rbracket" => ']',
        "lbrace" => '{',
        "rbrace" => '}',
        "langle" => '<',
        "rangle" => '>',
        "question" => '?',
        _ => return None,
    };
    Some(c)
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::Shift => "s",
            Modifier::Control => "c",
            Modifier::Alt => "a",
            Modifier::Meta => "m",
        };
        f.write_str(s)
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPress::Char(c) => write!(f, "{c}"),
            KeyPress::Enter => f.write_str("enter"),
            KeyPress::Escape => f.write_str("escape"),
            KeyPress::Tab => f.write_str("tab"),
            KeyPress::Space => f.write_str("space"),
            KeyPress::Backspace => f.write_str("backspace"),
            KeyPress::Delete => f.write_str("delete"),
            KeyPress::Up => f.write_str("up"),
            KeyPress::Down => f.write_str("down"),
            KeyPress::Left => f.write_str("left"),
            KeyPress::Right => f.write_str("right"),
            KeyPress::Home => f.write_str("home"),
            KeyPress::End => f.write_str("end"),
            KeyPress::PageUp => f.write_str("pageup"),
            KeyPress::PageDown => f.write_str("pagedown"),
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{modifier}-")?;
        }
        write!(f, "{}", self.key)
    }
}
