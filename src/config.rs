//! TOML configuration
//!
//! Loaded from `config.toml` next to the binary (or a `--config` path).
//! A missing file yields the defaults; a malformed file logs a warning
//! and falls back to defaults rather than refusing to start.
//!
//! ```toml
//! name = "voicedit"
//!
//! [context]
//! editors = ["gvim", "nvim"]
//! terminals = ["alacritty", "konsole"]
//!
//! [input]
//! method = "direct"        # or "clipboard"
//! chord_delay_ms = 0
//!
//! # custom commands shadow the built-in table; keys are sent before text
//! [[mapping]]
//! phrase = "go to project"
//! keys = "colon, c, d, space"
//! text = "~/src/project"
//! ```

use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub mapping: Vec<CustomMapping>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
            context: ContextConfig::default(),
            input: InputConfig::default(),
            mapping: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContextConfig {
    /// Editor executables the grammar is active for.
    #[serde(default = "default_editors")]
    pub editors: Vec<String>,
    /// Terminal executables the grammar is active for.
    #[serde(default = "default_terminals")]
    pub terminals: Vec<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            editors: default_editors(),
            terminals: default_terminals(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    /// "direct" or "clipboard".
    #[serde(default = "default_method")]
    pub method: String,
    /// Settle time after each chord, for slow applications.
    #[serde(default)]
    pub chord_delay_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            chord_delay_ms: 0,
        }
    }
}

/// A user-defined phrase -> action mapping. At least one of `keys` and
/// `text` must be set; when both are, keys are sent first.
#[derive(Debug, Deserialize, Clone)]
pub struct CustomMapping {
    pub phrase: String,
    #[serde(default)]
    pub keys: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

fn default_name() -> String {
    "voicedit".into()
}

fn default_editors() -> Vec<String> {
    vec!["gvim".into(), "nvim".into()]
}

fn default_terminals() -> Vec<String> {
    vec!["alacritty".into(), "konsole".into()]
}

fn default_method() -> String {
    "direct".into()
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(Path::new("config.toml"))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => config,
                Err(e) => {
                    warn!("ignoring malformed {}: {e}", path.display());
                    Config::default()
                }
            },
            Err(e) => {
                warn!("cannot read {}: {e}", path.display());
                Config::default()
            }
        }
    }
}
