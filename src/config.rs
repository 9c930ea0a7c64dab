//! Player-facing configuration: key bindings and load options.
//!
//! Read from an optional TOML file. Missing sections and keys fall back to the
//! defaults below; a file that exists but does not parse is an error.

use crate::position::Direction;
use crate::session::Command;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Invalid config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Config {
    pub keys: KeyBindings,
    /// Reject malformed levels at load time.
    pub strict: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub left: Vec<char>,
    pub right: Vec<char>,
    pub up: Vec<char>,
    pub down: Vec<char>,
    pub restart: Vec<char>,
    pub skip: Vec<char>,
    pub quit: Vec<char>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    keys: TomlKeys,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TomlKeys {
    #[serde(default = "default_left")]
    left: Vec<char>,
    #[serde(default = "default_right")]
    right: Vec<char>,
    #[serde(default = "default_up")]
    up: Vec<char>,
    #[serde(default = "default_down")]
    down: Vec<char>,
    #[serde(default = "default_restart")]
    restart: Vec<char>,
    #[serde(default = "default_skip")]
    skip: Vec<char>,
    #[serde(default = "default_quit")]
    quit: Vec<char>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TomlGeneral {
    #[serde(default)]
    strict: bool,
}

// ── Defaults ──

fn default_left() -> Vec<char> {
    vec!['h', 'a']
}

fn default_right() -> Vec<char> {
    vec!['l', 'd']
}

fn default_up() -> Vec<char> {
    vec!['k', 'w']
}

fn default_down() -> Vec<char> {
    vec!['j', 's']
}

fn default_restart() -> Vec<char> {
    vec!['r']
}

fn default_skip() -> Vec<char> {
    vec!['n']
}

fn default_quit() -> Vec<char> {
    vec!['q']
}

impl Default for TomlKeys {
    fn default() -> Self {
        TomlKeys {
            left: default_left(),
            right: default_right(),
            up: default_up(),
            down: default_down(),
            restart: default_restart(),
            skip: default_skip(),
            quit: default_quit(),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        TomlKeys::default().into()
    }
}

impl From<TomlKeys> for KeyBindings {
    fn from(keys: TomlKeys) -> Self {
        KeyBindings {
            left: keys.left,
            right: keys.right,
            up: keys.up,
            down: keys.down,
            restart: keys.restart,
            skip: keys.skip,
            quit: keys.quit,
        }
    }
}

// ── Loading ──

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(text)?;
        Ok(Config {
            keys: parsed.keys.into(),
            strict: parsed.general.strict,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Translate a key press into a command. Matching ignores case.
    pub fn command_for(&self, key: char) -> Option<Command> {
        let key = key.to_ascii_lowercase();
        let bound = |keys: &[char]| keys.iter().any(|k| k.to_ascii_lowercase() == key);

        let keys = &self.keys;
        if bound(&keys.left) {
            Some(Command::Move(Direction::Left))
        } else if bound(&keys.right) {
            Some(Command::Move(Direction::Right))
        } else if bound(&keys.up) {
            Some(Command::Move(Direction::Up))
        } else if bound(&keys.down) {
            Some(Command::Move(Direction::Down))
        } else if bound(&keys.restart) {
            Some(Command::Restart)
        } else if bound(&keys.skip) {
            Some(Command::Skip)
        } else if bound(&keys.quit) {
            Some(Command::Quit)
        } else {
            None
        }
    }
}
