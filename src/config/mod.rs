//! Configuration management for the easel TUI.
//!
//! Configuration is read from `~/.config/easel/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is
//! created; missing fields fall back to defaults.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

impl Config {
    /// Load configuration from the default path, creating a commented
    /// default file on first run. An existing but invalid file is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })
    }

    /// `~/.config/easel/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("easel").join("config.toml"))
    }

    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
        Ok(())
    }

    fn default_config_content() -> String {
        r##"# easel TUI configuration
#
# Colors can be named ("Cyan", "DarkGray", "LightRed", ...), indexed ("8"),
# or hex ("#RRGGBB").
#
# Keybindings are single characters ("a", "/"), special keys (Enter, Tab,
# Space, Esc, Up, Down, PageUp, PageDown, ...), optionally with modifiers
# ("Ctrl+c", "Shift+Tab").

[colors]
border = "DarkGray"
selection_bg = "Cyan"
selection_fg = "Black"
done_topic = "DarkGray"
pending_topic = "White"
category_tag = "Blue"
stamp = "Yellow"
picked_title = "Green"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]
toggle_done = ["Space", "Enter"]
pick = ["g"]
search = ["/"]
add_topic = ["a"]
cycle_window = ["w"]
cycle_sort = ["s"]
cycle_category = ["c"]
clear_filters = ["x"]
"##
        .to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(&Config::default_config_content())
            .expect("default config should be valid TOML");
        assert_eq!(config.colors.selection_bg, ratatui::style::Color::Cyan);
        assert_eq!(config.keybindings.pick, vec!["g"]);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r##"
[keybindings]
pick = ["r"]
"##,
        )
        .unwrap();
        assert_eq!(config.keybindings.pick, vec!["r"]);
        // Everything else stays default
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
        assert_eq!(config.colors.border, ratatui::style::Color::DarkGray);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.keybindings.search, vec!["/"]);
    }
}
