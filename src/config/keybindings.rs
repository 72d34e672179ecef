//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Configurable bindings for every TUI action.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub toggle_done: Vec<String>,
    pub pick: Vec<String>,
    pub search: Vec<String>,
    pub add_topic: Vec<String>,
    pub cycle_window: Vec<String>,
    pub cycle_sort: Vec<String>,
    pub cycle_category: Vec<String>,
    pub clear_filters: Vec<String>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: vec!["q".into(), "Ctrl+c".into()],
            move_up: vec!["k".into(), "Up".into()],
            move_down: vec!["j".into(), "Down".into()],
            next_page: vec!["n".into(), "PageDown".into()],
            prev_page: vec!["p".into(), "PageUp".into()],
            toggle_done: vec!["Space".into(), "Enter".into()],
            pick: vec!["g".into()],
            search: vec!["/".into()],
            add_topic: vec!["a".into()],
            cycle_window: vec!["w".into()],
            cycle_sort: vec!["s".into()],
            cycle_category: vec!["c".into()],
            clear_filters: vec!["x".into()],
        }
    }
}

impl KeybindingConfig {
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        if self.matches(key, &self.quit) {
            Action::Quit
        } else if self.matches(key, &self.move_up) {
            Action::MoveUp
        } else if self.matches(key, &self.move_down) {
            Action::MoveDown
        } else if self.matches(key, &self.next_page) {
            Action::NextPage
        } else if self.matches(key, &self.prev_page) {
            Action::PrevPage
        } else if self.matches(key, &self.toggle_done) {
            Action::ToggleDone
        } else if self.matches(key, &self.pick) {
            Action::Pick
        } else if self.matches(key, &self.search) {
            Action::Search
        } else if self.matches(key, &self.add_topic) {
            Action::AddTopic
        } else if self.matches(key, &self.cycle_window) {
            Action::CycleWindow
        } else if self.matches(key, &self.cycle_sort) {
            Action::CycleSort
        } else if self.matches(key, &self.cycle_category) {
            Action::CycleCategory
        } else if self.matches(key, &self.clear_filters) {
            Action::ClearFilters
        } else {
            Action::None
        }
    }

    fn matches(&self, key: &KeyEvent, bindings: &[String]) -> bool {
        bindings.iter().any(|binding| {
            parse_key_string(binding)
                .map(|parsed| parsed.matches(key))
                .unwrap_or(false)
        })
    }
}

/// A parsed key specification: code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        // Shift is implied by uppercase characters, so tolerate it
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string like "j", "Space", "Ctrl+c" or "Shift+Tab".
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('+').collect();

    let mut modifiers = KeyModifiers::NONE;
    let key_part = if parts.len() > 1 {
        for part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" => modifiers |= KeyModifiers::ALT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }
        parts[parts.len() - 1]
    } else {
        s
    };

    let code = parse_key_code(key_part)?;
    Ok(KeyBinding { code, modifiers })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    if s.chars().count() == 1 {
        return Ok(KeyCode::Char(s.chars().next().ok_or("empty key")?));
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        _ => Err(format!("Unknown key: {}", s)),
    }
}
