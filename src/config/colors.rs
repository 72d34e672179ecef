//! Color configuration for the TUI.
//!
//! Colors are parsed by ratatui itself, so named colors ("Cyan",
//! "DarkGray"), indexed colors ("8") and hex colors ("#RRGGBB") all work.

use std::str::FromStr;

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub done_topic: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub pending_topic: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub category_tag: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub stamp: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub picked_title: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            selection_bg: Color::Cyan,
            selection_fg: Color::Black,
            done_topic: Color::DarkGray,
            pending_topic: Color::White,
            category_tag: Color::Blue,
            stamp: Color::Yellow,
            picked_title: Color::Green,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Color::from_str(s.trim()).map_err(|_| de::Error::custom(format!("unknown color: {}", s)))
}
