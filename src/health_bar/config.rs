use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::target::Health;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid colour {0:?}, expected 0xRRGGBB, #RRGGBB or #RGB")]
    InvalidColor(String),

    #[error("could not parse health bar config")]
    Json(#[from] serde_json::Error),

    #[error("could not read health bar config from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 24-bit RGB colour as written in config files (`0x8fff00`, `#8fff00`, `#fff` or a number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "HexColorRepr", into = "String")]
pub struct HexColor(pub u32);

impl HexColor {
    pub const WHITE: HexColor = HexColor(0xffffff);

    pub fn to_color(self) -> Color {
        let [_, r, g, b] = self.0.to_be_bytes();
        Color::srgb_u8(r, g, b)
    }
}

impl FromStr for HexColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .or_else(|| trimmed.strip_prefix('#'))
            .unwrap_or(trimmed);

        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(ConfigError::InvalidColor(s.to_string())),
        };

        u32::from_str_radix(&expanded, 16)
            .map(HexColor)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HexColorRepr {
    Number(u32),
    Text(String),
}

impl TryFrom<HexColorRepr> for HexColor {
    type Error = ConfigError;

    fn try_from(repr: HexColorRepr) -> Result<Self, Self::Error> {
        match repr {
            HexColorRepr::Number(value) if value <= 0xffffff => Ok(HexColor(value)),
            HexColorRepr::Number(value) => Err(ConfigError::InvalidColor(value.to_string())),
            HexColorRepr::Text(text) => text.parse(),
        }
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        format!("0x{:06x}", color.0)
    }
}

/// Font of the optional name label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelFont {
    pub size: f32,
    pub fill: HexColor,
}

impl Default for LabelFont {
    fn default() -> Self {
        Self {
            size: 20.0,
            fill: HexColor::WHITE,
        }
    }
}

/// Options for a single health bar.
///
/// Deserialization merges over the defaults: missing keys keep their default
/// and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthBarConfig {
    /// Bar width in pixels; 100 health fills exactly this many pixels.
    pub width: f32,
    pub height: f32,
    pub font: LabelFont,
    pub foreground: HexColor,
    pub background: HexColor,
    /// Fill colour below 40 health.
    pub danger: HexColor,
    /// Label text. No label is created when unset.
    pub name_bar: Option<String>,
    /// Clamp health to 0..=100 before computing the fill. Off by default.
    pub clamp_health: bool,
    /// Append "current / max" to the label.
    pub show_health: bool,
}

impl Default for HealthBarConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 7.0,
            font: LabelFont::default(),
            foreground: HexColor(0x8fff00),
            background: HexColor(0x000000),
            danger: HexColor(0xbf9000),
            name_bar: None,
            clamp_health: false,
            show_health: false,
        }
    }
}

impl HealthBarConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_bar = Some(name.into());
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp_health = clamp;
        self
    }

    pub fn with_health_text(mut self, show: bool) -> Self {
        self.show_health = show;
        self
    }

    /// Health value used for drawing, after optional clamping.
    pub fn effective_health(&self, health: f32) -> f32 {
        if self.clamp_health {
            health.clamp(0.0, 100.0)
        } else {
            health
        }
    }

    /// Name shown above the bar. An empty name counts as unset.
    pub fn label_name(&self) -> Option<&str> {
        self.name_bar.as_deref().filter(|name| !name.is_empty())
    }

    /// Label text for the given health, or `None` when no name is configured.
    pub fn label_text(&self, health: &Health) -> Option<String> {
        self.label_name().map(|name| {
            if self.show_health {
                format!("{} {}", name, health.display())
            } else {
                name.to_string()
            }
        })
    }
}
