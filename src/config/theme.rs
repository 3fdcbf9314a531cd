//! Theme palette configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// An sRGB colour as carried by the theme palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color_string(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_color_string(&s).map_err(de::Error::custom)
    }
}

/// Parse a colour string.
///
/// Supports:
/// - Hex colours: "#RRGGBB" or "#RGB"
/// - CSS basic colour names: "black", "white", "red", "green", "blue",
///   "yellow", "cyan", "magenta", "gray"/"grey", "orange", "purple",
///   "teal", "navy"
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::rgb(0, 0, 0)),
        "white" => Ok(Color::rgb(255, 255, 255)),
        "red" => Ok(Color::rgb(255, 0, 0)),
        "green" => Ok(Color::rgb(0, 128, 0)),
        "blue" => Ok(Color::rgb(0, 0, 255)),
        "yellow" => Ok(Color::rgb(255, 255, 0)),
        "cyan" => Ok(Color::rgb(0, 255, 255)),
        "magenta" => Ok(Color::rgb(255, 0, 255)),
        "gray" | "grey" => Ok(Color::rgb(128, 128, 128)),
        "orange" => Ok(Color::rgb(255, 165, 0)),
        "purple" => Ok(Color::rgb(128, 0, 128)),
        "teal" => Ok(Color::rgb(0, 128, 128)),
        "navy" => Ok(Color::rgb(0, 0, 128)),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(|| format!("Invalid hex color: {}", s))
    };

    match hex.len() {
        6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        // #RGB expands each nibble: 0xF -> 0xFF
        3 => Ok(Color::rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}

/// The seven semantic colours of a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub error: Color,
    pub info: Color,
    pub success: Color,
    pub warning: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0x00, 0x68, 0x74),
            secondary: Color::rgb(0x5c, 0x6b, 0xc0),
            accent: Color::rgb(0x82, 0xB1, 0xFF),
            error: Color::rgb(0xFF, 0x52, 0x52),
            info: Color::rgb(0x21, 0x96, 0xF3),
            success: Color::rgb(0x4C, 0xAF, 0x50),
            warning: Color::rgb(0xFF, 0xC1, 0x07),
        }
    }
}

/// Design-system generation the component library is styled after.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blueprint {
    Md1,
    Md2,
    #[default]
    Md3,
}

impl fmt::Display for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Blueprint::Md1 => "md1",
            Blueprint::Md2 => "md2",
            Blueprint::Md3 => "md3",
        };
        f.write_str(name)
    }
}

pub const DEFAULT_THEME: &str = "light";

/// `[theme]` section: a default theme name plus named palettes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub default_theme: String,
    pub blueprint: Blueprint,
    pub themes: BTreeMap<String, ThemeColors>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let mut themes = BTreeMap::new();
        themes.insert(DEFAULT_THEME.to_string(), ThemeColors::default());
        Self {
            default_theme: DEFAULT_THEME.to_string(),
            blueprint: Blueprint::default(),
            themes,
        }
    }
}

impl ThemeConfig {
    /// Palette of the configured default theme, if it is defined.
    pub fn default_colors(&self) -> Option<&ThemeColors> {
        self.themes.get(&self.default_theme)
    }
}
