//! Color and texture registry.
//!
//! Maps symbolic paint codes to concrete CSS values. Colors can be
//! overridden per session through [`CustomColors`]; textures are fixed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// One of the eight paintable colors, in palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorCode {
    Red,
    Orange,
    Green,
    Blue,
    Yellow,
    Purple,
    Teal,
    Pink,
}

/// A repeating pattern fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TextureCode {
    DiagonalStripes,
    HorizontalStripes,
    Dots,
    Crosshatch,
}

/// The paint a user applies to a day: either a solid color or a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorTextureCode {
    Color(ColorCode),
    Texture(TextureCode),
}

/// Per-session color overrides, keyed by code. Values are CSS colors.
pub type CustomColors = BTreeMap<ColorCode, String>;

/// A fixed texture fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexturePattern {
    /// CSS `background-image` value.
    pub image: &'static str,
    /// Tile edge length in pixels.
    pub tile_px: u8,
    /// Color shown underneath the pattern.
    pub backing: &'static str,
}

pub const PALETTE: [ColorCode; 8] = [
    ColorCode::Red,
    ColorCode::Orange,
    ColorCode::Green,
    ColorCode::Blue,
    ColorCode::Yellow,
    ColorCode::Purple,
    ColorCode::Teal,
    ColorCode::Pink,
];

pub const TEXTURES: [TextureCode; 4] = [
    TextureCode::DiagonalStripes,
    TextureCode::HorizontalStripes,
    TextureCode::Dots,
    TextureCode::Crosshatch,
];

/// Every selectable paint, colors first in palette order, then textures.
pub const ALL_COLOR_TEXTURE_CODES: [ColorTextureCode; 12] = [
    ColorTextureCode::Color(ColorCode::Red),
    ColorTextureCode::Color(ColorCode::Orange),
    ColorTextureCode::Color(ColorCode::Green),
    ColorTextureCode::Color(ColorCode::Blue),
    ColorTextureCode::Color(ColorCode::Yellow),
    ColorTextureCode::Color(ColorCode::Purple),
    ColorTextureCode::Color(ColorCode::Teal),
    ColorTextureCode::Color(ColorCode::Pink),
    ColorTextureCode::Texture(TextureCode::DiagonalStripes),
    ColorTextureCode::Texture(TextureCode::HorizontalStripes),
    ColorTextureCode::Texture(TextureCode::Dots),
    ColorTextureCode::Texture(TextureCode::Crosshatch),
];

/// Neutral colors used by cells that carry no paint.
pub mod ui {
    pub const BACKGROUND: &str = "oklch(1 0 0)";
    pub const BACKGROUND_HOVER: &str = "oklch(0.955 0 0)";
    pub const TEXTURE_BACKING: &str = "oklch(0.985 0 0)";
    pub const WEEKEND: &str = "oklch(0.93 0.005 264)";
}

const PATTERN_TILE_PX: u8 = 9;

impl ColorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCode::Red => "red",
            ColorCode::Orange => "orange",
            ColorCode::Green => "green",
            ColorCode::Blue => "blue",
            ColorCode::Yellow => "yellow",
            ColorCode::Purple => "purple",
            ColorCode::Teal => "teal",
            ColorCode::Pink => "pink",
        }
    }

    /// Builtin CSS value, ignoring any override.
    pub fn builtin(&self) -> &'static str {
        match self {
            ColorCode::Red => "oklch(0.704 0.191 22.216)",
            ColorCode::Orange => "oklch(0.75 0.183 55.934)",
            ColorCode::Green => "oklch(0.792 0.209 151.711)",
            ColorCode::Blue => "oklch(0.707 0.165 254.624)",
            ColorCode::Yellow => "oklch(0.852 0.199 91.936)",
            ColorCode::Purple => "oklch(0.714 0.203 305.504)",
            ColorCode::Teal => "oklch(0.777 0.152 181.912)",
            ColorCode::Pink => "oklch(0.718 0.202 349.761)",
        }
    }

    /// CSS value for this code, preferring a session override.
    pub fn resolve(&self, custom: &CustomColors) -> String {
        custom
            .get(self)
            .cloned()
            .unwrap_or_else(|| self.builtin().to_string())
    }
}

impl TextureCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextureCode::DiagonalStripes => "diagonal-stripes",
            TextureCode::HorizontalStripes => "horizontal-stripes",
            TextureCode::Dots => "dots",
            TextureCode::Crosshatch => "crosshatch",
        }
    }

    pub fn pattern(&self) -> TexturePattern {
        let image = match self {
            TextureCode::DiagonalStripes => {
                "repeating-linear-gradient(45deg, oklch(0.45 0 0) 0 1px, transparent 1px 50%)"
            }
            TextureCode::HorizontalStripes => {
                "repeating-linear-gradient(0deg, oklch(0.45 0 0) 0 1px, transparent 1px 50%)"
            }
            TextureCode::Dots => "radial-gradient(oklch(0.45 0 0) 1px, transparent 1.5px)",
            TextureCode::Crosshatch => {
                "repeating-linear-gradient(45deg, oklch(0.45 0 0) 0 1px, transparent 1px 50%), \
                 repeating-linear-gradient(-45deg, oklch(0.45 0 0) 0 1px, transparent 1px 50%)"
            }
        };

        TexturePattern {
            image,
            tile_px: PATTERN_TILE_PX,
            backing: ui::TEXTURE_BACKING,
        }
    }
}

impl ColorTextureCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTextureCode::Color(c) => c.as_str(),
            ColorTextureCode::Texture(t) => t.as_str(),
        }
    }

    pub fn as_color(&self) -> Option<ColorCode> {
        match self {
            ColorTextureCode::Color(c) => Some(*c),
            ColorTextureCode::Texture(_) => None,
        }
    }
}

impl Default for ColorTextureCode {
    fn default() -> Self {
        ColorTextureCode::Color(ColorCode::Red)
    }
}

impl From<ColorCode> for ColorTextureCode {
    fn from(code: ColorCode) -> Self {
        ColorTextureCode::Color(code)
    }
}

impl From<TextureCode> for ColorTextureCode {
    fn from(code: TextureCode) -> Self {
        ColorTextureCode::Texture(code)
    }
}

impl FromStr for ColorCode {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PALETTE
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PlannerError::UnknownCode(s.to_string()))
    }
}

impl FromStr for TextureCode {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TEXTURES
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PlannerError::UnknownCode(s.to_string()))
    }
}

impl FromStr for ColorTextureCode {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_COLOR_TEXTURE_CODES
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PlannerError::UnknownCode(s.to_string()))
    }
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {$(
        impl TryFrom<String> for $ty {
            type Error = PlannerError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(code: $ty) -> Self {
                code.as_str().to_string()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

string_conversions!(ColorCode, TextureCode, ColorTextureCode);

/// First palette color not in `used`, or the first palette color when all
/// eight are taken.
pub fn next_available_color(used: impl IntoIterator<Item = ColorCode>) -> ColorCode {
    let used: Vec<ColorCode> = used.into_iter().collect();
    PALETTE
        .into_iter()
        .find(|c| !used.contains(c))
        .unwrap_or(PALETTE[0])
}

/// Slightly lighter and more saturated variant of an `oklch(L C H)` color.
///
/// Anything that is not an oklch value (hex overrides, named colors) is
/// returned as-is.
pub fn hover_variant(css: &str) -> String {
    let Some(inner) = css
        .trim()
        .strip_prefix("oklch(")
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return css.to_string();
    };

    let parts: Vec<&str> = inner.split_whitespace().collect();
    if parts.len() < 3 {
        return css.to_string();
    }

    let (Ok(l), Ok(c)) = (parts[0].parse::<f64>(), parts[1].parse::<f64>()) else {
        return css.to_string();
    };

    let hover_l = (l * 1.01).min(0.99);
    let hover_c = c * 1.02;
    format!("oklch({:.3} {:.3} {})", hover_l, hover_c, parts[2])
}
