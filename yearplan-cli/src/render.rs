//! TUI rendering traits for planner types.
//!
//! Terminal approximations of the planner's CSS colors using owo_colors.
//! Custom overrides written as `#rrggbb` are honored; anything else falls
//! back to the builtin color for the code.

use chrono::Datelike;
use owo_colors::OwoColorize;
use yearplan_core::palette::{PALETTE, TextureCode};
use yearplan_core::{ColorCode, ColorTextureCode, CustomColors, DayFill, DayProjection, Layer, Paint, Strip};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

type Rgb = (u8, u8, u8);

fn builtin_rgb(code: ColorCode) -> Rgb {
    match code {
        ColorCode::Red => (239, 96, 96),
        ColorCode::Orange => (245, 146, 62),
        ColorCode::Green => (74, 211, 119),
        ColorCode::Blue => (82, 157, 250),
        ColorCode::Yellow => (240, 200, 40),
        ColorCode::Purple => (185, 122, 245),
        ColorCode::Teal => (40, 200, 180),
        ColorCode::Pink => (240, 110, 170),
    }
}

fn parse_hex(css: &str) -> Option<Rgb> {
    let hex = css.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Terminal color for a resolved CSS value: a hex override or a builtin.
fn css_rgb(css: &str) -> Option<Rgb> {
    parse_hex(css).or_else(|| {
        PALETTE
            .into_iter()
            .find(|code| code.builtin() == css)
            .map(builtin_rgb)
    })
}

/// Terminal color for a code, honoring hex overrides.
pub fn color_rgb(code: ColorCode, custom: &CustomColors) -> Rgb {
    custom
        .get(&code)
        .and_then(|css| parse_hex(css))
        .unwrap_or_else(|| builtin_rgb(code))
}

fn texture_glyph(texture: TextureCode) -> char {
    match texture {
        TextureCode::DiagonalStripes => '/',
        TextureCode::HorizontalStripes => '=',
        TextureCode::Dots => ':',
        TextureCode::Crosshatch => '#',
    }
}

fn swatch(code: ColorTextureCode, custom: &CustomColors) -> String {
    match code {
        ColorTextureCode::Color(color) => {
            let (r, g, b) = color_rgb(color, custom);
            "██".truecolor(r, g, b).to_string()
        }
        ColorTextureCode::Texture(texture) => texture_glyph(texture).to_string().repeat(2),
    }
}

/// A code name next to its swatch.
pub fn render_code(code: ColorTextureCode, custom: &CustomColors) -> String {
    format!("{} {}", swatch(code, custom), code)
}

/// One line of the layer list.
pub fn render_layer(index: usize, layer: &Layer, active: bool, cells: usize, custom: &CustomColors) -> String {
    let marker = if active { "▶".bold().to_string() } else { " ".to_string() };
    let (r, g, b) = color_rgb(layer.color, custom);
    let name = if layer.visible {
        layer.name.truecolor(r, g, b).to_string()
    } else {
        format!("{} {}", layer.name.dimmed(), "(hidden)".dimmed())
    };

    format!(
        "{} {:>2}. {} {}  {}",
        marker,
        index + 1,
        "●".truecolor(r, g, b),
        name,
        format!("{} {}", cells, if cells == 1 { "day" } else { "days" }).dimmed()
    )
}

fn strip_rgb(strip: &Strip) -> Option<Rgb> {
    match (&strip.paint, strip.code) {
        (Paint::Solid(css), ColorTextureCode::Color(code)) => Some(css_rgb(css).unwrap_or_else(|| builtin_rgb(code))),
        _ => None,
    }
}

fn paint_cell(label: &str, strip: Option<&Strip>) -> String {
    match strip {
        Some(strip) => match (strip_rgb(strip), strip.code) {
            (Some((r, g, b)), _) => label.black().on_truecolor(r, g, b).to_string(),
            (None, ColorTextureCode::Texture(texture)) => {
                let glyph = texture_glyph(texture).to_string();
                label.replace(' ', &glyph).underline().to_string()
            }
            (None, ColorTextureCode::Color(_)) => label.to_string(),
        },
        None => label.to_string(),
    }
}

impl Render for DayProjection {
    /// Three columns: two for the day number and one marker.
    fn render(&self) -> String {
        let label = format!("{:>2}", self.day.date().day());

        let (body, marker) = match &self.fill {
            DayFill::Blank { .. } if self.is_weekend => (label.dimmed().to_string(), " ".to_string()),
            DayFill::Blank { .. } => (label, " ".to_string()),
            DayFill::Strips(strips) => {
                let marker = match strips.get(1).and_then(strip_rgb) {
                    Some((r, g, b)) => "▌".truecolor(r, g, b).to_string(),
                    None if strips.len() > 1 => "+".to_string(),
                    None => " ".to_string(),
                };
                (paint_cell(&label, strips.first()), marker)
            }
            DayFill::Annotated { background, .. } => {
                let body = match background {
                    Paint::Solid(css) => match css_rgb(css) {
                        Some((r, g, b)) => label.black().on_truecolor(r, g, b).to_string(),
                        None => label.bold().to_string(),
                    },
                    Paint::Pattern(_) => label.underline().to_string(),
                };
                (body, "*".yellow().to_string())
            }
        };

        let body = if self.is_today { body.bold().underline().to_string() } else { body };
        format!("{}{}", body, marker)
    }
}
