//! Merged per-day rendering across visible layers.
//!
//! Pure functions of the layers, their cells, the custom colors and the
//! hover flag. Nothing here is cached; callers recompute on every render.

use chrono::NaiveDate;

use crate::cell::{LayerData, TextOverflow};
use crate::days::DayKey;
use crate::layer::{Layer, LayerId};
use crate::palette::{ColorTextureCode, CustomColors, TexturePattern, ui};
use crate::state::CalendarState;

/// A concrete fill.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(String),
    Pattern(TexturePattern),
}

/// One layer's contribution to a stacked day.
#[derive(Debug, Clone, PartialEq)]
pub struct Strip {
    pub layer_id: LayerId,
    pub code: ColorTextureCode,
    pub paint: Paint,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DayFill {
    /// No visible layer painted the day.
    Blank { background: String },
    /// Paint from each contributing layer, in layer order.
    Strips(Vec<Strip>),
    /// Annotation text over a single background. Suppresses strips.
    Annotated {
        background: Paint,
        text: String,
        overflow: TextOverflow,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayProjection {
    pub day: DayKey,
    pub is_today: bool,
    pub is_weekend: bool,
    pub fill: DayFill,
}

impl DayProjection {
    pub fn strips(&self) -> &[Strip] {
        match &self.fill {
            DayFill::Strips(strips) => strips,
            _ => &[],
        }
    }
}

/// Layer paint is never lightened on hover; only blank days react.
fn paint_for(code: ColorTextureCode, custom: &CustomColors) -> Paint {
    match code {
        ColorTextureCode::Color(color) => Paint::Solid(color.resolve(custom)),
        ColorTextureCode::Texture(texture) => Paint::Pattern(texture.pattern()),
    }
}

fn blank_background(day: DayKey, hovered: bool) -> String {
    let css = if day.is_weekend() {
        ui::WEEKEND
    } else if hovered {
        ui::BACKGROUND_HOVER
    } else {
        ui::BACKGROUND
    };
    css.to_string()
}

/// Project one day from `layers`, given in sequence order.
pub fn project_day<'a>(
    day: DayKey,
    layers: impl IntoIterator<Item = (&'a Layer, &'a LayerData)>,
    custom: &CustomColors,
    hovered: bool,
    today: NaiveDate,
) -> DayProjection {
    let mut strips = Vec::new();
    let mut annotation: Option<(String, TextOverflow)> = None;

    for (layer, cells) in layers {
        if !layer.visible {
            continue;
        }
        let Some(cell) = cells.get(&day) else {
            continue;
        };

        if let Some(code) = cell.color_texture {
            strips.push(Strip {
                layer_id: layer.id.clone(),
                code,
                paint: paint_for(code, custom),
            });
        }

        if annotation.is_none() {
            if let Some(text) = cell.visible_text() {
                let overflow = cell.text_overflow_direction.unwrap_or_default();
                annotation = Some((text.to_string(), overflow));
            }
        }
    }

    let fill = match annotation {
        Some((text, overflow)) => {
            let background = strips
                .into_iter()
                .next()
                .map(|s| s.paint)
                .unwrap_or_else(|| Paint::Solid(blank_background(day, hovered)));
            DayFill::Annotated {
                background,
                text,
                overflow,
            }
        }
        None if strips.is_empty() => DayFill::Blank {
            background: blank_background(day, hovered),
        },
        None => DayFill::Strips(strips),
    };

    DayProjection {
        day,
        is_today: day.date() == today,
        is_weekend: day.is_weekend(),
        fill,
    }
}

/// Project one day straight from a planner state.
pub fn project_state_day(state: &CalendarState, day: DayKey, hovered: bool, today: NaiveDate) -> DayProjection {
    project_day(day, state.layers_with_data(), state.custom_colors(), hovered, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{ColorCode, TextureCode};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    // Tuesday
    fn weekday() -> DayKey {
        DayKey::from_ymd(2025, 6, 10).unwrap()
    }

    fn layer(name: &str, color: ColorCode) -> Layer {
        Layer::new(name, color)
    }

    fn cells_with(day: DayKey, code: Option<ColorTextureCode>, text: Option<&str>) -> LayerData {
        let mut data = LayerData::new();
        if let Some(code) = code {
            data.paint(day, code);
        }
        if let Some(text) = text {
            data.set_text(day, text, None);
        }
        data
    }

    fn solid(code: ColorCode) -> Paint {
        Paint::Solid(code.builtin().to_string())
    }

    #[test]
    fn test_two_visible_layers_stack_in_order() {
        let d = weekday();
        let a = layer("A", ColorCode::Blue);
        let b = layer("B", ColorCode::Green);
        let a_cells = cells_with(d, Some(ColorCode::Blue.into()), None);
        let b_cells = cells_with(d, Some(ColorCode::Green.into()), None);

        let p = project_day(d, [(&a, &a_cells), (&b, &b_cells)], &CustomColors::new(), false, today());

        let paints: Vec<&Paint> = p.strips().iter().map(|s| &s.paint).collect();
        assert_eq!(paints, vec![&solid(ColorCode::Blue), &solid(ColorCode::Green)]);
        assert_eq!(p.strips()[0].layer_id, a.id);
    }

    #[test]
    fn test_text_suppresses_strips() {
        let d = weekday();
        let a = layer("A", ColorCode::Blue);
        let b = layer("B", ColorCode::Green);
        let a_cells = cells_with(d, Some(ColorCode::Blue.into()), Some("Meeting"));
        let b_cells = cells_with(d, Some(ColorCode::Green.into()), None);

        let p = project_day(d, [(&a, &a_cells), (&b, &b_cells)], &CustomColors::new(), false, today());

        assert_eq!(
            p.fill,
            DayFill::Annotated {
                background: solid(ColorCode::Blue),
                text: "Meeting".to_string(),
                overflow: TextOverflow::OverflowX,
            }
        );
        assert!(p.strips().is_empty());
    }

    #[test]
    fn test_text_on_later_layer_uses_first_strip_background() {
        let d = weekday();
        let a = layer("A", ColorCode::Blue);
        let b = layer("B", ColorCode::Green);
        let a_cells = cells_with(d, Some(ColorCode::Blue.into()), None);
        let b_cells = cells_with(d, Some(ColorCode::Green.into()), Some("Flight"));

        let p = project_day(d, [(&a, &a_cells), (&b, &b_cells)], &CustomColors::new(), false, today());

        let DayFill::Annotated { background, text, .. } = p.fill else {
            panic!("expected annotated cell");
        };
        assert_eq!(background, solid(ColorCode::Blue));
        assert_eq!(text, "Flight");
    }

    #[test]
    fn test_hidden_layers_do_not_contribute() {
        let d = weekday();
        let mut a = layer("A", ColorCode::Blue);
        a.visible = false;
        let a_cells = cells_with(d, Some(ColorCode::Blue.into()), Some("Hidden"));

        let p = project_day(d, [(&a, &a_cells)], &CustomColors::new(), false, today());
        assert_eq!(
            p.fill,
            DayFill::Blank {
                background: ui::BACKGROUND.to_string()
            }
        );
    }

    #[test]
    fn test_blank_weekend_and_hover() {
        let saturday = DayKey::from_ymd(2025, 6, 14).unwrap();
        let none: [(&Layer, &LayerData); 0] = [];

        let p = project_day(saturday, none, &CustomColors::new(), true, today());
        assert!(p.is_weekend);
        assert_eq!(p.fill, DayFill::Blank { background: ui::WEEKEND.to_string() });

        let p = project_day(weekday(), none, &CustomColors::new(), true, today());
        assert_eq!(p.fill, DayFill::Blank { background: ui::BACKGROUND_HOVER.to_string() });
    }

    #[test]
    fn test_text_without_paint_sits_on_default_background() {
        let sunday = DayKey::from_ymd(2025, 6, 15).unwrap();
        let a = layer("A", ColorCode::Blue);
        let a_cells = cells_with(sunday, None, Some("Brunch"));

        let p = project_day(sunday, [(&a, &a_cells)], &CustomColors::new(), false, today());
        assert!(p.is_today);
        assert_eq!(
            p.fill,
            DayFill::Annotated {
                background: Paint::Solid(ui::WEEKEND.to_string()),
                text: "Brunch".to_string(),
                overflow: TextOverflow::OverflowX,
            }
        );
    }

    #[test]
    fn test_custom_colors_textures_and_hover() {
        let d = weekday();
        let a = layer("A", ColorCode::Blue);
        let b = layer("B", ColorCode::Green);
        let a_cells = cells_with(d, Some(ColorCode::Blue.into()), None);
        let b_cells = cells_with(d, Some(TextureCode::Crosshatch.into()), None);

        let mut custom = CustomColors::new();
        custom.insert(ColorCode::Blue, "#1144ff".to_string());

        let p = project_day(d, [(&a, &a_cells), (&b, &b_cells)], &custom, false, today());
        assert_eq!(p.strips()[0].paint, Paint::Solid("#1144ff".to_string()));
        assert_eq!(p.strips()[1].paint, Paint::Pattern(TextureCode::Crosshatch.pattern()));

        custom.clear();
        let p = project_day(d, [(&a, &a_cells)], &custom, true, today());
        assert_eq!(p.strips()[0].paint, solid(ColorCode::Blue));
    }

    #[test]
    fn test_hover_leaves_layer_colors_alone() {
        let d = weekday();
        let a = layer("A", ColorCode::Red);
        let painted = cells_with(d, Some(ColorCode::Red.into()), Some("Launch"));
        let plain = cells_with(d, None, Some("Launch"));
        let custom = CustomColors::new();

        let p = project_day(d, [(&a, &painted)], &custom, true, today());
        assert_eq!(
            p.fill,
            DayFill::Annotated {
                background: solid(ColorCode::Red),
                text: "Launch".to_string(),
                overflow: TextOverflow::OverflowX,
            }
        );

        let p = project_day(d, [(&a, &plain)], &custom, true, today());
        assert_eq!(
            p.fill,
            DayFill::Annotated {
                background: Paint::Solid(ui::BACKGROUND_HOVER.to_string()),
                text: "Launch".to_string(),
                overflow: TextOverflow::OverflowX,
            }
        );
    }

    #[test]
    fn test_project_state_day_uses_layer_order() {
        let mut state = CalendarState::new(2025);
        let d = weekday();
        let mut cells = LayerData::new();
        cells.paint(d, ColorCode::Red.into());
        state.set_active_layer_cells(cells);

        let second = state.add_layer("Second", ColorCode::Pink).unwrap();
        let mut cells = LayerData::new();
        cells.paint(d, ColorCode::Pink.into());
        state.set_active_layer_cells(cells);

        let p = project_state_day(&state, d, false, today());
        assert_eq!(p.strips().len(), 2);
        assert_eq!(p.strips()[1].layer_id, second);
        assert_eq!(p.strips()[0].code, ColorCode::Red.into());
    }
}
