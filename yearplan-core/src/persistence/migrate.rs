//! Turning decoded blobs of any version into a valid [`CalendarState`].

use std::collections::BTreeMap;

use tracing::info;

use crate::layer::{CalendarView, Layer};
use crate::palette::{ColorTextureCode, CustomColors};
use crate::persistence::format::{Decoded, Payload};
use crate::state::{CalendarState, StateParts};

/// Values used wherever a blob leaves a field out.
#[derive(Debug, Clone)]
pub struct Fallbacks {
    pub selected_year: i32,
    pub selected_color_texture: ColorTextureCode,
    pub selected_view: CalendarView,
    pub custom_colors: CustomColors,
}

impl Fallbacks {
    /// Defaults for a brand-new planner.
    pub fn fresh(current_year: i32) -> Self {
        Fallbacks {
            selected_year: current_year,
            selected_color_texture: ColorTextureCode::default(),
            selected_view: CalendarView::default(),
            custom_colors: CustomColors::new(),
        }
    }

    /// Keep whatever the running session already has.
    pub fn from_state(state: &CalendarState) -> Self {
        Fallbacks {
            selected_year: state.selected_year(),
            selected_color_texture: state.selected_color_texture(),
            selected_view: state.selected_view(),
            custom_colors: state.custom_colors().clone(),
        }
    }
}

/// Build a state from a decoded blob. `accept_year` decides whether the
/// blob's year replaces the fallback.
pub fn assemble(decoded: Decoded, fallbacks: Fallbacks, accept_year: impl Fn(i32) -> bool) -> CalendarState {
    let selected_year = match decoded.selected_year {
        Some(year) if accept_year(year) => year,
        Some(year) => {
            info!(year, fallback = fallbacks.selected_year, "Stored year outside allowed window");
            fallbacks.selected_year
        }
        None => fallbacks.selected_year,
    };

    let mut parts = StateParts {
        selected_year,
        selected_color_texture: decoded
            .selected_color_texture
            .unwrap_or(fallbacks.selected_color_texture),
        selected_view: decoded.selected_view.unwrap_or(fallbacks.selected_view),
        custom_colors: fallbacks.custom_colors,
        ..Default::default()
    };

    match decoded.payload {
        Payload::Layered {
            layers,
            layer_data,
            active_layer_id,
            custom_colors,
        } => {
            parts.layers = layers;
            parts.layer_data = layer_data;
            parts.active_layer_id = active_layer_id;
            if !custom_colors.is_empty() {
                parts.custom_colors = custom_colors;
            }
        }
        Payload::Legacy(cells) => {
            let layer = Layer::default_layer();
            info!(cells = cells.len(), "Migrating pre-layer data into default layer");
            parts.active_layer_id = Some(layer.id.clone());
            parts.layer_data = BTreeMap::from([(layer.id.clone(), cells)]);
            parts.layers = vec![layer];
        }
        Payload::Empty => {}
    }

    CalendarState::from_parts(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::DateCellData;
    use crate::palette::ColorCode;
    use crate::persistence::format::decode_str;

    #[test]
    fn test_legacy_blob_migrates_into_one_active_layer() {
        let decoded = decode_str(
            r#"{"dateCells": {"2024-03-01": {"colorTexture": "red"}}, "selectedYear": 2024, "selectedView": "Linear"}"#,
        )
        .unwrap();

        let state = assemble(decoded, Fallbacks::fresh(2024), |_| true);

        assert_eq!(state.layers().len(), 1);
        assert_eq!(state.active_layer_id(), &state.layers()[0].id);

        let cells = state.active_layer_cells();
        assert_eq!(cells.len(), 1);
        assert_eq!(
            cells.get(&"2024-03-01".parse().unwrap()),
            Some(&DateCellData::painted(ColorCode::Red.into()))
        );
    }

    #[test]
    fn test_rejected_year_uses_fallback() {
        let decoded = decode_str(r#"{"selectedYear": 1999}"#).unwrap();
        let state = assemble(decoded, Fallbacks::fresh(2025), |y| y >= 2024);
        assert_eq!(state.selected_year(), 2025);
    }

    #[test]
    fn test_unrecognized_payload_gets_default_layer() {
        let decoded = decode_str(r#"{"selectedView": "Column"}"#).unwrap();
        let state = assemble(decoded, Fallbacks::fresh(2025), |_| true);
        assert_eq!(state.layers(), &[Layer::default_layer()]);
        assert_eq!(state.selected_view(), CalendarView::Column);
    }

    #[test]
    fn test_session_custom_colors_survive_blob_without_any() {
        let mut current = CalendarState::new(2025);
        current.set_custom_color(ColorCode::Teal, "#008080");

        let decoded = decode_str(r#"{"version": "3.0", "layers": [], "layerData": {}}"#).unwrap();
        let state = assemble(decoded, Fallbacks::from_state(&current), |_| true);
        assert_eq!(
            state.custom_colors().get(&ColorCode::Teal).map(String::as_str),
            Some("#008080")
        );
    }
}
