//! Wire shapes of the persisted blob and the version-detecting decoder.
//!
//! Every historical shape is decoded into [`Decoded`] before anything else
//! touches it. Only the current shape ([`StoredDataV3`]) is ever written.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::cell::{DateCellData, LayerData};
use crate::constants::CURRENT_VERSION;
use crate::days::DayKey;
use crate::error::{PlannerError, PlannerResult};
use crate::layer::{CalendarView, Layer, LayerId};
use crate::palette::{ColorCode, ColorTextureCode, CustomColors, PALETTE};
use crate::state::CalendarState;

/// One day's cell as written to JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_texture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_overflow_direction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLayer {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// Current (v3) blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDataV3 {
    pub selected_year: i32,
    pub layers: Vec<StoredLayer>,
    pub layer_data: BTreeMap<String, BTreeMap<String, StoredCell>>,
    pub active_layer_id: String,
    pub selected_color_texture: String,
    pub selected_view: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_colors: BTreeMap<String, String>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
}

/// The layer-bearing part of a v3 blob, read leniently.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct V3Body {
    layers: Vec<StoredLayer>,
    #[serde(default)]
    layer_data: BTreeMap<String, BTreeMap<String, StoredCell>>,
    #[serde(default)]
    active_layer_id: Option<String>,
    #[serde(default)]
    custom_colors: Option<BTreeMap<String, String>>,
}

/// Layer content recovered from a blob, by schema generation.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Layered {
        layers: Vec<Layer>,
        layer_data: BTreeMap<LayerId, LayerData>,
        active_layer_id: Option<LayerId>,
        custom_colors: CustomColors,
    },
    /// Pre-layer `dateCells` map.
    Legacy(LayerData),
    /// Neither shape was recognized.
    Empty,
}

/// A blob of any known version, normalized to in-memory types.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub selected_year: Option<i32>,
    pub selected_color_texture: Option<ColorTextureCode>,
    pub selected_view: Option<CalendarView>,
    pub payload: Payload,
}

/// Parse `text` and decode whichever version it holds.
pub fn decode_str(text: &str) -> PlannerResult<Decoded> {
    let value: Value = serde_json::from_str(text)?;
    decode(value)
}

pub fn decode(value: Value) -> PlannerResult<Decoded> {
    let Value::Object(ref map) = value else {
        return Err(PlannerError::InvalidImport("expected a JSON object".into()));
    };

    let selected_year = map
        .get("selectedYear")
        .and_then(Value::as_i64)
        .and_then(|y| i32::try_from(y).ok());

    let selected_color_texture = map
        .get("selectedColorTexture")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok());

    let selected_view = map
        .get("selectedView")
        .and_then(Value::as_str)
        .and_then(CalendarView::from_name);

    let is_v3 = map.get("version").and_then(Value::as_str) == Some(CURRENT_VERSION);

    let payload = if is_v3 {
        let body: V3Body = serde_json::from_value(value.clone())?;
        decode_v3(body)
    } else if let Some(cells @ Value::Object(_)) = map.get("dateCells") {
        let cells: BTreeMap<String, StoredCell> = serde_json::from_value(cells.clone())?;
        Payload::Legacy(decode_cells(cells))
    } else {
        Payload::Empty
    };

    Ok(Decoded {
        selected_year,
        selected_color_texture,
        selected_view,
        payload,
    })
}

fn decode_v3(body: V3Body) -> Payload {
    let layers = body.layers.into_iter().map(decode_layer).collect();

    let layer_data = body
        .layer_data
        .into_iter()
        .map(|(id, cells)| (LayerId::from(id), decode_cells(cells)))
        .collect();

    let custom_colors = body
        .custom_colors
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(code, css)| match code.parse::<ColorCode>() {
            Ok(code) => Some((code, css)),
            Err(_) => {
                warn!(code = %code, "Ignoring custom color for unknown code");
                None
            }
        })
        .collect();

    Payload::Layered {
        layers,
        layer_data,
        active_layer_id: body.active_layer_id.map(LayerId::from),
        custom_colors,
    }
}

fn decode_layer(stored: StoredLayer) -> Layer {
    let color = stored.color.parse().unwrap_or_else(|_| {
        warn!(layer = %stored.id, color = %stored.color, "Unknown layer color, using first palette color");
        PALETTE[0]
    });

    Layer {
        id: LayerId::from(stored.id),
        name: stored.name,
        color,
        visible: stored.visible,
    }
}

fn decode_cells(cells: BTreeMap<String, StoredCell>) -> LayerData {
    cells
        .into_iter()
        .filter_map(|(key, cell)| match key.parse::<DayKey>() {
            Ok(day) => Some((day, decode_cell(cell))),
            Err(_) => {
                warn!(key = %key, "Dropping cell with malformed day key");
                None
            }
        })
        .collect()
}

fn decode_cell(cell: StoredCell) -> DateCellData {
    let color_texture = cell.color_texture.and_then(|code| match code.parse() {
        Ok(code) => Some(code),
        Err(_) => {
            warn!(code = %code, "Dropping unknown color/texture code");
            None
        }
    });

    let text_overflow_direction = cell
        .text_overflow_direction
        .and_then(|dir| dir.parse().ok());

    DateCellData {
        color_texture,
        text: cell.text,
        text_overflow_direction,
    }
}

/// Encode the full state as the current blob version.
pub fn encode(state: &CalendarState) -> StoredDataV3 {
    let layers = state
        .layers()
        .iter()
        .map(|l| StoredLayer {
            id: l.id.to_string(),
            name: l.name.clone(),
            color: l.color.to_string(),
            visible: l.visible,
        })
        .collect();

    let layer_data = state
        .all_layer_data()
        .iter()
        .map(|(id, cells)| (id.to_string(), encode_cells(cells)))
        .collect();

    let custom_colors = state
        .custom_colors()
        .iter()
        .map(|(code, css)| (code.to_string(), css.clone()))
        .collect();

    StoredDataV3 {
        selected_year: state.selected_year(),
        layers,
        layer_data,
        active_layer_id: state.active_layer_id().to_string(),
        selected_color_texture: state.selected_color_texture().to_string(),
        selected_view: state.selected_view().to_string(),
        custom_colors,
        version: CURRENT_VERSION.to_string(),
        export_date: None,
    }
}

fn encode_cells(cells: &LayerData) -> BTreeMap<String, StoredCell> {
    cells
        .iter()
        .map(|(day, cell)| {
            let stored = StoredCell {
                color_texture: cell.color_texture.map(|c| c.to_string()),
                text: cell.text.clone(),
                text_overflow_direction: cell.text_overflow_direction.map(|d| d.to_string()),
            };
            (day.to_string(), stored)
        })
        .collect()
}
