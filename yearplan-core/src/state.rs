//! In-memory calendar state and the layer store operations.
//!
//! Every mutation keeps two invariants: `layers` is never empty and
//! `active_layer_id` names one of them. Invalid arguments (blank names,
//! unknown ids) are ignored and reported as "no change".

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::cell::LayerData;
use crate::layer::{CalendarView, Layer, LayerId};
use crate::palette::{ColorCode, ColorTextureCode, CustomColors};

static EMPTY_LAYER_DATA: LayerData = LayerData::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    selected_year: i32,
    layers: Vec<Layer>,
    layer_data: BTreeMap<LayerId, LayerData>,
    active_layer_id: LayerId,
    selected_color_texture: ColorTextureCode,
    selected_view: CalendarView,
    custom_colors: CustomColors,
}

/// Raw pieces of a state before the invariants are enforced.
#[derive(Debug, Clone, Default)]
pub struct StateParts {
    pub selected_year: i32,
    pub layers: Vec<Layer>,
    pub layer_data: BTreeMap<LayerId, LayerData>,
    pub active_layer_id: Option<LayerId>,
    pub selected_color_texture: ColorTextureCode,
    pub selected_view: CalendarView,
    pub custom_colors: CustomColors,
}

impl CalendarState {
    /// Fresh state: one default layer, active, nothing painted.
    pub fn new(selected_year: i32) -> Self {
        let layer = Layer::default_layer();
        let mut layer_data = BTreeMap::new();
        layer_data.insert(layer.id.clone(), LayerData::new());

        CalendarState {
            selected_year,
            active_layer_id: layer.id.clone(),
            layers: vec![layer],
            layer_data,
            selected_color_texture: ColorTextureCode::default(),
            selected_view: CalendarView::default(),
            custom_colors: CustomColors::new(),
        }
    }

    /// Build a state from loosely validated parts, repairing anything that
    /// would break the layer invariants.
    pub fn from_parts(parts: StateParts) -> Self {
        let StateParts {
            selected_year,
            layers,
            mut layer_data,
            active_layer_id,
            selected_color_texture,
            selected_view,
            custom_colors,
        } = parts;

        let mut unique: Vec<Layer> = Vec::with_capacity(layers.len());
        for layer in layers {
            if unique.iter().any(|l| l.id == layer.id) {
                warn!(layer = %layer.id, "Dropping duplicate layer id");
                continue;
            }
            unique.push(layer);
        }
        if unique.is_empty() {
            unique.push(Layer::default_layer());
        }

        let orphaned: Vec<LayerId> = layer_data
            .keys()
            .filter(|id| !unique.iter().any(|l| &l.id == *id))
            .cloned()
            .collect();
        for id in orphaned {
            warn!(layer = %id, "Dropping cells of unknown layer");
            layer_data.remove(&id);
        }
        for layer in &unique {
            layer_data.entry(layer.id.clone()).or_default();
        }

        let active_layer_id = match active_layer_id {
            Some(id) if unique.iter().any(|l| l.id == id) => id,
            other => {
                if let Some(id) = other {
                    warn!(layer = %id, "Active layer does not exist, using first layer");
                }
                unique[0].id.clone()
            }
        };

        CalendarState {
            selected_year,
            layers: unique,
            layer_data,
            active_layer_id,
            selected_color_texture,
            selected_view,
            custom_colors,
        }
    }

    // READ ACCESS:

    pub fn selected_year(&self) -> i32 {
        self.selected_year
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    pub fn active_layer_id(&self) -> &LayerId {
        &self.active_layer_id
    }

    pub fn active_layer(&self) -> &Layer {
        self.layer(&self.active_layer_id)
            .unwrap_or_else(|| &self.layers[0])
    }

    pub fn active_layer_cells(&self) -> &LayerData {
        self.layer_cells(&self.active_layer_id)
            .unwrap_or(&EMPTY_LAYER_DATA)
    }

    pub fn layer_cells(&self, id: &LayerId) -> Option<&LayerData> {
        self.layer_data.get(id)
    }

    pub fn all_layer_data(&self) -> &BTreeMap<LayerId, LayerData> {
        &self.layer_data
    }

    /// Layers in sequence order, each paired with its cells.
    pub fn layers_with_data(&self) -> impl Iterator<Item = (&Layer, &LayerData)> {
        self.layers.iter().map(|layer| {
            let cells = self.layer_data.get(&layer.id).unwrap_or(&EMPTY_LAYER_DATA);
            (layer, cells)
        })
    }

    pub fn selected_color_texture(&self) -> ColorTextureCode {
        self.selected_color_texture
    }

    pub fn selected_view(&self) -> CalendarView {
        self.selected_view
    }

    pub fn custom_colors(&self) -> &CustomColors {
        &self.custom_colors
    }

    /// Colors already claimed by a layer, in layer order.
    pub fn used_colors(&self) -> impl Iterator<Item = ColorCode> + '_ {
        self.layers.iter().map(|l| l.color)
    }

    // LAYER STORE OPERATIONS:

    /// Append a visible layer and activate it. Blank names are ignored.
    pub fn add_layer(&mut self, name: &str, color: ColorCode) -> Option<LayerId> {
        if name.trim().is_empty() {
            return None;
        }

        let layer = Layer::new(name, color);
        let id = layer.id.clone();
        self.layer_data.insert(id.clone(), LayerData::new());
        self.layers.push(layer);
        self.active_layer_id = id.clone();
        debug!(layer = %id, name, "Added layer");
        Some(id)
    }

    /// Remove a layer and its cells. The last layer cannot be removed.
    pub fn remove_layer(&mut self, id: &LayerId) -> bool {
        if self.layers.len() <= 1 {
            return false;
        }
        let Some(index) = self.layers.iter().position(|l| &l.id == id) else {
            return false;
        };

        self.layers.remove(index);
        self.layer_data.remove(id);
        if &self.active_layer_id == id {
            self.active_layer_id = self.layers[0].id.clone();
        }
        debug!(layer = %id, "Removed layer");
        true
    }

    pub fn rename_layer(&mut self, id: &LayerId, name: &str) -> bool {
        match self.layers.iter_mut().find(|l| &l.id == id) {
            Some(layer) => {
                layer.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn toggle_layer_visibility(&mut self, id: &LayerId) -> bool {
        match self.layers.iter_mut().find(|l| &l.id == id) {
            Some(layer) => {
                layer.visible = !layer.visible;
                true
            }
            None => false,
        }
    }

    /// Activate a layer; the paint selection follows the layer's color.
    pub fn set_active_layer_id(&mut self, id: &LayerId) -> bool {
        let Some(color) = self.layer(id).map(|l| l.color) else {
            return false;
        };
        self.active_layer_id = id.clone();
        self.selected_color_texture = color.into();
        true
    }

    /// Replace the active layer's cells wholesale.
    pub fn set_active_layer_cells(&mut self, cells: LayerData) {
        self.layer_data.insert(self.active_layer_id.clone(), cells);
    }

    /// Select a paint. Picking a color also recolors the active layer.
    pub fn set_selected_color_texture(&mut self, code: ColorTextureCode) {
        self.selected_color_texture = code;
        if let Some(color) = code.as_color() {
            let active = self.active_layer_id.clone();
            if let Some(layer) = self.layers.iter_mut().find(|l| l.id == active) {
                layer.color = color;
            }
        }
    }

    pub fn set_selected_year(&mut self, year: i32) {
        self.selected_year = year;
    }

    pub fn set_selected_view(&mut self, view: CalendarView) {
        self.selected_view = view;
    }

    pub fn set_custom_color(&mut self, code: ColorCode, css: &str) {
        self.custom_colors.insert(code, css.to_string());
    }
}
