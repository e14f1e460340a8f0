use anyhow::Result;
use owo_colors::OwoColorize;
use yearplan_core::{Planner, Storage};

use crate::render::render_layer;

pub fn run<S: Storage>(planner: &Planner<S>) -> Result<()> {
    let state = planner.state();
    let active = state.active_layer_id();

    println!("{}", "Layers".bold());
    for (i, (layer, cells)) in state.layers_with_data().enumerate() {
        println!(
            "{}",
            render_layer(i, layer, &layer.id == active, cells.len(), state.custom_colors())
        );
    }

    Ok(())
}
