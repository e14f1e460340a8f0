use anyhow::Result;
use owo_colors::OwoColorize;
use yearplan_core::{ColorCode, Planner, Storage};

use crate::commands::resolve_layer;

pub fn add<S: Storage>(planner: &mut Planner<S>, name: &str, color: Option<&str>) -> Result<()> {
    let id = match color {
        Some(color) => planner.add_layer(name, color.parse::<ColorCode>()?),
        None => planner.add_layer_auto_color(name),
    };

    let Some(id) = id else {
        anyhow::bail!("Layer name cannot be empty");
    };

    let layer = planner.state().active_layer();
    println!("Added layer {} ({}), now active", layer.name.bold(), layer.color);
    println!("  {}", id.to_string().dimmed());
    Ok(())
}

pub fn remove<S: Storage>(planner: &mut Planner<S>, query: &str) -> Result<()> {
    let id = resolve_layer(planner.state(), query)?;
    let name = planner.state().layer(&id).map(|l| l.name.clone()).unwrap_or_default();

    if !planner.remove_layer(&id) {
        anyhow::bail!("Cannot remove the last layer");
    }

    println!("Removed layer {}", name.bold());
    println!("Active layer: {}", planner.state().active_layer().name);
    Ok(())
}

pub fn rename<S: Storage>(planner: &mut Planner<S>, query: &str, name: &str) -> Result<()> {
    let id = resolve_layer(planner.state(), query)?;
    planner.rename_layer(&id, name);
    println!("Renamed layer to {}", name.bold());
    Ok(())
}

pub fn toggle<S: Storage>(planner: &mut Planner<S>, query: &str) -> Result<()> {
    let id = resolve_layer(planner.state(), query)?;
    planner.toggle_layer_visibility(&id);

    if let Some(layer) = planner.state().layer(&id) {
        let status = if layer.visible { "visible".green().to_string() } else { "hidden".dimmed().to_string() };
        println!("{} is now {}", layer.name.bold(), status);
    }
    Ok(())
}

pub fn activate<S: Storage>(planner: &mut Planner<S>, query: &str) -> Result<()> {
    let id = resolve_layer(planner.state(), query)?;
    planner.set_active_layer_id(&id);

    let state = planner.state();
    println!(
        "Active layer: {} (painting with {})",
        state.active_layer().name.bold(),
        state.selected_color_texture()
    );
    Ok(())
}
