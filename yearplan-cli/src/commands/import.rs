use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use yearplan_core::{Planner, Storage};

/// Replace the stored planner with the contents of an exported file.
pub async fn run<S: Storage>(planner: &mut Planner<S>, path: &Path) -> Result<()> {
    let gate = planner.import_gate();
    let pending = gate.read(path).await?;

    planner.apply_import(pending)?;

    let state = planner.state();
    println!(
        "Imported {} into {} ({} {})",
        path.display().bold(),
        state.selected_year(),
        state.layers().len(),
        if state.layers().len() == 1 { "layer" } else { "layers" }
    );
    Ok(())
}
