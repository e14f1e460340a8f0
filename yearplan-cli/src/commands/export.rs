use std::path::{Path, PathBuf};

use anyhow::Result;
use owo_colors::OwoColorize;
use yearplan_core::{Planner, Storage};

/// Write a snapshot into `dir` (current directory by default).
pub fn run<S: Storage>(planner: &Planner<S>, dir: Option<&Path>) -> Result<PathBuf> {
    let export = planner.export()?;
    let dir = dir.unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;

    let path = dir.join(&export.file_name);
    std::fs::write(&path, &export.contents)?;

    println!("Exported to {}", path.display().bold());
    Ok(path)
}
