use anyhow::Result;
use owo_colors::OwoColorize;
use yearplan_core::constants::STORAGE_KEY;
use yearplan_core::{FileStorage, PlannerConfig};

pub fn run(config: &PlannerConfig) -> Result<()> {
    let config_path = PlannerConfig::config_path()?;
    let storage = FileStorage::new(config.data_path());

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", storage.dir().display());
    println!("  Planner:    {}", storage.path_for(STORAGE_KEY)?.display());
    println!();
    println!("{}", "Logging".bold());
    println!("  Level:      {}", config.log_level);

    Ok(())
}
