use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use yearplan_core::{Planner, Storage};

/// Delete all stored planner data and start over with a single layer.
pub fn run<S: Storage>(planner: &mut Planner<S>, force: bool) -> Result<()> {
    let state = planner.state();
    let painted: usize = state.all_layer_data().values().map(|cells| cells.len()).sum();
    let layers = state.layers().len();

    println!(
        "This removes {} {} and {} annotated or painted {}.",
        layers,
        if layers == 1 { "layer" } else { "layers" },
        painted,
        if painted == 1 { "day" } else { "days" }
    );

    // Confirm unless --force
    if !force {
        let confirmed = Confirm::new()
            .with_prompt("Clear all calendar data? This cannot be undone")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Nothing cleared".dimmed());
            return Ok(());
        }
    }

    planner.clean()?;
    println!("Cleared all calendar data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use yearplan_core::{CalendarState, ColorCode, MemoryStorage};

    #[test]
    fn test_forced_clean_resets() {
        let mut planner = Planner::open_at(MemoryStorage::new(), NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        planner.add_layer("Work", ColorCode::Blue);

        run(&mut planner, true).unwrap();
        assert_eq!(planner.state(), &CalendarState::new(2025));
    }
}
