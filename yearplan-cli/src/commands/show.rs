use anyhow::Result;
use chrono::Month;
use owo_colors::OwoColorize;
use yearplan_core::{DayFill, Planner, Storage};

use crate::render::Render;

/// Print one line per month of the selected year, notes underneath.
pub fn run<S: Storage>(planner: &Planner<S>, month: Option<u32>) -> Result<()> {
    let months = match month {
        Some(m) if (1..=12).contains(&m) => vec![m],
        Some(m) => anyhow::bail!("Month must be between 1 and 12, got {}", m),
        None => (1..=12).collect(),
    };

    let state = planner.state();
    println!(
        "{}  {}",
        state.selected_year().bold(),
        format!(
            "{} view, painting {} on {}",
            state.selected_view(),
            state.selected_color_texture(),
            state.active_layer().name
        )
        .dimmed()
    );

    for m in months {
        let name = Month::try_from(m as u8).map(|m| m.name()).unwrap_or("?");
        let days = planner.project_month(m);

        let cells: String = days.iter().map(|d| d.render()).collect();
        println!("{:<10}{}", &name[..3], cells);

        for day in &days {
            if let DayFill::Annotated { text, .. } = &day.fill {
                println!("{:<10}{} {}", "", format!("{:>2}", day.day.date().format("%d")).dimmed(), text);
            }
        }
    }

    Ok(())
}
