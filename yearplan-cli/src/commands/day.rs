use anyhow::Result;
use owo_colors::OwoColorize;
use yearplan_core::{DayFill, Paint, Planner, Storage};

use crate::commands::parse_day;
use crate::render::{Render, render_code};

/// Explain how a day renders: which layers paint it and what text wins.
pub fn run<S: Storage>(planner: &Planner<S>, day: &str) -> Result<()> {
    let day = parse_day(day, planner.today())?;
    let state = planner.state();
    let projection = planner.project_day(day, false);

    let mut flags = Vec::new();
    if projection.is_today {
        flags.push("today");
    }
    if projection.is_weekend {
        flags.push("weekend");
    }
    println!(
        "{} {}  {}",
        projection.render(),
        day.date().format("%A %-d %B %Y").to_string().bold(),
        flags.join(", ").dimmed()
    );

    match &projection.fill {
        DayFill::Blank { background } => println!("  {} {}", "blank".dimmed(), background.dimmed()),
        DayFill::Strips(strips) => {
            for strip in strips {
                let layer = state.layer(&strip.layer_id).map(|l| l.name.as_str()).unwrap_or("?");
                println!("  {:<16} {}", layer, render_code(strip.code, state.custom_colors()));
            }
        }
        DayFill::Annotated { background, text, overflow } => {
            let background = match background {
                Paint::Solid(css) => css.clone(),
                Paint::Pattern(pattern) => pattern.image.to_string(),
            };
            println!("  {} {}", "note".dimmed(), text.bold());
            println!("  {} {}  {} {}", "overflow".dimmed(), overflow, "background".dimmed(), background);
        }
    }

    // Hidden layers never render but can still hold data for the day.
    for (layer, cells) in state.layers_with_data().filter(|(l, _)| !l.visible) {
        let Some(cell) = cells.get(&day) else {
            continue;
        };
        let paint = cell.color_texture.map(|c| c.to_string()).unwrap_or_else(|| "-".into());
        let text = cell.visible_text().unwrap_or("");
        println!("  {} {}: {} {}", layer.name.dimmed(), "(hidden)".dimmed(), paint, text);
    }

    Ok(())
}
