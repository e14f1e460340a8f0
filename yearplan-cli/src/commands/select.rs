use anyhow::Result;
use chrono::Datelike;
use owo_colors::OwoColorize;
use yearplan_core::constants::{YEARS_AFTER, YEARS_BEFORE};
use yearplan_core::palette::ALL_COLOR_TEXTURE_CODES;
use yearplan_core::{CalendarView, ColorCode, ColorTextureCode, Planner, Storage};

use crate::render::render_code;

/// Pick the paint. Picking a color also recolors the active layer.
pub fn paint<S: Storage>(planner: &mut Planner<S>, code: &str) -> Result<()> {
    let code: ColorTextureCode = code.parse()?;
    planner.set_selected_color_texture(code);

    let state = planner.state();
    println!("Painting with {}", render_code(code, state.custom_colors()));
    if code.as_color().is_some() {
        println!("  {} is now {}", state.active_layer().name.bold(), code);
    }
    Ok(())
}

pub fn year<S: Storage>(planner: &mut Planner<S>, year: Option<i32>) -> Result<()> {
    let Some(year) = year else {
        println!("Year: {}", planner.state().selected_year().bold());
        return Ok(());
    };

    if !planner.set_selected_year(year) {
        let current = planner.today().year();
        anyhow::bail!(
            "Year {} is out of range. Pick one from {} to {}",
            year,
            current - YEARS_BEFORE,
            current + YEARS_AFTER
        );
    }
    println!("Year: {}", planner.state().selected_year().bold());
    Ok(())
}

pub fn view<S: Storage>(planner: &mut Planner<S>, view: Option<&str>) -> Result<()> {
    if let Some(name) = view {
        let Some(view) = CalendarView::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(name))
        else {
            let names: Vec<_> = CalendarView::ALL.iter().map(|v| v.as_str()).collect();
            anyhow::bail!("Unknown view '{}'. Available: {}", name, names.join(", "));
        };
        planner.set_selected_view(view);
    }

    let selected = planner.state().selected_view();
    for view in CalendarView::ALL {
        if view == selected {
            println!("{} {}", "▶".bold(), view.bold());
        } else {
            println!("  {}", view.dimmed());
        }
    }
    Ok(())
}

/// Without arguments, list every code. With both, override a color.
pub fn color<S: Storage>(planner: &mut Planner<S>, code: Option<&str>, value: Option<&str>) -> Result<()> {
    match (code, value) {
        (Some(code), Some(value)) => {
            let code: ColorCode = code.parse()?;
            planner.set_custom_color(code, value);
        }
        (Some(_), None) => anyhow::bail!("Missing color value, e.g. `yearplan color blue \"#3366ff\"`"),
        _ => {}
    }

    let state = planner.state();
    let custom = state.custom_colors();
    for code in ALL_COLOR_TEXTURE_CODES {
        let selected = if code == state.selected_color_texture() { "▶".bold().to_string() } else { " ".to_string() };
        let value = match code.as_color() {
            Some(color) if custom.contains_key(&color) => color.resolve(custom).yellow().to_string(),
            Some(color) => color.resolve(custom).dimmed().to_string(),
            None => "texture".dimmed().to_string(),
        };
        println!("{} {}  {}", selected, render_code(code, custom), value);
    }
    Ok(())
}
