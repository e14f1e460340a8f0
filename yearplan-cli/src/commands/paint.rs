use anyhow::Result;
use owo_colors::OwoColorize;
use yearplan_core::{ColorTextureCode, Planner, Storage, TextOverflow};

use crate::commands::parse_day;
use crate::render::render_code;

fn describe_range(count: usize) -> String {
    format!("{} {}", count, if count == 1 { "day" } else { "days" })
}

/// Paint `from..=to` on the active layer. `with` switches the paint first.
pub fn paint<S: Storage>(planner: &mut Planner<S>, from: &str, to: Option<&str>, with: Option<&str>) -> Result<()> {
    let today = planner.today();
    let from = parse_day(from, today)?;
    let to = to.map(|t| parse_day(t, today)).transpose()?.unwrap_or(from);

    if let Some(code) = with {
        planner.set_selected_color_texture(code.parse::<ColorTextureCode>()?);
    }
    planner.paint(from, to);

    let state = planner.state();
    println!(
        "Painted {} on {} with {}",
        describe_range(from.range_to(to).len()),
        state.active_layer().name.bold(),
        render_code(state.selected_color_texture(), state.custom_colors())
    );
    Ok(())
}

pub fn erase<S: Storage>(planner: &mut Planner<S>, from: &str, to: Option<&str>) -> Result<()> {
    let today = planner.today();
    let from = parse_day(from, today)?;
    let to = to.map(|t| parse_day(t, today)).transpose()?.unwrap_or(from);

    planner.erase(from, to);
    println!(
        "Erased {} on {}",
        describe_range(from.range_to(to).len()),
        planner.state().active_layer().name.bold()
    );
    Ok(())
}

/// Annotate a day on the active layer. No text clears the annotation.
pub fn note<S: Storage>(planner: &mut Planner<S>, day: &str, text: &[String], overflow: Option<&str>) -> Result<()> {
    let day = parse_day(day, planner.today())?;
    let overflow = overflow.map(str::parse::<TextOverflow>).transpose()?;
    let text = text.join(" ");

    planner.set_text(day, &text, overflow);

    if text.trim().is_empty() {
        println!("Cleared note on {}", day);
    } else {
        println!("Noted {} on {}", text.bold(), day);
    }
    Ok(())
}
