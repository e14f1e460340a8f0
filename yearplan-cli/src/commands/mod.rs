pub mod clean;
pub mod config;
pub mod day;
pub mod export;
pub mod import;
pub mod layer;
pub mod layers;
pub mod paint;
pub mod select;
pub mod show;

use anyhow::Result;
use chrono::NaiveDate;
use yearplan_core::{CalendarState, DayKey, LayerId};

/// Parse a day argument. Accepts `YYYY-MM-DD` or `today`.
pub fn parse_day(arg: &str, today: NaiveDate) -> Result<DayKey> {
    if arg.eq_ignore_ascii_case("today") {
        return Ok(DayKey::new(today));
    }
    Ok(arg.parse()?)
}

/// Find a layer by 1-based position, id, or name (case-insensitive).
pub fn resolve_layer(state: &CalendarState, query: &str) -> Result<LayerId> {
    let layers = state.layers();

    if let Ok(position) = query.parse::<usize>()
        && (1..=layers.len()).contains(&position)
    {
        return Ok(layers[position - 1].id.clone());
    }

    let found = layers
        .iter()
        .find(|l| l.id.as_str() == query)
        .or_else(|| layers.iter().find(|l| l.name.eq_ignore_ascii_case(query)));

    match found {
        Some(layer) => Ok(layer.id.clone()),
        None => {
            let available: Vec<_> = layers.iter().map(|l| l.name.as_str()).collect();
            anyhow::bail!(
                "Layer '{}' not found. Available: {}",
                query,
                available.join(", ")
            );
        }
    }
}
