//! Core of the yearplan year planner.
//!
//! - `palette`: color and texture codes and what they render as
//! - `cell` / `layer` / `state`: per-day cells, layers and the aggregate state
//! - `persistence`: the versioned JSON blob, migration, export and import
//! - `projection`: merging visible layers into what a day looks like
//! - `planner`: the owned store that persists after every change

pub mod cell;
pub mod config;
pub mod constants;
pub mod days;
pub mod error;
pub mod layer;
pub mod palette;
pub mod persistence;
pub mod planner;
pub mod projection;
pub mod state;
pub mod storage;

pub use cell::{DateCellData, LayerData, TextOverflow};
pub use crate::config::PlannerConfig;
pub use days::DayKey;
pub use error::{PlannerError, PlannerResult};
pub use layer::{CalendarView, Layer, LayerId};
pub use palette::{ColorCode, ColorTextureCode, CustomColors, TextureCode};
pub use planner::Planner;
pub use projection::{DayFill, DayProjection, Paint, Strip};
pub use state::CalendarState;
pub use storage::{FileStorage, MemoryStorage, Storage};
