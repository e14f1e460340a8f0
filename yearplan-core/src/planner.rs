//! The single owned store: state plus the backend it persists to.
//!
//! Readers get `&CalendarState`; every change goes through a method here,
//! which updates memory and then writes the whole state back.

use std::path::Path;

use chrono::{Datelike, Local, NaiveDate, Utc};
use tracing::{info, warn};

use crate::cell::{LayerData, TextOverflow};
use crate::constants::STORAGE_KEY;
use crate::days::DayKey;
use crate::error::PlannerResult;
use crate::layer::{CalendarView, LayerId};
use crate::palette::{ColorCode, ColorTextureCode, next_available_color};
use crate::persistence::{self, Export, ImportGate, PendingImport};
use crate::projection::{DayProjection, project_state_day};
use crate::state::CalendarState;
use crate::storage::Storage;

pub struct Planner<S: Storage> {
    state: CalendarState,
    storage: S,
    today: NaiveDate,
    revision: u64,
    import_gate: ImportGate,
}

impl<S: Storage> Planner<S> {
    /// Load from `storage` using the local date for the year window.
    pub fn open(storage: S) -> Self {
        Self::open_at(storage, Local::now().date_naive())
    }

    pub fn open_at(storage: S, today: NaiveDate) -> Self {
        let state = persistence::load_state(&storage, today);
        Planner {
            state,
            storage,
            today,
            revision: 0,
            import_gate: ImportGate::new(),
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Bumped on every effective mutation and reload.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn commit(&mut self) {
        self.revision += 1;
        persistence::save_state(&mut self.storage, &self.state);
    }

    fn commit_if(&mut self, changed: bool) -> bool {
        if changed {
            self.commit();
        }
        changed
    }

    /// Throw away in-memory state and load again from storage.
    pub fn reload(&mut self) {
        self.state = persistence::load_state(&self.storage, self.today);
        self.revision += 1;
    }

    // LAYERS:

    pub fn add_layer(&mut self, name: &str, color: ColorCode) -> Option<LayerId> {
        let id = self.state.add_layer(name, color);
        self.commit_if(id.is_some());
        id
    }

    /// Add a layer with the next color nobody uses yet.
    pub fn add_layer_auto_color(&mut self, name: &str) -> Option<LayerId> {
        let color = next_available_color(self.state.used_colors());
        self.add_layer(name, color)
    }

    pub fn remove_layer(&mut self, id: &LayerId) -> bool {
        let changed = self.state.remove_layer(id);
        self.commit_if(changed)
    }

    pub fn rename_layer(&mut self, id: &LayerId, name: &str) -> bool {
        let changed = self.state.rename_layer(id, name);
        self.commit_if(changed)
    }

    pub fn toggle_layer_visibility(&mut self, id: &LayerId) -> bool {
        let changed = self.state.toggle_layer_visibility(id);
        self.commit_if(changed)
    }

    pub fn set_active_layer_id(&mut self, id: &LayerId) -> bool {
        let changed = self.state.set_active_layer_id(id);
        self.commit_if(changed)
    }

    pub fn set_active_layer_cells(&mut self, cells: LayerData) {
        self.state.set_active_layer_cells(cells);
        self.commit();
    }

    // SELECTION:

    pub fn set_selected_color_texture(&mut self, code: ColorTextureCode) {
        self.state.set_selected_color_texture(code);
        self.commit();
    }

    /// Years outside the load window are refused, since the next load
    /// would drop them.
    pub fn set_selected_year(&mut self, year: i32) -> bool {
        if !persistence::year_in_window(year, self.today.year()) {
            warn!(year, current = self.today.year(), "Selected year outside window, ignoring");
            return false;
        }
        self.state.set_selected_year(year);
        self.commit();
        true
    }

    pub fn set_selected_view(&mut self, view: CalendarView) {
        self.state.set_selected_view(view);
        self.commit();
    }

    pub fn set_custom_color(&mut self, code: ColorCode, css: &str) {
        self.state.set_custom_color(code, css);
        self.commit();
    }

    // PAINTING (active layer, current paint):

    fn edit_active_cells(&mut self, edit: impl FnOnce(&mut LayerData)) {
        let mut cells = self.state.active_layer_cells().clone();
        edit(&mut cells);
        self.set_active_layer_cells(cells);
    }

    pub fn paint(&mut self, from: DayKey, to: DayKey) {
        let code = self.state.selected_color_texture();
        self.edit_active_cells(|cells| cells.paint_range(from, to, code));
    }

    pub fn erase(&mut self, from: DayKey, to: DayKey) {
        self.edit_active_cells(|cells| cells.erase_range(from, to));
    }

    pub fn set_text(&mut self, day: DayKey, text: &str, overflow: Option<TextOverflow>) {
        self.edit_active_cells(|cells| cells.set_text(day, text, overflow));
    }

    // RENDERING:

    pub fn project_day(&self, day: DayKey, hovered: bool) -> DayProjection {
        project_state_day(&self.state, day, hovered, self.today)
    }

    pub fn project_month(&self, month: u32) -> Vec<DayProjection> {
        crate::days::month_days(self.state.selected_year(), month)
            .into_iter()
            .map(|day| self.project_day(day, false))
            .collect()
    }

    // FILES:

    pub fn export(&self) -> PlannerResult<Export> {
        persistence::export(&self.state, Utc::now())
    }

    /// Handle callers use to read import files without holding the planner.
    pub fn import_gate(&self) -> ImportGate {
        self.import_gate.clone()
    }

    /// Replace the stored blob with an imported file, then reload from
    /// storage. Nothing is applied if the file is rejected.
    pub fn import_json(&mut self, text: &str) -> PlannerResult<()> {
        let blob = persistence::import_blob(text, &self.state)?;
        self.storage.set(STORAGE_KEY, &blob)?;
        self.reload();
        info!(year = self.state.selected_year(), "Reloaded after import");
        Ok(())
    }

    pub fn apply_import(&mut self, pending: PendingImport) -> PlannerResult<()> {
        self.import_json(&pending.contents)
    }

    /// Read and apply an import file.
    pub async fn import_file(&mut self, path: &Path) -> PlannerResult<()> {
        let pending = self.import_gate.read(path).await?;
        self.apply_import(pending)
    }

    /// Delete everything persisted and start over from defaults.
    pub fn clean(&mut self) -> PlannerResult<()> {
        persistence::clear(&mut self.storage)?;
        self.reload();
        info!(year = self.today.year(), "Cleared all calendar data");
        Ok(())
    }
}
