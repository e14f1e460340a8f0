//! Durable round-trip of the calendar state.
//!
//! Loading never fails: unreadable or malformed blobs are logged and the
//! planner starts from defaults. Saving never fails either; write errors
//! are logged and the in-memory state stays authoritative until the next
//! reload. Import is the one path that reports errors to the caller.

pub mod format;
pub mod migrate;
mod transfer;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, error, info};

use crate::constants::{STORAGE_KEY, YEARS_AFTER, YEARS_BEFORE};
use crate::error::{PlannerError, PlannerResult};
use crate::state::CalendarState;
use crate::storage::Storage;

pub use format::{Decoded, Payload, StoredCell, StoredDataV3, StoredLayer, decode, decode_str, encode};
pub use migrate::{Fallbacks, assemble};
pub use transfer::{Export, ImportGate, ImportPermit, PendingImport, export, export_file_name};

/// Whether a stored year is close enough to `current_year` to restore.
pub fn year_in_window(year: i32, current_year: i32) -> bool {
    (current_year - YEARS_BEFORE..=current_year + YEARS_AFTER).contains(&year)
}

/// Read the persisted state, falling back to defaults on any problem.
pub fn load_state(storage: &impl Storage, today: NaiveDate) -> CalendarState {
    let current_year = today.year();

    let text = match storage.get(STORAGE_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!("No stored calendar data, starting fresh");
            return CalendarState::new(current_year);
        }
        Err(e) => {
            error!(error = %e, "Error reading calendar data from storage");
            return CalendarState::new(current_year);
        }
    };

    match decode_str(&text) {
        Ok(decoded) => assemble(decoded, Fallbacks::fresh(current_year), |year| {
            year_in_window(year, current_year)
        }),
        Err(e) => {
            error!(error = %e, "Error loading calendar data from storage");
            CalendarState::new(current_year)
        }
    }
}

/// Write the state as the current blob version. Errors are logged only.
pub fn save_state(storage: &mut impl Storage, state: &CalendarState) {
    let result = serde_json::to_string(&encode(state))
        .map_err(PlannerError::from)
        .and_then(|json| storage.set(STORAGE_KEY, &json));

    if let Err(e) = result {
        error!(error = %e, "Error saving calendar data to storage");
    }
}

/// Decode an imported file and produce the v3 blob to store in place of
/// the current one. Fields the file leaves out keep their current values.
pub fn import_blob(text: &str, current: &CalendarState) -> PlannerResult<String> {
    let decoded = decode_str(text).map_err(|e| match e {
        PlannerError::Serialization(e) => PlannerError::InvalidImport(format!("invalid JSON format ({e})")),
        other => other,
    })?;

    // Objects with neither layers nor dateCells get the default layer, as
    // at startup. The year is checked against the window on the reload.
    let state = assemble(decoded, Fallbacks::from_state(current), |_| true);
    info!(layers = state.layers().len(), "Imported calendar data");

    Ok(serde_json::to_string(&encode(&state))?)
}

/// Delete the persisted blob.
pub fn clear(storage: &mut impl Storage) -> PlannerResult<()> {
    storage.remove(STORAGE_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::DateCellData;
    use crate::layer::{CalendarView, Layer};
    use crate::palette::ColorCode;
    use crate::storage::MemoryStorage;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, _key: &str) -> PlannerResult<Option<String>> {
            Err(PlannerError::Storage("quota exceeded".into()))
        }
        fn set(&mut self, _key: &str, _value: &str) -> PlannerResult<()> {
            Err(PlannerError::Storage("quota exceeded".into()))
        }
        fn remove(&mut self, _key: &str) -> PlannerResult<()> {
            Err(PlannerError::Storage("quota exceeded".into()))
        }
    }

    #[test]
    fn test_year_window() {
        assert!(year_in_window(2024, 2025));
        assert!(year_in_window(2030, 2025));
        assert!(!year_in_window(2023, 2025));
        assert!(!year_in_window(2031, 2025));
    }

    #[test]
    fn test_load_without_data_synthesizes_default_layer() {
        let state = load_state(&MemoryStorage::new(), today());
        assert_eq!(state, CalendarState::new(2025));
        assert_eq!(state.layers(), &[Layer::default_layer()]);
    }

    #[test]
    fn test_load_malformed_blob_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, "{\"version\": \"3.0\", \"layers\": 7").unwrap();
        assert_eq!(load_state(&storage, today()), CalendarState::new(2025));

        storage.set(STORAGE_KEY, "{\"version\": \"3.0\", \"layers\": 7}").unwrap();
        assert_eq!(load_state(&storage, today()), CalendarState::new(2025));
    }

    #[test]
    fn test_load_and_save_survive_storage_errors() {
        let state = load_state(&FailingStorage, today());
        assert_eq!(state, CalendarState::new(2025));

        let mut storage = FailingStorage;
        save_state(&mut storage, &state);
    }

    #[test]
    fn test_load_rejects_year_outside_window() {
        let mut storage = MemoryStorage::new();
        storage
            .set(STORAGE_KEY, r#"{"dateCells": {}, "selectedYear": 2019, "selectedView": "Classic"}"#)
            .unwrap();

        let state = load_state(&storage, today());
        assert_eq!(state.selected_year(), 2025);
        assert_eq!(state.selected_view(), CalendarView::Classic);
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let mut state = CalendarState::new(2026);
        let work = state.add_layer("Work", ColorCode::Blue).unwrap();
        let mut cells = state.active_layer_cells().clone();
        cells.paint("2026-01-05".parse().unwrap(), ColorCode::Blue.into());
        cells.set_text("2026-01-06".parse().unwrap(), "Kickoff", None);
        state.set_active_layer_cells(cells);
        state.set_custom_color(ColorCode::Blue, "#3355ff");
        state.toggle_layer_visibility(&work);

        let mut storage = MemoryStorage::new();
        save_state(&mut storage, &state);
        let loaded = load_state(&storage, today());

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_import_rejects_bad_files() {
        let current = CalendarState::new(2025);
        assert!(matches!(import_blob("not json", &current), Err(PlannerError::InvalidImport(_))));
        assert!(matches!(import_blob("\"str\"", &current), Err(PlannerError::InvalidImport(_))));
        assert!(matches!(import_blob("[1, 2]", &current), Err(PlannerError::InvalidImport(_))));
    }

    #[test]
    fn test_import_without_layers_gets_default_layer() {
        let mut current = CalendarState::new(2025);
        current.add_layer("Work", ColorCode::Blue);

        let blob = import_blob(r#"{"selectedYear": 2026, "selectedView": "Column"}"#, &current).unwrap();
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, &blob).unwrap();
        let state = load_state(&storage, today());

        assert_eq!(state.layers(), &[Layer::default_layer()]);
        assert!(state.active_layer_cells().is_empty());
        assert_eq!(state.selected_year(), 2026);
        assert_eq!(state.selected_view(), CalendarView::Column);

        let blob = import_blob("{}", &current).unwrap();
        storage.set(STORAGE_KEY, &blob).unwrap();
        assert_eq!(load_state(&storage, today()).layers(), &[Layer::default_layer()]);
    }

    #[test]
    fn test_import_legacy_keeps_current_selection() {
        let mut current = CalendarState::new(2025);
        current.set_selected_view(CalendarView::Column);

        let blob = import_blob(r#"{"dateCells": {"2025-02-02": {"text": "Hi"}}}"#, &current).unwrap();
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, &blob).unwrap();
        let state = load_state(&storage, today());

        assert_eq!(state.selected_view(), CalendarView::Column);
        assert_eq!(
            state.active_layer_cells().get(&"2025-02-02".parse().unwrap()),
            Some(&DateCellData {
                text: Some("Hi".into()),
                ..Default::default()
            })
        );
    }
}
