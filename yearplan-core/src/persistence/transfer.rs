//! Export to and import from user-chosen JSON files.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::constants::EXPORT_FILE_PREFIX;
use crate::error::{PlannerError, PlannerResult};
use crate::persistence::format::encode;
use crate::state::CalendarState;

/// A rendered export, ready to be written wherever the user chose.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub file_name: String,
    pub contents: String,
}

/// `year-planner-data-2025-06-15.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{}-{}.json", EXPORT_FILE_PREFIX, date.format("%Y-%m-%d"))
}

/// Pretty-printed current blob plus an `exportDate` stamp.
pub fn export(state: &CalendarState, now: DateTime<Utc>) -> PlannerResult<Export> {
    let mut blob = encode(state);
    blob.export_date = Some(now.to_rfc3339_opts(SecondsFormat::Millis, true));

    Ok(Export {
        file_name: export_file_name(now.date_naive()),
        contents: serde_json::to_string_pretty(&blob)?,
    })
}

/// Allows one import at a time. Cloned handles share the same flag.
#[derive(Debug, Clone, Default)]
pub struct ImportGate {
    busy: Arc<AtomicBool>,
}

/// Held while an import is in flight; releases the gate when dropped.
#[derive(Debug)]
pub struct ImportPermit {
    busy: Arc<AtomicBool>,
}

/// File contents read under a permit, waiting to be applied.
#[derive(Debug)]
pub struct PendingImport {
    pub contents: String,
    _permit: ImportPermit,
}

impl ImportGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn try_acquire(&self) -> PlannerResult<ImportPermit> {
        if self.busy.swap(true, Ordering::AcqRel) {
            warn!("Import requested while another is pending");
            return Err(PlannerError::ImportInProgress);
        }
        Ok(ImportPermit {
            busy: Arc::clone(&self.busy),
        })
    }

    /// Read an import file without blocking. The gate stays closed until
    /// the returned [`PendingImport`] is applied or dropped.
    pub async fn read(&self, path: &Path) -> PlannerResult<PendingImport> {
        let permit = self.try_acquire()?;
        debug!(path = %path.display(), "Reading import file");
        let contents = tokio::fs::read_to_string(path).await?;
        Ok(PendingImport {
            contents,
            _permit: permit,
        })
    }
}

impl Drop for ImportPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(export_file_name(date), "year-planner-data-2025-01-31.json");
    }

    #[test]
    fn test_export_is_pretty_and_stamped() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 10, 30, 0).unwrap();
        let export = export(&CalendarState::new(2025), now).unwrap();

        assert_eq!(export.file_name, "year-planner-data-2025-03-04.json");
        assert!(export.contents.contains("\n  \"selectedYear\": 2025"));

        let value: serde_json::Value = serde_json::from_str(&export.contents).unwrap();
        assert_eq!(value["exportDate"], "2025-03-04T10:30:00.000Z");
        assert_eq!(value["version"], "3.0");
    }

    #[test]
    fn test_gate_allows_one_import_at_a_time() {
        let gate = ImportGate::new();
        let permit = gate.try_acquire().unwrap();
        assert!(gate.is_busy());
        assert!(matches!(gate.clone().try_acquire(), Err(PlannerError::ImportInProgress)));

        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_ok());
    }

    #[tokio::test]
    async fn test_read_holds_gate_until_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{}").unwrap();

        let gate = ImportGate::new();
        let pending = gate.read(&path).await.unwrap();
        assert_eq!(pending.contents, "{}");
        assert!(gate.is_busy());
        assert!(gate.read(&path).await.is_err());

        drop(pending);
        assert!(!gate.is_busy());
    }

    #[tokio::test]
    async fn test_failed_read_releases_gate() {
        let gate = ImportGate::new();
        assert!(matches!(
            gate.read(Path::new("/nonexistent/yearplan.json")).await,
            Err(PlannerError::Io(_))
        ));
        assert!(!gate.is_busy());
    }
}
