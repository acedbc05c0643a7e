//! The data-fetch boundary.
//!
//! Everything upstream of the analytics pipeline is opaque, potentially slow
//! and potentially failing; this trait is the only place the engine touches
//! it. One fetch per view request, no retries here.

use sheetpulse_core::{AnalyticsError, RawSnapshot, Result, SheetRef};
use std::fs;
use std::path::PathBuf;

/// Provider of raw sheet snapshots and workspace listings.
pub trait SheetSource: Send + Sync {
    /// Fetch the current snapshot of a sheet.
    fn fetch_sheet(&self, sheet_id: &str) -> Result<RawSnapshot>;

    /// List the sheets contained in a workspace.
    fn list_sheets(&self, workspace_id: &str) -> Result<Vec<SheetRef>>;
}

/// File-backed source: each sheet is a `<sheet_id>.json` snapshot and each
/// workspace a `workspace-<workspace_id>.json` listing under one directory.
///
/// Serves the CLI and tests; a service deployment substitutes an API-backed
/// implementation behind the same trait.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    root: PathBuf,
}

impl JsonFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SheetSource for JsonFileSource {
    fn fetch_sheet(&self, sheet_id: &str) -> Result<RawSnapshot> {
        let path = self.root.join(format!("{sheet_id}.json"));
        let raw = fs::read_to_string(&path)
            .map_err(|e| AnalyticsError::fetch(sheet_id, format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw).map_err(|e| AnalyticsError::MalformedSnapshot {
            sheet_id: sheet_id.to_string(),
            message: e.to_string(),
        })
    }

    fn list_sheets(&self, workspace_id: &str) -> Result<Vec<SheetRef>> {
        let path = self.root.join(format!("workspace-{workspace_id}.json"));
        let raw = fs::read_to_string(&path).map_err(|e| AnalyticsError::WorkspaceFetch {
            workspace_id: workspace_id.to_string(),
            message: format!("{}: {e}", path.display()),
        })?;
        serde_json::from_str(&raw).map_err(|e| AnalyticsError::WorkspaceFetch {
            workspace_id: workspace_id.to_string(),
            message: e.to_string(),
        })
    }
}
