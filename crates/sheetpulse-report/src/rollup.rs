//! Workspace rollup.
//!
//! Fans the per-sheet pipeline out across the sheets of a workspace and
//! aggregates an average health score plus roll-up recommendations. Sheet
//! analyses are fully independent, so they run in parallel; a failing sheet
//! degrades to a zero-score entry instead of cancelling the others.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sheetpulse_analytics::{classify_columns, score_health};
use sheetpulse_core::{ColumnRole, RawSnapshot, Result, SheetId, SheetRef, WorkspaceId};
use tracing::{debug, warn};

use crate::ops::ReportEngine;
use crate::source::SheetSource;

/// Rollups analyze at most this many sheets per workspace, for
/// responsiveness on large workspaces.
pub const MAX_ROLLUP_SHEETS: usize = 10;

/// Successful entries scoring below this count as "low health" in the
/// rollup recommendations.
const LOW_HEALTH_THRESHOLD: i64 = 60;

/// One sheet's contribution to the workspace overview.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSheetEntry {
    pub sheet_id: SheetId,
    pub name: String,
    /// "project_plan" or "grid"; absent when the sheet failed to analyze
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub sheet_type: Option<String>,
    pub health_score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    pub row_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated workspace view.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceOverview {
    pub workspace_id: WorkspaceId,
    /// Total sheets in the workspace, before the rollup bound
    pub sheet_count: usize,
    /// Sheets successfully analyzed
    pub analyzed_sheet_count: usize,
    /// Mean health score across analyzed sheets, rounded
    pub average_health_score: i64,
    pub sheets: Vec<WorkspaceSheetEntry>,
    pub recommendations: Vec<String>,
}

impl<S: SheetSource> ReportEngine<S> {
    /// Analyze every sheet of a workspace (bounded to the first
    /// `MAX_ROLLUP_SHEETS`) and aggregate the results.
    ///
    /// Per-sheet fetch failures are isolated: the failing sheet appears as a
    /// degraded zero-score entry and the rest of the rollup proceeds.
    pub fn workspace_overview(&self, workspace_id: &str) -> Result<WorkspaceOverview> {
        let _span = tracing::info_span!("workspace_overview", workspace_id).entered();
        let mut refs = self.source().list_sheets(workspace_id)?;
        let sheet_count = refs.len();
        refs.truncate(MAX_ROLLUP_SHEETS);

        let sheets: Vec<WorkspaceSheetEntry> = refs
            .into_par_iter()
            .map(|sheet_ref| self.analyze_one(sheet_ref))
            .collect();

        let analyzed: Vec<&WorkspaceSheetEntry> =
            sheets.iter().filter(|s| s.error.is_none()).collect();
        let analyzed_sheet_count = analyzed.len();
        debug!(sheet_count, analyzed_sheet_count, "rollup complete");

        let average_health_score = if analyzed.is_empty() {
            0
        } else {
            let total: i64 = analyzed.iter().map(|s| s.health_score).sum();
            (total as f64 / analyzed.len() as f64).round() as i64
        };

        let recommendations = rollup_recommendations(&analyzed);

        Ok(WorkspaceOverview {
            workspace_id: workspace_id.to_string(),
            sheet_count,
            analyzed_sheet_count,
            average_health_score,
            sheets,
            recommendations,
        })
    }

    fn analyze_one(&self, sheet_ref: SheetRef) -> WorkspaceSheetEntry {
        match self.source().fetch_sheet(&sheet_ref.sheet_id) {
            Ok(snapshot) => entry_from_snapshot(&snapshot),
            Err(err) => {
                warn!(sheet_id = %sheet_ref.sheet_id, %err, "sheet analysis degraded");
                WorkspaceSheetEntry {
                    sheet_id: sheet_ref.sheet_id,
                    name: sheet_ref.name,
                    sheet_type: None,
                    health_score: 0,
                    last_modified: None,
                    row_count: 0,
                    error: Some("Failed to analyze".to_string()),
                }
            }
        }
    }
}

fn entry_from_snapshot(snapshot: &RawSnapshot) -> WorkspaceSheetEntry {
    let roles = classify_columns(&snapshot.columns);
    let is_plan =
        roles.get(ColumnRole::Start).is_some() && roles.get(ColumnRole::Finish).is_some();
    let report = score_health(snapshot);

    WorkspaceSheetEntry {
        sheet_id: snapshot.sheet_id.clone(),
        name: snapshot.sheet_name.clone(),
        sheet_type: Some(if is_plan { "project_plan" } else { "grid" }.to_string()),
        health_score: report.overall_score,
        last_modified: snapshot.modified_at.clone(),
        row_count: snapshot.row_count,
        error: None,
    }
}

fn rollup_recommendations(analyzed: &[&WorkspaceSheetEntry]) -> Vec<String> {
    let mut recommendations = Vec::new();

    let low_health = analyzed
        .iter()
        .filter(|s| s.health_score < LOW_HEALTH_THRESHOLD)
        .count();
    if low_health > 0 {
        recommendations.push(format!(
            "{low_health} sheet(s) scored below {LOW_HEALTH_THRESHOLD} - review their data quality"
        ));
    }

    let empty = analyzed.iter().filter(|s| s.row_count == 0).count();
    if empty > 0 {
        recommendations.push(format!(
            "{empty} sheet(s) have no rows and could be archived"
        ));
    }

    let plans = analyzed
        .iter()
        .filter(|s| s.sheet_type.as_deref() == Some("project_plan"))
        .count();
    if plans > 0 {
        recommendations.push(format!(
            "{plans} of {} analyzed sheet(s) are structured as project plans",
            analyzed.len()
        ));
    }

    recommendations
}
