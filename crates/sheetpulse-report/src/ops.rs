//! Single-sheet view operations.
//!
//! Each operation fetches the snapshot exactly once, runs the relevant pure
//! pipeline, and returns one JSON-serializable record. Operations are
//! read-only and idempotent; given a stable snapshot they always produce the
//! same view.

use serde::{Deserialize, Serialize};
use sheetpulse_analytics::{
    analyze_dependencies, analyze_resources, analyze_structure, build_insights,
    classify_columns, project_tasks, score_health, synthesize, SheetStructure,
};
use sheetpulse_core::{
    ColumnRole, DependencyAnalysis, DependencyBottleneck, DerivedTask, HealthReport,
    ResourceReport, Result, SheetId, Timeline,
};
use tracing::debug;

use crate::source::SheetSource;

/// Returned when a sheet has no column the classifier can treat as a task
/// identifier.
pub const NO_TASK_COLUMN: &str = "Cannot generate - no task identifier column";

/// Returned by the dependency map when no predecessor column exists.
pub const NO_DEPENDENCY_COLUMN: &str = "No dependency column found in this sheet";

/// Structural summary of a sheet: column analysis, health indicators, and
/// free-text insights.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub sheet_id: SheetId,
    pub sheet_name: String,
    pub structure: SheetStructure,
    pub health: HealthReport,
    pub insights: Vec<String>,
}

/// Gantt-style timeline view: derived tasks plus the synthesized timeline
/// and the dependency/resource summaries that annotate it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineView {
    pub sheet_id: SheetId,
    pub sheet_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub tasks: Vec<DerivedTask>,
    pub timeline: Timeline,
    pub dependency_bottlenecks: Vec<DependencyBottleneck>,
    pub resource_utilization: ResourceReport,
}

/// Dependency map view, or an explicit message when the sheet carries no
/// dependency information.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyMapView {
    pub sheet_id: SheetId,
    pub sheet_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub analysis: DependencyAnalysis,
}

/// Per-sheet health report view.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthView {
    pub sheet_id: SheetId,
    pub sheet_name: String,
    #[serde(flatten)]
    pub report: HealthReport,
}

/// The analytics engine: one `SheetSource` plus the pure pipeline.
///
/// Holds no per-request state; every view is computed from a fresh fetch.
pub struct ReportEngine<S> {
    source: S,
}

impl<S: SheetSource> ReportEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Column analysis + health indicators + free-text insights.
    pub fn summary(&self, sheet_id: &str) -> Result<SummaryView> {
        let _span = tracing::info_span!("summary", sheet_id).entered();
        let snapshot = self.source.fetch_sheet(sheet_id)?;
        let roles = classify_columns(&snapshot.columns);
        debug!(resolved_roles = roles.len(), "classified columns");

        Ok(SummaryView {
            structure: analyze_structure(&snapshot),
            health: score_health(&snapshot),
            insights: build_insights(&snapshot, &roles),
            sheet_id: snapshot.sheet_id,
            sheet_name: snapshot.sheet_name,
        })
    }

    /// Derived tasks, project timeline, bottlenecks, and resource load.
    pub fn timeline(&self, sheet_id: &str) -> Result<TimelineView> {
        let _span = tracing::info_span!("timeline", sheet_id).entered();
        let snapshot = self.source.fetch_sheet(sheet_id)?;
        let roles = classify_columns(&snapshot.columns);

        if !roles.has_task_name() {
            debug!("no task identifier column resolved");
            return Ok(TimelineView {
                sheet_id: snapshot.sheet_id,
                sheet_name: snapshot.sheet_name,
                message: Some(NO_TASK_COLUMN.to_string()),
                tasks: Vec::new(),
                timeline: Timeline::default(),
                dependency_bottlenecks: Vec::new(),
                resource_utilization: ResourceReport::default(),
            });
        }

        let tasks = project_tasks(&snapshot, &roles);
        let timeline = synthesize(&tasks);
        let dependencies = analyze_dependencies(&tasks);
        let resources = analyze_resources(&tasks);
        debug!(tasks = tasks.len(), milestones = timeline.milestones.len(), "timeline built");

        Ok(TimelineView {
            sheet_id: snapshot.sheet_id,
            sheet_name: snapshot.sheet_name,
            message: None,
            tasks,
            timeline,
            dependency_bottlenecks: dependencies.bottlenecks,
            resource_utilization: resources,
        })
    }

    /// Dependency analysis, or an explicit message when unavailable.
    pub fn dependency_map(&self, sheet_id: &str) -> Result<DependencyMapView> {
        let _span = tracing::info_span!("dependency_map", sheet_id).entered();
        let snapshot = self.source.fetch_sheet(sheet_id)?;
        let roles = classify_columns(&snapshot.columns);

        let message = if !roles.has_task_name() {
            Some(NO_TASK_COLUMN.to_string())
        } else if roles.get(ColumnRole::Predecessor).is_none() {
            Some(NO_DEPENDENCY_COLUMN.to_string())
        } else {
            None
        };

        let analysis = if message.is_none() {
            let tasks = project_tasks(&snapshot, &roles);
            analyze_dependencies(&tasks)
        } else {
            DependencyAnalysis::default()
        };

        Ok(DependencyMapView {
            sheet_id: snapshot.sheet_id,
            sheet_name: snapshot.sheet_name,
            message,
            analysis,
        })
    }

    /// Composite health report for one sheet.
    pub fn health_report(&self, sheet_id: &str) -> Result<HealthView> {
        let _span = tracing::info_span!("health_report", sheet_id).entered();
        let snapshot = self.source.fetch_sheet(sheet_id)?;

        Ok(HealthView {
            report: score_health(&snapshot),
            sheet_id: snapshot.sheet_id,
            sheet_name: snapshot.sheet_name,
        })
    }
}
