//! View operation tests against an in-memory source, including failure
//! isolation in the workspace rollup.

use pretty_assertions::assert_eq;
use sheetpulse_core::{
    AnalyticsError, CellValue, ColumnDescriptor, ColumnType, RawSnapshot, Result, SheetRef,
};
use sheetpulse_report::{
    ReportEngine, SheetSource, MAX_ROLLUP_SHEETS, NO_DEPENDENCY_COLUMN, NO_TASK_COLUMN,
};
use std::collections::HashMap;

/// In-memory source: a map of snapshots plus a set of sheet ids that fail
/// on fetch.
struct MemorySource {
    sheets: HashMap<String, RawSnapshot>,
    failing: Vec<String>,
    workspaces: HashMap<String, Vec<SheetRef>>,
}

impl MemorySource {
    fn new() -> Self {
        Self {
            sheets: HashMap::new(),
            failing: Vec::new(),
            workspaces: HashMap::new(),
        }
    }

    fn with_sheet(mut self, snapshot: RawSnapshot) -> Self {
        self.sheets.insert(snapshot.sheet_id.clone(), snapshot);
        self
    }

    fn with_failing(mut self, sheet_id: &str) -> Self {
        self.failing.push(sheet_id.to_string());
        self
    }

    fn with_workspace(mut self, id: &str, refs: Vec<SheetRef>) -> Self {
        self.workspaces.insert(id.to_string(), refs);
        self
    }
}

impl SheetSource for MemorySource {
    fn fetch_sheet(&self, sheet_id: &str) -> Result<RawSnapshot> {
        if self.failing.iter().any(|id| id == sheet_id) {
            return Err(AnalyticsError::fetch(sheet_id, "simulated outage"));
        }
        self.sheets
            .get(sheet_id)
            .cloned()
            .ok_or_else(|| AnalyticsError::fetch(sheet_id, "not found"))
    }

    fn list_sheets(&self, workspace_id: &str) -> Result<Vec<SheetRef>> {
        self.workspaces
            .get(workspace_id)
            .cloned()
            .ok_or_else(|| AnalyticsError::WorkspaceFetch {
                workspace_id: workspace_id.to_string(),
                message: "not found".to_string(),
            })
    }
}

fn sheet_ref(id: &str, name: &str) -> SheetRef {
    SheetRef {
        sheet_id: id.to_string(),
        name: name.to_string(),
    }
}

fn plan_snapshot(id: &str) -> RawSnapshot {
    RawSnapshot::new(id, "Release Plan")
        .column(ColumnDescriptor::new("Task Name", ColumnType::TextNumber).primary())
        .column(ColumnDescriptor::new("Start", ColumnType::Date))
        .column(ColumnDescriptor::new("Finish", ColumnType::Date))
        .column(ColumnDescriptor::new("Predecessors", ColumnType::Predecessor))
        .row([
            ("Task Name", CellValue::text("Build API")),
            ("Start", CellValue::text("2024-01-01")),
            ("Finish", CellValue::text("2024-01-10")),
        ])
        .row([
            ("Task Name", CellValue::text("Launch")),
            ("Start", CellValue::text("2024-01-11")),
            ("Finish", CellValue::text("2024-01-11")),
            ("Predecessors", CellValue::text("1")),
        ])
}

fn notes_snapshot(id: &str) -> RawSnapshot {
    RawSnapshot::new(id, "Meeting Notes")
        .column(ColumnDescriptor::new("Topic", ColumnType::TextNumber))
        .column(ColumnDescriptor::new("Notes", ColumnType::TextNumber))
        .row([
            ("Topic", CellValue::text("Roadmap")),
            ("Notes", CellValue::text("Q2 priorities")),
        ])
}

#[test]
fn timeline_view_over_a_plan() {
    let engine = ReportEngine::new(MemorySource::new().with_sheet(plan_snapshot("p1")));
    let view = engine.timeline("p1").unwrap();

    assert!(view.message.is_none());
    assert_eq!(view.tasks.len(), 2);
    assert_eq!(view.timeline.span_days, Some(10));
    assert_eq!(view.timeline.milestones.len(), 1); // "Launch"
    assert!(view.dependency_bottlenecks.is_empty());
}

#[test]
fn timeline_degrades_without_task_column() {
    let engine = ReportEngine::new(MemorySource::new().with_sheet(notes_snapshot("n1")));
    let view = engine.timeline("n1").unwrap();

    assert_eq!(view.message.as_deref(), Some(NO_TASK_COLUMN));
    assert!(view.tasks.is_empty());
    assert!(view.timeline.project_start.is_none());
}

#[test]
fn dependency_map_reports_missing_column() {
    let snapshot = RawSnapshot::new("t1", "Tasks")
        .column(ColumnDescriptor::new("Task", ColumnType::TextNumber).primary())
        .row([("Task", CellValue::text("Solo work"))]);
    let engine = ReportEngine::new(MemorySource::new().with_sheet(snapshot));
    let view = engine.dependency_map("t1").unwrap();

    assert_eq!(view.message.as_deref(), Some(NO_DEPENDENCY_COLUMN));
    assert!(!view.analysis.has_critical_path);
}

#[test]
fn dependency_map_over_a_plan() {
    let engine = ReportEngine::new(MemorySource::new().with_sheet(plan_snapshot("p1")));
    let view = engine.dependency_map("p1").unwrap();

    assert!(view.message.is_none());
    assert!(view.analysis.has_critical_path);
    assert_eq!(view.analysis.task_dependencies.len(), 1);
}

#[test]
fn summary_view_carries_structure_and_insights() {
    let engine = ReportEngine::new(MemorySource::new().with_sheet(plan_snapshot("p1")));
    let view = engine.summary("p1").unwrap();

    assert_eq!(view.sheet_name, "Release Plan");
    assert_eq!(view.structure.column_count, 4);
    assert!(view.insights.iter().any(|i| i.contains("project plan")));
    assert!(view.health.overall_score > 0);
}

#[test]
fn fetch_failure_propagates_for_single_sheet_views() {
    let engine = ReportEngine::new(MemorySource::new().with_failing("down"));
    let err = engine.health_report("down").unwrap_err();
    assert!(err.to_string().contains("down"));
}

#[test]
fn rollup_isolates_per_sheet_failures() {
    let source = MemorySource::new()
        .with_sheet(plan_snapshot("p1"))
        .with_sheet(notes_snapshot("n1"))
        .with_failing("broken")
        .with_workspace(
            "w1",
            vec![
                sheet_ref("p1", "Release Plan"),
                sheet_ref("broken", "Broken Sheet"),
                sheet_ref("n1", "Meeting Notes"),
            ],
        );
    let engine = ReportEngine::new(source);
    let overview = engine.workspace_overview("w1").unwrap();

    assert_eq!(overview.sheet_count, 3);
    assert_eq!(overview.analyzed_sheet_count, 2);
    assert_eq!(overview.sheets.len(), 3);

    let broken = overview
        .sheets
        .iter()
        .find(|s| s.sheet_id == "broken")
        .unwrap();
    assert_eq!(broken.health_score, 0);
    assert_eq!(broken.error.as_deref(), Some("Failed to analyze"));
    assert!(broken.sheet_type.is_none());

    let plan = overview.sheets.iter().find(|s| s.sheet_id == "p1").unwrap();
    assert_eq!(plan.sheet_type.as_deref(), Some("project_plan"));
    let notes = overview.sheets.iter().find(|s| s.sheet_id == "n1").unwrap();
    assert_eq!(notes.sheet_type.as_deref(), Some("grid"));

    // Average is over analyzed sheets only
    let expected = (plan.health_score + notes.health_score + 1) / 2; // rounded mean
    assert!((overview.average_health_score - expected).abs() <= 1);

    assert!(overview
        .recommendations
        .iter()
        .any(|r| r.contains("project plans")));
}

#[test]
fn rollup_bounds_sheet_fan_out() {
    let mut source = MemorySource::new();
    let mut refs = Vec::new();
    for i in 0..15 {
        let id = format!("s{i}");
        source = source.with_sheet(plan_snapshot(&id));
        refs.push(sheet_ref(&id, "Plan"));
    }
    let engine = ReportEngine::new(source.with_workspace("big", refs));
    let overview = engine.workspace_overview("big").unwrap();

    assert_eq!(overview.sheet_count, 15);
    assert_eq!(overview.sheets.len(), MAX_ROLLUP_SHEETS);
    assert_eq!(overview.analyzed_sheet_count, MAX_ROLLUP_SHEETS);
}

#[test]
fn rollup_with_all_failures_averages_to_zero() {
    let source = MemorySource::new()
        .with_failing("a")
        .with_failing("b")
        .with_workspace("w", vec![sheet_ref("a", "A"), sheet_ref("b", "B")]);
    let engine = ReportEngine::new(source);
    let overview = engine.workspace_overview("w").unwrap();

    assert_eq!(overview.analyzed_sheet_count, 0);
    assert_eq!(overview.average_health_score, 0);
    assert!(overview.sheets.iter().all(|s| s.health_score == 0));
}

#[test]
fn views_serialize_to_camel_case_json() {
    let engine = ReportEngine::new(MemorySource::new().with_sheet(plan_snapshot("p1")));
    let view = engine.timeline("p1").unwrap();
    let json = serde_json::to_value(&view).unwrap();

    assert!(json.get("sheetId").is_some());
    assert!(json.get("dependencyBottlenecks").is_some());
    assert!(json["timeline"].get("projectStart").is_some());
    assert!(json["timeline"].get("spanDays").is_some());
}
