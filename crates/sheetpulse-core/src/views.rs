//! Derived view records.
//!
//! Every type here is a JSON-serializable result computed on demand from a
//! `RawSnapshot`. Nothing is persisted; each record lives for one request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Derived Task
// ============================================================================

/// A row reinterpreted as a schedulable unit of work once column roles are
/// resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedTask {
    /// 1-based sequence position of the source row
    pub id: usize,
    /// Task name; rows with blank names never produce a task
    pub name: String,
    /// Start date, when present and parseable
    pub start: Option<NaiveDate>,
    /// End date, when present and parseable
    pub end: Option<NaiveDate>,
    /// Raw duration text, verbatim (e.g. "9d", "0")
    pub duration_raw: Option<String>,
    /// Raw predecessor expression, verbatim (e.g. "3FS, 5SS")
    pub dependencies: Option<String>,
    /// Assignee display text
    pub assignee: Option<String>,
    /// Completion percentage, 0-100
    pub progress: u8,
}

// ============================================================================
// Timeline
// ============================================================================

/// Project timeline synthesized from derived tasks.
///
/// All-null fields with an empty milestone list is the normal result for a
/// sheet carrying no dates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub project_start: Option<NaiveDate>,
    pub project_end: Option<NaiveDate>,
    /// Whole days between the bounds; null iff both bounds are null
    pub span_days: Option<i64>,
    pub milestones: Vec<Milestone>,
}

/// A zero-duration or keyword-flagged task marking a significant timeline
/// point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub milestone_type: MilestoneType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneType {
    ProjectStart,
    Delivery,
    Checkpoint,
    Milestone,
}

// ============================================================================
// Dependencies
// ============================================================================

/// Types of task dependencies, as encoded in predecessor expressions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyType {
    /// Finish-to-Start: successor starts after predecessor finishes
    #[default]
    #[serde(rename = "FS")]
    FinishToStart,
    /// Start-to-Start: successor starts when predecessor starts
    #[serde(rename = "SS")]
    StartToStart,
    /// Finish-to-Finish: successor finishes when predecessor finishes
    #[serde(rename = "FF")]
    FinishToFinish,
    /// Start-to-Finish: successor finishes when predecessor starts
    #[serde(rename = "SF")]
    StartToFinish,
}

/// One task's parsed dependency edge list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDependencies {
    /// 1-based id of the dependent task
    pub task_id: usize,
    pub task_name: String,
    /// Referenced predecessor identifiers, comma-split and trimmed
    pub depends_on: Vec<String>,
    pub dependency_type: DependencyType,
}

/// A task identifier referenced as a dependency by more than two other
/// tasks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyBottleneck {
    pub task_id: String,
    pub blocking_count: usize,
    pub risk_level: RiskLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a blocking count. Boundaries are strict: exactly 2 citations
    /// is still `Low`, exactly 4 is still `Medium`.
    pub fn from_blocking_count(count: usize) -> Self {
        if count > 4 {
            Self::High
        } else if count > 2 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Summary of a sheet's dependency structure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyAnalysis {
    /// True iff at least one task carries dependencies. A coarse existence
    /// flag, not a computed critical path.
    pub has_critical_path: bool,
    pub task_dependencies: Vec<TaskDependencies>,
    pub bottlenecks: Vec<DependencyBottleneck>,
}

// ============================================================================
// Resources
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationLevel {
    Low,
    Medium,
    High,
}

impl UtilizationLevel {
    /// Classify an assignment count. Strict boundaries: 5 tasks is still
    /// `Medium`, 2 is still `Low`.
    pub fn from_task_count(count: usize) -> Self {
        if count > 5 {
            Self::High
        } else if count > 2 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Assignment load for one resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUtilization {
    pub resource: String,
    pub assigned_tasks: usize,
    pub utilization_level: UtilizationLevel,
}

/// Per-resource utilization plus the overallocated subset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceReport {
    pub utilization: Vec<ResourceUtilization>,
    /// Resources at `High` utilization
    pub overallocated: Vec<String>,
}

// ============================================================================
// Health
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

/// Cell completeness and consistency over the whole snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityScore {
    /// filled cells / (columns x rows) x 100
    pub completeness_pct: f64,
    /// Count of unparsable values in date-typed columns
    pub consistency_issues: usize,
    /// Columns with zero non-empty cells
    pub empty_column_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaHealthScore {
    pub formula_column_count: usize,
    pub complexity: Complexity,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceScore {
    pub total_cells: usize,
    pub size_category: SizeCategory,
    pub performance_risk: RiskLevel,
}

/// Structural completeness: which project-plan column roles the sheet
/// actually carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureScore {
    pub is_project_plan: bool,
    pub has_dates: bool,
    pub has_assignments: bool,
    pub has_status: bool,
    /// true-flag count / 4 x 100
    pub completeness_pct: f64,
}

/// The four independent sub-scores feeding the composite.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSubScores {
    pub data_quality: DataQualityScore,
    pub formula_health: FormulaHealthScore,
    pub performance: PerformanceScore,
    pub structure: StructureScore,
}

/// Composite sheet health: a weighted 0-100 score plus human-readable
/// recommendations. Owned transiently per request; never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub overall_score: i64,
    pub sub_scores: HealthSubScores,
    pub recommendations: Vec<String>,
}

// ============================================================================
// Tests
// ============================================================================
