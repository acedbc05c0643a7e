//! # sheetpulse-core
//!
//! Core data model for the sheetpulse analytics engine.
//!
//! This crate provides:
//! - Snapshot types: `RawSnapshot`, `ColumnDescriptor`, `CellValue`
//! - Role inference types: `ColumnRole`, `ColumnRoleMap`
//! - Derived view records: `DerivedTask`, `Timeline`, `HealthReport`, ...
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```rust
//! use sheetpulse_core::{CellValue, ColumnDescriptor, ColumnType, RawSnapshot};
//!
//! let snapshot = RawSnapshot::new("12345", "Release Plan")
//!     .column(ColumnDescriptor::new("Task Name", ColumnType::TextNumber).primary())
//!     .column(ColumnDescriptor::new("Start", ColumnType::Date))
//!     .row([("Task Name", CellValue::text("Build API"))]);
//! assert_eq!(snapshot.row_count, 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub mod views;

pub use views::*;

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for a sheet (opaque, assigned by the upstream service)
pub type SheetId = String;

/// Unique identifier for a workspace
pub type WorkspaceId = String;

// ============================================================================
// Column Model
// ============================================================================

/// Declared column type as reported by the upstream sheet service.
///
/// `Formula` is an *effective* type: the upstream service reports the base
/// type separately, but a column driven by a column formula behaves like a
/// formula column for every analytics purpose, so the fetch layer collapses
/// it here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    TextNumber,
    Date,
    Datetime,
    AbstractDatetime,
    ContactList,
    MultiContactList,
    Picklist,
    MultiPicklist,
    Checkbox,
    Duration,
    Predecessor,
    Formula,
    #[serde(other)]
    Unknown,
}

impl ColumnType {
    /// Date, datetime, or the project date-range type.
    pub fn is_date_like(self) -> bool {
        matches!(self, Self::Date | Self::Datetime | Self::AbstractDatetime)
    }

    /// Single or multi contact reference.
    pub fn is_contact_like(self) -> bool {
        matches!(self, Self::ContactList | Self::MultiContactList)
    }

    /// Single or multi picklist.
    pub fn is_picklist_like(self) -> bool {
        matches!(self, Self::Picklist | Self::MultiPicklist)
    }
}

/// Metadata for one column of a sheet. Source of truth for role inference;
/// immutable per snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Column title, unique within a sheet
    pub title: String,
    /// Declared (effective) column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Is this the sheet's primary column?
    #[serde(default)]
    pub is_primary: bool,
    /// Picklist options, when the upstream service reports them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Column formula, when the column is formula-driven
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl ColumnDescriptor {
    /// Create a descriptor with the given title and type
    pub fn new(title: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            title: title.into(),
            column_type,
            is_primary: false,
            options: Vec::new(),
            formula: None,
        }
    }

    /// Mark as the primary column
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Set picklist options
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Set the column formula
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }
}

// ============================================================================
// Cell Values
// ============================================================================

/// An untyped cell value as delivered by the upstream service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Convenience constructor for text cells
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// String form of the cell, if it carries one. Numbers and booleans are
    /// rendered; `Null` is not.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Text(s) => Some(s.clone()),
        }
    }

    /// Numeric form of the cell, if it parses as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Null, or text that is empty/whitespace-only.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Null
    }
}

/// Render a float without a trailing `.0` when it is integral, matching how
/// the upstream service displays numeric cells.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// A fetched, immutable point-in-time view of a sheet's columns and rows.
///
/// Cell values are keyed by column title. The analytics pipeline never
/// mutates a snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    /// Sheet identifier
    pub sheet_id: SheetId,
    /// Human-readable sheet name
    pub sheet_name: String,
    /// Columns in declaration order
    pub columns: Vec<ColumnDescriptor>,
    /// Rows as title -> cell value mappings
    pub rows: Vec<HashMap<String, CellValue>>,
    /// Total row count as reported upstream (equals `rows.len()` unless the
    /// fetch was truncated)
    pub row_count: usize,
    /// Last modification timestamp, verbatim from the upstream service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

impl RawSnapshot {
    /// Create an empty snapshot
    pub fn new(sheet_id: impl Into<String>, sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            sheet_name: sheet_name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            row_count: 0,
            modified_at: None,
        }
    }

    /// Add a column (builder pattern)
    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a row from (title, value) pairs (builder pattern)
    pub fn row<'a, I>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, CellValue)>,
    {
        self.rows.push(
            cells
                .into_iter()
                .map(|(title, value)| (title.to_string(), value))
                .collect(),
        );
        self.row_count = self.rows.len();
        self
    }

    /// Look up a cell by row index and column title
    pub fn cell(&self, row: usize, title: &str) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(title))
    }

    /// Find a column descriptor by title
    pub fn find_column(&self, title: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.title == title)
    }
}

/// A `{sheetId, name}` pair as returned by the workspace listing call.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRef {
    pub sheet_id: SheetId,
    pub name: String,
}

// ============================================================================
// Column Roles
// ============================================================================

/// Semantic role a column can play in a project-plan sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnRole {
    TaskName,
    Start,
    Finish,
    Duration,
    Predecessor,
    Assignee,
    Status,
}

/// Ephemeral mapping from semantic role to at most one column title.
///
/// Computed once per request and discarded; two roles never share a column
/// claim for the same role (first match in declaration order wins).
#[derive(Clone, Debug, Default, Serialize)]
pub struct ColumnRoleMap {
    roles: HashMap<ColumnRole, String>,
}

impl ColumnRoleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a role assignment. The first assignment for a role wins;
    /// later calls for the same role are ignored.
    pub fn assign(&mut self, role: ColumnRole, title: impl Into<String>) {
        self.roles.entry(role).or_insert_with(|| title.into());
    }

    /// Column title resolved for a role, if any
    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        self.roles.get(&role).map(String::as_str)
    }

    /// Does this sheet have a task-name column?
    pub fn has_task_name(&self) -> bool {
        self.roles.contains_key(&ColumnRole::TaskName)
    }

    /// Number of resolved roles
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Analytics error
///
/// Only genuine failures live here. A sheet without a task-name column or
/// without dependencies is a normal, explainable result, not an error.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("failed to fetch sheet {sheet_id}: {message}")]
    SheetFetch { sheet_id: SheetId, message: String },

    #[error("failed to fetch workspace {workspace_id}: {message}")]
    WorkspaceFetch {
        workspace_id: WorkspaceId,
        message: String,
    },

    #[error("malformed snapshot for sheet {sheet_id}: {message}")]
    MalformedSnapshot { sheet_id: SheetId, message: String },
}

impl AnalyticsError {
    /// Fetch failure for a sheet
    pub fn fetch(sheet_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SheetFetch {
            sheet_id: sheet_id.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the workspace
pub type Result<T> = std::result::Result<T, AnalyticsError>;

// ============================================================================
// Tests
// ============================================================================
