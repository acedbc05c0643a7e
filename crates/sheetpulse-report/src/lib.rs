//! # sheetpulse-report
//!
//! View operations over the analytics pipeline.
//!
//! This crate provides:
//! - `SheetSource`: the opaque data-fetch boundary
//! - `ReportEngine`: the five read-only view operations (`summary`,
//!   `timeline`, `dependency_map`, `health_report`, `workspace_overview`)
//! - `JsonFileSource`: a file-backed source for the CLI and tests
//!
//! A view request triggers exactly one fetch per sheet; everything after the
//! fetch is pure and synchronous. The workspace rollup fans sheet analyses
//! out in parallel and isolates per-sheet failures.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sheetpulse_report::{JsonFileSource, ReportEngine};
//!
//! let engine = ReportEngine::new(JsonFileSource::new("./snapshots"));
//! let health = engine.health_report("4583173393803140")?;
//! println!("{}", serde_json::to_string_pretty(&health)?);
//! ```

pub mod ops;
pub mod rollup;
pub mod source;

pub use ops::{
    DependencyMapView, HealthView, ReportEngine, SummaryView, TimelineView,
    NO_DEPENDENCY_COLUMN, NO_TASK_COLUMN,
};
pub use rollup::{WorkspaceOverview, WorkspaceSheetEntry, MAX_ROLLUP_SHEETS};
pub use source::{JsonFileSource, SheetSource};
