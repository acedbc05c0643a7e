//! # sheetpulse-analytics
//!
//! Pure, stateless transformations from a raw sheet snapshot to each derived
//! analytical view.
//!
//! This crate provides:
//! - Column role classification (`classify`)
//! - Row-to-task projection (`project`)
//! - Timeline and milestone synthesis (`timeline`)
//! - Dependency bottleneck analysis (`deps`)
//! - Resource utilization analysis (`resource`)
//! - Health sub-scores and the composite health score (`health`)
//! - Structural summary and free-text insights (`summary`)
//!
//! Every function here is a single pass over an already-fetched in-memory
//! snapshot: no I/O, no shared state, no locking. The stages are chained by
//! the caller and each stage is testable in isolation.
//!
//! ## Example
//!
//! ```rust
//! use sheetpulse_core::{CellValue, ColumnDescriptor, ColumnType, RawSnapshot};
//! use sheetpulse_analytics::{classify, project, timeline};
//!
//! let snapshot = RawSnapshot::new("1", "Plan")
//!     .column(ColumnDescriptor::new("Task Name", ColumnType::TextNumber).primary())
//!     .column(ColumnDescriptor::new("Start", ColumnType::Date))
//!     .row([
//!         ("Task Name", CellValue::text("Kickoff")),
//!         ("Start", CellValue::text("2024-01-01")),
//!     ]);
//!
//! let roles = classify::classify_columns(&snapshot.columns);
//! let tasks = project::project_tasks(&snapshot, &roles);
//! let timeline = timeline::synthesize(&tasks);
//! assert_eq!(timeline.milestones.len(), 1);
//! ```

pub mod classify;
pub mod dates;
pub mod deps;
pub mod health;
pub mod project;
pub mod resource;
pub mod summary;
pub mod timeline;

pub use classify::classify_columns;
pub use deps::analyze_dependencies;
pub use health::score_health;
pub use project::project_tasks;
pub use resource::analyze_resources;
pub use summary::{analyze_structure, build_insights, PicklistColumn, SheetStructure, TypeCount};
pub use timeline::synthesize;
