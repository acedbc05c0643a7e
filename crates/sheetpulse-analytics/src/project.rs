//! Row-to-task projection.
//!
//! Converts raw rows into `DerivedTask` records using the resolved column
//! roles. A row whose task name is blank or whitespace-only does not
//! represent real work and is excluded from the task sequence entirely.

use sheetpulse_core::{
    CellValue, ColumnDescriptor, ColumnRole, ColumnRoleMap, DerivedTask, RawSnapshot,
};
use std::collections::HashMap;

use crate::dates::parse_date;

/// Project every row of a snapshot into derived tasks.
///
/// Returns an empty list when no task-name role resolved; callers surface
/// that case with an explicit message rather than an error.
pub fn project_tasks(snapshot: &RawSnapshot, roles: &ColumnRoleMap) -> Vec<DerivedTask> {
    let Some(name_column) = roles.get(ColumnRole::TaskName) else {
        return Vec::new();
    };

    snapshot
        .rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            project_row(index + 1, row, &snapshot.columns, name_column, roles)
        })
        .collect()
}

/// Project one row. `id` is the 1-based position of the source row, so task
/// ids stay stable when blank rows are skipped (predecessor expressions
/// reference row positions).
fn project_row(
    id: usize,
    row: &HashMap<String, CellValue>,
    columns: &[ColumnDescriptor],
    name_column: &str,
    roles: &ColumnRoleMap,
) -> Option<DerivedTask> {
    let name = cell_text(row, Some(name_column))?;

    Some(DerivedTask {
        id,
        name,
        start: cell_text(row, roles.get(ColumnRole::Start))
            .and_then(|text| parse_date(&text)),
        end: cell_text(row, roles.get(ColumnRole::Finish))
            .and_then(|text| parse_date(&text)),
        duration_raw: cell_text(row, roles.get(ColumnRole::Duration)),
        dependencies: cell_text(row, roles.get(ColumnRole::Predecessor)),
        assignee: cell_text(row, roles.get(ColumnRole::Assignee)),
        progress: read_progress(row, columns),
    })
}

/// Non-empty trimmed text of the cell under `title`, if the row has one.
fn cell_text(row: &HashMap<String, CellValue>, title: Option<&str>) -> Option<String> {
    let cell = row.get(title?)?;
    let text = cell.as_text()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read completion progress from any column whose title mentions progress or
/// completion. `"75%"` -> 75; a bare number at most 1 is a fraction
/// (`0.5` -> 50); other numbers are used as-is; no such column -> 0.
///
/// Columns are scanned in declaration order so the result is deterministic
/// when a sheet carries more than one progress-like column.
fn read_progress(row: &HashMap<String, CellValue>, columns: &[ColumnDescriptor]) -> u8 {
    for column in columns {
        let lowered = column.title.to_lowercase();
        if !lowered.contains("progress") && !lowered.contains("complete") {
            continue;
        }
        let Some(cell) = row.get(&column.title) else {
            continue;
        };
        if cell.is_empty() {
            continue;
        }

        let value = match cell {
            CellValue::Text(text) if text.contains('%') => {
                match text.trim().trim_end_matches('%').trim().parse::<f64>() {
                    Ok(v) => v,
                    Err(_) => continue,
                }
            }
            other => match other.as_number() {
                Some(v) if v <= 1.0 => v * 100.0,
                Some(v) => v,
                None => continue,
            },
        };

        return value.round().clamp(0.0, 100.0) as u8;
    }
    0
}
