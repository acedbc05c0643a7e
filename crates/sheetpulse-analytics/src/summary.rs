//! Structural summary and free-text insights.
//!
//! Mirrors what the upstream column-info call reports (type distribution,
//! picklist options, formula columns) and derives short human-readable
//! observations about how the sheet is being used.

use serde::{Deserialize, Serialize};
use sheetpulse_core::{ColumnRole, ColumnRoleMap, ColumnType, RawSnapshot};

/// Count of columns sharing one declared type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub count: usize,
}

/// A picklist column and the options it constrains input to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicklistColumn {
    pub title: String,
    pub options: Vec<String>,
}

/// Column-level structure of a sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetStructure {
    pub column_count: usize,
    pub row_count: usize,
    pub primary_column: Option<String>,
    /// Declared types in first-appearance order
    pub type_distribution: Vec<TypeCount>,
    pub picklist_columns: Vec<PicklistColumn>,
    pub formula_columns: Vec<String>,
}

/// Summarize the column structure of a snapshot.
pub fn analyze_structure(snapshot: &RawSnapshot) -> SheetStructure {
    let mut type_distribution: Vec<TypeCount> = Vec::new();
    for column in &snapshot.columns {
        match type_distribution
            .iter_mut()
            .find(|tc| tc.column_type == column.column_type)
        {
            Some(entry) => entry.count += 1,
            None => type_distribution.push(TypeCount {
                column_type: column.column_type,
                count: 1,
            }),
        }
    }

    SheetStructure {
        column_count: snapshot.columns.len(),
        row_count: snapshot.row_count,
        primary_column: snapshot
            .columns
            .iter()
            .find(|c| c.is_primary)
            .map(|c| c.title.clone()),
        type_distribution,
        picklist_columns: snapshot
            .columns
            .iter()
            .filter(|c| c.column_type.is_picklist_like() && !c.options.is_empty())
            .map(|c| PicklistColumn {
                title: c.title.clone(),
                options: c.options.clone(),
            })
            .collect(),
        formula_columns: snapshot
            .columns
            .iter()
            .filter(|c| c.column_type == ColumnType::Formula || c.formula.is_some())
            .map(|c| c.title.clone())
            .collect(),
    }
}

/// Short observations about how the sheet is being used.
pub fn build_insights(snapshot: &RawSnapshot, roles: &ColumnRoleMap) -> Vec<String> {
    let mut insights = Vec::new();

    if roles.get(ColumnRole::Start).is_some() && roles.get(ColumnRole::Finish).is_some() {
        insights.push(
            "Sheet is structured as a project plan with start and finish dates".to_string(),
        );
    }

    if snapshot.row_count == 0 {
        insights.push("Sheet has no data rows yet".to_string());
    }

    if let Some(assignee) = roles.get(ColumnRole::Assignee) {
        insights.push(format!("Work assignments are tracked in '{assignee}'"));
    }

    if let Some(largest) = snapshot
        .columns
        .iter()
        .filter(|c| !c.options.is_empty())
        .max_by_key(|c| c.options.len())
    {
        insights.push(format!(
            "Column '{}' constrains input to {} option(s)",
            largest.title,
            largest.options.len()
        ));
    }

    let formula_count = snapshot
        .columns
        .iter()
        .filter(|c| c.column_type == ColumnType::Formula || c.formula.is_some())
        .count();
    if formula_count > 0 {
        insights.push(format!("{formula_count} column(s) are formula-driven"));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_columns;
    use pretty_assertions::assert_eq;
    use sheetpulse_core::ColumnDescriptor;

    fn snapshot() -> RawSnapshot {
        RawSnapshot::new("1", "Plan")
            .column(ColumnDescriptor::new("Task Name", ColumnType::TextNumber).primary())
            .column(ColumnDescriptor::new("Start Date", ColumnType::Date))
            .column(ColumnDescriptor::new("Finish Date", ColumnType::Date))
            .column(
                ColumnDescriptor::new("Status", ColumnType::Picklist)
                    .with_options(["Not Started", "In Progress", "Done"]),
            )
            .column(
                ColumnDescriptor::new("Total", ColumnType::TextNumber)
                    .with_formula("=SUM([A]:[A])"),
            )
    }

    #[test]
    fn structure_counts_types_in_first_appearance_order() {
        let structure = analyze_structure(&snapshot());

        assert_eq!(structure.column_count, 5);
        assert_eq!(structure.primary_column.as_deref(), Some("Task Name"));
        assert_eq!(
            structure.type_distribution,
            vec![
                TypeCount { column_type: ColumnType::TextNumber, count: 2 },
                TypeCount { column_type: ColumnType::Date, count: 2 },
                TypeCount { column_type: ColumnType::Picklist, count: 1 },
            ]
        );
        assert_eq!(structure.picklist_columns.len(), 1);
        assert_eq!(structure.picklist_columns[0].options.len(), 3);
        assert_eq!(structure.formula_columns, vec!["Total".to_string()]);
    }

    #[test]
    fn insights_mention_project_plan_and_formulas() {
        let snapshot = snapshot();
        let roles = classify_columns(&snapshot.columns);
        let insights = build_insights(&snapshot, &roles);

        assert!(insights.iter().any(|i| i.contains("project plan")));
        assert!(insights.iter().any(|i| i.contains("formula-driven")));
        assert!(insights.iter().any(|i| i.contains("3 option(s)")));
        assert!(insights.iter().any(|i| i.contains("no data rows")));
    }

    #[test]
    fn bare_sheet_yields_few_insights() {
        let mut bare = RawSnapshot::new("2", "Notes")
            .column(ColumnDescriptor::new("Text", ColumnType::TextNumber));
        bare.row_count = 5;
        let roles = classify_columns(&bare.columns);
        assert!(build_insights(&bare, &roles).is_empty());
    }
}
