//! Health sub-scorers and the composite health aggregator.
//!
//! Four independent sub-scorers run over the same snapshot (data quality,
//! formula health, performance, structure); the aggregator combines them
//! with fixed weights into a single score plus recommendations.
//!
//! The data-quality contribution is intentionally not normalized before
//! weighting: with zero consistency issues and high completeness it exceeds
//! 100, which biases the composite toward rewarding clean sheets. Changing
//! that shape would silently change every score, so it is preserved as-is.

use sheetpulse_core::{
    ColumnType, Complexity, DataQualityScore, FormulaHealthScore, HealthReport,
    HealthSubScores, PerformanceScore, RawSnapshot, RiskLevel, SizeCategory, StructureScore,
};

use crate::dates::parse_date;

const WEIGHT_DATA_QUALITY: f64 = 0.4;
const WEIGHT_FORMULA_HEALTH: f64 = 0.2;
const WEIGHT_PERFORMANCE: f64 = 0.2;
const WEIGHT_STRUCTURE: f64 = 0.2;

/// Cell completeness and consistency over the whole snapshot.
///
/// Completeness is measured against the upstream `row_count`, the same
/// denominator the performance scorer uses, so a truncated fetch scores the
/// rows it could not see as empty.
pub fn score_data_quality(snapshot: &RawSnapshot) -> DataQualityScore {
    let total_cells = snapshot.columns.len() * snapshot.row_count;

    let mut filled = 0usize;
    let mut consistency_issues = 0usize;
    let mut empty_column_count = 0usize;

    for column in &snapshot.columns {
        let mut column_filled = 0usize;
        for row in &snapshot.rows {
            let Some(cell) = row.get(&column.title) else {
                continue;
            };
            if cell.is_empty() {
                continue;
            }
            column_filled += 1;

            // Unparsable values in date-typed columns are consistency issues
            if column.column_type.is_date_like() {
                let parsable = cell
                    .as_text()
                    .is_some_and(|text| parse_date(&text).is_some());
                if !parsable {
                    consistency_issues += 1;
                }
            }
        }
        if column_filled == 0 {
            empty_column_count += 1;
        }
        filled += column_filled;
    }

    let completeness_pct = if total_cells == 0 {
        0.0
    } else {
        filled as f64 / total_cells as f64 * 100.0
    };

    DataQualityScore {
        completeness_pct,
        consistency_issues,
        empty_column_count,
    }
}

/// Count of formula-driven columns and a coarse complexity bucket.
pub fn score_formula_health(snapshot: &RawSnapshot) -> FormulaHealthScore {
    let formula_column_count = snapshot
        .columns
        .iter()
        .filter(|c| c.column_type == ColumnType::Formula || c.formula.is_some())
        .count();

    let complexity = if formula_column_count > 5 {
        Complexity::High
    } else if formula_column_count > 2 {
        Complexity::Medium
    } else {
        Complexity::Low
    };

    FormulaHealthScore {
        formula_column_count,
        complexity,
    }
}

/// Sheet size and the risk it poses to interactive use.
pub fn score_performance(snapshot: &RawSnapshot) -> PerformanceScore {
    let total_cells = snapshot.row_count * snapshot.columns.len();

    let size_category = if total_cells > 50_000 {
        SizeCategory::Large
    } else if total_cells > 10_000 {
        SizeCategory::Medium
    } else {
        SizeCategory::Small
    };

    let performance_risk = if total_cells > 100_000 {
        RiskLevel::High
    } else if total_cells > 50_000 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    PerformanceScore {
        total_cells,
        size_category,
        performance_risk,
    }
}

/// Structural completeness: which project-plan column kinds the sheet
/// carries. Driven by declared types, not by resolved roles, so it works
/// even for sheets the classifier cannot tag.
pub fn score_structure(snapshot: &RawSnapshot) -> StructureScore {
    let is_project_plan = snapshot
        .columns
        .iter()
        .any(|c| c.column_type == ColumnType::Predecessor);
    let has_dates = snapshot.columns.iter().any(|c| c.column_type.is_date_like());
    let has_assignments = snapshot
        .columns
        .iter()
        .any(|c| c.column_type.is_contact_like());
    let has_status = snapshot
        .columns
        .iter()
        .any(|c| c.column_type.is_picklist_like());

    let flags = [is_project_plan, has_dates, has_assignments, has_status];
    let completeness_pct = flags.iter().filter(|f| **f).count() as f64 / 4.0 * 100.0;

    StructureScore {
        is_project_plan,
        has_dates,
        has_assignments,
        has_status,
        completeness_pct,
    }
}

/// Run all four sub-scorers and aggregate the composite health report.
pub fn score_health(snapshot: &RawSnapshot) -> HealthReport {
    let data_quality = score_data_quality(snapshot);
    let formula_health = score_formula_health(snapshot);
    let performance = score_performance(snapshot);
    let structure = score_structure(snapshot);

    // Unnormalized by design: can exceed 100 when the sheet is clean,
    // and go negative past ten consistency issues.
    let data_quality_value = data_quality.completeness_pct * 0.8
        + (100.0 - data_quality.consistency_issues as f64 * 10.0);
    let formula_value = if formula_health.formula_column_count > 0 {
        80.0
    } else {
        100.0
    };
    let performance_value = match performance.performance_risk {
        RiskLevel::Low => 100.0,
        RiskLevel::Medium => 70.0,
        RiskLevel::High => 40.0,
    };
    let structure_value = structure.completeness_pct;

    // No clamp: the reference behavior leaves the sum to natural arithmetic
    let overall_score = (data_quality_value * WEIGHT_DATA_QUALITY
        + formula_value * WEIGHT_FORMULA_HEALTH
        + performance_value * WEIGHT_PERFORMANCE
        + structure_value * WEIGHT_STRUCTURE)
        .round() as i64;

    let recommendations = build_recommendations(
        &data_quality,
        &formula_health,
        &performance,
        &structure,
    );

    HealthReport {
        overall_score,
        sub_scores: HealthSubScores {
            data_quality,
            formula_health,
            performance,
            structure,
        },
        recommendations,
    }
}

/// Independent string facts; each condition appends its own recommendation.
fn build_recommendations(
    data_quality: &DataQualityScore,
    formula_health: &FormulaHealthScore,
    performance: &PerformanceScore,
    structure: &StructureScore,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if data_quality.completeness_pct < 70.0 {
        recommendations.push(
            "Improve data completeness - many cells are empty".to_string(),
        );
    }
    if data_quality.empty_column_count > 0 {
        recommendations.push(format!(
            "Remove or populate {} empty column(s)",
            data_quality.empty_column_count
        ));
    }
    if performance.performance_risk == RiskLevel::High {
        recommendations.push(
            "Consider archiving old rows - sheet size may degrade performance".to_string(),
        );
    }
    if !structure.has_status {
        recommendations.push("Add a status column to track work progress".to_string());
    }
    if formula_health.complexity == Complexity::High {
        recommendations
            .push("Simplify formula usage - many columns are formula-driven".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetpulse_core::{CellValue, ColumnDescriptor, ColumnType};

    fn clean_plan() -> RawSnapshot {
        RawSnapshot::new("1", "Plan")
            .column(ColumnDescriptor::new("Task Name", ColumnType::TextNumber).primary())
            .column(ColumnDescriptor::new("Start", ColumnType::Date))
            .column(ColumnDescriptor::new("Finish", ColumnType::Date))
            .column(ColumnDescriptor::new("Predecessors", ColumnType::Predecessor))
            .column(ColumnDescriptor::new("Owner", ColumnType::ContactList))
            .column(ColumnDescriptor::new("Status", ColumnType::Picklist))
            .row([
                ("Task Name", CellValue::text("Build API")),
                ("Start", CellValue::text("2024-01-01")),
                ("Finish", CellValue::text("2024-01-10")),
                ("Predecessors", CellValue::text("2")),
                ("Owner", CellValue::text("amy")),
                ("Status", CellValue::text("In Progress")),
            ])
    }

    #[test]
    fn data_quality_of_full_sheet() {
        let score = score_data_quality(&clean_plan());
        assert_eq!(score.completeness_pct, 100.0);
        assert_eq!(score.consistency_issues, 0);
        assert_eq!(score.empty_column_count, 0);
    }

    #[test]
    fn malformed_date_counts_as_consistency_issue() {
        let snapshot = RawSnapshot::new("1", "Plan")
            .column(ColumnDescriptor::new("Start", ColumnType::Date))
            .row([("Start", CellValue::text("not a date"))])
            .row([("Start", CellValue::text("2024-02-01"))]);
        let score = score_data_quality(&snapshot);
        assert_eq!(score.consistency_issues, 1);
    }

    #[test]
    fn empty_column_detection() {
        let snapshot = RawSnapshot::new("1", "Plan")
            .column(ColumnDescriptor::new("A", ColumnType::TextNumber))
            .column(ColumnDescriptor::new("B", ColumnType::TextNumber))
            .row([("A", CellValue::text("x")), ("B", CellValue::Null)])
            .row([("A", CellValue::text("y"))]);
        let score = score_data_quality(&snapshot);
        assert_eq!(score.empty_column_count, 1);
        assert_eq!(score.completeness_pct, 50.0);
    }

    #[test]
    fn completeness_denominator_is_the_upstream_row_count() {
        // Truncated fetch: upstream reports 4 rows, one was fetched.
        let mut snapshot = RawSnapshot::new("1", "Plan")
            .column(ColumnDescriptor::new("A", ColumnType::TextNumber))
            .row([("A", CellValue::text("x"))]);
        snapshot.row_count = 4;
        let score = score_data_quality(&snapshot);
        assert_eq!(score.completeness_pct, 25.0);
    }

    #[test]
    fn formula_complexity_buckets() {
        let mut snapshot = RawSnapshot::new("1", "Calc");
        for i in 0..6 {
            snapshot = snapshot.column(
                ColumnDescriptor::new(format!("F{i}"), ColumnType::Formula),
            );
        }
        let score = score_formula_health(&snapshot);
        assert_eq!(score.formula_column_count, 6);
        assert_eq!(score.complexity, Complexity::High);

        let plain = score_formula_health(&clean_plan());
        assert_eq!(plain.formula_column_count, 0);
        assert_eq!(plain.complexity, Complexity::Low);
    }

    #[test]
    fn declared_formula_string_counts() {
        let snapshot = RawSnapshot::new("1", "Calc").column(
            ColumnDescriptor::new("Total", ColumnType::TextNumber)
                .with_formula("=SUM([Amount]:[Amount])"),
        );
        assert_eq!(score_formula_health(&snapshot).formula_column_count, 1);
    }

    #[test]
    fn performance_thresholds() {
        let mut snapshot = RawSnapshot::new("1", "Big")
            .column(ColumnDescriptor::new("A", ColumnType::TextNumber));
        snapshot.row_count = 9_000;
        assert_eq!(
            score_performance(&snapshot).size_category,
            SizeCategory::Small
        );

        snapshot.row_count = 60_000;
        let score = score_performance(&snapshot);
        assert_eq!(score.size_category, SizeCategory::Large);
        assert_eq!(score.performance_risk, RiskLevel::Medium);

        snapshot.row_count = 120_000;
        assert_eq!(
            score_performance(&snapshot).performance_risk,
            RiskLevel::High
        );
    }

    #[test]
    fn structure_flags_and_completeness() {
        let score = score_structure(&clean_plan());
        assert!(score.is_project_plan);
        assert!(score.has_dates);
        assert!(score.has_assignments);
        assert!(score.has_status);
        assert_eq!(score.completeness_pct, 100.0);

        let bare = RawSnapshot::new("1", "Notes")
            .column(ColumnDescriptor::new("Text", ColumnType::TextNumber));
        let score = score_structure(&bare);
        assert!(!score.is_project_plan);
        assert_eq!(score.completeness_pct, 0.0);
    }

    #[test]
    fn composite_score_of_clean_plan_exceeds_100() {
        // completeness 100 -> dq value 180; everything else maxed.
        // 180*0.4 + 100*0.2 + 100*0.2 + 100*0.2 = 132, deliberately unclamped.
        let report = score_health(&clean_plan());
        assert_eq!(report.overall_score, 132);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn composite_score_is_deterministic() {
        let snapshot = clean_plan();
        let first = score_health(&snapshot);
        let second = score_health(&snapshot);
        assert_eq!(first.overall_score, second.overall_score);
        assert_eq!(first, second);
    }

    #[test]
    fn recommendations_are_independent_facts() {
        // Empty column + no status tracking + low completeness
        let snapshot = RawSnapshot::new("1", "Messy")
            .column(ColumnDescriptor::new("A", ColumnType::TextNumber))
            .column(ColumnDescriptor::new("B", ColumnType::TextNumber))
            .row([("A", CellValue::text("x"))])
            .row([("A", CellValue::Null)]);
        let report = score_health(&snapshot);

        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("completeness")));
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("empty column")));
        assert!(report.recommendations.iter().any(|r| r.contains("status")));
        assert_eq!(report.recommendations.len(), 3);
    }
}
