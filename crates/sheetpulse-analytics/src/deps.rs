//! Dependency bottleneck analysis.
//!
//! Parses raw predecessor expressions, tallies how often each referenced
//! identifier is cited across tasks, and reports the heavily-cited ones as
//! bottlenecks. This is a best-effort heuristic over the citation counts,
//! not a scheduling engine: `has_critical_path` only records that
//! dependencies exist at all.

use sheetpulse_core::{
    DependencyAnalysis, DependencyBottleneck, DependencyType, DerivedTask, RiskLevel,
    TaskDependencies,
};
use std::collections::HashMap;

/// Referenced identifiers cited more than this many times become bottlenecks.
const BOTTLENECK_THRESHOLD: usize = 2;

/// Analyze the dependency structure of a task list.
pub fn analyze_dependencies(tasks: &[DerivedTask]) -> DependencyAnalysis {
    let mut task_dependencies = Vec::new();
    let mut citations: HashMap<String, usize> = HashMap::new();

    for task in tasks {
        let Some(raw) = &task.dependencies else {
            continue;
        };

        let depends_on: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if depends_on.is_empty() {
            continue;
        }

        for reference in &depends_on {
            *citations.entry(reference.clone()).or_default() += 1;
        }

        task_dependencies.push(TaskDependencies {
            task_id: task.id,
            task_name: task.name.clone(),
            depends_on,
            dependency_type: infer_dependency_type(raw),
        });
    }

    let mut bottlenecks: Vec<DependencyBottleneck> = citations
        .into_iter()
        .filter(|(_, count)| *count > BOTTLENECK_THRESHOLD)
        .map(|(task_id, blocking_count)| DependencyBottleneck {
            task_id,
            blocking_count,
            risk_level: RiskLevel::from_blocking_count(blocking_count),
        })
        .collect();
    // Deterministic output: heaviest blockers first, ties by id
    bottlenecks.sort_by(|a, b| {
        b.blocking_count
            .cmp(&a.blocking_count)
            .then_with(|| a.task_id.cmp(&b.task_id))
    });

    DependencyAnalysis {
        has_critical_path: !task_dependencies.is_empty(),
        task_dependencies,
        bottlenecks,
    }
}

/// Infer the dependency type from markers in the raw predecessor text.
/// The non-default markers are checked first; anything else (including an
/// explicit "FS") is finish-to-start.
fn infer_dependency_type(raw: &str) -> DependencyType {
    if raw.contains("SS") {
        DependencyType::StartToStart
    } else if raw.contains("FF") {
        DependencyType::FinishToFinish
    } else if raw.contains("SF") {
        DependencyType::StartToFinish
    } else {
        DependencyType::FinishToStart
    }
}
