//! Resource utilization analysis.
//!
//! Tallies task assignment counts per resource and flags overallocation.
//! A sheet with no assignees yields an empty report, not an error.

use sheetpulse_core::{DerivedTask, ResourceReport, ResourceUtilization, UtilizationLevel};
use std::collections::HashMap;

/// Aggregate assignment counts per distinct assignee.
pub fn analyze_resources(tasks: &[DerivedTask]) -> ResourceReport {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for task in tasks {
        if let Some(assignee) = &task.assignee {
            *counts.entry(assignee.as_str()).or_default() += 1;
        }
    }

    let mut utilization: Vec<ResourceUtilization> = counts
        .into_iter()
        .map(|(resource, assigned_tasks)| ResourceUtilization {
            resource: resource.to_string(),
            assigned_tasks,
            utilization_level: UtilizationLevel::from_task_count(assigned_tasks),
        })
        .collect();
    // Deterministic output: busiest first, ties by name
    utilization.sort_by(|a, b| {
        b.assigned_tasks
            .cmp(&a.assigned_tasks)
            .then_with(|| a.resource.cmp(&b.resource))
    });

    let overallocated = utilization
        .iter()
        .filter(|u| u.utilization_level == UtilizationLevel::High)
        .map(|u| u.resource.clone())
        .collect();

    ResourceReport {
        utilization,
        overallocated,
    }
}
