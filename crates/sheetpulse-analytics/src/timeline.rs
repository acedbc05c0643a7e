//! Timeline and milestone synthesis.
//!
//! Aggregates derived tasks into a project timeline (earliest and latest
//! date, span in days) and a milestone list. A sheet carrying no dates at
//! all yields an all-null timeline with no milestones, which is a normal
//! result, not an error.

use sheetpulse_core::{DerivedTask, Milestone, MilestoneType, Timeline};

use crate::dates::leading_number;

/// Synthesize the project timeline from derived tasks.
///
/// The bounds are the envelope of every date the tasks carry, start or end.
/// Invariants: `project_start <= project_end` whenever any date exists, the
/// span is non-negative, and the span is null iff both bounds are null.
pub fn synthesize(tasks: &[DerivedTask]) -> Timeline {
    let dates = || tasks.iter().flat_map(|t| [t.start, t.end]).flatten();
    let project_start = dates().min();
    let project_end = dates().max();

    let span_days = match (project_start, project_end) {
        (Some(start), Some(end)) => Some((end - start).num_days()),
        _ => None,
    };

    let milestones = tasks
        .iter()
        .filter(|t| is_milestone(t))
        .map(|t| Milestone {
            name: t.name.clone(),
            date: t.start.or(t.end),
            milestone_type: milestone_type(&t.name),
        })
        .collect();

    Timeline {
        project_start,
        project_end,
        span_days,
        milestones,
    }
}

/// A task is a milestone when its duration is zero or its name carries a
/// milestone keyword.
fn is_milestone(task: &DerivedTask) -> bool {
    if let Some(raw) = &task.duration_raw {
        if raw.trim() == "0" || leading_number(raw) == Some(0.0) {
            return true;
        }
    }

    let name = task.name.to_lowercase();
    ["milestone", "kickoff", "delivery", "launch"]
        .iter()
        .any(|keyword| name.contains(keyword))
}

/// Milestone kind from name keywords, checked in priority order.
fn milestone_type(name: &str) -> MilestoneType {
    let name = name.to_lowercase();
    if name.contains("kickoff") || name.contains("start") {
        MilestoneType::ProjectStart
    } else if name.contains("delivery") || name.contains("launch") || name.contains("go-live") {
        MilestoneType::Delivery
    } else if name.contains("review") || name.contains("approval") {
        MilestoneType::Checkpoint
    } else {
        MilestoneType::Milestone
    }
}
