//! Backward pass: latest start/finish propagation without delaying the project.

use crate::forward_pass::EarlyTimes;
use crate::graph::ActivityGraph;
use crate::log_activities;
use crate::models::DependencyKind;

/// Latest start/finish pair for one activity, in days from project start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LateTimes {
    pub start: i64,
    pub finish: i64,
}

/// Result of the backward pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackwardPassResult {
    pub late: Vec<LateTimes>,
    /// Maximum early finish across all activities (0 for an empty project).
    pub project_duration: i64,
}

/// Compute latest times for every activity, traversing `order` in reverse.
///
/// Latest finish starts at project completion and is only tightened by
/// successor constraints, so no activity's window can extend past the
/// project end even through start-to-start or finish-to-finish edges.
pub fn backward_pass(
    graph: &ActivityGraph,
    order: &[usize],
    early: &[EarlyTimes],
    verbosity: u8,
) -> BackwardPassResult {
    let project_duration = early.iter().map(|e| e.finish).max().unwrap_or(0);
    let mut late = vec![LateTimes::default(); graph.len()];

    for &idx in order.iter().rev() {
        let duration = graph.activity(idx).duration_days;

        let mut finish = project_duration;
        for edge in graph.successors(idx) {
            let succ = late[edge.other];
            let candidate = match edge.kind {
                DependencyKind::FinishToStart => succ.start - edge.lag_days,
                DependencyKind::StartToStart => succ.start - edge.lag_days + duration,
                DependencyKind::FinishToFinish => succ.finish - edge.lag_days,
                DependencyKind::StartToFinish => succ.finish - edge.lag_days + duration,
            };
            finish = finish.min(candidate);
        }

        late[idx] = LateTimes {
            start: finish - duration,
            finish,
        };
        log_activities!(
            verbosity,
            "backward: {} LS={} LF={}",
            graph.activity(idx).code,
            finish - duration,
            finish
        );
    }

    BackwardPassResult {
        late,
        project_duration,
    }
}
