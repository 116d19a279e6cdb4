//! Float computation and critical-path classification.

use crate::backward_pass::LateTimes;
use crate::config::EngineConfig;
use crate::forward_pass::EarlyTimes;
use crate::graph::ActivityGraph;
use crate::models::{ActivityTiming, DependencyKind};

/// Classification of one computed schedule, indexed like the graph.
///
/// `critical` and `near_critical` hold activity indices in topological
/// order; that order is the contract for every list surfaced to callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub timings: Vec<ActivityTiming>,
    /// Zero-float activities.
    pub critical: Vec<usize>,
    /// Activities with 0 < total float <= the configured threshold.
    pub near_critical: Vec<usize>,
    /// Sum of total float across all activities.
    pub total_float_days: i64,
}

/// Derive floats and critical/near-critical tags from the two passes.
pub fn classify(
    graph: &ActivityGraph,
    order: &[usize],
    early: &[EarlyTimes],
    late: &[LateTimes],
    project_duration: i64,
    config: &EngineConfig,
) -> Classification {
    let mut timings = vec![ActivityTiming::default(); graph.len()];
    let mut total_float_days = 0;

    for idx in 0..graph.len() {
        let total_float = late[idx].start - early[idx].start;
        timings[idx] = ActivityTiming {
            early_start: early[idx].start,
            early_finish: early[idx].finish,
            late_start: late[idx].start,
            late_finish: late[idx].finish,
            total_float,
            free_float: free_float(graph, early, idx, project_duration),
            is_critical: total_float == 0,
        };
        total_float_days += total_float;
    }

    let mut critical = Vec::new();
    let mut near_critical = Vec::new();
    for &idx in order {
        let float = timings[idx].total_float;
        if float == 0 {
            critical.push(idx);
        } else if float <= config.near_critical_threshold_days {
            near_critical.push(idx);
        }
    }

    Classification {
        timings,
        critical,
        near_critical,
        total_float_days,
    }
}

/// Headroom before slipping delays any immediate successor's early dates.
fn free_float(
    graph: &ActivityGraph,
    early: &[EarlyTimes],
    idx: usize,
    project_duration: i64,
) -> i64 {
    let own = early[idx];
    let mut float: Option<i64> = None;
    for edge in graph.successors(idx) {
        let succ = early[edge.other];
        let headroom = match edge.kind {
            DependencyKind::FinishToStart => succ.start - (own.finish + edge.lag_days),
            DependencyKind::StartToStart => succ.start - (own.start + edge.lag_days),
            DependencyKind::FinishToFinish => succ.finish - (own.finish + edge.lag_days),
            DependencyKind::StartToFinish => succ.finish - (own.start + edge.lag_days),
        };
        float = Some(float.map_or(headroom, |f| f.min(headroom)));
    }
    float.unwrap_or(project_duration - own.finish)
}
