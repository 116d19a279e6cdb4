//! Forward pass: earliest start/finish propagation through the graph.

use crate::graph::ActivityGraph;
use crate::log_activities;
use crate::models::DependencyKind;

/// Earliest start/finish pair for one activity, in days from project start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EarlyTimes {
    pub start: i64,
    pub finish: i64,
}

/// Compute earliest times for every activity.
///
/// `order` must be a topological order of `graph`, so every predecessor is
/// resolved before its successors and a single sweep reaches the fixed
/// point. Early start is clamped at day 0: a lead (negative lag) on a
/// project-initial edge cannot start work before the project does.
pub fn forward_pass(graph: &ActivityGraph, order: &[usize], verbosity: u8) -> Vec<EarlyTimes> {
    let mut early = vec![EarlyTimes::default(); graph.len()];

    for &idx in order {
        let duration = graph.activity(idx).duration_days;

        // Earliest start = max over incoming edges of the time the edge
        // constraint is satisfied, floor 0 for activities with no predecessors.
        let mut start = 0;
        for edge in graph.predecessors(idx) {
            let pred = early[edge.other];
            let candidate = match edge.kind {
                DependencyKind::FinishToStart => pred.finish + edge.lag_days,
                DependencyKind::StartToStart => pred.start + edge.lag_days,
                DependencyKind::FinishToFinish => pred.finish + edge.lag_days - duration,
                DependencyKind::StartToFinish => pred.start + edge.lag_days - duration,
            };
            start = start.max(candidate);
        }

        early[idx] = EarlyTimes {
            start,
            finish: start + duration,
        };
        log_activities!(
            verbosity,
            "forward: {} ES={} EF={}",
            graph.activity(idx).code,
            start,
            start + duration
        );
    }

    early
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, ActivityStatus, Dependency};

    fn make_activity(id: &str, duration: i64) -> Activity {
        Activity {
            id: id.to_string(),
            code: id.to_string(),
            name: id.to_string(),
            duration_days: duration,
            status: ActivityStatus::NotStarted,
            percent_complete: 0.0,
            planned_start: None,
            planned_finish: None,
            actual_start: None,
            actual_finish: None,
            sort_order: 0,
        }
    }

    fn make_dep(activity: &str, predecessor: &str, kind: DependencyKind, lag: i64) -> Dependency {
        Dependency {
            activity_id: activity.to_string(),
            predecessor_id: predecessor.to_string(),
            kind,
            lag_days: lag,
        }
    }

    fn run(activities: Vec<Activity>, deps: Vec<Dependency>) -> (ActivityGraph, Vec<EarlyTimes>) {
        let graph = ActivityGraph::build(activities, &deps).unwrap();
        let order = graph.topological_order().unwrap();
        let early = forward_pass(&graph, &order, 0);
        (graph, early)
    }

    #[test]
    fn test_no_predecessors_start_at_zero() {
        let (graph, early) = run(vec![make_activity("a", 5)], vec![]);
        let idx = graph.get("a").unwrap();
        assert_eq!(early[idx], EarlyTimes { start: 0, finish: 5 });
    }

    #[test]
    fn test_chain_accumulates() {
        let (graph, early) = run(
            vec![
                make_activity("a", 3),
                make_activity("b", 2),
                make_activity("c", 4),
            ],
            vec![
                make_dep("b", "a", DependencyKind::FinishToStart, 0),
                make_dep("c", "b", DependencyKind::FinishToStart, 0),
            ],
        );
        assert_eq!(early[graph.get("b").unwrap()].start, 3);
        assert_eq!(early[graph.get("c").unwrap()].finish, 9);
    }

    #[test]
    fn test_diamond_takes_longest_predecessor() {
        // a -> b (3) -> d, a -> c (5) -> d
        let (graph, early) = run(
            vec![
                make_activity("a", 2),
                make_activity("b", 3),
                make_activity("c", 5),
                make_activity("d", 1),
            ],
            vec![
                make_dep("b", "a", DependencyKind::FinishToStart, 0),
                make_dep("c", "a", DependencyKind::FinishToStart, 0),
                make_dep("d", "b", DependencyKind::FinishToStart, 0),
                make_dep("d", "c", DependencyKind::FinishToStart, 0),
            ],
        );
        assert_eq!(early[graph.get("d").unwrap()].start, 7);
    }

    #[test]
    fn test_positive_lag_delays_successor() {
        let (graph, early) = run(
            vec![make_activity("a", 2), make_activity("b", 1)],
            vec![make_dep("b", "a", DependencyKind::FinishToStart, 3)],
        );
        assert_eq!(early[graph.get("b").unwrap()].start, 5);
    }

    #[test]
    fn test_lead_clamped_at_project_start() {
        let (graph, early) = run(
            vec![make_activity("a", 2), make_activity("b", 1)],
            vec![make_dep("b", "a", DependencyKind::FinishToStart, -5)],
        );
        assert_eq!(early[graph.get("b").unwrap()].start, 0);
    }

    #[test]
    fn test_start_to_start_edge() {
        let (graph, early) = run(
            vec![make_activity("a", 10), make_activity("b", 4)],
            vec![make_dep("b", "a", DependencyKind::StartToStart, 2)],
        );
        let b = early[graph.get("b").unwrap()];
        assert_eq!(b, EarlyTimes { start: 2, finish: 6 });
    }

    #[test]
    fn test_finish_to_finish_edge() {
        let (graph, early) = run(
            vec![make_activity("a", 10), make_activity("b", 4)],
            vec![make_dep("b", "a", DependencyKind::FinishToFinish, 0)],
        );
        let b = early[graph.get("b").unwrap()];
        assert_eq!(b, EarlyTimes { start: 6, finish: 10 });
    }
}
