//! Activity dependency graph: validation, structural queries, topological order.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use thiserror::Error;

use crate::models::{Activity, Dependency, DependencyKind};

/// Errors raised while building or ordering the graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Invalid activity {code}: {reason}")]
    InvalidActivity { code: String, reason: String },
    #[error("Malformed dependency graph: {0}")]
    MalformedGraph(String),
    #[error("Cyclic dependency detected involving activity {0}")]
    CyclicDependency(String),
}

/// A dependency edge as seen from one of its endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Index of the activity at the other end.
    pub other: usize,
    pub kind: DependencyKind,
    pub lag_days: i64,
}

/// Dependency graph over one project snapshot.
///
/// Activities keep their input order; every ordered output downstream
/// derives its determinism from that.
#[derive(Clone, Debug)]
pub struct ActivityGraph {
    activities: Vec<Activity>,
    index: FxHashMap<String, usize>,
    preds: Vec<Vec<Edge>>,
    succs: Vec<Vec<Edge>>,
}

impl ActivityGraph {
    /// Validate a snapshot and build the graph.
    ///
    /// Rejects negative durations and out-of-range percent-complete values
    /// (`InvalidActivity`), duplicate activity ids, and edges referencing
    /// unknown activities on either side (`MalformedGraph`). A dangling
    /// reference is never dropped silently.
    pub fn build(
        activities: Vec<Activity>,
        dependencies: &[Dependency],
    ) -> Result<Self, GraphError> {
        for activity in &activities {
            if activity.duration_days < 0 {
                return Err(GraphError::InvalidActivity {
                    code: activity.code.clone(),
                    reason: format!("negative duration {}", activity.duration_days),
                });
            }
            if !(0.0..=100.0).contains(&activity.percent_complete) {
                return Err(GraphError::InvalidActivity {
                    code: activity.code.clone(),
                    reason: format!(
                        "percent complete {} outside 0-100",
                        activity.percent_complete
                    ),
                });
            }
        }

        let mut index: FxHashMap<String, usize> =
            FxHashMap::with_capacity_and_hasher(activities.len(), Default::default());
        for (idx, activity) in activities.iter().enumerate() {
            if index.insert(activity.id.clone(), idx).is_some() {
                return Err(GraphError::MalformedGraph(format!(
                    "duplicate activity id {}",
                    activity.id
                )));
            }
        }

        let mut preds: Vec<Vec<Edge>> = vec![Vec::new(); activities.len()];
        let mut succs: Vec<Vec<Edge>> = vec![Vec::new(); activities.len()];
        for dep in dependencies {
            let Some(&act) = index.get(dep.activity_id.as_str()) else {
                return Err(GraphError::MalformedGraph(format!(
                    "dependency references unknown activity {}",
                    dep.activity_id
                )));
            };
            let Some(&pred) = index.get(dep.predecessor_id.as_str()) else {
                return Err(GraphError::MalformedGraph(format!(
                    "dependency references unknown predecessor {}",
                    dep.predecessor_id
                )));
            };
            preds[act].push(Edge {
                other: pred,
                kind: dep.kind,
                lag_days: dep.lag_days,
            });
            succs[pred].push(Edge {
                other: act,
                kind: dep.kind,
                lag_days: dep.lag_days,
            });
        }

        Ok(Self {
            activities,
            index,
            preds,
            succs,
        })
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn activity(&self, idx: usize) -> &Activity {
        &self.activities[idx]
    }

    /// Index of the activity with this id, if known.
    pub fn get(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Activity lookup by id.
    pub fn activity_by_id(&self, id: &str) -> Option<&Activity> {
        self.get(id).map(|idx| &self.activities[idx])
    }

    /// Incoming edges (from predecessors) of the activity at `idx`.
    pub fn predecessors(&self, idx: usize) -> &[Edge] {
        &self.preds[idx]
    }

    /// Outgoing edges (to successors) of the activity at `idx`.
    pub fn successors(&self, idx: usize) -> &[Edge] {
        &self.succs[idx]
    }

    /// Ids of the direct predecessors of `id`, in edge insertion order.
    pub fn predecessor_ids(&self, id: &str) -> Option<Vec<&str>> {
        let idx = self.get(id)?;
        Some(
            self.preds[idx]
                .iter()
                .map(|edge| self.activities[edge.other].id.as_str())
                .collect(),
        )
    }

    /// Ids of the direct successors of `id`, in edge insertion order.
    pub fn successor_ids(&self, id: &str) -> Option<Vec<&str>> {
        let idx = self.get(id)?;
        Some(
            self.succs[idx]
                .iter()
                .map(|edge| self.activities[edge.other].id.as_str())
                .collect(),
        )
    }

    /// Remove an activity together with every edge incident to it, keeping
    /// the graph well-formed. Returns `false` for unknown ids.
    pub fn remove_activity(&mut self, id: &str) -> bool {
        let Some(idx) = self.get(id) else {
            return false;
        };
        self.activities.remove(idx);
        self.preds.remove(idx);
        self.succs.remove(idx);
        for edges in self.preds.iter_mut().chain(self.succs.iter_mut()) {
            edges.retain(|edge| edge.other != idx);
            for edge in edges.iter_mut() {
                if edge.other > idx {
                    edge.other -= 1;
                }
            }
        }
        self.index.clear();
        for (i, activity) in self.activities.iter().enumerate() {
            self.index.insert(activity.id.clone(), i);
        }
        true
    }

    /// Topological order via Kahn's algorithm.
    ///
    /// The queue is seeded and drained in activity input order, so the
    /// result is deterministic for a given snapshot. A non-total order
    /// means the edge set has a cycle.
    pub fn topological_order(&self) -> Result<Vec<usize>, GraphError> {
        let mut in_degree: Vec<usize> = self.preds.iter().map(Vec::len).collect();
        let mut queue: VecDeque<usize> = (0..self.len()).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(self.len());

        while let Some(idx) = queue.pop_front() {
            order.push(idx);
            for edge in &self.succs[idx] {
                in_degree[edge.other] -= 1;
                if in_degree[edge.other] == 0 {
                    queue.push_back(edge.other);
                }
            }
        }

        if order.len() != self.len() {
            return Err(GraphError::CyclicDependency(self.cycle_culprit(&in_degree)));
        }
        Ok(order)
    }

    /// Walk predecessor links among the unresolved nodes until one repeats.
    /// That node is on a cycle, not merely downstream of one.
    fn cycle_culprit(&self, in_degree: &[usize]) -> String {
        let Some(start) = (0..self.len()).find(|&i| in_degree[i] > 0) else {
            return String::new();
        };
        let mut seen = vec![false; self.len()];
        let mut current = start;
        while !seen[current] {
            seen[current] = true;
            match self.preds[current]
                .iter()
                .find(|edge| in_degree[edge.other] > 0)
            {
                Some(edge) => current = edge.other,
                None => break,
            }
        }
        self.activities[current].id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityStatus;

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

    fn make_dep(activity: &str, predecessor: &str) -> Dependency {
        Dependency {
            activity_id: activity.to_string(),
            predecessor_id: predecessor.to_string(),
            kind: DependencyKind::FinishToStart,
            lag_days: 0,
        }
    }

    #[test]
    fn test_structural_queries() {
        let activities = vec![
            make_activity("a", 2),
            make_activity("b", 3),
            make_activity("c", 4),
        ];
        let deps = vec![make_dep("b", "a"), make_dep("c", "a"), make_dep("c", "b")];
        let graph = ActivityGraph::build(activities, &deps).unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.predecessor_ids("c"), Some(vec!["a", "b"]));
        assert_eq!(graph.successor_ids("a"), Some(vec!["b", "c"]));
        assert_eq!(graph.predecessor_ids("a"), Some(vec![]));
        assert_eq!(graph.predecessor_ids("zz"), None);
        assert_eq!(graph.activity_by_id("b").map(|a| a.duration_days), Some(3));
    }

    #[test]
    fn test_unknown_predecessor_rejected() {
        let activities = vec![make_activity("a", 2)];
        let deps = vec![make_dep("a", "ghost")];
        let err = ActivityGraph::build(activities, &deps).unwrap_err();
        assert!(matches!(err, GraphError::MalformedGraph(_)));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_unknown_successor_rejected() {
        let activities = vec![make_activity("a", 2)];
        let deps = vec![make_dep("ghost", "a")];
        let err = ActivityGraph::build(activities, &deps).unwrap_err();
        assert!(matches!(err, GraphError::MalformedGraph(_)));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let activities = vec![make_activity("a", 2), make_activity("a", 3)];
        let err = ActivityGraph::build(activities, &[]).unwrap_err();
        assert!(matches!(err, GraphError::MalformedGraph(_)));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let activities = vec![make_activity("a", -1)];
        let err = ActivityGraph::build(activities, &[]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidActivity { .. }));
    }

    #[test]
    fn test_percent_complete_out_of_range_rejected() {
        let mut activity = make_activity("a", 2);
        activity.percent_complete = 120.0;
        let err = ActivityGraph::build(vec![activity], &[]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidActivity { .. }));
    }

    #[test]
    fn test_topological_order_is_input_order_for_chain() {
        let activities = vec![
            make_activity("a", 1),
            make_activity("b", 1),
            make_activity("c", 1),
        ];
        let deps = vec![make_dep("b", "a"), make_dep("c", "b")];
        let graph = ActivityGraph::build(activities, &deps).unwrap();
        assert_eq!(graph.topological_order().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_cycle_detected_with_culprit() {
        // a depends on b, b depends on a
        let activities = vec![
            make_activity("a", 1),
            make_activity("b", 1),
            make_activity("c", 1),
        ];
        let deps = vec![make_dep("a", "b"), make_dep("b", "a"), make_dep("c", "b")];
        let graph = ActivityGraph::build(activities, &deps).unwrap();
        match graph.topological_order().unwrap_err() {
            GraphError::CyclicDependency(id) => assert!(id == "a" || id == "b"),
            other => panic!("expected CyclicDependency, got {other:?}"),
        }
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let activities = vec![make_activity("a", 1)];
        let deps = vec![make_dep("a", "a")];
        let graph = ActivityGraph::build(activities, &deps).unwrap();
        assert_eq!(
            graph.topological_order().unwrap_err(),
            GraphError::CyclicDependency("a".to_string())
        );
    }

    #[test]
    fn test_remove_activity_drops_incident_edges() {
        let activities = vec![
            make_activity("a", 1),
            make_activity("b", 1),
            make_activity("c", 1),
        ];
        let deps = vec![make_dep("b", "a"), make_dep("c", "b"), make_dep("c", "a")];
        let mut graph = ActivityGraph::build(activities, &deps).unwrap();

        assert!(graph.remove_activity("b"));
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.predecessor_ids("c"), Some(vec!["a"]));
        assert_eq!(graph.successor_ids("a"), Some(vec!["c"]));
        assert!(!graph.remove_activity("b"));
    }
}
