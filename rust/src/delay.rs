//! Delay-impact analysis and schedule-acceleration suggestions.
//!
//! Both are read-only consumers of a computed classification; neither
//! mutates the graph or the timings it was handed.

use pyo3::prelude::*;

use crate::config::EngineConfig;
use crate::critical_path::Classification;
use crate::graph::ActivityGraph;
use crate::log_debug;

/// Impact of delaying one activity by a number of days.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelayImpact {
    #[pyo3(get)]
    pub activity_id: String,
    #[pyo3(get)]
    pub activity_name: String,
    #[pyo3(get)]
    pub delay_days: i64,
    #[pyo3(get)]
    pub available_float: i64,
    #[pyo3(get)]
    pub absorbed_by_float: i64,
    #[pyo3(get)]
    pub project_delay: i64,
    /// Codes of direct successors, populated only when the project slips.
    #[pyo3(get)]
    pub affected_activities: Vec<String>,
    #[pyo3(get)]
    pub is_critical_delay: bool,
    #[pyo3(get)]
    pub original_duration: i64,
    #[pyo3(get)]
    pub new_duration: i64,
}

#[pymethods]
impl DelayImpact {
    fn __repr__(&self) -> String {
        format!(
            "DelayImpact(activity_id={:?}, delay_days={}, project_delay={}, critical={})",
            self.activity_id, self.delay_days, self.project_delay, self.is_critical_delay
        )
    }
}

/// One crashable critical activity.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccelerationSuggestion {
    #[pyo3(get)]
    pub code: String,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub current_duration: i64,
    #[pyo3(get)]
    pub max_reduction: i64,
    #[pyo3(get)]
    pub reason: String,
}

/// Crash-duration proposal for a target schedule reduction.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccelerationPlan {
    #[pyo3(get)]
    pub target_reduction: i64,
    /// Sum of all proposed reductions.
    #[pyo3(get)]
    pub achievable_reduction: i64,
    #[pyo3(get)]
    pub target_met: bool,
    #[pyo3(get)]
    pub suggestions: Vec<AccelerationSuggestion>,
}

#[pymethods]
impl AccelerationPlan {
    fn __repr__(&self) -> String {
        format!(
            "AccelerationPlan(target_reduction={}, achievable_reduction={}, suggestions={})",
            self.target_reduction,
            self.achievable_reduction,
            self.suggestions.len()
        )
    }
}

/// Quantify how `delay_days` of slip on one activity moves the project.
///
/// Float absorbs the slip first; only the remainder reaches project
/// completion, and successors are reported only when it does.
pub fn analyze_delay(
    graph: &ActivityGraph,
    classification: &Classification,
    idx: usize,
    delay_days: i64,
    project_duration: i64,
) -> DelayImpact {
    let activity = graph.activity(idx);
    let available_float = classification.timings[idx].total_float;
    let absorbed_by_float = delay_days.min(available_float);
    let project_delay = (delay_days - available_float).max(0);

    let mut affected_activities = Vec::new();
    if project_delay > 0 {
        affected_activities = graph
            .successors(idx)
            .iter()
            .map(|edge| graph.activity(edge.other).code.clone())
            .collect();
        affected_activities.sort();
    }

    DelayImpact {
        activity_id: activity.id.clone(),
        activity_name: activity.name.clone(),
        delay_days,
        available_float,
        absorbed_by_float,
        project_delay,
        affected_activities,
        is_critical_delay: project_delay > 0,
        original_duration: project_duration,
        new_duration: project_duration + project_delay,
    }
}

/// Propose duration crashes along the current critical path.
///
/// Each critical activity can give back at most `max_crash_fraction` of
/// its duration, rounded down. Suggestions are ordered by potential
/// reduction descending, ties broken by activity code ascending.
pub fn suggest_acceleration(
    graph: &ActivityGraph,
    classification: &Classification,
    target_reduction: i64,
    config: &EngineConfig,
) -> AccelerationPlan {
    let mut suggestions: Vec<AccelerationSuggestion> = classification
        .critical
        .iter()
        .filter_map(|&idx| {
            let activity = graph.activity(idx);
            let max_reduction = (activity.duration_days as f64 * config.max_crash_fraction) as i64;
            (max_reduction > 0).then(|| AccelerationSuggestion {
                code: activity.code.clone(),
                name: activity.name.clone(),
                current_duration: activity.duration_days,
                max_reduction,
                reason: "Critical path activity".to_string(),
            })
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.max_reduction
            .cmp(&a.max_reduction)
            .then_with(|| a.code.cmp(&b.code))
    });

    let achievable_reduction: i64 = suggestions.iter().map(|s| s.max_reduction).sum();
    log_debug!(
        config.verbosity,
        "acceleration: {} candidates, {} days achievable",
        suggestions.len(),
        achievable_reduction
    );

    AccelerationPlan {
        target_reduction,
        achievable_reduction,
        target_met: achievable_reduction >= target_reduction,
        suggestions,
    }
}
