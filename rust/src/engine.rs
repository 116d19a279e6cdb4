//! Recompute orchestrator: one consistent, immutable result per snapshot.
//!
//! Every operation is a pure function of the activities and dependency
//! edges it receives; nothing is retained between calls and the inputs are
//! never mutated. Callers wanting to serialize concurrent recomputes of
//! the same project do so outside the engine.

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use thiserror::Error;

use crate::backward_pass::{backward_pass, BackwardPassResult};
use crate::config::EngineConfig;
use crate::critical_path::{classify, Classification};
use crate::delay;
use crate::delay::{AccelerationPlan, DelayImpact};
use crate::forward_pass::forward_pass;
use crate::graph::{ActivityGraph, GraphError};
use crate::log_passes;
use crate::models::{Activity, Dependency, ScheduleDateRow, SchedulingResult};

/// Errors surfaced by engine operations.
///
/// All are local validation failures: deterministic, never retried, never
/// fatal to the host process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("Activity not found: {0}")]
    ActivityNotFound(String),
}

/// Everything derived from one snapshot, kept together so the analysis
/// entry points always see timings consistent with the graph they query.
struct Computation {
    graph: ActivityGraph,
    order: Vec<usize>,
    classification: Classification,
    project_duration: i64,
}

/// Run graph construction, both passes and the classifier over one snapshot.
fn run(
    activities: &[Activity],
    dependencies: &[Dependency],
    config: &EngineConfig,
) -> Result<Computation, ScheduleError> {
    let graph = ActivityGraph::build(activities.to_vec(), dependencies)?;
    let order = graph.topological_order()?;

    let early = forward_pass(&graph, &order, config.verbosity);
    log_passes!(
        config.verbosity,
        "forward pass complete over {} activities",
        graph.len()
    );

    let BackwardPassResult {
        late,
        project_duration,
    } = backward_pass(&graph, &order, &early, config.verbosity);
    log_passes!(
        config.verbosity,
        "backward pass complete, project duration {} days",
        project_duration
    );

    let classification = classify(&graph, &order, &early, &late, project_duration, config);
    log_passes!(
        config.verbosity,
        "classified {} critical, {} near-critical",
        classification.critical.len(),
        classification.near_critical.len()
    );

    Ok(Computation {
        graph,
        order,
        classification,
        project_duration,
    })
}

fn build_result(computation: &Computation) -> SchedulingResult {
    let Computation {
        graph,
        classification,
        project_duration,
        ..
    } = computation;

    let codes = |indices: &[usize]| -> Vec<String> {
        indices
            .iter()
            .map(|&idx| graph.activity(idx).code.clone())
            .collect()
    };

    let mut timings = HashMap::with_capacity(graph.len());
    for (idx, timing) in classification.timings.iter().enumerate() {
        timings.insert(graph.activity(idx).id.clone(), *timing);
    }

    SchedulingResult {
        project_duration: *project_duration,
        critical_path: codes(&classification.critical),
        near_critical: codes(&classification.near_critical),
        total_float_days: classification.total_float_days,
        timings,
    }
}

/// Compute the full schedule for one project snapshot.
pub fn compute_schedule(
    activities: &[Activity],
    dependencies: &[Dependency],
    config: &EngineConfig,
) -> Result<SchedulingResult, ScheduleError> {
    let computation = run(activities, dependencies, config)?;
    Ok(build_result(&computation))
}

/// Analyze the impact of delaying one activity by `delay_days`.
///
/// Recomputes the schedule internally, so float values always match the
/// supplied graph rather than whatever a caller last persisted.
pub fn analyze_delay(
    activities: &[Activity],
    dependencies: &[Dependency],
    activity_id: &str,
    delay_days: i64,
    config: &EngineConfig,
) -> Result<DelayImpact, ScheduleError> {
    let computation = run(activities, dependencies, config)?;
    let idx = computation
        .graph
        .get(activity_id)
        .ok_or_else(|| ScheduleError::ActivityNotFound(activity_id.to_string()))?;
    Ok(delay::analyze_delay(
        &computation.graph,
        &computation.classification,
        idx,
        delay_days,
        computation.project_duration,
    ))
}

/// Propose critical-path crashes toward a target reduction in days.
pub fn suggest_acceleration(
    activities: &[Activity],
    dependencies: &[Dependency],
    target_reduction: i64,
    config: &EngineConfig,
) -> Result<AccelerationPlan, ScheduleError> {
    let computation = run(activities, dependencies, config)?;
    Ok(delay::suggest_acceleration(
        &computation.graph,
        &computation.classification,
        target_reduction,
        config,
    ))
}

/// Project computed day offsets onto calendar dates from `project_start`.
///
/// Rows come back in topological order, one per activity.
pub fn schedule_dates(
    activities: &[Activity],
    dependencies: &[Dependency],
    project_start: NaiveDate,
    config: &EngineConfig,
) -> Result<Vec<ScheduleDateRow>, ScheduleError> {
    let computation = run(activities, dependencies, config)?;
    let Computation {
        graph,
        order,
        classification,
        ..
    } = &computation;

    let rows = order
        .iter()
        .map(|&idx| {
            let activity = graph.activity(idx);
            let timing = &classification.timings[idx];
            ScheduleDateRow {
                code: activity.code.clone(),
                name: activity.name.clone(),
                duration_days: activity.duration_days,
                early_start_date: project_start + Duration::days(timing.early_start),
                early_finish_date: project_start + Duration::days(timing.early_finish),
                late_start_date: project_start + Duration::days(timing.late_start),
                late_finish_date: project_start + Duration::days(timing.late_finish),
                total_float: timing.total_float,
                is_critical: timing.is_critical,
            }
        })
        .collect();

    Ok(rows)
}
