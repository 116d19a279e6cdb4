//! Rust implementation of the Buildflow scheduling engine.
//!
//! This module provides the activity-dependency graph, the critical-path
//! computation, delay-impact analysis and the weather-risk overlay consumed
//! by the Python backend.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub mod backward_pass;
mod config;
pub mod critical_path;
pub mod delay;
pub mod engine;
pub mod forward_pass;
pub mod graph;
pub mod logging;
mod models;
pub mod weather;

pub use backward_pass::{backward_pass, BackwardPassResult, LateTimes};
pub use config::EngineConfig;
pub use critical_path::{classify, Classification};
pub use delay::{AccelerationPlan, AccelerationSuggestion, DelayImpact};
pub use engine::{
    analyze_delay, compute_schedule, schedule_dates, suggest_acceleration, ScheduleError,
};
pub use forward_pass::{forward_pass, EarlyTimes};
pub use graph::{ActivityGraph, Edge, GraphError};
pub use models::{
    Activity, ActivityStatus, ActivityTiming, Dependency, DependencyKind, ScheduleDateRow,
    SchedulingResult,
};
pub use weather::{assess_weather_risk, WeatherAssessment, WeatherRisk, WeatherRiskLevel};

fn to_value_error(err: ScheduleError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Compute the full schedule for one project snapshot.
///
/// Runs the forward pass, backward pass and critical-path classifier and
/// returns project duration, ordered critical/near-critical codes and the
/// recomputed per-activity timing fields. The caller is responsible for
/// persisting the returned fields back onto its stored records.
///
/// # Raises
/// * ValueError for malformed graphs, cycles, or invalid activities
#[pyfunction]
#[pyo3(name = "compute_schedule", signature = (activities, dependencies, config=None))]
fn py_compute_schedule(
    activities: Vec<Activity>,
    dependencies: Vec<Dependency>,
    config: Option<EngineConfig>,
) -> PyResult<SchedulingResult> {
    let config = config.unwrap_or_default();
    engine::compute_schedule(&activities, &dependencies, &config).map_err(to_value_error)
}

/// Analyze the impact of delaying one activity by `delay_days`.
///
/// The schedule is recomputed internally, so float values always match the
/// supplied graph.
///
/// # Raises
/// * ValueError for malformed graphs, cycles, or an unknown activity id
#[pyfunction]
#[pyo3(name = "analyze_delay", signature = (activities, dependencies, activity_id, delay_days, config=None))]
fn py_analyze_delay(
    activities: Vec<Activity>,
    dependencies: Vec<Dependency>,
    activity_id: String,
    delay_days: i64,
    config: Option<EngineConfig>,
) -> PyResult<DelayImpact> {
    let config = config.unwrap_or_default();
    engine::analyze_delay(&activities, &dependencies, &activity_id, delay_days, &config)
        .map_err(to_value_error)
}

/// Propose critical-path duration crashes toward a target reduction.
#[pyfunction]
#[pyo3(name = "suggest_acceleration", signature = (activities, dependencies, target_reduction, config=None))]
fn py_suggest_acceleration(
    activities: Vec<Activity>,
    dependencies: Vec<Dependency>,
    target_reduction: i64,
    config: Option<EngineConfig>,
) -> PyResult<AccelerationPlan> {
    let config = config.unwrap_or_default();
    engine::suggest_acceleration(&activities, &dependencies, target_reduction, &config)
        .map_err(to_value_error)
}

/// Project the computed schedule onto calendar dates from `project_start`.
#[pyfunction]
#[pyo3(name = "schedule_dates", signature = (activities, dependencies, project_start, config=None))]
fn py_schedule_dates(
    activities: Vec<Activity>,
    dependencies: Vec<Dependency>,
    project_start: NaiveDate,
    config: Option<EngineConfig>,
) -> PyResult<Vec<ScheduleDateRow>> {
    let config = config.unwrap_or_default();
    engine::schedule_dates(&activities, &dependencies, project_start, &config)
        .map_err(to_value_error)
}

/// Flag non-completed outdoor activities as weather-sensitive.
///
/// Operates on raw activity names and statuses only; independent of the
/// pass-based computation.
#[pyfunction]
#[pyo3(name = "assess_weather_risk")]
fn py_assess_weather_risk(activities: Vec<Activity>) -> WeatherAssessment {
    weather::assess_weather_risk(&activities)
}

/// The buildflow.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Activity>()?;
    m.add_class::<ActivityStatus>()?;
    m.add_class::<ActivityTiming>()?;
    m.add_class::<Dependency>()?;
    m.add_class::<DependencyKind>()?;
    m.add_class::<ScheduleDateRow>()?;
    m.add_class::<SchedulingResult>()?;

    // Analysis results
    m.add_class::<AccelerationPlan>()?;
    m.add_class::<AccelerationSuggestion>()?;
    m.add_class::<DelayImpact>()?;
    m.add_class::<WeatherAssessment>()?;
    m.add_class::<WeatherRisk>()?;
    m.add_class::<WeatherRiskLevel>()?;

    // Config
    m.add_class::<EngineConfig>()?;

    // Operations
    m.add_function(wrap_pyfunction!(py_compute_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_analyze_delay, m)?)?;
    m.add_function(wrap_pyfunction!(py_suggest_acceleration, m)?)?;
    m.add_function(wrap_pyfunction!(py_schedule_dates, m)?)?;
    m.add_function(wrap_pyfunction!(py_assess_weather_risk, m)?)?;

    Ok(())
}
