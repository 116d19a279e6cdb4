//! Core data types for the scheduling engine.

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::collections::HashMap;

// Note: We use std HashMap here for PyO3 interface compatibility

/// Lifecycle status of an activity.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityStatus {
    NotStarted,
    InProgress,
    Completed,
    Delayed,
}

impl Default for ActivityStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// How a dependency edge constrains its successor.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DependencyKind {
    FinishToStart,
    StartToStart,
    FinishToFinish,
    StartToFinish,
}

impl Default for DependencyKind {
    fn default() -> Self {
        Self::FinishToStart
    }
}

/// A schedulable unit of work.
///
/// Carries only planning inputs; computed timing lives in [`ActivityTiming`]
/// and is rebuilt from scratch on every recompute.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Activity {
    #[pyo3(get, set)]
    pub id: String,
    /// Human-readable code shown in schedules, e.g. "A080".
    #[pyo3(get, set)]
    pub code: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration_days: i64,
    #[pyo3(get, set)]
    pub status: ActivityStatus,
    #[pyo3(get, set)]
    pub percent_complete: f64,
    #[pyo3(get, set)]
    pub planned_start: Option<NaiveDate>,
    #[pyo3(get, set)]
    pub planned_finish: Option<NaiveDate>,
    #[pyo3(get, set)]
    pub actual_start: Option<NaiveDate>,
    #[pyo3(get, set)]
    pub actual_finish: Option<NaiveDate>,
    #[pyo3(get, set)]
    pub sort_order: i32,
}

#[pymethods]
impl Activity {
    #[new]
    #[pyo3(signature = (
        id,
        code,
        name,
        duration_days,
        status=None,
        percent_complete=0.0,
        planned_start=None,
        planned_finish=None,
        actual_start=None,
        actual_finish=None,
        sort_order=0
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: String,
        code: String,
        name: String,
        duration_days: i64,
        status: Option<ActivityStatus>,
        percent_complete: f64,
        planned_start: Option<NaiveDate>,
        planned_finish: Option<NaiveDate>,
        actual_start: Option<NaiveDate>,
        actual_finish: Option<NaiveDate>,
        sort_order: i32,
    ) -> Self {
        Self {
            id,
            code,
            name,
            duration_days,
            status: status.unwrap_or_default(),
            percent_complete,
            planned_start,
            planned_finish,
            actual_start,
            actual_finish,
            sort_order,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Activity(id={:?}, code={:?}, name={:?}, duration_days={})",
            self.id, self.code, self.name, self.duration_days
        )
    }
}

/// A directed edge `predecessor -> activity` with a relationship kind and lag.
///
/// Lag may be negative, representing a lead.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Dependency {
    #[pyo3(get, set)]
    pub activity_id: String,
    #[pyo3(get, set)]
    pub predecessor_id: String,
    #[pyo3(get, set)]
    pub kind: DependencyKind,
    #[pyo3(get, set)]
    pub lag_days: i64,
}

#[pymethods]
impl Dependency {
    #[new]
    #[pyo3(signature = (activity_id, predecessor_id, kind=None, lag_days=0))]
    fn new(
        activity_id: String,
        predecessor_id: String,
        kind: Option<DependencyKind>,
        lag_days: i64,
    ) -> Self {
        Self {
            activity_id,
            predecessor_id,
            kind: kind.unwrap_or_default(),
            lag_days,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Dependency(activity_id={:?}, predecessor_id={:?}, kind={:?}, lag_days={})",
            self.activity_id, self.predecessor_id, self.kind, self.lag_days
        )
    }
}

/// Per-activity timing computed by the engine, in days from project start.
///
/// Owned exclusively by the engine: overwritten on every recompute, never
/// hand-edited.
#[pyclass]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivityTiming {
    #[pyo3(get)]
    pub early_start: i64,
    #[pyo3(get)]
    pub early_finish: i64,
    #[pyo3(get)]
    pub late_start: i64,
    #[pyo3(get)]
    pub late_finish: i64,
    #[pyo3(get)]
    pub total_float: i64,
    #[pyo3(get)]
    pub free_float: i64,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl ActivityTiming {
    fn __repr__(&self) -> String {
        format!(
            "ActivityTiming(ES={}, EF={}, LS={}, LF={}, total_float={}, critical={})",
            self.early_start,
            self.early_finish,
            self.late_start,
            self.late_finish,
            self.total_float,
            self.is_critical
        )
    }
}

/// Output of one schedule recompute.
///
/// `critical_path` and `near_critical` hold activity codes in topological
/// order; `timings` is keyed by activity id so callers can persist the
/// fields back onto their stored records.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulingResult {
    #[pyo3(get)]
    pub project_duration: i64,
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    #[pyo3(get)]
    pub near_critical: Vec<String>,
    /// Sum of total float across all activities.
    #[pyo3(get)]
    pub total_float_days: i64,
    #[pyo3(get)]
    pub timings: HashMap<String, ActivityTiming>,
}

#[pymethods]
impl SchedulingResult {
    fn __repr__(&self) -> String {
        format!(
            "SchedulingResult(project_duration={}, critical={}, near_critical={})",
            self.project_duration,
            self.critical_path.len(),
            self.near_critical.len()
        )
    }
}

/// One row of the calendar-projected schedule.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleDateRow {
    #[pyo3(get)]
    pub code: String,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub duration_days: i64,
    #[pyo3(get)]
    pub early_start_date: NaiveDate,
    #[pyo3(get)]
    pub early_finish_date: NaiveDate,
    #[pyo3(get)]
    pub late_start_date: NaiveDate,
    #[pyo3(get)]
    pub late_finish_date: NaiveDate,
    #[pyo3(get)]
    pub total_float: i64,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl ScheduleDateRow {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleDateRow(code={:?}, start={}, finish={}, critical={})",
            self.code, self.early_start_date, self.early_finish_date, self.is_critical
        )
    }
}
