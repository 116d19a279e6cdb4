//! Configuration types for the scheduling engine.

use pyo3::prelude::*;

/// Tunable thresholds for schedule computation and analysis.
#[pyclass]
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Positive total float at or below this marks an activity near-critical (days).
    #[pyo3(get, set)]
    pub near_critical_threshold_days: i64,
    /// Maximum fraction of an activity's duration recoverable by crashing.
    #[pyo3(get, set)]
    pub max_crash_fraction: f64,
    /// Verbosity level: 0=silent, 1=passes, 2=activities, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            near_critical_threshold_days: 5,
            max_crash_fraction: 0.2,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl EngineConfig {
    #[new]
    #[pyo3(signature = (near_critical_threshold_days=None, max_crash_fraction=None, verbosity=None))]
    fn new(
        near_critical_threshold_days: Option<i64>,
        max_crash_fraction: Option<f64>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            near_critical_threshold_days: near_critical_threshold_days
                .unwrap_or(defaults.near_critical_threshold_days),
            max_crash_fraction: max_crash_fraction.unwrap_or(defaults.max_crash_fraction),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "EngineConfig(near_critical_threshold_days={}, max_crash_fraction={}, verbosity={})",
            self.near_critical_threshold_days, self.max_crash_fraction, self.verbosity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.near_critical_threshold_days, 5);
        assert!((config.max_crash_fraction - 0.2).abs() < 1e-9);
        assert_eq!(config.verbosity, 0);
    }
}
