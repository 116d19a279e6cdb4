//! Weather-risk overlay for outdoor activities.
//!
//! Classification is purely lexical: activity names are matched against a
//! fixed outdoor-work vocabulary and a static rule table. The overlay never
//! touches the dependency graph or the computed schedule.

use pyo3::prelude::*;

use crate::models::{Activity, ActivityStatus};

/// Weather-risk severity for one activity.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WeatherRiskLevel {
    Low,
    Medium,
}

/// An outdoor activity flagged as weather-sensitive.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeatherRisk {
    #[pyo3(get)]
    pub code: String,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub risk_level: WeatherRiskLevel,
    #[pyo3(get)]
    pub concerns: Vec<String>,
}

/// Risk list plus general guidance; recommendations are present only when
/// at least one activity is flagged.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeatherAssessment {
    #[pyo3(get)]
    pub at_risk: Vec<WeatherRisk>,
    #[pyo3(get)]
    pub recommendations: Vec<String>,
}

#[pymethods]
impl WeatherAssessment {
    fn __repr__(&self) -> String {
        format!(
            "WeatherAssessment(at_risk={}, recommendations={})",
            self.at_risk.len(),
            self.recommendations.len()
        )
    }
}

/// Name stems marking an activity as outdoor work.
const OUTDOOR_KEYWORDS: &[&str] = &[
    "site", "excavat", "foundation", "concrete", "roof", "exterior", "landscap", "grade", "pour",
    "masonry", "paving",
];

struct WeatherRule {
    keywords: &'static [&'static str],
    concern: &'static str,
    risk: WeatherRiskLevel,
}

const RULES: &[WeatherRule] = &[
    WeatherRule {
        keywords: &["concrete", "pour", "foundation"],
        concern: "Concrete requires dry conditions and temps above 40F",
        risk: WeatherRiskLevel::Medium,
    },
    WeatherRule {
        keywords: &["roof"],
        concern: "Roofing unsafe in rain or high winds (>25mph)",
        risk: WeatherRiskLevel::Medium,
    },
    WeatherRule {
        keywords: &["excavat", "grade"],
        concern: "Earthwork affected by heavy rain and frost",
        risk: WeatherRiskLevel::Medium,
    },
    WeatherRule {
        keywords: &["exterior", "masonry"],
        concern: "Exterior work delayed by precipitation",
        risk: WeatherRiskLevel::Low,
    },
    WeatherRule {
        keywords: &["landscap"],
        concern: "Planting affected by extreme temps and frost",
        risk: WeatherRiskLevel::Low,
    },
];

const GENERAL_RECOMMENDATIONS: &[&str] = &[
    "Monitor weather forecasts daily for outdoor activities",
    "Have contingency plans for rain delays on critical-path items",
    "Schedule concrete pours during dry weather windows",
];

/// Flag non-completed outdoor activities by name.
///
/// Activities matching no outdoor keyword are excluded entirely rather
/// than reported at some default level. When several rules match, the
/// highest matched severity wins.
pub fn assess_weather_risk(activities: &[Activity]) -> WeatherAssessment {
    let mut at_risk = Vec::new();

    for activity in activities {
        if activity.status == ActivityStatus::Completed {
            continue;
        }
        let name_lower = activity.name.to_lowercase();
        if !OUTDOOR_KEYWORDS.iter().any(|kw| name_lower.contains(kw)) {
            continue;
        }

        let mut concerns = Vec::new();
        let mut risk = WeatherRiskLevel::Low;
        for rule in RULES {
            if rule.keywords.iter().any(|kw| name_lower.contains(kw)) {
                concerns.push(rule.concern.to_string());
                risk = risk.max(rule.risk);
            }
        }
        if concerns.is_empty() {
            concerns.push("General outdoor activity - weather sensitive".to_string());
        }

        at_risk.push(WeatherRisk {
            code: activity.code.clone(),
            name: activity.name.clone(),
            risk_level: risk,
            concerns,
        });
    }

    let recommendations = if at_risk.is_empty() {
        Vec::new()
    } else {
        GENERAL_RECOMMENDATIONS
            .iter()
            .map(|r| (*r).to_string())
            .collect()
    };

    WeatherAssessment {
        at_risk,
        recommendations,
    }
}
