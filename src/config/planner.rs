use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use lazy_static::lazy_static;
use crate::error::PlanError;

/// Tunable constants of the plan heuristics.
/// Every section is optional in the TOML file; missing keys keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    pub duration: DurationConfig,
    pub schedule: ScheduleConfig,
    pub focus: FocusConfig,
    pub narrative: NarrativeConfig,
    pub defaults: RequestDefaults,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DurationConfig {
    pub min_weeks: u32,
    pub max_weeks: u32,
    /// Effort floor in hours, applied even when the score gap is zero
    pub min_total_hours: f64,
    /// Study hours per percentage point of improvement
    pub hours_per_point: f64,
}

impl Default for DurationConfig {
    fn default() -> Self {
        DurationConfig {
            min_weeks: 4,
            max_weeks: 24,
            min_total_hours: 20.0,
            hours_per_point: 1.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    pub exam_prep_weeks: u32,
    pub review_interval: u32,
    pub extra_topic_interval: u32,
    pub exam_prep_hours: u32,
    pub review_hours: u32,
    pub regular_base_hours: u32,
    pub max_resources: usize,
    pub late_week_threshold: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            exam_prep_weeks: 2,
            review_interval: 4,
            extra_topic_interval: 3,
            exam_prep_hours: 12,
            review_hours: 10,
            regular_base_hours: 8,
            max_resources: 4,
            late_week_threshold: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FocusConfig {
    pub max_areas: usize,
    pub high_hours: u32,
    pub medium_hours: u32,
    pub low_hours: u32,
    pub level_floor: f64,
    pub level_step: f64,
    pub target_step: f64,
    pub gap_bucket: f64,
    pub gap_bonus_hours: u32,
}

impl Default for FocusConfig {
    fn default() -> Self {
        FocusConfig {
            max_areas: 5,
            high_hours: 20,
            medium_hours: 15,
            low_hours: 10,
            level_floor: 20.0,
            level_step: 8.0,
            target_step: 5.0,
            gap_bucket: 10.0,
            gap_bonus_hours: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NarrativeConfig {
    pub intensive_hours: f64,
    pub balanced_hours: f64,
    pub large_gap_threshold: f64,
    pub many_weak_areas: usize,
    pub low_hours_threshold: f64,
    pub short_plan_weeks: u32,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        NarrativeConfig {
            intensive_hours: 12.0,
            balanced_hours: 8.0,
            large_gap_threshold: 30.0,
            many_weak_areas: 5,
            low_hours_threshold: 8.0,
            short_plan_weeks: 8,
        }
    }
}

/// Values used when an assessment result lacks the student's own goals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RequestDefaults {
    pub target_score: f64,
    pub hours_per_week: f64,
    pub exam_horizon_days: i64,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        RequestDefaults {
            target_score: 85.0,
            hours_per_week: 10.0,
            exam_horizon_days: 90,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl PlannerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, PlanError> {
        Ok(toml::from_str::<PlannerConfig>(content)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, PlanError> {
        let content = fs::read_to_string(path).map_err(|e| {
            PlanError::from(e).with_context(format!("path: {:?}", path))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("path: {:?}", path)))
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("STUDYPLAN_CONFIG") {
        return PathBuf::from(path);
    }
    super::app_data_dir().join("planner.toml")
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigOrigin {
    /// No file at the path
    Defaults { path: PathBuf },
    File { path: PathBuf },
    /// The file exists but could not be read or parsed
    Fallback { path: PathBuf, error: String },
}

impl ConfigOrigin {
    /// Logged by the caller once a subscriber is installed.
    pub fn log(&self) {
        match self {
            ConfigOrigin::Defaults { path } => {
                tracing::debug!(path = ?path, "No planner config file, using defaults");
            }
            ConfigOrigin::File { path } => {
                tracing::info!(path = ?path, "Loaded planner config");
            }
            ConfigOrigin::Fallback { path, error } => {
                tracing::warn!(path = ?path, error = %error, "Failed to load planner config, using defaults");
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ConfigOrigin::Fallback { .. })
    }
}

/// Load `path` if it exists, falling back to defaults on any error.
pub fn load_or_default(path: &Path) -> (PlannerConfig, ConfigOrigin) {
    if !path.exists() {
        return (PlannerConfig::default(), ConfigOrigin::Defaults { path: path.to_path_buf() });
    }

    match PlannerConfig::load_from_path(path) {
        Ok(config) => (config, ConfigOrigin::File { path: path.to_path_buf() }),
        Err(e) => (
            PlannerConfig::default(),
            ConfigOrigin::Fallback { path: path.to_path_buf(), error: e.to_string() },
        ),
    }
}

lazy_static! {
    static ref PLANNER_CONFIG: (PlannerConfig, ConfigOrigin) = load_or_default(&get_config_path());
}

/// Get the cached planner configuration (loaded once per process)
pub fn get_planner_config() -> &'static PlannerConfig {
    &PLANNER_CONFIG.0
}

/// How the cached configuration was obtained
pub fn get_planner_config_origin() -> &'static ConfigOrigin {
    &PLANNER_CONFIG.1
}
