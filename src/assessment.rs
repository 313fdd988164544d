//! Turns a diagnostic quiz result into a plan request.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use crate::config::planner::RequestDefaults;
use crate::planner::PlanRequest;

const WEAK_THRESHOLD: f64 = 60.0;
const STRONG_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeBreakdown {
    pub theme: String,
    pub correct: u32,
    pub total: u32,
    /// Percent of the theme's questions answered correctly
    pub percentage: f64,
    #[serde(default)]
    pub points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    #[serde(default)]
    pub user_id: Option<String>,
    pub subject: String,
    pub estimated_score: f64,
    #[serde(default)]
    pub total_correct: u32,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub theme_breakdown: Vec<ThemeBreakdown>,
    #[serde(default)]
    pub recommended_focus: Vec<String>,
}

/// What the student told us at registration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub user_id: Option<String>,
    pub initial_score: f64,
    #[serde(default)]
    pub target_score: Option<f64>,
    #[serde(default)]
    pub available_hours: Option<f64>,
    #[serde(default)]
    pub exam_date: Option<NaiveDate>,
    #[serde(default)]
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PreparationLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl PreparationLevel {
    /// Level from the average of the self-reported and the measured score
    pub fn from_scores(initial_score: f64, test_score: f64) -> Self {
        let average = (initial_score + test_score) / 2.0;
        if average < 40.0 {
            PreparationLevel::Beginner
        } else if average < 65.0 {
            PreparationLevel::Intermediate
        } else if average < 85.0 {
            PreparationLevel::Advanced
        } else {
            PreparationLevel::Expert
        }
    }
}

/// Themes below 60%, in quiz order. Falls back to the quiz's own recommendations.
pub fn weak_themes(result: &AssessmentResult) -> Vec<String> {
    let weak: Vec<String> = result.theme_breakdown
        .iter()
        .filter(|t| t.percentage < WEAK_THRESHOLD)
        .map(|t| t.theme.clone())
        .collect();
    if weak.is_empty() {
        result.recommended_focus.clone()
    } else {
        weak
    }
}

pub fn strong_themes(result: &AssessmentResult) -> Vec<String> {
    result.theme_breakdown
        .iter()
        .filter(|t| t.percentage >= STRONG_THRESHOLD)
        .map(|t| t.theme.clone())
        .collect()
}

pub fn build_plan_request(
    profile: &StudentProfile,
    result: &AssessmentResult,
    today: NaiveDate,
    defaults: &RequestDefaults,
) -> PlanRequest {
    let exam_date = profile
        .exam_date
        .unwrap_or_else(|| today + Duration::days(defaults.exam_horizon_days));

    let request = PlanRequest {
        user_id: profile.user_id.clone().or_else(|| result.user_id.clone()),
        current_score: result.estimated_score.round(),
        target_score: profile.target_score.unwrap_or(defaults.target_score),
        exam_date,
        weak_areas: weak_themes(result),
        strong_areas: strong_themes(result),
        available_hours_per_week: profile.available_hours.unwrap_or(defaults.hours_per_week),
        subject: result.subject.clone(),
    };

    tracing::debug!(
        subject = %request.subject,
        level = ?PreparationLevel::from_scores(profile.initial_score, result.estimated_score),
        weak = request.weak_areas.len(),
        strong = request.strong_areas.len(),
        "Built plan request from assessment"
    );
    request
}
