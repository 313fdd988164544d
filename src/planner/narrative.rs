use crate::config::planner::NarrativeConfig;
use crate::planner::model::PlanRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Intensive,
    Balanced,
    Light,
}

impl Intensity {
    pub fn from_hours(hours_per_week: f64, config: &NarrativeConfig) -> Self {
        if hours_per_week >= config.intensive_hours {
            Intensity::Intensive
        } else if hours_per_week >= config.balanced_hours {
            Intensity::Balanced
        } else {
            Intensity::Light
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Intensive => "intensive",
            Intensity::Balanced => "balanced",
            Intensity::Light => "light",
        }
    }
}

pub fn overview(request: &PlanRequest, total_weeks: u32, config: &NarrativeConfig) -> String {
    let intensity = Intensity::from_hours(request.available_hours_per_week, config);
    let focus = if request.weak_areas.is_empty() {
        "key exam sections".to_string()
    } else {
        let named: Vec<&str> = request.weak_areas.iter().take(3).map(String::as_str).collect();
        format!("weak topics: {}", named.join(", "))
    };

    format!(
        "Personalized {} {} exam preparation program for {} weeks. \
         The plan is built to raise your result from {}% to {}% ({:+}%). \
         Main focus: {}. Weekly load: {} hours.",
        intensity.label(),
        request.subject,
        total_weeks,
        request.current_score,
        request.target_score,
        request.score_gap(),
        focus,
        request.available_hours_per_week,
    )
}

pub fn recommendations(request: &PlanRequest, total_weeks: u32, config: &NarrativeConfig) -> Vec<String> {
    let mut recs: Vec<String> = [
        "Study regularly: a little every day beats a few long sessions a week",
        "Keep notes with the key formulas and solution methods",
        "After each topic solve at least 10-15 practice problems",
        "Take a practice test every 2 weeks to track progress",
        "Don't skip review weeks, they are essential for retaining material",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if request.score_gap() > config.large_gap_threshold {
        recs.push("Add 1-2 hours on weekends to speed up progress".to_string());
    }
    if request.weak_areas.len() > config.many_weak_areas {
        recs.push("Focus on the 2-3 most problematic topics first, then move on to the rest".to_string());
    }
    if request.available_hours_per_week < config.low_hours_threshold {
        recs.push(format!(
            "Consider increasing study time to {}+ hours a week for better results",
            config.low_hours_threshold
        ));
    }
    if total_weeks < config.short_plan_weeks {
        recs.push("The timeline is tight, make the most of every study session".to_string());
    }

    recs.push("Use the Pomodoro technique: 25 minutes of study, 5 minutes of rest".to_string());
    recs.push("Set up a study space free of distractions".to_string());
    recs
}
