use std::collections::BTreeSet;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use crate::error::PlanError;
use crate::planner::{GeneratedPlan, PlanRequest};

/// A generated plan accepted by a student, plus their progress through it.
/// The plan itself is kept exactly as generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub current_score: f64,
    pub target_score: f64,
    pub exam_date: NaiveDate,
    pub available_hours_per_week: f64,
    pub plan: GeneratedPlan,
    #[serde(default)]
    pub completed_weeks: BTreeSet<u32>,
    #[serde(default)]
    pub completed_focus_areas: BTreeSet<String>,
}

pub fn plan_id(user_id: &str, created_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_bytes());
    hasher.update(created_at.timestamp_millis().to_be_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("{}{}", PLAN_ID_PREFIX, &digest[..PLAN_ID_HEX_LEN])
}

const PLAN_ID_PREFIX: &str = "plan_";
const PLAN_ID_HEX_LEN: usize = 12;

/// Ids have the exact shape produced by `plan_id`.
pub fn is_valid_plan_id(id: &str) -> bool {
    id.strip_prefix(PLAN_ID_PREFIX).map_or(false, |hex| {
        hex.len() == PLAN_ID_HEX_LEN
            && hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    })
}

impl StudyPlan {
    pub fn new(request: &PlanRequest, plan: GeneratedPlan, created_at: DateTime<Utc>) -> Self {
        let user_id = request.user_id.clone().unwrap_or_else(|| "anonymous".to_string());
        StudyPlan {
            id: plan_id(&user_id, created_at),
            user_id,
            created_at,
            current_score: request.current_score,
            target_score: request.target_score,
            exam_date: request.exam_date,
            available_hours_per_week: request.available_hours_per_week,
            plan,
            completed_weeks: BTreeSet::new(),
            completed_focus_areas: BTreeSet::new(),
        }
    }

    /// Marking a week twice is a no-op
    pub fn mark_week_completed(&mut self, week_number: u32) -> Result<(), PlanError> {
        if self.plan.week(week_number).is_none() {
            return Err(PlanError::new(
                format!("Week {} is not part of this plan", week_number),
                "tracker"
            ).with_context(format!("plan: {}, weeks: {}", self.id, self.plan.total_weeks())));
        }
        self.completed_weeks.insert(week_number);
        Ok(())
    }

    pub fn mark_focus_completed(&mut self, topic: &str) -> Result<(), PlanError> {
        if !self.plan.focus_areas.iter().any(|f| f.topic == topic) {
            return Err(PlanError::new(
                format!("'{}' is not a focus area of this plan", topic),
                "tracker"
            ).with_context(format!("plan: {}", self.id)));
        }
        self.completed_focus_areas.insert(topic.to_string());
        Ok(())
    }

    /// Share of planned hours in completed weeks, in whole percent
    pub fn progress(&self) -> u32 {
        let total = self.plan.total_hours();
        if total == 0 {
            return 0;
        }
        let done: u32 = self.plan.weekly_schedule
            .iter()
            .filter(|w| self.completed_weeks.contains(&w.week_number))
            .map(|w| w.hours_required)
            .sum();
        (done as f64 * 100.0 / total as f64).round() as u32
    }

    /// 1-based week the calendar says the student should be in, clamped to the plan
    pub fn current_week(&self, today: NaiveDate) -> u32 {
        let elapsed = (today - self.created_at.date_naive()).num_days().max(0);
        let week = (elapsed / 7 + 1) as u32;
        week.min(self.plan.total_weeks().max(1))
    }

    pub fn is_finished(&self) -> bool {
        self.plan.weekly_schedule
            .iter()
            .all(|w| self.completed_weeks.contains(&w.week_number))
    }
}
