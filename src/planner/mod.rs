//! Rule-based study plan generator.
//!
//! `(PlanRequest) -> GeneratedPlan` with no I/O and no state between calls.
//! Randomness is limited to filler topics and comes from an injected
//! [`TopicSampler`]; the plan start date is injected the same way.

pub mod duration;
pub mod focus;
pub mod model;
pub mod narrative;
pub mod schedule;

use chrono::{Duration, NaiveDate, Utc};
use crate::catalog::catalog_for_subject;
use crate::config::planner::{get_planner_config, PlannerConfig};
use crate::error::PlanError;
use crate::perf::PerfTimer;
use crate::sampling::{RandomSampler, TopicSampler};

pub use duration::PlanDuration;
pub use model::{FocusArea, GeneratedPlan, PlanRequest, Priority, WeekKind, WeekPlan};

pub struct PlanGenerator<'c> {
    config: &'c PlannerConfig,
}

impl PlanGenerator<'static> {
    /// Generator backed by the process-wide cached configuration
    pub fn new() -> Self {
        Self { config: get_planner_config() }
    }
}

impl Default for PlanGenerator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> PlanGenerator<'c> {
    pub fn with_config(config: &'c PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        self.config
    }

    /// Plan starting today (UTC) with thread-local randomness.
    pub fn generate(&self, request: &PlanRequest) -> Result<GeneratedPlan, PlanError> {
        let today = Utc::now().date_naive();
        self.generate_on(request, today, &mut RandomSampler::thread_local())
    }

    pub fn duration(&self, request: &PlanRequest, today: NaiveDate) -> Result<PlanDuration, PlanError> {
        request.validate()?;
        Ok(duration::calculate(
            request.score_gap(),
            request.available_hours_per_week,
            request.exam_date,
            today,
            &self.config.duration,
        ))
    }

    pub fn generate_on(
        &self,
        request: &PlanRequest,
        today: NaiveDate,
        sampler: &mut dyn TopicSampler,
    ) -> Result<GeneratedPlan, PlanError> {
        let _perf = PerfTimer::new("plan_generation");
        let plan_duration = self.duration(request, today)?;
        let total_weeks = plan_duration.total_weeks;

        tracing::debug!(
            total_weeks,
            weeks_from_effort = plan_duration.weeks_from_effort,
            weeks_from_deadline = plan_duration.weeks_from_deadline,
            total_hours_needed = plan_duration.total_hours_needed,
            "Computed plan duration"
        );
        if plan_duration.deadline_bound() {
            tracing::warn!(
                days_until_exam = plan_duration.days_until_exam,
                weeks_from_effort = plan_duration.weeks_from_effort,
                total_weeks,
                "Exam date leaves less time than the effort estimate asks for"
            );
        }

        let catalog = catalog_for_subject(&request.subject);

        let weekly_schedule = schedule::build_weekly_schedule(
            total_weeks,
            &request.weak_areas,
            &request.strong_areas,
            catalog,
            &self.config.schedule,
            sampler,
        );
        let focus_areas = focus::build_focus_areas(
            &request.weak_areas,
            request.current_score,
            request.target_score,
            catalog,
            &self.config.focus,
            sampler,
        );

        Ok(GeneratedPlan {
            overview: narrative::overview(request, total_weeks, &self.config.narrative),
            weekly_schedule,
            focus_areas,
            recommendations: narrative::recommendations(request, total_weeks, &self.config.narrative),
            estimated_completion: today + Duration::days(total_weeks as i64 * 7),
        })
    }
}

/// Generate with the cached configuration, today's date and thread-local randomness.
pub fn generate_study_plan(request: &PlanRequest) -> Result<GeneratedPlan, PlanError> {
    PlanGenerator::new().generate(request)
}
