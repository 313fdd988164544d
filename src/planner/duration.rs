use chrono::NaiveDate;
use crate::config::planner::DurationConfig;

/// How long the plan runs and why.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanDuration {
    /// Negative when the exam date is already behind us
    pub days_until_exam: i64,
    pub total_hours_needed: f64,
    pub weeks_from_effort: u32,
    pub weeks_from_deadline: u32,
    pub total_weeks: u32,
}

impl PlanDuration {
    /// True when the calendar, not the effort estimate, set the plan length.
    pub fn deadline_bound(&self) -> bool {
        self.weeks_from_deadline < self.weeks_from_effort
    }
}

fn clamp_weeks(weeks: f64, config: &DurationConfig) -> u32 {
    weeks
        .max(config.min_weeks as f64)
        .min(config.max_weeks as f64) as u32
}

pub fn days_until_exam(exam_date: NaiveDate, today: NaiveDate) -> i64 {
    (exam_date - today).num_days()
}

pub fn total_hours_needed(score_gap: f64, config: &DurationConfig) -> f64 {
    config.min_total_hours.max(score_gap * config.hours_per_point)
}

/// `hours_per_week` must be positive; callers validate the request first.
pub fn weeks_from_effort(score_gap: f64, hours_per_week: f64, config: &DurationConfig) -> u32 {
    let weeks = (total_hours_needed(score_gap, config) / hours_per_week).ceil();
    clamp_weeks(weeks, config)
}

pub fn weeks_from_deadline(days_until_exam: i64, config: &DurationConfig) -> u32 {
    let weeks = (days_until_exam as f64 / 7.0).ceil();
    clamp_weeks(weeks, config)
}

pub fn calculate(
    score_gap: f64,
    hours_per_week: f64,
    exam_date: NaiveDate,
    today: NaiveDate,
    config: &DurationConfig,
) -> PlanDuration {
    let days = days_until_exam(exam_date, today);
    let effort = weeks_from_effort(score_gap, hours_per_week, config);
    let deadline = weeks_from_deadline(days, config);

    PlanDuration {
        days_until_exam: days,
        total_hours_needed: total_hours_needed(score_gap, config),
        weeks_from_effort: effort,
        weeks_from_deadline: deadline,
        total_weeks: effort.min(deadline),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn effort_weeks() {
        let config = DurationConfig::default();
        assert_eq!(total_hours_needed(40.0, &config), 60.0);
        assert_eq!(weeks_from_effort(40.0, 10.0, &config), 6);
        // floor of 20 hours, then the 4-week minimum
        assert_eq!(weeks_from_effort(0.0, 10.0, &config), 4);
        assert_eq!(weeks_from_effort(-15.0, 10.0, &config), 4);
        assert_eq!(weeks_from_effort(90.0, 1.0, &config), 24);
    }

    #[test]
    fn deadline_weeks() {
        let config = DurationConfig::default();
        assert_eq!(weeks_from_deadline(140, &config), 20);
        assert_eq!(weeks_from_deadline(141, &config), 21);
        assert_eq!(weeks_from_deadline(3, &config), 4);
        assert_eq!(weeks_from_deadline(-30, &config), 4);
        assert_eq!(weeks_from_deadline(1000, &config), 24);
    }

    #[test]
    fn deadline_can_bound_the_plan() {
        let config = DurationConfig::default();
        let today = day(2026, 10, 14);
        let d = calculate(60.0, 5.0, today + chrono::Duration::days(35), today, &config);
        assert_eq!(d.weeks_from_effort, 18);
        assert_eq!(d.weeks_from_deadline, 5);
        assert_eq!(d.total_weeks, 5);
        assert!(d.deadline_bound());
    }

    #[test]
    fn past_exam_still_four_weeks() {
        let config = DurationConfig::default();
        let today = day(2026, 10, 14);
        let d = calculate(40.0, 10.0, day(2026, 9, 1), today, &config);
        assert!(d.days_until_exam < 0);
        assert_eq!(d.total_weeks, 4);
    }
}
