use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::error::RequestError;

fn default_subject() -> String {
    "Mathematics".to_string()
}

/// Input to one plan generation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Percent, 0-100
    pub current_score: f64,
    /// Percent, 0-100, expected >= current_score
    pub target_score: f64,
    #[serde(serialize_with = "serialize_date", deserialize_with = "deserialize_exam_date")]
    pub exam_date: NaiveDate,
    #[serde(default)]
    pub weak_areas: Vec<String>,
    #[serde(default)]
    pub strong_areas: Vec<String>,
    pub available_hours_per_week: f64,
    #[serde(default = "default_subject")]
    pub subject: String,
}

impl PlanRequest {
    pub fn score_gap(&self) -> f64 {
        self.target_score - self.current_score
    }

    /// Reject inputs the heuristics cannot divide by or compare with
    pub fn validate(&self) -> Result<(), RequestError> {
        if !self.current_score.is_finite() {
            return Err(RequestError::NonFiniteValue { field: "currentScore" });
        }
        if !self.target_score.is_finite() {
            return Err(RequestError::NonFiniteValue { field: "targetScore" });
        }
        if !self.available_hours_per_week.is_finite() {
            return Err(RequestError::NonFiniteValue { field: "availableHoursPerWeek" });
        }
        if self.available_hours_per_week <= 0.0 {
            return Err(RequestError::NonPositiveHours(self.available_hours_per_week));
        }
        Ok(())
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (UTC date is kept).
pub fn parse_exam_date(raw: &str) -> Result<NaiveDate, RequestError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| RequestError::InvalidExamDate(raw.to_string()))
}

fn deserialize_exam_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_exam_date(&raw).map_err(serde::de::Error::custom)
}

fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
}

/// The generated curriculum. Callers may persist it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub overview: String,
    pub weekly_schedule: Vec<WeekPlan>,
    pub focus_areas: Vec<FocusArea>,
    pub recommendations: Vec<String>,
    pub estimated_completion: NaiveDate,
}

impl GeneratedPlan {
    pub fn total_weeks(&self) -> u32 {
        self.weekly_schedule.len() as u32
    }

    pub fn week(&self, week_number: u32) -> Option<&WeekPlan> {
        self.weekly_schedule.iter().find(|w| w.week_number == week_number)
    }

    pub fn total_hours(&self) -> u32 {
        self.weekly_schedule.iter().map(|w| w.hours_required).sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WeekKind {
    Regular,
    Review,
    ExamPrep,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    pub week_number: u32,
    pub kind: WeekKind,
    pub topics: Vec<String>,
    pub goals: Vec<String>,
    pub hours_required: u32,
    pub resources: Vec<String>,
}

/// Ordered so that `High < Medium < Low`; sorted focus lists go from most to least urgent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A topic picked for concentrated study.
/// Levels are presentation heuristics derived from the overall score, not measurements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FocusArea {
    pub topic: String,
    pub priority: Priority,
    pub current_level: f64,
    pub target_level: f64,
    pub estimated_hours: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exam_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2027, 6, 1).unwrap();
        assert_eq!(parse_exam_date("2027-06-01").unwrap(), expected);
        assert_eq!(parse_exam_date("2027-06-01T09:00:00Z").unwrap(), expected);
        assert_eq!(parse_exam_date("2027-06-01T23:30:00-02:00").unwrap(), expected.succ_opt().unwrap());
        assert!(matches!(parse_exam_date("next june"), Err(RequestError::InvalidExamDate(_))));
    }

    #[test]
    fn request_wire_format() {
        let request: PlanRequest = serde_json::from_str(r#"{
            "currentScore": 45,
            "targetScore": 85,
            "examDate": "2027-03-01",
            "availableHoursPerWeek": 10
        }"#).unwrap();
        assert_eq!(request.subject, "Mathematics");
        assert!(request.weak_areas.is_empty());
        assert_eq!(request.score_gap(), 40.0);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["examDate"], "2027-03-01");
        assert!(json.get("userId").is_none());
    }

    #[test]
    fn priority_order() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"medium\"");
    }
}
