//! Transport-agnostic generate-plan handler.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::error::{PlanError, RequestError};
use crate::planner::{GeneratedPlan, PlanGenerator, PlanRequest};
use crate::sampling::TopicSampler;

pub const LOCAL_CONFIDENCE: f64 = 0.6;
const REQUIRED_FIELDS: [&str; 3] = ["currentScore", "targetScore", "examDate"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedBy {
    Local,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<GeneratedPlan>,
    pub recommendations: Vec<String>,
    pub confidence: f64,
    pub generated_by: GeneratedBy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlanResponse {
    pub fn local(plan: GeneratedPlan) -> Self {
        PlanResponse {
            success: true,
            plan: Some(plan),
            recommendations: vec![],
            confidence: LOCAL_CONFIDENCE,
            generated_by: GeneratedBy::Local,
            note: Some("Generated by the rule-based local planner".to_string()),
            error: None,
        }
    }

    pub fn failure(err: &PlanError) -> Self {
        PlanResponse {
            success: false,
            plan: None,
            recommendations: vec![],
            confidence: 0.0,
            generated_by: GeneratedBy::Error,
            note: None,
            error: Some(err.to_string()),
        }
    }
}

/// Presence check on the raw body, then typed parsing
pub fn parse_request(body: &Value) -> Result<PlanRequest, PlanError> {
    for field in REQUIRED_FIELDS {
        if body.get(field).map_or(true, Value::is_null) {
            return Err(RequestError::MissingField(field).into());
        }
    }
    serde_json::from_value(body.clone())
        .map_err(|e| PlanError::from(e).with_context("generate-plan request body"))
}

pub fn handle_generate_request(
    generator: &PlanGenerator<'_>,
    body: &Value,
    today: NaiveDate,
    sampler: &mut dyn TopicSampler,
) -> PlanResponse {
    let outcome = parse_request(body)
        .and_then(|request| generator.generate_on(&request, today, sampler)
            .map(|plan| (request, plan)));

    match outcome {
        Ok((request, plan)) => {
            tracing::info!(
                user_id = request.user_id.as_deref().unwrap_or("anonymous"),
                current_score = request.current_score,
                target_score = request.target_score,
                total_weeks = plan.total_weeks(),
                "Generated study plan"
            );
            PlanResponse::local(plan)
        }
        Err(e) => {
            if e.is_validation() {
                tracing::warn!(error = %e, "Rejected plan request");
            } else {
                tracing::error!(error = %e, "Plan generation failed");
            }
            PlanResponse::failure(&e)
        }
    }
}
