use chrono::NaiveDate;
use serde_json::json;
use studyplan_lib::config::planner::PlannerConfig;
use studyplan_lib::planner::PlanGenerator;
use studyplan_lib::sampling::RandomSampler;
use studyplan_lib::service::{handle_generate_request, parse_request, GeneratedBy, LOCAL_CONFIDENCE};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
}

#[test]
fn test_local_plan_envelope() {
    let config = PlannerConfig::default();
    let generator = PlanGenerator::with_config(&config);
    let body = json!({
        "userId": "u-42",
        "currentScore": 45,
        "targetScore": 85,
        "examDate": "2027-03-03T00:00:00.000Z",
        "weakAreas": ["Trigonometry", "Derivatives"],
        "strongAreas": ["Algebra"],
        "availableHoursPerWeek": 10,
        "subject": "Mathematics"
    });

    let response = handle_generate_request(&generator, &body, today(), &mut RandomSampler::seeded(1));
    assert!(response.success);
    assert_eq!(response.generated_by, GeneratedBy::Local);
    assert_eq!(response.confidence, LOCAL_CONFIDENCE);
    assert!(response.error.is_none());
    let plan = response.plan.expect("plan present on success");
    assert_eq!(plan.total_weeks(), 6);

    let wire = serde_json::to_value(&handle_generate_request(&generator, &body, today(), &mut RandomSampler::seeded(1))).unwrap();
    assert_eq!(wire["generatedBy"], "local");
    assert_eq!(wire["plan"]["weeklySchedule"][0]["weekNumber"], 1);
    assert_eq!(wire["plan"]["focusAreas"][0]["priority"], "high");
    assert_eq!(wire["plan"]["estimatedCompletion"], "2026-11-25");
}

#[test]
fn test_zero_score_counts_as_present() {
    let body = json!({
        "currentScore": 0,
        "targetScore": 50,
        "examDate": "2027-01-01",
        "availableHoursPerWeek": 5
    });
    let request = parse_request(&body).unwrap();
    assert_eq!(request.current_score, 0.0);
    assert_eq!(request.subject, "Mathematics");
}

#[test]
fn test_missing_fields_are_reported() {
    let config = PlannerConfig::default();
    let generator = PlanGenerator::with_config(&config);
    let body = json!({ "currentScore": 45, "targetScore": 85, "availableHoursPerWeek": 10 });
    let response = handle_generate_request(&generator, &body, today(), &mut RandomSampler::seeded(1));
    assert!(!response.success);
    assert_eq!(response.generated_by, GeneratedBy::Error);
    assert!(response.plan.is_none());
    assert!(response.error.unwrap().contains("examDate"));

    let body = json!({ "currentScore": null, "targetScore": 85, "examDate": "2027-01-01", "availableHoursPerWeek": 10 });
    assert!(parse_request(&body).unwrap_err().is_validation());
}

#[test]
fn test_zero_hours_fails_cleanly() {
    let config = PlannerConfig::default();
    let generator = PlanGenerator::with_config(&config);
    let body = json!({
        "currentScore": 45,
        "targetScore": 85,
        "examDate": "2027-01-01",
        "availableHoursPerWeek": 0
    });
    let response = handle_generate_request(&generator, &body, today(), &mut RandomSampler::seeded(1));
    assert!(!response.success);
    assert!(response.error.unwrap().contains("[validation]"));
}

#[test]
fn test_bad_exam_date() {
    let body = json!({
        "currentScore": 45,
        "targetScore": 85,
        "examDate": "someday",
        "availableHoursPerWeek": 10
    });
    let err = parse_request(&body).unwrap_err();
    assert_eq!(err.stage, "json_parse");
    assert!(err.message.contains("someday"));
}
