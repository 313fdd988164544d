use studyplan_lib::error::{PlanError, RequestError};

#[test]
fn test_error_creation() {
    let error = PlanError::new("Test error", "test_stage");
    assert_eq!(error.message, "Test error");
    assert_eq!(error.stage, "test_stage");
    assert!(!error.is_validation());
}

#[test]
fn test_error_with_context() {
    let error = PlanError::new("Test error", "test_stage")
        .with_context("Additional context");
    assert!(error.context.is_some());
    assert_eq!(error.context.unwrap(), "Additional context");
}

#[test]
fn test_error_display() {
    let error = PlanError::new("Test error", "test_stage")
        .with_context("context")
        .with_source("source");
    let display = format!("{}", error);
    assert_eq!(display, "[test_stage] Test error (context: context) (source: source)");
}

#[test]
fn test_validation_error_conversion() {
    let error: PlanError = RequestError::NonPositiveHours(0.0).into();
    assert!(error.is_validation());
    assert_eq!(error.context.as_deref(), Some("field: availableHoursPerWeek"));
    assert!(error.message.contains("positive"));

    let error: PlanError = RequestError::MissingField("examDate").into();
    assert_eq!(error.message, "missing required field: examDate");
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: PlanError = io.into();
    assert_eq!(error.stage, "io");
    assert_eq!(error.source.as_deref(), Some("std::io"));
}

#[test]
fn test_error_serializes() {
    let error = PlanError::new("bad", "validation");
    let json = serde_json::to_value(&error).unwrap();
    assert_eq!(json["stage"], "validation");
}
