use serde::{Serialize, Deserialize};
use std::fmt;
use thiserror::Error;

/// Unified error type for the study planner.
/// Library functions return Result<T, PlanError>; the stage names where it failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanError {
    pub message: String,
    pub stage: String,
    pub context: Option<String>,
    pub source: Option<String>,
}

impl PlanError {
    /// Create a new error with stage and message
    pub fn new<S: Into<String>>(message: S, stage: &'static str) -> Self {
        PlanError {
            message: message.into(),
            stage: stage.to_string(),
            context: None,
            source: None,
        }
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn is_validation(&self) -> bool {
        self.stage == "validation"
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)?;
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// Input problems the generator refuses to work with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("availableHoursPerWeek must be a positive number, got {0}")]
    NonPositiveHours(f64),

    #[error("{field} must be a finite number")]
    NonFiniteValue { field: &'static str },

    #[error("examDate is not a valid ISO-8601 date: {0}")]
    InvalidExamDate(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl RequestError {
    /// Name of the request field the error is about
    pub fn field(&self) -> &'static str {
        match self {
            RequestError::NonPositiveHours(_) => "availableHoursPerWeek",
            RequestError::NonFiniteValue { field } => *field,
            RequestError::InvalidExamDate(_) => "examDate",
            RequestError::MissingField(field) => *field,
        }
    }
}

impl From<RequestError> for PlanError {
    fn from(err: RequestError) -> Self {
        let field = err.field();
        PlanError::new(err.to_string(), "validation")
            .with_context(format!("field: {}", field))
    }
}

impl From<std::io::Error> for PlanError {
    fn from(err: std::io::Error) -> Self {
        PlanError::new(
            format!("I/O error: {}", err),
            "io"
        ).with_source("std::io")
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        PlanError::new(
            format!("JSON error: {}", err),
            "json_parse"
        ).with_source("serde_json")
    }
}

impl From<toml::de::Error> for PlanError {
    fn from(err: toml::de::Error) -> Self {
        PlanError::new(
            format!("TOML error: {}", err),
            "config"
        ).with_source("toml")
    }
}
