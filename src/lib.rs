pub mod assessment;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
mod perf;
pub mod planner;
pub mod sampling;
pub mod service;
pub mod store;
pub mod tracker;

pub use error::{PlanError, RequestError};
pub use planner::{generate_study_plan, GeneratedPlan, PlanGenerator, PlanRequest};
