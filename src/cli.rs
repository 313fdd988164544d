use std::io::Read;
use std::path::{Path, PathBuf};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use crate::assessment::{build_plan_request, AssessmentResult, StudentProfile};
use crate::config::planner::{get_planner_config, get_planner_config_origin, ConfigOrigin, PlannerConfig};
use crate::error::PlanError;
use crate::planner::PlanGenerator;
use crate::sampling::{RandomSampler, TopicSampler};
use crate::service::{handle_generate_request, parse_request};
use crate::store::PlanStore;
use crate::tracker::StudyPlan;

#[derive(Parser, Debug)]
#[command(name = "studyplan", version, about = "Generate and track exam-preparation study plans")]
pub struct Cli {
    /// Planner config file (TOML); overrides $STUDYPLAN_CONFIG
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding saved plans
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateOpts {
    /// Plan start date (defaults to today, UTC)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Seed for filler-topic sampling, for reproducible plans
    #[arg(long)]
    pub seed: Option<u64>,

    /// User id recorded with the request
    #[arg(long)]
    pub user: Option<String>,

    /// Save the plan to the store for progress tracking
    #[arg(long)]
    pub save: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a plan from a JSON request ("-" reads stdin)
    Generate {
        #[arg(long, default_value = "-")]
        input: String,
        #[command(flatten)]
        opts: GenerateOpts,
    },
    /// Generate a plan from a student profile and a quiz result
    FromAssessment {
        #[arg(long)]
        profile: PathBuf,
        #[arg(long)]
        assessment: PathBuf,
        #[command(flatten)]
        opts: GenerateOpts,
    },
    /// Print a saved plan
    Show { id: String },
    /// List saved plans
    List,
    /// Mark a week of a saved plan as completed
    Complete {
        id: String,
        #[arg(long)]
        week: u32,
    },
}

/// Text to print and whether the command succeeded
pub struct CommandOutput {
    pub body: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(body: String) -> Self {
        CommandOutput { body, success: true }
    }
}

pub struct RunContext {
    config: PlannerConfig,
    origin: ConfigOrigin,
    store: PlanStore,
}

impl RunContext {
    pub fn new(config_path: Option<&Path>, store_root: Option<&Path>) -> Result<Self, PlanError> {
        let (config, origin) = match config_path {
            Some(path) => (
                PlannerConfig::load_from_path(path)?,
                ConfigOrigin::File { path: path.to_path_buf() },
            ),
            None => (get_planner_config().clone(), get_planner_config_origin().clone()),
        };
        let store = match store_root {
            Some(root) => PlanStore::new(root),
            None => PlanStore::default_location(),
        };
        Ok(RunContext { config, origin, store })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn config_origin(&self) -> &ConfigOrigin {
        &self.origin
    }

    pub async fn execute(&self, command: &Command) -> Result<CommandOutput, PlanError> {
        match command {
            Command::Generate { input, opts } => {
                let body: Value = serde_json::from_str(&read_input(input)?)?;
                self.generate(body, opts).await
            }
            Command::FromAssessment { profile, assessment, opts } => {
                let profile: StudentProfile = read_json(profile)?;
                let result: AssessmentResult = read_json(assessment)?;
                let today = opts.today.unwrap_or_else(|| Utc::now().date_naive());
                let request = build_plan_request(&profile, &result, today, &self.config.defaults);
                self.generate(serde_json::to_value(&request)?, opts).await
            }
            Command::Show { id } => {
                let plan = self.load_plan(id).await?;
                Ok(CommandOutput::ok(serde_json::to_string_pretty(&plan)?))
            }
            Command::List => {
                let plans = self.store.list().await?;
                if plans.is_empty() {
                    return Ok(CommandOutput::ok(format!("No saved plans in {:?}", self.store.root())));
                }
                let lines: Vec<String> = plans
                    .iter()
                    .map(|p| format!(
                        "{}  {}  {} weeks  {}% done  created {}",
                        p.id,
                        p.user_id,
                        p.plan.total_weeks(),
                        p.progress(),
                        p.created_at.format("%Y-%m-%d"),
                    ))
                    .collect();
                Ok(CommandOutput::ok(lines.join("\n")))
            }
            Command::Complete { id, week } => {
                let mut plan = self.load_plan(id).await?;
                plan.mark_week_completed(*week)?;
                self.store.save(&plan).await?;
                Ok(CommandOutput::ok(format!(
                    "Week {} of {} completed ({}% done)",
                    week,
                    plan.id,
                    plan.progress()
                )))
            }
        }
    }

    async fn generate(&self, mut body: Value, opts: &GenerateOpts) -> Result<CommandOutput, PlanError> {
        if let (Some(user), Some(obj)) = (&opts.user, body.as_object_mut()) {
            obj.insert("userId".to_string(), Value::String(user.clone()));
        }

        let today = opts.today.unwrap_or_else(|| Utc::now().date_naive());
        let mut sampler: Box<dyn TopicSampler> = match opts.seed {
            Some(seed) => Box::new(RandomSampler::seeded(seed)),
            None => Box::new(RandomSampler::thread_local()),
        };

        let generator = PlanGenerator::with_config(&self.config);
        let response = handle_generate_request(&generator, &body, today, sampler.as_mut());
        let success = response.success;
        let mut output = serde_json::to_value(&response)?;

        if opts.save {
            if let (Some(plan), Ok(request)) = (response.plan, parse_request(&body)) {
                let study_plan = StudyPlan::new(&request, plan, created_at(opts.today));
                self.store.save(&study_plan).await?;
                tracing::info!(id = %study_plan.id, "Saved study plan");
                if let Some(obj) = output.as_object_mut() {
                    obj.insert("planId".to_string(), Value::String(study_plan.id));
                }
            }
        }

        Ok(CommandOutput {
            body: serde_json::to_string_pretty(&output)?,
            success,
        })
    }

    async fn load_plan(&self, id: &str) -> Result<StudyPlan, PlanError> {
        self.store.load(id).await?.ok_or_else(|| {
            PlanError::new(format!("No saved plan with id {}", id), "store")
                .with_context(format!("store: {:?}", self.store.root()))
        })
    }
}

/// `--today` moves the creation date; the wall-clock time of day is kept
/// so ids stay distinct between runs.
fn created_at(today: Option<NaiveDate>) -> DateTime<Utc> {
    let now = Utc::now();
    match today {
        Some(day) => Utc.from_utc_datetime(&day.and_time(now.time())),
        None => now,
    }
}

fn read_input(input: &str) -> Result<String, PlanError> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input)
            .map_err(|e| PlanError::from(e).with_context(format!("input: {}", input)))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, PlanError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PlanError::from(e).with_context(format!("path: {:?}", path)))?;
    serde_json::from_str(&content)
        .map_err(|e| PlanError::from(e).with_context(format!("path: {:?}", path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_follows_today_override() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(created_at(Some(day)).date_naive(), day);
    }
}
