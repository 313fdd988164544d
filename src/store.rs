use std::path::{Path, PathBuf};
use crate::error::PlanError;
use crate::tracker::{is_valid_plan_id, StudyPlan};

/// One pretty-printed JSON document per accepted plan.
#[derive(Debug, Clone)]
pub struct PlanStore {
    root: PathBuf,
}

impl PlanStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        PlanStore { root: root.into() }
    }

    pub fn default_location() -> Self {
        Self::new(crate::config::app_data_dir().join("plans"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rejects anything that is not a plan id, so ids cannot leave `root`.
    fn plan_path(&self, id: &str) -> Result<PathBuf, PlanError> {
        if !is_valid_plan_id(id) {
            return Err(PlanError::new(format!("Invalid plan id: {:?}", id), "store")
                .with_context("expected plan_ followed by 12 lowercase hex digits"));
        }
        Ok(self.root.join(format!("{}.json", id)))
    }

    pub async fn save(&self, plan: &StudyPlan) -> Result<(), PlanError> {
        let path = self.plan_path(&plan.id)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| io_error(e, "Failed to create plan directory", &self.root))?;

        let json = serde_json::to_string_pretty(plan)
            .map_err(|e| PlanError::new(
                format!("Failed to serialize plan: {}", e),
                "json_serialize"
            ))?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|e| io_error(e, "Failed to write plan", &path))?;

        tracing::debug!(id = %plan.id, path = ?path, "Saved study plan");
        Ok(())
    }

    pub async fn load(&self, id: &str) -> Result<Option<StudyPlan>, PlanError> {
        let path = self.plan_path(id)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                serde_json::from_str(&content)
                    .map_err(|e| PlanError::new(
                        format!("Failed to parse plan: {}", e),
                        "json_parse"
                    ).with_context(format!("path: {:?}", path)))
                    .map(Some)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(e, "Failed to read plan", &path)),
        }
    }

    /// All readable plans, oldest first. Unparsable files are skipped with a warning.
    pub async fn list(&self) -> Result<Vec<StudyPlan>, PlanError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(io_error(e, "Failed to list plans", &self.root)),
        };

        let mut plans = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(path = ?path, error = %e, "Failed to read plan file");
                    continue;
                }
            };
            match serde_json::from_str::<StudyPlan>(&content) {
                Ok(plan) => plans.push(plan),
                Err(e) => tracing::warn!(path = ?path, error = %e, "Skipping unparsable plan file"),
            }
        }

        plans.sort_by_key(|p| p.created_at);
        Ok(plans)
    }
}

fn io_error(err: std::io::Error, what: &str, path: &Path) -> PlanError {
    PlanError::new(format!("{}: {}", what, err), "io")
        .with_context(format!("path: {:?}", path))
}
