//! Session reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ExerciseKind;
use crate::results::ExerciseRecord;
use crate::statistics::{compute_progress, ProgressStats};

/// Everything recorded during one practice session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Game mode that was played.
    pub mode: ExerciseKind,
    /// Seed the session rng was built from, if any.
    #[serde(default)]
    pub seed: Option<u64>,
    pub records: Vec<ExerciseRecord>,
    pub progress: ProgressStats,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl SessionReport {
    /// Build a report, computing progress from `records`.
    pub fn new(
        mode: ExerciseKind,
        seed: Option<u64>,
        records: Vec<ExerciseRecord>,
        duration_ms: u64,
    ) -> Self {
        let progress = compute_progress(&records);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            mode,
            seed,
            records,
            progress,
            duration_ms,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
