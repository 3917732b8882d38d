//! Session configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use attntiv_core::{AdaptationPolicy, DifficultyTier, EngineConfig};

use crate::error::SessionError;

/// N-back mode settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusConfig {
    /// N-back distance for the first round.
    #[serde(default = "default_initial_n")]
    pub initial_n: usize,
    #[serde(default = "default_min_n")]
    pub min_n: usize,
    #[serde(default = "default_max_n")]
    pub max_n: usize,
    /// Items shown per round.
    #[serde(default = "default_sequence_length")]
    pub sequence_length: usize,
}

fn default_initial_n() -> usize {
    2
}
fn default_min_n() -> usize {
    1
}
fn default_max_n() -> usize {
    4
}
fn default_sequence_length() -> usize {
    20
}

impl FocusConfig {
    /// Bounds a focus session can be played with: `1 <= min_n <= initial_n
    /// <= max_n < sequence_length`.
    pub fn check(&self) -> Result<(), SessionError> {
        let invalid = |msg: String| Err(SessionError::InvalidConfig(msg));
        if self.min_n < 1 {
            return invalid("focus.min_n must be at least 1".into());
        }
        if self.min_n > self.max_n {
            return invalid(format!(
                "focus.min_n ({}) must not exceed focus.max_n ({})",
                self.min_n, self.max_n
            ));
        }
        if !(self.min_n..=self.max_n).contains(&self.initial_n) {
            return invalid(format!(
                "focus.initial_n ({}) must be within [{}, {}]",
                self.initial_n, self.min_n, self.max_n
            ));
        }
        if self.sequence_length <= self.max_n {
            return invalid(format!(
                "focus.sequence_length ({}) must be longer than focus.max_n ({})",
                self.sequence_length, self.max_n
            ));
        }
        Ok(())
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            initial_n: default_initial_n(),
            min_n: default_min_n(),
            max_n: default_max_n(),
            sequence_length: default_sequence_length(),
        }
    }
}

/// Arithmetic mode settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProblemSolvingConfig {
    #[serde(default = "default_questions_per_round")]
    pub problems_per_round: u32,
    /// Time allowed per problem; what is left over becomes the time bonus.
    #[serde(default = "default_seconds_per_problem")]
    pub seconds_per_problem: f64,
}

fn default_questions_per_round() -> u32 {
    5
}
fn default_seconds_per_problem() -> f64 {
    30.0
}

impl Default for ProblemSolvingConfig {
    fn default() -> Self {
        Self {
            problems_per_round: default_questions_per_round(),
            seconds_per_problem: default_seconds_per_problem(),
        }
    }
}

/// Visual search mode settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedConfig {
    #[serde(default = "default_questions_per_round")]
    pub challenges_per_round: u32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            challenges_per_round: default_questions_per_round(),
        }
    }
}

/// Top-level attntiv configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttntivConfig {
    /// Fixed rng seed; unset means seed from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Rejected draws allowed per generator call.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Tier every session starts at.
    #[serde(default = "default_initial_tier")]
    pub initial_tier: DifficultyTier,
    #[serde(default)]
    pub policy: AdaptationPolicy,
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default)]
    pub problem_solving: ProblemSolvingConfig,
    #[serde(default)]
    pub speed: SpeedConfig,
}

fn default_max_retries() -> u32 {
    EngineConfig::default().max_retries
}
fn default_initial_tier() -> DifficultyTier {
    DifficultyTier::Beginner
}

impl Default for AttntivConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_retries: default_max_retries(),
            initial_tier: default_initial_tier(),
            policy: AdaptationPolicy::default(),
            focus: FocusConfig::default(),
            problem_solving: ProblemSolvingConfig::default(),
            speed: SpeedConfig::default(),
        }
    }
}

impl AttntivConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_retries: self.max_retries,
        }
    }

    /// Reject settings no session could run with.
    pub fn validate(&self) -> Result<()> {
        self.policy
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid [policy]: {e}"))?;

        self.focus
            .check()
            .map_err(|e| anyhow::anyhow!("invalid [focus]: {e}"))?;

        anyhow::ensure!(
            self.problem_solving.problems_per_round >= 1,
            "problem_solving.problems_per_round must be at least 1"
        );
        anyhow::ensure!(
            self.problem_solving.seconds_per_problem > 0.0,
            "problem_solving.seconds_per_problem must be positive"
        );
        anyhow::ensure!(
            self.speed.challenges_per_round >= 1,
            "speed.challenges_per_round must be at least 1"
        );
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `attntiv.toml` in the current directory
/// 2. `~/.config/attntiv/config.toml`
///
/// `ATTNTIV_SEED` overrides the configured seed.
pub fn load_config() -> Result<AttntivConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AttntivConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("attntiv.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loading config from {}", path.display());
            toml::from_str::<AttntivConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AttntivConfig::default(),
    };

    if let Ok(seed) = std::env::var("ATTNTIV_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("ATTNTIV_SEED is not a valid seed: '{seed}'"))?;
        config.seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("attntiv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AttntivConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.initial_tier, DifficultyTier::Beginner);
        assert_eq!(config.focus.initial_n, 2);
        assert_eq!(config.focus.sequence_length, 20);
        assert_eq!(config.problem_solving.problems_per_round, 5);
        assert_eq!(config.problem_solving.seconds_per_problem, 30.0);
        assert_eq!(config.speed.challenges_per_round, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
seed = 7
initial_tier = "intermediate"

[policy]
escalate_streak = 5

[focus]
initial_n = 3
"#;
        let config: AttntivConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.initial_tier, DifficultyTier::Intermediate);
        assert_eq!(config.policy.escalate_streak, 5);
        assert_eq!(config.policy.escalate_accuracy, 0.8);
        assert_eq!(config.focus.initial_n, 3);
        assert_eq!(config.focus.max_n, 4);
        assert_eq!(config.max_retries, EngineConfig::default().max_retries);
    }

    #[test]
    fn validate_rejects_bad_focus_settings() {
        let mut config = AttntivConfig::default();
        config.focus.sequence_length = 4;
        assert!(config.validate().is_err());

        let mut config = AttntivConfig::default();
        config.focus.min_n = 3;
        config.focus.max_n = 2;
        assert!(config.validate().is_err());

        let mut config = AttntivConfig::default();
        config.focus.initial_n = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attntiv.toml");
        std::fs::write(&path, "max_retries = 50\n[speed]\nchallenges_per_round = 3\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.max_retries, 50);
        assert_eq!(config.engine_config().max_retries, 50);
        assert_eq!(config.speed.challenges_per_round, 3);
    }

    #[test]
    fn load_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/attntiv.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_rejects_invalid_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attntiv.toml");
        std::fs::write(&path, "[policy]\ndeescalate_accuracy = 0.95\n").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("[policy]"));
    }
}
