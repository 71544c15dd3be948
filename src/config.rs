use crate::{
    domain::{StatusMapper, StatusVocabulary},
    error::{BoardError, Result},
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use tokio::fs;

fn default_activation_distance() -> f64 {
    8.0
}

fn default_persist_timeout_ms() -> u64 {
    10_000
}

/// Board engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Pointer travel in pixels before a press turns into a drag
    #[serde(default = "default_activation_distance")]
    pub activation_distance: f64,
    /// Upper bound on a single status update call
    #[serde(default = "default_persist_timeout_ms")]
    pub persist_timeout_ms: u64,
    #[serde(default)]
    pub vocabulary: StatusVocabulary,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            activation_distance: default_activation_distance(),
            persist_timeout_ms: default_persist_timeout_ms(),
            vocabulary: StatusVocabulary::default(),
        }
    }
}

impl BoardConfig {
    /// Parses and validates a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path).await?;
        Self::from_json(&contents)
    }

    pub fn persist_timeout(&self) -> Duration {
        Duration::from_millis(self.persist_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.activation_distance.is_finite() || self.activation_distance < 0.0 {
            return Err(BoardError::ConfigError(format!(
                "activation_distance must be a non-negative number, got {}",
                self.activation_distance
            )));
        }

        if self.persist_timeout_ms == 0 {
            return Err(BoardError::ConfigError(
                "persist_timeout_ms must be greater than zero".to_string(),
            ));
        }

        let vocabulary = &self.vocabulary;
        for (name, literal) in [
            ("todo_status", &vocabulary.todo_status),
            ("in_progress_status", &vocabulary.in_progress_status),
            ("completed_status", &vocabulary.completed_status),
        ] {
            if literal.trim().is_empty() {
                return Err(BoardError::ConfigError(format!("{} must not be empty", name)));
            }
        }

        if let Some((column, literal, read_back)) =
            StatusMapper::new(vocabulary).check_round_trip()
        {
            return Err(BoardError::ConfigError(format!(
                "status {:?} written for {} would be read back as {}",
                literal, column, read_back
            )));
        }

        Ok(())
    }
}
