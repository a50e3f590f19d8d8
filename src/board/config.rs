//! Board engine configuration.
//!
//! Every field has a default, so a host can supply a partial JSON document:
//!
//! ```
//! use atelier::board::config::BoardConfig;
//!
//! let config = BoardConfig::from_json_str(r#"{"auto_scroll": {"step_px": 40}}"#)
//!     .expect("valid configuration");
//! assert_eq!(config.auto_scroll.step_px, 40);
//! assert_eq!(config.auto_scroll.edge_threshold_px, 100);
//! ```

use crate::board::domain::{Hours, TaskDefaults};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for [`BoardConfig`].
    #[error("failed to parse board configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the engine cannot use.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Edge-proximity auto-scroll settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoScrollConfig {
    /// Distance from a viewport edge, in pixels, that triggers scrolling.
    pub edge_threshold_px: u32,
    /// Pixels scrolled per step.
    pub step_px: u32,
    /// Interval between steps while the pointer rests in an edge zone.
    pub tick_interval_ms: u64,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            edge_threshold_px: 100,
            step_px: 20,
            tick_interval_ms: 16,
        }
    }
}

impl AutoScrollConfig {
    /// Returns the tick interval as a [`Duration`].
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Defaults applied to new tasks.
    pub task_defaults: TaskDefaults,
    /// Drag auto-scroll behaviour.
    pub auto_scroll: AutoScrollConfig,
    /// Capacity of the actor's command queue.
    pub actor_queue_depth: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            task_defaults: TaskDefaults::default(),
            auto_scroll: AutoScrollConfig::default(),
            actor_queue_depth: 64,
        }
    }
}

impl BoardConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidValue`] when validation fails.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Hours::new(self.task_defaults.estimated_hours).map_err(|err| {
            ConfigError::InvalidValue {
                field: "task_defaults.estimated_hours",
                reason: err.to_string(),
            }
        })?;
        if self.auto_scroll.step_px == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auto_scroll.step_px",
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.auto_scroll.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auto_scroll.tick_interval_ms",
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.actor_queue_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "actor_queue_depth",
                reason: "must be greater than zero".to_owned(),
            });
        }
        Ok(())
    }
}
