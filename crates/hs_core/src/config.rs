//! Simulation tuning configuration
//!
//! All tuning ranges live here and are validated once, before the
//! simulation is constructed. Per-tick code never re-validates.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::range::{FloatRange, IntRange};

/// Scheduler + reaction-race tuning. Defaults mirror the shipped values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Population size at spawn
    pub campers_count: usize,

    /// Delay range before the very first objective run
    pub initial_run_delay: FloatRange,

    /// Re-arm range between subsequent objective runs
    pub run_interval: FloatRange,

    /// How many campers are sent per objective run
    pub campers_per_run: IntRange,

    /// Minimum objective→pursuer / objective→camper angle (degrees) that
    /// lets a camper run even when the pursuer is closer to the objective
    pub min_objective_angle_deg: f32,

    /// Re-arm range of the directional noise hint
    pub hint_interval: FloatRange,

    pub qte: QteConfig,
}

/// Reaction-race tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QteConfig {
    /// Buffer before the first prompt of a fresh capture
    pub initial_buffer: f32,

    /// Buffer range between subsequent prompts
    pub buffer_range: FloatRange,

    /// Time allowed to react to a live prompt
    pub reaction_deadline: f32,

    /// Correct reactions required to win the race
    pub required_passes: IntRange,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            campers_count: 6,
            initial_run_delay: FloatRange::new(5.0, 10.0),
            run_interval: FloatRange::new(8.0, 16.0),
            campers_per_run: IntRange::new(1, 2),
            min_objective_angle_deg: 30.0,
            hint_interval: FloatRange::new(4.0, 9.0),
            qte: QteConfig::default(),
        }
    }
}

impl Default for QteConfig {
    fn default() -> Self {
        Self {
            initial_buffer: 1.0,
            buffer_range: FloatRange::new(0.5, 1.5),
            reaction_deadline: 0.75,
            required_passes: IntRange::new(3, 5),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.initial_run_delay.validate("initial_run_delay")?;
        self.run_interval.validate("run_interval")?;
        self.campers_per_run.validate("campers_per_run")?;
        self.hint_interval.validate("hint_interval")?;
        self.qte.validate()?;
        Ok(())
    }
}

impl QteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.buffer_range.validate("qte.buffer_range")?;
        self.required_passes.validate("qte.required_passes")?;
        if self.initial_buffer < 0.0 {
            return Err(ConfigError::NegativeDuration {
                name: "qte.initial_buffer",
                value: self.initial_buffer,
            });
        }
        if self.reaction_deadline <= 0.0 {
            return Err(ConfigError::NonPositiveDeadline(self.reaction_deadline));
        }
        Ok(())
    }
}
