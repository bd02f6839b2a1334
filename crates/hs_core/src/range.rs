//! Sampled interval types
//!
//! A range keeps one "currently selected" value alongside its `[min, max]`
//! bounds. Timers re-sample on each re-arm via `select_random`; the selected
//! value stays stable between re-arms.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Closed `[min, max]` range over f32 with a sticky selected value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
    #[serde(skip)]
    selected: Option<f32>,
}

impl FloatRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max, selected: None }
    }

    pub fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidRange { name, min: self.min, max: self.max });
        }
        if self.min < 0.0 {
            return Err(ConfigError::NegativeDuration { name, value: self.min });
        }
        Ok(())
    }

    /// Sample uniformly and remember the result as the selected value.
    pub fn select_random<R: Rng>(&mut self, rng: &mut R) -> f32 {
        let value = self.get_random(rng);
        self.selected = Some(value);
        value
    }

    /// Sample uniformly without touching the selected value.
    pub fn get_random<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }

    pub fn selected(&self) -> Option<f32> {
        self.selected
    }
}

/// Closed `[min, max]` range over u32 with a sticky selected value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IntRange {
    pub min: u32,
    pub max: u32,
    #[serde(skip)]
    selected: Option<u32>,
}

impl IntRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max, selected: None }
    }

    pub fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                name,
                min: self.min as f32,
                max: self.max as f32,
            });
        }
        Ok(())
    }

    pub fn select_random<R: Rng>(&mut self, rng: &mut R) -> u32 {
        let value = if self.min >= self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        };
        self.selected = Some(value);
        value
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }
}
