use thiserror::Error;

/// Startup configuration validation errors. These are fatal: a simulation
/// is never constructed from an invalid config.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid range for {name}: min {min} > max {max}")]
    InvalidRange { name: &'static str, min: f32, max: f32 },

    #[error("negative duration for {name}: {value}")]
    NegativeDuration { name: &'static str, value: f32 },

    #[error("reaction deadline must be positive, got {0}")]
    NonPositiveDeadline(f32),
}

/// Candidate selection errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectError {
    #[error("selection attempted on an empty candidate pool")]
    EmptyCandidates,
}

impl SelectError {
    /// Every selection error is recoverable: the caller skips the action
    /// for the current cycle and the timers re-arm normally.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SelectError::EmptyCandidates)
    }
}
