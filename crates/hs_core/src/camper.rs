//! Camper population types
//!
//! ## State transition rules
//! ```text
//! Hiding → Moving/RunningToObjective/Captured
//! Moving → Captured
//! RunningToObjective → Captured/Safe
//! Captured → Moving (released) / Eaten
//! Eaten, Safe: terminal
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a camper inside the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CamperId(pub usize);

impl fmt::Display for CamperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "camper#{}", self.0)
    }
}

/// Current camper state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CamperState {
    /// Crouched at a hiding spot
    #[default]
    Hiding,

    /// Moving between spots (also the released-after-capture state)
    Moving,

    /// Committed to a run toward the objective
    RunningToObjective,

    /// Held by the pursuer, owned by an active reaction-race session
    Captured,

    /// Terminal: lost
    Eaten,

    /// Terminal: reached the objective
    Safe,
}

impl CamperState {
    /// Still counts toward the remaining population
    pub fn is_in_play(&self) -> bool {
        !matches!(self, CamperState::Eaten | CamperState::Safe)
    }

    /// Eligible for an objective-run command
    pub fn can_run_to_objective(&self) -> bool {
        matches!(self, CamperState::Hiding)
    }

    /// Eligible as a noise-hint target
    pub fn is_hint_eligible(&self) -> bool {
        matches!(self, CamperState::Hiding | CamperState::Moving)
    }

    /// Can be grabbed by the pursuer
    pub fn can_be_captured(&self) -> bool {
        matches!(
            self,
            CamperState::Hiding | CamperState::Moving | CamperState::RunningToObjective
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CamperState::Eaten | CamperState::Safe)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camper {
    pub id: CamperId,
    pub position: (f32, f32),
    pub state: CamperState,
}

impl Camper {
    pub fn new(id: CamperId, position: (f32, f32)) -> Self {
        Self { id, position, state: CamperState::Hiding }
    }
}

/// Euclidean distance between two world positions.
#[inline]
pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Unsigned angle between two direction vectors, in degrees.
/// Zero-length vectors yield 0.
#[inline]
pub fn angle_between_deg(a: (f32, f32), b: (f32, f32)) -> f32 {
    let len_a = (a.0 * a.0 + a.1 * a.1).sqrt();
    let len_b = (b.0 * b.0 + b.1 * b.1).sqrt();
    if len_a < 1e-6 || len_b < 1e-6 {
        return 0.0;
    }
    let dot = (a.0 * b.0 + a.1 * b.1) / (len_a * len_b);
    dot.clamp(-1.0, 1.0).acos().to_degrees()
}
