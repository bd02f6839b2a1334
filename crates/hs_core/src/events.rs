//! Outbound simulation events
//!
//! Everything the core asks of its host (audio cues, UI prompts, agent
//! commands) is expressed as a `SimEvent`. The host drains the event list
//! once per frame; the core never calls into presentation code.

use serde::{Deserialize, Serialize};

use crate::camper::CamperId;
use crate::qte::QteKey;

/// Terminal and per-prompt outcomes of a reaction-race session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// One correct reaction registered
    Win,
    /// Race lost: deadline expired or wrong key
    Fail,
    /// Required pass count reached; eating resolution begins
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    /// Command the camper to start running toward the objective
    RunToObjective { camper: CamperId },

    /// Directional noise cue toward a camper position
    HintCue { position: (f32, f32) },

    /// A directional prompt went live
    PromptShown { key: QteKey },

    /// The live prompt was removed
    PromptCleared,

    /// Reaction-deadline indicator, 0.0..=1.0 of time remaining
    Progress { fraction: f32 },

    /// Session outcome marker
    Outcome { outcome: Outcome },

    /// Fired exactly once per camper that reaches the objective
    CamperSafe { camper: CamperId },
}
