//! Reaction-race (QTE) state machine
//!
//! One session per capture. The captured camper is owned by the session
//! until it resolves:
//!
//! ```text
//! Idle/Failed → AwaitingPrompt → PromptActive → AwaitingPrompt (pass)
//!                                            → Resolving (threshold reached)
//!                                            → Failed (deadline or wrong key)
//! Resolving → Idle (external resolution-complete signal)
//! ```
//!
//! Inputs are applied as they arrive; the host delivers a frame's inputs
//! before calling `tick`, so a correct key beats a deadline expiring in the
//! same frame.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::camper::CamperId;
use crate::config::QteConfig;
use crate::events::{Outcome, SimEvent};

/// Directional prompt symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QteKey {
    North,
    South,
    West,
    East,
}

impl QteKey {
    pub const ALL: [QteKey; 4] = [QteKey::North, QteKey::South, QteKey::West, QteKey::East];

    /// Uniform draw, independent of the previous prompt. Prompts may repeat;
    /// the no-repeat rule applies to camper selection, not to keys.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QtePhase {
    /// No session; also the resting state after a resolved session
    #[default]
    Idle,

    /// Counting down the inter-prompt buffer
    AwaitingPrompt,

    /// A prompt is live and racing the reaction deadline
    PromptActive,

    /// Threshold reached; waiting for the external eating resolution
    Resolving,

    /// Race lost; session disabled until the next capture
    Failed,
}

impl QtePhase {
    pub fn is_active(&self) -> bool {
        matches!(self, QtePhase::AwaitingPrompt | QtePhase::PromptActive | QtePhase::Resolving)
    }
}

/// Per-capture session state. Created once, re-activated per capture.
#[derive(Debug, Clone)]
pub struct QteSession {
    cfg: QteConfig,
    phase: QtePhase,
    camper: Option<CamperId>,
    required_passes: u32,
    passes: u32,
    current_key: Option<QteKey>,
    buffer_remaining: f32,
    deadline_remaining: f32,
}

impl QteSession {
    pub fn new(cfg: QteConfig) -> Self {
        Self {
            cfg,
            phase: QtePhase::Idle,
            camper: None,
            required_passes: 0,
            passes: 0,
            current_key: None,
            buffer_remaining: 0.0,
            deadline_remaining: 0.0,
        }
    }

    pub fn phase(&self) -> QtePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn captured_camper(&self) -> Option<CamperId> {
        self.camper
    }

    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn required_passes(&self) -> u32 {
        self.required_passes
    }

    pub fn current_key(&self) -> Option<QteKey> {
        self.current_key
    }

    /// Start a fresh session for a captured camper. The pass threshold is
    /// sampled once here and fixed for the session's lifetime.
    pub fn activate<R: Rng>(&mut self, camper: CamperId, rng: &mut R, events: &mut Vec<SimEvent>) {
        self.required_passes = self.cfg.required_passes.select_random(rng).max(1);
        self.passes = 0;
        self.current_key = None;
        self.buffer_remaining = self.cfg.initial_buffer;
        self.deadline_remaining = self.cfg.reaction_deadline;
        self.camper = Some(camper);
        self.phase = QtePhase::AwaitingPrompt;
        events.push(SimEvent::Progress { fraction: 0.0 });
        debug!("qte session started for {camper}, {} passes required", self.required_passes);
    }

    /// Advance countdowns by `dt`. Returns the camper to release when the
    /// race is lost this tick.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) -> Option<CamperId> {
        if self.phase == QtePhase::AwaitingPrompt {
            self.buffer_remaining -= dt;
            if self.buffer_remaining <= 0.0 {
                let key = QteKey::sample(rng);
                self.current_key = Some(key);
                self.deadline_remaining = self.cfg.reaction_deadline;
                self.phase = QtePhase::PromptActive;
                events.push(SimEvent::PromptShown { key });
                events.push(SimEvent::Progress { fraction: 1.0 });
                debug!("qte prompt {key:?} live");
            }
        }

        // A prompt shown this tick starts racing immediately, so the
        // deadline also burns the remainder of this frame.
        if self.phase == QtePhase::PromptActive {
            self.deadline_remaining -= dt;
            let fraction = (self.deadline_remaining / self.cfg.reaction_deadline).max(0.0);
            events.push(SimEvent::Progress { fraction });
            if self.deadline_remaining <= 0.0 {
                return self.fail(events);
            }
        }

        None
    }

    /// Apply a directional input. Outside `PromptActive` the input is
    /// silently ignored. Returns the camper to release when the input loses
    /// the race.
    pub fn handle_input<R: Rng>(
        &mut self,
        key: QteKey,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) -> Option<CamperId> {
        if self.phase != QtePhase::PromptActive {
            debug!("directional input {key:?} ignored in phase {:?}", self.phase);
            return None;
        }

        if self.current_key != Some(key) {
            return self.fail(events);
        }

        self.passes += 1;
        self.current_key = None;
        events.push(SimEvent::PromptCleared);
        events.push(SimEvent::Progress { fraction: 0.0 });

        if self.passes >= self.required_passes {
            self.phase = QtePhase::Resolving;
            events.push(SimEvent::Outcome { outcome: Outcome::Success });
            debug!("qte won after {} passes", self.passes);
        } else {
            events.push(SimEvent::Outcome { outcome: Outcome::Win });
            self.buffer_remaining = self.cfg.buffer_range.get_random(rng);
            self.phase = QtePhase::AwaitingPrompt;
        }
        None
    }

    /// External signal that the eating resolution finished. Returns the
    /// camper to finalize as eaten.
    pub fn resolution_complete(&mut self) -> Option<CamperId> {
        if self.phase != QtePhase::Resolving {
            warn!("resolution-complete signal with no resolving session");
            return None;
        }
        self.phase = QtePhase::Idle;
        self.current_key = None;
        self.camper.take()
    }

    /// Abort from any non-terminal phase (camper rescued, session
    /// cancelled). Returns the camper to release immediately.
    pub fn abort(&mut self, events: &mut Vec<SimEvent>) -> Option<CamperId> {
        if !self.phase.is_active() {
            return None;
        }
        if self.current_key.take().is_some() {
            events.push(SimEvent::PromptCleared);
        }
        events.push(SimEvent::Progress { fraction: 0.0 });
        self.phase = QtePhase::Idle;
        self.camper.take()
    }

    fn fail(&mut self, events: &mut Vec<SimEvent>) -> Option<CamperId> {
        if self.current_key.take().is_some() {
            events.push(SimEvent::PromptCleared);
        }
        events.push(SimEvent::Progress { fraction: 0.0 });
        events.push(SimEvent::Outcome { outcome: Outcome::Fail });
        self.phase = QtePhase::Failed;
        debug!("qte failed after {} passes", self.passes);
        self.camper.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{FloatRange, IntRange};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_cfg(required: u32) -> QteConfig {
        QteConfig {
            initial_buffer: 1.0,
            buffer_range: FloatRange::new(0.5, 0.5),
            reaction_deadline: 2.0,
            required_passes: IntRange::new(required, required),
        }
    }

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn drive_to_prompt(
        session: &mut QteSession,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<SimEvent>,
    ) -> QteKey {
        while session.phase() != QtePhase::PromptActive {
            assert_eq!(session.tick(0.25, rng, events), None);
        }
        session.current_key().expect("prompt should be live")
    }

    #[test]
    fn test_activation_resets_session() {
        let mut rng = test_rng();
        let mut events = Vec::new();
        let mut session = QteSession::new(test_cfg(3));
        session.activate(CamperId(0), &mut rng, &mut events);

        assert_eq!(session.phase(), QtePhase::AwaitingPrompt);
        assert_eq!(session.passes(), 0);
        assert_eq!(session.required_passes(), 3);
        assert_eq!(session.captured_camper(), Some(CamperId(0)));
        assert!(events.contains(&SimEvent::Progress { fraction: 0.0 }));
    }

    #[test]
    fn test_prompt_appears_after_initial_buffer() {
        let mut rng = test_rng();
        let mut events = Vec::new();
        let mut session = QteSession::new(test_cfg(3));
        session.activate(CamperId(0), &mut rng, &mut events);

        session.tick(0.5, &mut rng, &mut events);
        assert_eq!(session.phase(), QtePhase::AwaitingPrompt);

        session.tick(0.5, &mut rng, &mut events);
        assert_eq!(session.phase(), QtePhase::PromptActive);
        assert!(events.iter().any(|e| matches!(e, SimEvent::PromptShown { .. })));
    }

    #[test]
    fn test_correct_input_passes_and_rearms() {
        let mut rng = test_rng();
        let mut events = Vec::new();
        let mut session = QteSession::new(test_cfg(3));
        session.activate(CamperId(1), &mut rng, &mut events);
        let key = drive_to_prompt(&mut session, &mut rng, &mut events);

        events.clear();
        assert_eq!(session.handle_input(key, &mut rng, &mut events), None);
        assert_eq!(session.passes(), 1);
        assert_eq!(session.phase(), QtePhase::AwaitingPrompt);
        assert!(events.contains(&SimEvent::PromptCleared));
        assert!(events.contains(&SimEvent::Outcome { outcome: Outcome::Win }));
    }

    #[test]
    fn test_wrong_input_fails_immediately() {
        let mut rng = test_rng();
        let mut events = Vec::new();
        let mut session = QteSession::new(test_cfg(3));
        session.activate(CamperId(2), &mut rng, &mut events);
        let key = drive_to_prompt(&mut session, &mut rng, &mut events);

        let wrong = QteKey::ALL.iter().copied().find(|&k| k != key).unwrap();
        events.clear();
        let released = session.handle_input(wrong, &mut rng, &mut events);
        assert_eq!(released, Some(CamperId(2)));
        assert_eq!(session.phase(), QtePhase::Failed);
        assert!(events.contains(&SimEvent::Outcome { outcome: Outcome::Fail }));

        // session disabled: further ticks do nothing
        events.clear();
        assert_eq!(session.tick(1.0, &mut rng, &mut events), None);
        assert!(events.is_empty());
    }

    #[test]
    fn test_deadline_expiry_fails() {
        let mut rng = test_rng();
        let mut events = Vec::new();
        let mut session = QteSession::new(test_cfg(3));
        session.activate(CamperId(3), &mut rng, &mut events);
        drive_to_prompt(&mut session, &mut rng, &mut events);

        events.clear();
        let mut released = None;
        for _ in 0..20 {
            released = session.tick(0.25, &mut rng, &mut events);
            if released.is_some() {
                break;
            }
        }
        assert_eq!(released, Some(CamperId(3)));
        assert_eq!(session.phase(), QtePhase::Failed);
    }

    #[test]
    fn test_threshold_reach_wins_same_tick() {
        let mut rng = test_rng();
        let mut events = Vec::new();
        let mut session = QteSession::new(test_cfg(2));
        session.activate(CamperId(4), &mut rng, &mut events);

        for expected_pass in 1..=2u32 {
            let key = drive_to_prompt(&mut session, &mut rng, &mut events);
            events.clear();
            assert_eq!(session.handle_input(key, &mut rng, &mut events), None);
            assert_eq!(session.passes(), expected_pass);
        }

        assert_eq!(session.phase(), QtePhase::Resolving);
        assert!(events.contains(&SimEvent::Outcome { outcome: Outcome::Success }));
        // never exceeds the threshold
        assert_eq!(session.passes(), session.required_passes());
    }

    #[test]
    fn test_resolving_freezes_timers_and_ignores_input() {
        let mut rng = test_rng();
        let mut events = Vec::new();
        let mut session = QteSession::new(test_cfg(1));
        session.activate(CamperId(5), &mut rng, &mut events);
        let key = drive_to_prompt(&mut session, &mut rng, &mut events);
        session.handle_input(key, &mut rng, &mut events);
        assert_eq!(session.phase(), QtePhase::Resolving);

        events.clear();
        assert_eq!(session.tick(10.0, &mut rng, &mut events), None);
        assert_eq!(session.handle_input(QteKey::North, &mut rng, &mut events), None);
        assert_eq!(session.phase(), QtePhase::Resolving);
        assert!(events.is_empty());

        assert_eq!(session.resolution_complete(), Some(CamperId(5)));
        assert_eq!(session.phase(), QtePhase::Idle);
        assert_eq!(session.captured_camper(), None);
    }

    #[test]
    fn test_resolution_signal_without_session_ignored() {
        let mut session = QteSession::new(test_cfg(1));
        assert_eq!(session.resolution_complete(), None);
        assert_eq!(session.phase(), QtePhase::Idle);
    }

    #[test]
    fn test_input_ignored_while_awaiting_prompt() {
        let mut rng = test_rng();
        let mut events = Vec::new();
        let mut session = QteSession::new(test_cfg(3));
        session.activate(CamperId(6), &mut rng, &mut events);

        events.clear();
        assert_eq!(session.handle_input(QteKey::South, &mut rng, &mut events), None);
        assert_eq!(session.phase(), QtePhase::AwaitingPrompt);
        assert_eq!(session.passes(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_abort_releases_from_any_active_phase() {
        let mut rng = test_rng();
        let mut events = Vec::new();
        let mut session = QteSession::new(test_cfg(3));

        session.activate(CamperId(7), &mut rng, &mut events);
        assert_eq!(session.abort(&mut events), Some(CamperId(7)));
        assert_eq!(session.phase(), QtePhase::Idle);

        session.activate(CamperId(8), &mut rng, &mut events);
        drive_to_prompt(&mut session, &mut rng, &mut events);
        events.clear();
        assert_eq!(session.abort(&mut events), Some(CamperId(8)));
        assert!(events.contains(&SimEvent::PromptCleared));

        // idle abort is a no-op
        assert_eq!(session.abort(&mut events), None);
    }

    #[test]
    fn test_progress_tracks_deadline_fraction() {
        let mut rng = test_rng();
        let mut events = Vec::new();
        let mut session = QteSession::new(test_cfg(3));
        session.activate(CamperId(9), &mut rng, &mut events);
        drive_to_prompt(&mut session, &mut rng, &mut events);

        events.clear();
        session.tick(0.5, &mut rng, &mut events);
        // deadline 2.0, 0.25 burned on the prompt tick + 0.5 here
        assert!(events.iter().any(|e| match e {
            SimEvent::Progress { fraction } => (fraction - 0.625).abs() < 1e-5,
            _ => false,
        }));
    }

    #[test]
    fn test_session_reusable_after_failure() {
        let mut rng = test_rng();
        let mut events = Vec::new();
        let mut session = QteSession::new(test_cfg(1));

        session.activate(CamperId(10), &mut rng, &mut events);
        let key = drive_to_prompt(&mut session, &mut rng, &mut events);
        let wrong = QteKey::ALL.iter().copied().find(|&k| k != key).unwrap();
        assert!(session.handle_input(wrong, &mut rng, &mut events).is_some());
        assert_eq!(session.phase(), QtePhase::Failed);

        session.activate(CamperId(11), &mut rng, &mut events);
        assert_eq!(session.phase(), QtePhase::AwaitingPrompt);
        assert_eq!(session.passes(), 0);
        assert_eq!(session.captured_camper(), Some(CamperId(11)));
    }
}
