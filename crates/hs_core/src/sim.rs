//! Simulation facade
//!
//! Owns the scheduler, the reaction-race session and the seeded RNG, and
//! routes every inbound host event. This is the only type a host needs.
//!
//! Ownership rule: a camper belongs to the scheduler except while Captured,
//! when the active session holds it. `on_capture` is the only transfer in,
//! release/eat are the only transfers out.
//!
//! Tick ordering: deliver a frame's directional inputs *before* calling
//! `tick` for that frame. Inputs are applied on arrival, so a correct key
//! always beats a reaction deadline that would expire in the same frame.

use log::warn;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::camper::{Camper, CamperId, CamperState};
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::events::SimEvent;
use crate::qte::{QteKey, QteSession};
use crate::scheduler::{CamperScheduler, WorldView};

pub struct Simulation {
    scheduler: CamperScheduler,
    qte: QteSession,
    rng: ChaCha8Rng,
    campers_safe: u32,
    pending: Vec<SimEvent>,
}

impl Simulation {
    /// Validates the config, seeds the RNG and spawns the population.
    /// Same seed + same inputs = same event log.
    pub fn new(
        config: SimConfig,
        seed: u64,
        hiding_spots: &[(f32, f32)],
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let scheduler = CamperScheduler::new(&config, hiding_spots, &mut rng);
        let qte = QteSession::new(config.qte.clone());
        Ok(Self { scheduler, qte, rng, campers_safe: 0, pending: Vec::new() })
    }

    /// Advance one frame. Returns every event produced since the last tick,
    /// including those raised by inbound calls between ticks.
    pub fn tick(&mut self, dt: f32, world: &WorldView) -> Vec<SimEvent> {
        let mut events = std::mem::take(&mut self.pending);
        self.scheduler.tick(dt, world, &mut self.rng, &mut events);
        if let Some(released) = self.qte.tick(dt, &mut self.rng, &mut events) {
            self.release_camper(released);
        }
        events
    }

    /// External capture event: transfers the camper into a fresh
    /// reaction-race session.
    pub fn on_capture(&mut self, id: CamperId) {
        if self.qte.is_active() {
            warn!("capture of {id} ignored: a session is already active");
            return;
        }
        let Some(camper) = self.scheduler.camper_mut(id) else {
            warn!("capture of unknown {id} ignored");
            return;
        };
        if !camper.state.can_be_captured() {
            warn!("capture of {id} ignored in state {:?}", camper.state);
            return;
        }
        camper.state = CamperState::Captured;
        self.qte.activate(id, &mut self.rng, &mut self.pending);
    }

    /// Directional input for the live prompt. Ignored outside a live prompt.
    pub fn on_directional_input(&mut self, key: QteKey) {
        if let Some(released) = self.qte.handle_input(key, &mut self.rng, &mut self.pending) {
            self.release_camper(released);
        }
    }

    /// The eating animation (or equivalent host resolution) finished.
    pub fn on_resolution_complete(&mut self) {
        if let Some(id) = self.qte.resolution_complete() {
            if let Some(camper) = self.scheduler.camper_mut(id) {
                camper.state = CamperState::Eaten;
            }
        }
    }

    /// Cancel the active session (camper rescued, match interrupted) and
    /// release the camper immediately.
    pub fn abort_capture(&mut self) {
        let mut events = std::mem::take(&mut self.pending);
        if let Some(released) = self.qte.abort(&mut events) {
            self.pending = events;
            self.release_camper(released);
        } else {
            self.pending = events;
        }
    }

    /// A camper crossed into the objective. Fires `CamperSafe` exactly once
    /// per camper; repeats and captured/terminal campers are ignored.
    pub fn camper_reached_objective(&mut self, id: CamperId) {
        let Some(camper) = self.scheduler.camper_mut(id) else {
            warn!("safe arrival of unknown {id} ignored");
            return;
        };
        if !camper.state.can_be_captured() {
            // Captured campers belong to the session; terminal states stay.
            warn!("safe arrival of {id} ignored in state {:?}", camper.state);
            return;
        }
        camper.state = CamperState::Safe;
        self.campers_safe += 1;
        self.pending.push(SimEvent::CamperSafe { camper: id });
    }

    pub fn campers_safe(&self) -> u32 {
        self.campers_safe
    }

    pub fn campers_remaining(&self) -> usize {
        self.scheduler.campers_remaining()
    }

    pub fn campers(&self) -> &[Camper] {
        self.scheduler.campers()
    }

    pub fn camper_state(&self, id: CamperId) -> Option<CamperState> {
        self.scheduler.camper(id).map(|c| c.state)
    }

    pub fn qte(&self) -> &QteSession {
        &self.qte
    }

    /// Take events raised by inbound calls without advancing time. `tick`
    /// already includes these; hosts that stop ticking (end of match) use
    /// this to flush the tail.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.pending)
    }

    fn release_camper(&mut self, id: CamperId) {
        if let Some(camper) = self.scheduler.camper_mut(id) {
            if camper.state == CamperState::Captured {
                camper.state = CamperState::Moving;
            }
        }
    }
}
