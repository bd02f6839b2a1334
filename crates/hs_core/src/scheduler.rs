//! Camper population scheduler
//!
//! Owns the camper population and two independent periodic timers:
//! - the objective-run timer, which periodically sends a random subset of
//!   hiding campers sprinting for the objective while it is unguarded;
//! - the noise-hint timer, which periodically points the pursuer at the
//!   nearest camper still worth hunting.
//!
//! Each timer re-samples its interval from its configured range on every
//! expiry. Accumulators reset to zero on firing; there is no catch-up.

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::camper::{angle_between_deg, distance, Camper, CamperId, CamperState};
use crate::config::SimConfig;
use crate::events::SimEvent;
use crate::range::{FloatRange, IntRange};
use crate::selector::TimedSelector;

/// Read-only view of the world the scheduler reacts to, passed in fresh
/// every tick by the host.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WorldView {
    pub objective_position: (f32, f32),
    pub objective_guarded: bool,
    pub pursuer_position: (f32, f32),
}

#[derive(Debug, Clone)]
pub struct CamperScheduler {
    campers: Vec<Camper>,
    initial_run_delay: FloatRange,
    run_interval: FloatRange,
    campers_per_run: IntRange,
    min_objective_angle_deg: f32,
    hint_interval: FloatRange,
    time_since_run: f32,
    time_since_hint: f32,
}

impl CamperScheduler {
    /// Spawn the population, rotating through the given hiding spots via
    /// the no-repeat selector, and arm both timers.
    pub fn new<R: Rng>(cfg: &SimConfig, hiding_spots: &[(f32, f32)], rng: &mut R) -> Self {
        if hiding_spots.is_empty() {
            warn!("no hiding spots provided; campers spawn at the origin");
        }
        let mut spots = TimedSelector::new(hiding_spots.to_vec());
        let campers = (0..cfg.campers_count)
            .map(|i| {
                let position = spots.pick(rng).copied().unwrap_or((0.0, 0.0));
                Camper::new(CamperId(i), position)
            })
            .collect();

        let mut initial_run_delay = cfg.initial_run_delay;
        initial_run_delay.select_random(rng);
        let mut hint_interval = cfg.hint_interval;
        hint_interval.select_random(rng);

        Self {
            campers,
            initial_run_delay,
            run_interval: cfg.run_interval,
            campers_per_run: cfg.campers_per_run,
            min_objective_angle_deg: cfg.min_objective_angle_deg,
            hint_interval,
            time_since_run: 0.0,
            time_since_hint: 0.0,
        }
    }

    pub fn campers(&self) -> &[Camper] {
        &self.campers
    }

    pub fn camper(&self, id: CamperId) -> Option<&Camper> {
        self.campers.get(id.0)
    }

    pub(crate) fn camper_mut(&mut self, id: CamperId) -> Option<&mut Camper> {
        self.campers.get_mut(id.0)
    }

    /// Campers that are neither eaten nor safe.
    pub fn campers_remaining(&self) -> usize {
        self.campers.iter().filter(|c| c.state.is_in_play()).count()
    }

    /// Advance both timers by one frame.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        world: &WorldView,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) {
        self.time_since_run += dt;
        self.time_since_hint += dt;
        self.tick_objective_run(world, rng, events);
        self.tick_hint(world, rng, events);
    }

    /// The first arm uses the initial-delay range; every re-arm after that
    /// uses the recurring range.
    fn current_run_delay(&self) -> f32 {
        self.run_interval
            .selected()
            .or_else(|| self.initial_run_delay.selected())
            .unwrap_or(f32::INFINITY)
    }

    fn tick_objective_run<R: Rng>(
        &mut self,
        world: &WorldView,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) {
        if self.time_since_run < self.current_run_delay() {
            return;
        }
        // The timer resets and re-arms even when the objective is guarded.
        self.time_since_run = 0.0;
        self.run_interval.select_random(rng);

        if world.objective_guarded {
            return;
        }

        let objective_to_pursuer = (
            world.pursuer_position.0 - world.objective_position.0,
            world.pursuer_position.1 - world.objective_position.1,
        );
        let pursuer_dist = distance(world.pursuer_position, world.objective_position);

        let eligible: Vec<CamperId> = self
            .campers
            .iter()
            .filter(|c| {
                if !c.state.can_run_to_objective() {
                    return false;
                }
                let camper_dist = distance(c.position, world.objective_position);
                if pursuer_dist > camper_dist {
                    return true;
                }
                let objective_to_camper = (
                    c.position.0 - world.objective_position.0,
                    c.position.1 - world.objective_position.1,
                );
                angle_between_deg(objective_to_pursuer, objective_to_camper)
                    >= self.min_objective_angle_deg
            })
            .map(|c| c.id)
            .collect();

        let count = self.campers_per_run.select_random(rng) as usize;
        let mut runners = TimedSelector::new(eligible);
        for id in runners.pick_distinct(rng, count) {
            if let Some(camper) = self.camper_mut(id) {
                camper.state = CamperState::RunningToObjective;
            }
            events.push(SimEvent::RunToObjective { camper: id });
        }
    }

    fn tick_hint<R: Rng>(&mut self, world: &WorldView, rng: &mut R, events: &mut Vec<SimEvent>) {
        if self.campers_remaining() == 0 {
            return;
        }
        let delay = self.hint_interval.selected().unwrap_or(f32::INFINITY);
        if self.time_since_hint <= delay {
            return;
        }
        self.time_since_hint = 0.0;
        self.hint_interval.select_random(rng);

        let nearest = self
            .campers
            .iter()
            .filter(|c| c.state.is_hint_eligible())
            .min_by(|a, b| {
                distance(a.position, world.pursuer_position)
                    .total_cmp(&distance(b.position, world.pursuer_position))
            });

        if let Some(camper) = nearest {
            events.push(SimEvent::HintCue { position: camper.position });
        }
    }
}
