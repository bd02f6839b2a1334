//! # hs_core - Deterministic Hide-and-Seek Night Simulation Core
//!
//! Frame-driven simulation of a camper population hiding from a pursuing
//! player, plus the timed reaction race ("QTE") that follows a capture.
//!
//! ## Features
//! - 100% deterministic (same seed + same inputs = same event log)
//! - Single-threaded cooperative tick model, no internal threads
//! - All presentation expressed as outbound [`SimEvent`]s
//!
//! The host drives everything through [`Simulation`]: call the `on_*`
//! methods as its events happen, then `tick(dt, world)` once per frame and
//! drain the returned events.

pub mod camper;
pub mod config;
pub mod error;
pub mod events;
pub mod qte;
pub mod range;
pub mod scenario;
pub mod scheduler;
pub mod selector;
pub mod sim;

pub use camper::{Camper, CamperId, CamperState};
pub use config::{QteConfig, SimConfig};
pub use error::{ConfigError, SelectError};
pub use events::{Outcome, SimEvent};
pub use qte::{QteKey, QtePhase, QteSession};
pub use range::{FloatRange, IntRange};
pub use scenario::{RunReport, Scenario, Step};
pub use scheduler::{CamperScheduler, WorldView};
pub use selector::TimedSelector;
pub use sim::Simulation;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
