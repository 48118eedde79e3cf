//! Deterministic simulation module
//!
//! All battle logic lives here. This module must be pure and deterministic:
//! - Frame deltas clamped and normalized to fixed-size steps
//! - Seeded RNG only
//! - No rendering or platform dependencies; outbound events only

pub mod ai;
pub mod collision;
pub mod events;
pub mod physics;
pub mod progression;
pub mod state;
pub mod tick;

pub use events::{ArenaEvent, EventState};
pub use physics::StepCtx;
pub use state::{
    BattleOutcome, FloatingTextKind, GamePhase, GameState, SimConfig, SimEvent, Spark, SparkColor,
    Spinner, SpinnerId, SpinnerPose, SpinnerTier, EXPLOSION_LIFETIME_MS,
};
pub use tick::{TickInput, tick};
