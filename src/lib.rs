//! Battle Tops - a two-spinner arena battle simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collision, AI, events, scoring)
//! - `commentary`: Post-match result card boundary with a local fallback
//! - `leaderboard`: Read-only ranking data for display

pub mod commentary;
pub mod leaderboard;
pub mod sim;

pub use commentary::{CommentaryProvider, FallbackCommentary, ResultCard};
pub use leaderboard::Leaderboard;

use glam::Vec2;

/// Game tuning constants
pub mod consts {
    /// One simulation step corresponds to 16.6 ms of wall time (~60 Hz)
    pub const STEP_MS: f32 = 16.6;
    /// Longest frame delta we will integrate; anything beyond is dropped
    pub const MAX_FRAME_MS: f32 = 60.0;

    /// Round length in seconds (same every level)
    pub const ROUND_DURATION_SECS: u32 = 45;

    /// Physics
    pub const RPM_DECAY_RATE: f32 = 0.985;
    /// Below this rpm a spinner is considered stopped
    pub const RPM_REST_EPSILON: f32 = 10.0;
    pub const MOVEMENT_FRICTION: f32 = 0.975;
    /// Translational friction while the Slippery event is active
    pub const SLIPPERY_FRICTION: f32 = 0.995;
    pub const WALL_BOUNCE: f32 = 0.6;
    pub const MAX_RPM_CAP: f32 = 3500.0;
    /// Speed limit, world units per step
    pub const MAX_SPEED: f32 = 25.0;
    /// Rpm at which a spinner is fully stable (no visible wobble)
    pub const STABILITY_RPM: f32 = 1500.0;

    /// Battle
    pub const PLAYER_BASE_HP: f32 = 200.0;
    pub const ENEMY_BASE_HP: f32 = 100.0;
    pub const SPINNER_RADIUS: f32 = 50.0;
    pub const SPINNER_MASS: f32 = 1.0;
    pub const COLLISION_ELASTICITY: f32 = 0.85;
    pub const DAMAGE_FACTOR: f32 = 0.06;
    /// Enemy damage above this threshold counts as a critical hit
    pub const CRITICAL_DAMAGE: f32 = 10.0;
    pub const CRITICAL_STUN_MS: f32 = 1000.0;
    pub const ENEMY_AI_SPEED: f32 = 0.35;
    /// Enemy stops passively charging above this rpm
    pub const ENEMY_CHARGE_CEILING: f32 = 2000.0;
    pub const ENEMY_CHARGE_RATE: f32 = 20.0;

    /// Player tap controls
    pub const PUSH_FORCE: f32 = 20.0;
    pub const RPM_PER_TAP: f32 = 180.0;
    /// Aim noise spread in radians
    pub const TAP_NOISE_ANGLE: f32 = 0.2;
    pub const PERFECT_WINDOW_THRESHOLD: f32 = 0.90;
    pub const GOOD_WINDOW_THRESHOLD: f32 = 0.60;
    pub const PERFECT_BONUS_MULTIPLIER: f32 = 2.0;
    pub const GOOD_BONUS_MULTIPLIER: f32 = 1.3;
    pub const BASE_PULSE_SPEED: f32 = 0.08;

    /// Leveling & bosses (every 5th level)
    pub const LEVEL_HP_SCALING: f32 = 1.2;
    pub const BOSS_HP_MULTIPLIER: f32 = 2.5;
    pub const BOSS_SIZE_MULTIPLIER: f32 = 1.5;
    pub const BOSS_MASS_MULTIPLIER: f32 = 2.0;

    /// Random events
    pub const EVENT_CHANCE_PER_STEP: f64 = 0.002;
    pub const EVENT_DURATION_MS: f32 = 5000.0;
    pub const BERSERK_SCALE: f32 = 1.5;
    pub const BERSERK_MASS_MULTIPLIER: f32 = 2.0;
    pub const SUDDEN_DEATH_DRAIN_CHANCE: f64 = 0.1;
    pub const SUDDEN_DEATH_DRAIN_HP: f32 = 0.05;
    pub const GRAVITY_SURGE_PULL: f32 = 0.005;

    /// Tier thresholds (inclusive lower bound per tier, ascending)
    pub const TIER_NORMAL_RPM: f32 = 1.0;
    pub const TIER_HEATED_RPM: f32 = 500.0;
    pub const TIER_SUPERSONIC_RPM: f32 = 1000.0;
    pub const TIER_PLASMA_RPM: f32 = 1800.0;
    pub const TIER_SINGULARITY_RPM: f32 = 2500.0;
}

/// Wrap an angle to [0, 2π)
#[inline]
pub fn wrap_tau(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Wrap a rotation to [0, 360) degrees
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Rotate a vector by an angle (radians)
#[inline]
pub fn rotate_vec(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
