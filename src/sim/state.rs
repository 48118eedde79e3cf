//! Game state and core simulation types
//!
//! All state the orchestrator owns lives here. The simulation never touches
//! presentation objects; renderers consume the outbound [`SimEvent`] queue
//! and per-step [`SpinnerPose`] snapshots instead.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{ArenaEvent, EventState};
use crate::consts::*;

/// Identity tag for the two combatants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinnerId {
    Player,
    Enemy,
}

/// Classification tier derived purely from current rpm
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpinnerTier {
    Idle,
    Normal,
    Heated,
    Supersonic,
    Plasma,
    Singularity,
}

impl SpinnerTier {
    /// Classify an rpm value against the fixed ascending thresholds
    pub fn from_rpm(rpm: f32) -> Self {
        if rpm >= TIER_SINGULARITY_RPM {
            SpinnerTier::Singularity
        } else if rpm >= TIER_PLASMA_RPM {
            SpinnerTier::Plasma
        } else if rpm >= TIER_SUPERSONIC_RPM {
            SpinnerTier::Supersonic
        } else if rpm >= TIER_HEATED_RPM {
            SpinnerTier::Heated
        } else if rpm >= TIER_NORMAL_RPM {
            SpinnerTier::Normal
        } else {
            SpinnerTier::Idle
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpinnerTier::Idle => "Idle",
            SpinnerTier::Normal => "Normal",
            SpinnerTier::Heated => "Heated",
            SpinnerTier::Supersonic => "Supersonic",
            SpinnerTier::Plasma => "Plasma",
            SpinnerTier::Singularity => "Singularity",
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title/home screen, no session running
    Home,
    /// Active battle
    Playing,
    /// Enemy defeated; waiting for the player to advance
    LevelComplete,
    /// Run ended; results screen with commentary
    Result,
}

/// How the battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Win,
    Loss,
    Draw,
}

impl BattleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            BattleOutcome::Win => "WIN",
            BattleOutcome::Loss => "LOSS",
            BattleOutcome::Draw => "DRAW",
        }
    }
}

/// A spinning combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spinner {
    pub id: SpinnerId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotational speed, clamped to [0, MAX_RPM_CAP]
    pub rpm: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub radius: f32,
    pub mass: f32,
    /// Presentation size multiplier (bosses, Berserk)
    pub scale: f32,
    pub tier: SpinnerTier,
    /// Precession phase, [0, 2π)
    pub wobble: f32,
    /// Spin rotation in degrees, [0, 360)
    pub rotation_z: f32,
    /// Stun countdown in ms; while positive the controller is disabled
    pub stun_ms: f32,
    /// Stats at spawn; event reverts restore these absolutely
    pub base_mass: f32,
    pub base_radius: f32,
    pub base_scale: f32,
}

impl Spinner {
    /// Fresh player spinner at its starting position
    pub fn player() -> Self {
        Self {
            id: SpinnerId::Player,
            pos: Vec2::new(0.0, 150.0),
            vel: Vec2::ZERO,
            rpm: 0.0,
            hp: PLAYER_BASE_HP,
            max_hp: PLAYER_BASE_HP,
            radius: SPINNER_RADIUS,
            mass: SPINNER_MASS,
            scale: 1.0,
            tier: SpinnerTier::Idle,
            wobble: 0.0,
            rotation_z: 0.0,
            stun_ms: 0.0,
            base_mass: SPINNER_MASS,
            base_radius: SPINNER_RADIUS,
            base_scale: 1.0,
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_ms > 0.0
    }

    /// Stability score in [0, 1]; low-rpm spinners wobble hard
    pub fn stability(&self) -> f32 {
        (self.rpm / STABILITY_RPM).clamp(0.0, 1.0)
    }

    /// Subtract damage, flooring hp at zero
    pub fn take_damage(&mut self, damage: f32) {
        self.hp = (self.hp - damage).max(0.0);
    }

    /// Add rpm, clamped to the cap
    pub fn add_rpm(&mut self, gain: f32) {
        self.rpm = (self.rpm + gain).min(MAX_RPM_CAP);
    }

    /// Per-step pose snapshot for the render sink
    pub fn pose(&self) -> SpinnerPose {
        let stability = self.stability();
        let wobble_deg = (1.0 - stability.sqrt()) * 15.0;
        SpinnerPose {
            id: self.id,
            pos: self.pos,
            scale: self.scale,
            rotation_z: self.rotation_z,
            tilt_x: self.wobble.sin() * wobble_deg,
            tilt_y: self.wobble.cos() * wobble_deg,
            stunned: self.is_stunned(),
            glow: (self.rpm / 2500.0).clamp(0.0, 1.0),
        }
    }
}

/// Render-sink pose for one spinner, one step
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpinnerPose {
    pub id: SpinnerId,
    pub pos: Vec2,
    pub scale: f32,
    /// Spin angle in degrees
    pub rotation_z: f32,
    /// Wobble tilt in degrees, applied around a renderer-held base tilt
    pub tilt_x: f32,
    pub tilt_y: f32,
    pub stunned: bool,
    /// Normalized rpm glow in [0, 1]
    pub glow: f32,
}

/// Floating-text categories; critical/event text lingers longer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloatingTextKind {
    Damage,
    Critical,
    Perfect,
    Good,
    Event,
}

impl FloatingTextKind {
    /// How long the render sink should keep the text on screen
    pub fn duration_ms(&self) -> u32 {
        match self {
            FloatingTextKind::Event => 2000,
            FloatingTextKind::Critical => 1600,
            _ => 800,
        }
    }
}

/// Spark particle colors (two-tone bursts, matches the arena palette)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SparkColor {
    Amber,
    Red,
}

/// A single spark in an explosion burst; advisory rendering data only
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Spark {
    /// Launch angle in degrees
    pub angle: f32,
    /// Travel distance in world units
    pub distance: f32,
    pub color: SparkColor,
    pub size: f32,
    /// Animation duration in seconds
    pub speed: f32,
}

/// Explosion burst lifetime handed to the render sink
pub const EXPLOSION_LIFETIME_MS: u32 = 500;

/// Outbound notifications drained by the host each frame.
///
/// The simulation emits these instead of mutating render targets; nothing
/// flows back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SimEvent {
    /// A spinner crossed into a different classification tier
    TierChanged { id: SpinnerId, tier: SpinnerTier },
    /// Hp changed (collision damage or sudden-death drain)
    HpChanged { id: SpinnerId, hp: f32, max_hp: f32 },
    /// Floating combat text at a world position
    FloatingText {
        kind: FloatingTextKind,
        pos: Vec2,
        text: String,
    },
    /// Explosion burst at the contact point
    Explosion {
        pos: Vec2,
        sparks: Vec<Spark>,
        lifetime_ms: u32,
    },
    /// A random arena event started
    EventStarted { kind: ArenaEvent },
    /// The active arena event expired
    EventEnded { kind: ArenaEvent },
    /// Enemy defeated; the level is cleared (run continues)
    LevelCleared { level: u32 },
    /// The run is over
    RunEnded { outcome: BattleOutcome },
}

/// Simulation configuration.
///
/// Arena bounds are an explicit value, never derived from a display surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimConfig {
    /// Half-extents of the rectangular arena, origin at center
    pub arena_half_extents: Vec2,
    /// Round length per level in seconds
    pub round_secs: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // Portrait play field
            arena_half_extents: Vec2::new(360.0, 440.0),
            round_secs: ROUND_DURATION_SECS,
        }
    }
}

/// Complete session state, owned exclusively by the orchestrator
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; every stochastic decision draws from here
    pub rng: Pcg32,
    pub config: SimConfig,
    /// Current progression level (>= 1)
    pub level: u32,
    /// Seconds remaining in the round
    pub time_left: u32,
    /// Sub-second accumulator for the round clock (ms)
    pub clock_ms: f32,
    /// Cumulative score; reset only when starting level 1
    pub score: u64,
    pub phase: GamePhase,
    pub outcome: BattleOutcome,
    pub event: EventState,
    /// Tap-timing pulse phase, [0, 2π)
    pub pulse: f32,
    pub player: Spinner,
    pub enemy: Spinner,
    /// Outbound event queue, drained by the host each frame
    events: Vec<SimEvent>,
}

impl GameState {
    /// Create a session on the home screen with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SimConfig::default())
    }

    pub fn with_config(seed: u64, config: SimConfig) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            level: 1,
            time_left: config.round_secs,
            clock_ms: 0.0,
            score: 0,
            phase: GamePhase::Home,
            outcome: BattleOutcome::Draw,
            event: EventState::Inactive,
            pulse: 0.0,
            player: Spinner::player(),
            enemy: super::progression::enemy_for_level(1),
            events: Vec::new(),
        }
    }

    /// Queue an outbound notification for the render sink
    pub fn push_event(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Take this frame's outbound notifications
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending outbound notifications (mainly for tests)
    pub fn pending_events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Reset the session for the given level and begin playing
    pub fn start_level(&mut self, level: u32) {
        super::progression::start_level(self, level);
    }

    /// Advance to the next level after a cleared stage
    pub fn next_level(&mut self) {
        super::progression::start_level(self, self.level + 1);
    }
}
