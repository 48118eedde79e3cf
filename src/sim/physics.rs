//! Per-spinner physics integration
//!
//! One call advances a single spinner by one frame. Elapsed time arrives in
//! ms (already clamped by the orchestrator) and is normalized to steps where
//! one step is 16.6 ms. Decay and friction use `rate^steps` so the effective
//! curve matches the per-step rates under variable frame timing.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::events::ArenaEvent;
use super::state::{SimEvent, Spinner, SpinnerTier};
use crate::consts::*;
use crate::{wrap_degrees, wrap_tau};

/// Shared per-frame integration context
#[derive(Debug, Clone, Copy)]
pub struct StepCtx {
    /// Elapsed ms, clamped to MAX_FRAME_MS
    pub dt_ms: f32,
    /// dt_ms / STEP_MS
    pub steps: f32,
    /// Active arena event, if any
    pub active: Option<ArenaEvent>,
    /// Arena half-extents
    pub bounds: Vec2,
}

impl StepCtx {
    pub fn new(dt_ms: f32, active: Option<ArenaEvent>, bounds: Vec2) -> Self {
        let dt_ms = dt_ms.min(MAX_FRAME_MS);
        Self {
            dt_ms,
            steps: dt_ms / STEP_MS,
            active,
            bounds,
        }
    }
}

/// Advance one spinner's kinematics and rotational state by one frame
pub fn integrate(sp: &mut Spinner, rng: &mut Pcg32, ctx: &StepCtx, out: &mut Vec<SimEvent>) {
    let steps = ctx.steps;

    // 1. Rotational energy decay
    if sp.rpm > 0.0 {
        sp.rpm *= RPM_DECAY_RATE.powf(steps);
        if sp.rpm < RPM_REST_EPSILON {
            sp.rpm = 0.0;
        }
    }

    // 2. Stun recovery
    if sp.stun_ms > 0.0 {
        sp.stun_ms = (sp.stun_ms - ctx.dt_ms).max(0.0);
    }

    // 3. Tier reclassification
    let tier = SpinnerTier::from_rpm(sp.rpm);
    if tier != sp.tier {
        sp.tier = tier;
        out.push(SimEvent::TierChanged { id: sp.id, tier });
    }

    // 4. Spin rotation: rpm -> degrees per step at 60 Hz
    let rotation_per_step = (sp.rpm / 60.0) * 360.0 * (1.0 / 60.0);
    sp.rotation_z = wrap_degrees(sp.rotation_z + rotation_per_step * steps);

    // 5. Precession: fast wobble when unstable, floor speed when stable
    let precession = 0.2 - 0.15 * sp.stability();
    sp.wobble = wrap_tau(sp.wobble + precession * steps);

    // 6. Translation with friction (Slippery lowers drag, not rpm decay)
    let friction = if ctx.active == Some(ArenaEvent::Slippery) {
        SLIPPERY_FRICTION
    } else {
        MOVEMENT_FRICTION
    };
    sp.pos += sp.vel * steps;
    sp.vel *= friction.powf(steps);

    // 7. Speed cap, direction preserved
    let speed = sp.vel.length();
    if speed > MAX_SPEED {
        sp.vel *= MAX_SPEED / speed;
    }

    // 8. Gravity surge pulls toward arena center
    if ctx.active == Some(ArenaEvent::GravitySurge) {
        sp.vel -= sp.pos * GRAVITY_SURGE_PULL * steps;
    }

    // 9. Sudden death drains hp directly, bypassing collisions
    if ctx.active == Some(ArenaEvent::SuddenDeath) && rng.random_bool(SUDDEN_DEATH_DRAIN_CHANCE) {
        sp.take_damage(SUDDEN_DEATH_DRAIN_HP * steps);
        out.push(SimEvent::HpChanged {
            id: sp.id,
            hp: sp.hp,
            max_hp: sp.max_hp,
        });
    }

    // 10. Arena bounds: clamp and lossy bounce
    apply_bounds(sp, ctx.bounds);
}

/// Confine a spinner to the arena rectangle, inverting and damping the
/// velocity component that hit a wall
fn apply_bounds(sp: &mut Spinner, bounds: Vec2) {
    let bx = bounds.x - sp.radius;
    let by = bounds.y;

    if sp.pos.x > bx {
        sp.pos.x = bx;
        sp.vel.x *= -WALL_BOUNCE;
    } else if sp.pos.x < -bx {
        sp.pos.x = -bx;
        sp.vel.x *= -WALL_BOUNCE;
    }
    if sp.pos.y > by {
        sp.pos.y = by;
        sp.vel.y *= -WALL_BOUNCE;
    } else if sp.pos.y < -by {
        sp.pos.y = -by;
        sp.vel.y *= -WALL_BOUNCE;
    }
}
