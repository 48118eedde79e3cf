//! Frame orchestrator
//!
//! One `tick` is one host frame: event timer, tap input, physics for both
//! spinners, enemy AI, collision resolution, pulse and clock bookkeeping,
//! then the win/loss check. The round clock is folded into the same call so
//! nothing races the physics step, and leaving the Playing phase stops all
//! timekeeping at once.

use glam::Vec2;
use rand::Rng;

use super::state::{BattleOutcome, FloatingTextKind, GamePhase, GameState, SimEvent};
use super::{ai, collision, events, physics};
use crate::consts::*;
use crate::{rotate_vec, wrap_tau};

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Tap point in world coordinates; only honored while playing
    pub tap: Option<Vec2>,
}

/// Advance the session by one frame of `dt_ms` elapsed real time.
///
/// Does nothing outside the Playing phase.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    // Clamp frame hitches so one bad frame cannot explode the integrator
    let dt_ms = dt_ms.min(MAX_FRAME_MS);
    let steps = dt_ms / STEP_MS;

    events::update(state, dt_ms);

    if let Some(tap) = input.tap {
        apply_tap(state, tap);
    }

    let ctx = physics::StepCtx::new(
        dt_ms,
        state.event.active_kind(),
        state.config.arena_half_extents,
    );
    let mut out = Vec::new();
    physics::integrate(&mut state.player, &mut state.rng, &ctx, &mut out);
    physics::integrate(&mut state.enemy, &mut state.rng, &ctx, &mut out);
    for event in out {
        state.push_event(event);
    }

    ai::drive_enemy(state, steps);

    collision::resolve(state);

    // Tap-timing pulse, advanced every frame for determinism
    state.pulse = wrap_tau(state.pulse + (BASE_PULSE_SPEED + state.player.rpm / 15000.0) * steps);

    // Single authoritative round clock
    state.clock_ms += dt_ms;
    while state.clock_ms >= 1000.0 && state.time_left > 0 {
        state.clock_ms -= 1000.0;
        state.time_left -= 1;
    }

    check_termination(state);
}

/// Spin up the player and shove it toward the enemy.
///
/// The aim direction gets a random noise angle; a well-timed tap (pulse
/// window) multiplies the rpm gain.
fn apply_tap(state: &mut GameState, tap: Vec2) {
    if state.player.is_stunned() {
        return;
    }

    let delta = state.enemy.pos - state.player.pos;
    let dist = delta.length();
    let aim = if dist > 0.0 { delta / dist } else { Vec2::Y };
    let noise = (state.rng.random::<f32>() - 0.5) * TAP_NOISE_ANGLE;
    state.player.vel += rotate_vec(aim, noise) * PUSH_FORCE;

    let pulse_phase = state.pulse.sin();
    let mut rpm_gain = RPM_PER_TAP;
    if pulse_phase > PERFECT_WINDOW_THRESHOLD {
        rpm_gain *= PERFECT_BONUS_MULTIPLIER;
        state.push_event(SimEvent::FloatingText {
            kind: FloatingTextKind::Perfect,
            pos: tap,
            text: "PERFECT!".to_string(),
        });
    } else if pulse_phase > GOOD_WINDOW_THRESHOLD {
        rpm_gain *= GOOD_BONUS_MULTIPLIER;
        state.push_event(SimEvent::FloatingText {
            kind: FloatingTextKind::Good,
            pos: tap,
            text: "GOOD!".to_string(),
        });
    }
    state.player.add_rpm(rpm_gain);
}

/// Win/loss/draw determination.
///
/// Hp depletion is checked before the clock: a dead player loses even on
/// the frame time runs out. A win ends the level, never the run.
fn check_termination(state: &mut GameState) {
    if state.player.hp <= 0.0 {
        finish_run(state, BattleOutcome::Loss);
    } else if state.enemy.hp <= 0.0 {
        finish_level(state);
    } else if state.time_left == 0 {
        if state.player.hp > state.enemy.hp {
            finish_level(state);
        } else if state.player.hp < state.enemy.hp {
            finish_run(state, BattleOutcome::Loss);
        } else {
            finish_run(state, BattleOutcome::Draw);
        }
    }
}

fn finish_level(state: &mut GameState) {
    state.outcome = BattleOutcome::Win;
    state.phase = GamePhase::LevelComplete;
    let level = state.level;
    state.push_event(SimEvent::LevelCleared { level });
    log::info!("level {} cleared, score {}", level, state.score);
}

fn finish_run(state: &mut GameState, outcome: BattleOutcome) {
    state.outcome = outcome;
    state.phase = GamePhase::Result;
    state.push_event(SimEvent::RunEnded { outcome });
    log::info!(
        "run over: {} at level {}, score {}",
        outcome.as_str(),
        state.level,
        state.score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::progression;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        progression::start_level(&mut state, 1);
        // Park the spinners apart so frames are collision-free by default
        state.player.pos = Vec2::new(0.0, 200.0);
        state.enemy.pos = Vec2::new(0.0, -200.0);
        state
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Home);
        let before = state.player.clone();

        tick(&mut state, &TickInput::default(), STEP_MS);
        assert_eq!(state.player.pos, before.pos);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_tap_grants_rpm_and_pushes_player() {
        let mut state = playing(5);
        let input = TickInput {
            tap: Some(Vec2::ZERO),
        };
        tick(&mut state, &input, STEP_MS);

        assert!(state.player.rpm > 0.0);
        // Tap aims down toward the enemy
        assert!(state.player.vel.y < 0.0);
    }

    #[test]
    fn test_tap_ignored_while_player_stunned() {
        let mut state = playing(5);
        state.player.stun_ms = 500.0;
        let input = TickInput {
            tap: Some(Vec2::ZERO),
        };
        tick(&mut state, &input, STEP_MS);

        // Decay ran but no tap gain landed
        assert_eq!(state.player.rpm, 0.0);
    }

    #[test]
    fn test_round_clock_counts_down() {
        let mut state = playing(5);
        let start = state.time_left;

        // ~1.2 seconds of frames
        for _ in 0..73 {
            tick(&mut state, &TickInput::default(), STEP_MS);
        }
        assert_eq!(state.time_left, start - 1);
    }

    #[test]
    fn test_player_death_ends_run_immediately() {
        let mut state = playing(5);
        state.player.hp = 0.0;
        tick(&mut state, &TickInput::default(), STEP_MS);

        assert_eq!(state.phase, GamePhase::Result);
        assert_eq!(state.outcome, BattleOutcome::Loss);
        assert!(state
            .pending_events()
            .iter()
            .any(|e| matches!(e, SimEvent::RunEnded { .. })));
    }

    #[test]
    fn test_enemy_death_ends_level_not_run() {
        let mut state = playing(5);
        state.enemy.hp = 0.0;
        tick(&mut state, &TickInput::default(), STEP_MS);

        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.outcome, BattleOutcome::Win);
        assert!(state
            .pending_events()
            .iter()
            .any(|e| matches!(e, SimEvent::LevelCleared { .. })));
    }

    #[test]
    fn test_time_expiry_compares_hp() {
        // Player ahead -> level complete
        let mut ahead = playing(5);
        ahead.time_left = 0;
        ahead.enemy.hp = 10.0;
        tick(&mut ahead, &TickInput::default(), STEP_MS);
        assert_eq!(ahead.phase, GamePhase::LevelComplete);

        // Player behind -> loss
        let mut behind = playing(5);
        behind.time_left = 0;
        behind.player.hp = 5.0;
        tick(&mut behind, &TickInput::default(), STEP_MS);
        assert_eq!(behind.phase, GamePhase::Result);
        assert_eq!(behind.outcome, BattleOutcome::Loss);

        // Equal -> draw
        let mut equal = playing(5);
        equal.time_left = 0;
        equal.player.hp = 50.0;
        equal.enemy.hp = 50.0;
        tick(&mut equal, &TickInput::default(), STEP_MS);
        assert_eq!(equal.phase, GamePhase::Result);
        assert_eq!(equal.outcome, BattleOutcome::Draw);
    }

    #[test]
    fn test_determinism_same_seed_same_trajectory() {
        let mut a = playing(1234);
        let mut b = playing(1234);
        let taps = [None, Some(Vec2::new(10.0, 10.0)), None, None, Some(Vec2::ZERO)];

        for tap in taps.iter().cycle().take(600) {
            let input = TickInput { tap: *tap };
            tick(&mut a, &input, STEP_MS);
            tick(&mut b, &input, STEP_MS);
        }

        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.enemy.pos, b.enemy.pos);
        assert_eq!(a.player.rpm, b.player.rpm);
        assert_eq!(a.score, b.score);
        assert_eq!(a.time_left, b.time_left);
    }

    #[test]
    fn test_frame_hitch_is_clamped() {
        let mut state = playing(5);
        state.player.vel = Vec2::new(MAX_SPEED, 0.0);
        let x_before = state.player.pos.x;

        // A 500 ms hitch integrates like a 60 ms frame
        tick(&mut state, &TickInput::default(), 500.0);
        let moved = state.player.pos.x - x_before;
        assert!(moved <= MAX_SPEED * (MAX_FRAME_MS / STEP_MS) + 1e-3);
    }
}
