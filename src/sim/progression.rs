//! Level progression and stat scaling
//!
//! Every 5th level is a boss: more hp, more mass, bigger radius. Score is
//! cumulative across levels within a run and only resets when a run starts
//! over at level 1.

use glam::Vec2;

use super::state::{GamePhase, GameState, Spinner, SpinnerId, SpinnerTier};
use crate::consts::*;

/// True for boss levels (every 5th)
pub fn is_boss_level(level: u32) -> bool {
    level % 5 == 0
}

/// Build the enemy spinner for a level, boss multipliers included
pub fn enemy_for_level(level: u32) -> Spinner {
    let boss = is_boss_level(level);
    let hp = ENEMY_BASE_HP
        * LEVEL_HP_SCALING.powi(level as i32 - 1)
        * if boss { BOSS_HP_MULTIPLIER } else { 1.0 };
    let mass = SPINNER_MASS * if boss { BOSS_MASS_MULTIPLIER } else { 1.0 };
    let radius = SPINNER_RADIUS * if boss { BOSS_SIZE_MULTIPLIER } else { 1.0 };
    let scale = if boss { BOSS_SIZE_MULTIPLIER } else { 1.0 };

    Spinner {
        id: SpinnerId::Enemy,
        pos: Vec2::new(0.0, -150.0),
        vel: Vec2::ZERO,
        rpm: 500.0 + level as f32 * 100.0,
        hp,
        max_hp: hp,
        radius,
        mass,
        scale,
        // Bosses present at the top tier until the first reclassification
        tier: if boss {
            SpinnerTier::Singularity
        } else {
            SpinnerTier::Normal
        },
        wobble: 0.0,
        rotation_z: 0.0,
        stun_ms: 0.0,
        base_mass: mass,
        base_radius: radius,
        base_scale: scale,
    }
}

/// Reset the session for a level start and begin playing.
///
/// Both spinners are rebuilt from base stats, so any lingering event
/// mutation is discarded with them.
pub fn start_level(state: &mut GameState, level: u32) {
    state.level = level.max(1);
    if state.level == 1 {
        state.score = 0;
    }

    state.player = Spinner::player();
    state.enemy = enemy_for_level(state.level);

    state.time_left = state.config.round_secs;
    state.clock_ms = 0.0;
    state.pulse = 0.0;
    state.event = super::events::EventState::Inactive;
    state.drain_events();
    state.phase = GamePhase::Playing;

    if is_boss_level(state.level) {
        log::info!(
            "boss level {} start: enemy hp={:.0} mass={:.1} radius={:.0}",
            state.level,
            state.enemy.max_hp,
            state.enemy.mass,
            state.enemy.radius
        );
    } else {
        log::info!("level {} start: enemy hp={:.0}", state.level, state.enemy.max_hp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_hp_scales_per_level() {
        let l1 = enemy_for_level(1);
        let l2 = enemy_for_level(2);
        let l3 = enemy_for_level(3);

        assert!((l1.max_hp - 100.0).abs() < 1e-3);
        assert!((l2.max_hp - 120.0).abs() < 1e-3);
        assert!((l3.max_hp - 144.0).abs() < 1e-3);
    }

    #[test]
    fn test_boss_levels_outscale_baseline() {
        for level in [5u32, 10, 15] {
            let boss = enemy_for_level(level);
            let baseline_hp = ENEMY_BASE_HP * LEVEL_HP_SCALING.powi(level as i32 - 1);

            assert!(boss.max_hp >= baseline_hp);
            assert!(boss.mass >= SPINNER_MASS);
            assert!(boss.radius >= SPINNER_RADIUS);
            assert_eq!(boss.tier, SpinnerTier::Singularity);
        }
    }

    #[test]
    fn test_enemy_rpm_grows_with_level() {
        assert_eq!(enemy_for_level(1).rpm, 600.0);
        assert_eq!(enemy_for_level(7).rpm, 1200.0);
    }

    #[test]
    fn test_score_resets_only_at_level_one() {
        let mut state = GameState::new(1);
        start_level(&mut state, 1);
        state.score = 4200;

        start_level(&mut state, 2);
        assert_eq!(state.score, 4200);

        start_level(&mut state, 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_start_level_resets_clock_and_player() {
        let mut state = GameState::new(1);
        start_level(&mut state, 3);
        state.time_left = 2;
        state.player.hp = 10.0;

        start_level(&mut state, 4);
        assert_eq!(state.time_left, state.config.round_secs);
        assert_eq!(state.player.hp, PLAYER_BASE_HP);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
