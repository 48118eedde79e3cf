//! Enemy controller
//!
//! Runs once per frame, after physics and before collision resolution. The
//! enemy passively recharges rpm toward a soft ceiling and steers at the
//! player with an acceleration impulse so friction and collisions still
//! shape its motion. Stunned enemies do nothing.

use crate::consts::*;

use super::events::ArenaEvent;
use super::state::GameState;

/// Mutate the enemy's rpm and velocity for this frame
pub fn drive_enemy(state: &mut GameState, steps: f32) {
    if state.enemy.is_stunned() {
        return;
    }

    if state.enemy.rpm < ENEMY_CHARGE_CEILING {
        state.enemy.add_rpm(ENEMY_CHARGE_RATE * steps);
    }

    let delta = state.player.pos - state.enemy.pos;
    let dist = delta.length();
    if dist <= 0.0 {
        return;
    }

    // Ease off while the player is nearly out
    let player_weak = state.player.hp < state.player.max_hp * 0.3;
    let mercy = if player_weak { 0.5 } else { 1.0 };

    // Difficulty ramps with level, saturating around level 6
    let level_factor = (0.4 + state.level as f32 * 0.1).min(1.0);

    let event_factor = if state.event.is_active(ArenaEvent::Slippery) {
        0.2
    } else {
        1.0
    };

    let speed = ENEMY_AI_SPEED * mercy * level_factor * event_factor;
    state.enemy.vel += (delta / dist) * speed * steps;
}
