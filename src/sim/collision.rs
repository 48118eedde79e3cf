//! Spinner-vs-spinner collision resolution
//!
//! Overlap triggers positional de-penetration, a restitution impulse, and
//! momentum-dependent damage biased by the rpm ratio: the faster spinner
//! deals more and takes less. Damage on the enemy feeds the score ledger.
//!
//! The de-penetration split is 50/50 regardless of mass. That is not
//! physically consistent with the mass-weighted impulse below, but the game
//! feel depends on it, so it stays.

use glam::Vec2;
use rand::Rng;

use super::events::ArenaEvent;
use super::state::{
    EXPLOSION_LIFETIME_MS, FloatingTextKind, GameState, SimEvent, Spark, SparkColor,
};
use crate::consts::*;

/// Detect and resolve an overlap between the two spinners.
///
/// Grazing or separating contact (relative velocity not closing along the
/// normal) de-penetrates only: no impulse, no damage.
pub fn resolve(state: &mut GameState) {
    let delta = state.player.pos - state.enemy.pos;
    let dist = delta.length();
    let min_dist = state.player.radius + state.enemy.radius;
    if dist >= min_dist {
        return;
    }

    // Degenerate geometry: exactly coincident centers get a fixed normal
    let normal = if dist > 0.0 { delta / dist } else { Vec2::Y };
    let overlap = min_dist - dist;

    // De-penetration, split 50/50
    state.player.pos += normal * overlap * 0.5;
    state.enemy.pos -= normal * overlap * 0.5;

    let v_rel = state.player.vel - state.enemy.vel;
    let v_rel_n = v_rel.dot(normal);
    if v_rel_n >= 0.0 {
        return;
    }

    // Restitution impulse along the normal
    let inv_mass = 1.0 / state.player.mass + 1.0 / state.enemy.mass;
    let impulse = -(1.0 + COLLISION_ELASTICITY) * v_rel_n / inv_mass;

    state.player.vel += normal * (impulse / state.player.mass);
    state.enemy.vel -= normal * (impulse / state.enemy.mass);

    // Damage: higher rpm attacks harder and defends better
    let impact_force = impulse.abs() * 2.0;
    let rpm_ratio = (state.player.rpm + 500.0) / (state.enemy.rpm + 500.0);

    let mut player_damage = impact_force * DAMAGE_FACTOR / rpm_ratio;
    let mut enemy_damage = impact_force * DAMAGE_FACTOR * rpm_ratio;

    if state.event.is_active(ArenaEvent::SuddenDeath) {
        player_damage *= 2.0;
        enemy_damage *= 2.0;
    }

    state.player.take_damage(player_damage);
    state.enemy.take_damage(enemy_damage);

    // Energy bleed on any resolved collision
    state.player.rpm *= 0.9;
    state.enemy.rpm *= 0.9;

    let score_gain = (enemy_damage * 10.0 * state.level as f32).floor() as u64;
    state.score += score_gain;

    let contact = (state.player.pos + state.enemy.pos) * 0.5;
    let sparks = sample_sparks(state, impact_force);

    let player_hp = SimEvent::HpChanged {
        id: state.player.id,
        hp: state.player.hp,
        max_hp: state.player.max_hp,
    };
    let enemy_hp = SimEvent::HpChanged {
        id: state.enemy.id,
        hp: state.enemy.hp,
        max_hp: state.enemy.max_hp,
    };
    state.push_event(player_hp);
    state.push_event(enemy_hp);

    state.push_event(SimEvent::Explosion {
        pos: contact,
        sparks,
        lifetime_ms: EXPLOSION_LIFETIME_MS,
    });

    let enemy_pos = state.enemy.pos;
    state.push_event(SimEvent::FloatingText {
        kind: FloatingTextKind::Damage,
        pos: enemy_pos,
        text: format!("-{}", enemy_damage.floor() as i64),
    });

    if enemy_damage > CRITICAL_DAMAGE {
        state.enemy.stun_ms = CRITICAL_STUN_MS;
        state.push_event(SimEvent::FloatingText {
            kind: FloatingTextKind::Critical,
            pos: enemy_pos - Vec2::new(0.0, 20.0),
            text: "CRITICAL!".to_string(),
        });
    }

    log::debug!(
        "collision: impulse={:.2} player_dmg={:.2} enemy_dmg={:.2} score+={}",
        impulse,
        player_damage,
        enemy_damage,
        score_gain
    );
}

/// Sample the advisory explosion burst: 8-16 sparks with randomized angle,
/// distance, color, size, and speed. Heavy impacts throw sparks further.
fn sample_sparks(state: &mut GameState, impact_force: f32) -> Vec<Spark> {
    let count = 8 + state.rng.random_range(0..8usize);
    let reach = if impact_force > 500.0 { 1.5 } else { 1.0 };

    (0..count)
        .map(|_| Spark {
            angle: state.rng.random::<f32>() * 360.0,
            distance: 40.0 + state.rng.random::<f32>() * 80.0 * reach,
            color: if state.rng.random_bool(0.5) {
                SparkColor::Amber
            } else {
                SparkColor::Red
            },
            size: 2.0 + state.rng.random::<f32>() * 3.0,
            speed: 0.3 + state.rng.random::<f32>() * 0.3,
        })
        .collect()
}
