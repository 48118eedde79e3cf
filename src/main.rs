//! Battle Tops headless driver
//!
//! Runs a scripted match at a fixed frame rate and prints the result card.
//! Useful as a smoke test of the full orchestrator without a renderer.

use glam::Vec2;

use battle_tops::commentary::{self, FallbackCommentary};
use battle_tops::consts::STEP_MS;
use battle_tops::leaderboard::Leaderboard;
use battle_tops::sim::{GamePhase, GameState, SimEvent, TickInput, tick};

fn main() {
    env_logger::init();
    log::info!("Battle Tops (headless) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB7135);

    let board = Leaderboard::default_roster();
    if !board.is_empty() {
        println!("-- leaderboard --");
        for (i, entry) in board.entries().iter().enumerate() {
            println!("{:>2}. {:<12} {}", i + 1, entry.name, entry.score);
        }
    }

    let mut state = GameState::new(seed);
    state.start_level(1);
    run_match(&mut state);

    let card = commentary::resolve_card(&FallbackCommentary, state.score, state.outcome);
    println!("\n-- result --");
    println!("outcome: {}  level: {}  score: {}", state.outcome.as_str(), state.level, state.score);
    println!("{}: {}", card.title, card.comment);
    println!("rank: #{}", board.rank_for(state.score));
    if board.top_score().is_some_and(|top| state.score > top) {
        println!("new high score!");
    }
}

/// Drive frames with a tap every few frames until the run ends, advancing
/// through cleared levels automatically.
fn run_match(state: &mut GameState) {
    let mut frame: u64 = 0;
    loop {
        match state.phase {
            GamePhase::Playing => {
                let input = TickInput {
                    tap: (frame % 9 == 0).then_some(Vec2::ZERO),
                };
                tick(state, &input, STEP_MS);
                for event in state.drain_events() {
                    if let SimEvent::EventStarted { kind } = event {
                        log::info!("frame {frame}: {}", kind.name());
                    }
                }
                frame += 1;
            }
            GamePhase::LevelComplete => {
                println!("level {} cleared ({} frames)", state.level, frame);
                state.next_level();
            }
            GamePhase::Result => break,
            GamePhase::Home => state.start_level(1),
        }
        // Safety stop for pathological seeds
        if frame > 1_000_000 {
            log::warn!("frame cap reached, stopping");
            break;
        }
    }
}
