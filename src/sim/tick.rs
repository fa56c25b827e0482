//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is
//! one frame at the nominal cadence; all velocities are per-tick.

use serde::{Deserialize, Serialize};

use super::autopilot;
use super::collision::{resolve_landing, resolve_pickups};
use super::cull::cull;
use super::generate::extend_frontier;
use super::state::{GameEvent, GamePhase, GameState};

/// Discrete input events from the outside world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Begin a run from the menu
    Start,
    /// Direction key pressed
    MoveLeft,
    MoveRight,
    /// Direction key released
    StopHorizontal,
    /// Begin a new run after game over
    Restart,
    /// Leave the game over screen
    ReturnToMenu,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Events queued since the last tick, applied in order
    pub events: Vec<InputEvent>,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn with_event(event: InputEvent) -> Self {
        Self {
            events: vec![event],
            idle_mode: false,
        }
    }

    pub fn idle() -> Self {
        Self {
            events: Vec::new(),
            idle_mode: true,
        }
    }
}

/// Apply one input event. Returns true if it changed the state.
///
/// Events that don't apply to the current phase are ignored.
pub fn apply_event(state: &mut GameState, event: InputEvent) -> bool {
    match (event, state.phase) {
        (InputEvent::Start, GamePhase::Menu) | (InputEvent::Restart, GamePhase::GameOver) => {
            start_run(state);
            true
        }
        (InputEvent::ReturnToMenu, GamePhase::GameOver) => {
            state.phase = GamePhase::Menu;
            state.player.vel.x = 0.0;
            log::info!("Returned to menu (high score {})", state.high_score);
            true
        }
        (InputEvent::MoveLeft, GamePhase::Playing) => {
            let speed = state.tuning.move_speed;
            set_horizontal(state, -speed)
        }
        (InputEvent::MoveRight, GamePhase::Playing) => {
            let speed = state.tuning.move_speed;
            set_horizontal(state, speed)
        }
        (InputEvent::StopHorizontal, GamePhase::Playing) => set_horizontal(state, 0.0),
        _ => {
            log::debug!("Ignoring {:?} in {}", event, state.phase.as_str());
            false
        }
    }
}

/// Reset the world and enter `Playing`
fn start_run(state: &mut GameState) {
    debug_assert!(state.phase.can_transition_to(GamePhase::Playing));
    state.reset();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::RunStarted);
    log::info!("Run started (seed {}, high score {})", state.seed, state.high_score);
}

fn set_horizontal(state: &mut GameState, vel_x: f32) -> bool {
    let changed = state.player.vel.x != vel_x;
    state.player.vel.x = vel_x;
    changed
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    for &event in &input.events {
        apply_event(state, event);
    }
    if input.idle_mode {
        if let Some(event) = autopilot::steer(state) {
            apply_event(state, event);
        }
    }

    // Nothing moves outside a run
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    state
        .player
        .integrate(state.tuning.gravity, state.tuning.window_width);

    let window_width = state.tuning.window_width;
    for platform in &mut state.platforms {
        platform.update(window_width);
    }

    resolve_landing(state);
    resolve_pickups(state);
    state.player.decay_boost();

    // Camera only ever moves up
    let half_height = state.tuning.window_height / 2.0;
    if state.player.pos.y > state.camera_y + half_height {
        state.camera_y = state.player.pos.y - half_height;
    }

    extend_frontier(state);
    cull(state);

    if state.player.pos.y < state.camera_y - state.player.size.y {
        let new_high_score = state.commit_high_score();
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.score,
            new_high_score,
        });
        log::info!(
            "Game over after {} ticks: score {}, coins {}{}",
            state.time_ticks,
            state.score,
            state.coins_collected,
            if new_high_score { " (new high score!)" } else { "" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Collectible, Platform, PlatformKind};
    use glam::Vec2;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::with_seed(seed);
        tick(&mut state, &TickInput::with_event(InputEvent::Start));
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    /// Drop the player beneath an empty world and tick until the run ends
    fn fall_to_death(state: &mut GameState) {
        state.platforms.clear();
        state.coins.clear();
        state.boosts.clear();
        state.player.pos.y = state.camera_y;
        state.player.vel = Vec2::ZERO;
        for _ in 0..200 {
            tick(state, &TickInput::default());
            if state.phase == GamePhase::GameOver {
                return;
            }
        }
        panic!("player never died");
    }

    #[test]
    fn test_tick_menu_to_playing() {
        let mut state = GameState::with_seed(12345);
        assert_eq!(state.phase, GamePhase::Menu);

        // Tick without start - nothing moves
        let before = state.player.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.player.pos, before);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &TickInput::with_event(InputEvent::Start));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.events.first(), Some(&GameEvent::RunStarted));
    }

    #[test]
    fn test_illegal_events_are_ignored() {
        let mut state = GameState::with_seed(1);
        assert!(!apply_event(&mut state, InputEvent::Restart));
        assert!(!apply_event(&mut state, InputEvent::ReturnToMenu));
        assert!(!apply_event(&mut state, InputEvent::MoveLeft));
        assert_eq!(state.player.vel.x, 0.0);
        assert_eq!(state.phase, GamePhase::Menu);

        let mut state = playing_state(1);
        assert!(!apply_event(&mut state, InputEvent::Start));
        assert!(!apply_event(&mut state, InputEvent::ReturnToMenu));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_horizontal_input_is_level_triggered() {
        let mut state = playing_state(1);
        assert!(apply_event(&mut state, InputEvent::MoveLeft));
        assert_eq!(state.player.vel.x, -4.0);
        assert!(!apply_event(&mut state, InputEvent::MoveLeft));
        assert!(apply_event(&mut state, InputEvent::MoveRight));
        assert_eq!(state.player.vel.x, 4.0);
        assert!(apply_event(&mut state, InputEvent::StopHorizontal));
        assert_eq!(state.player.vel.x, 0.0);

        let x = state.player.pos.x;
        tick(&mut state, &TickInput::with_event(InputEvent::MoveRight));
        assert_eq!(state.player.pos.x, x + 4.0);
    }

    #[test]
    fn test_death_sets_high_score() {
        let mut state = playing_state(7);
        fall_to_death(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.player.pos.y < state.camera_y - state.player.size.y);
        // The refill after clearing the world is still scored
        assert!(state.score > 0);
        assert_eq!(state.high_score, state.score);
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::GameOver {
                score: state.score,
                new_high_score: true
            })
        );

        // Game over is terminal until reset
        let snapshot = (state.player.pos, state.score, state.platforms.len());
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(
            snapshot,
            (state.player.pos, state.score, state.platforms.len())
        );
    }

    #[test]
    fn test_high_score_only_grows() {
        let mut state = playing_state(7);
        state.high_score = 10_000;
        fall_to_death(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.score < 10_000);
        assert_eq!(state.high_score, 10_000);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::GameOver {
                new_high_score: false,
                ..
            })
        ));
    }

    #[test]
    fn test_tying_high_score_is_not_a_new_record() {
        let mut state = playing_state(7);
        // Learn the final score of this exact run, then replay it with a tie
        let mut rehearsal = state.clone();
        fall_to_death(&mut rehearsal);
        let final_score = rehearsal.score;
        assert!(final_score > 0);

        state.high_score = final_score;
        fall_to_death(&mut state);
        assert_eq!(state.score, final_score);
        assert_eq!(state.high_score, final_score);
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::GameOver {
                score: final_score,
                new_high_score: false
            })
        );
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = playing_state(3);
        state.coins_collected = 4;
        state.player.arm_boost(300);
        fall_to_death(&mut state);
        let high_score = state.high_score;
        assert!(high_score > 0);

        assert!(apply_event(&mut state, InputEvent::Restart));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(200.0, 120.0));
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(!state.player.has_boost);
        assert_eq!(state.player.boost_timer, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.coins_collected, 0);
        assert_eq!(state.camera_y, 0.0);
        assert_eq!(state.platforms.len(), 10);
        assert_eq!(state.platforms[0].pos, Vec2::new(200.0, 50.0));
        assert_eq!(state.high_score, high_score);
    }

    #[test]
    fn test_return_to_menu_then_start() {
        let mut state = playing_state(3);
        fall_to_death(&mut state);
        tick(&mut state, &TickInput::with_event(InputEvent::ReturnToMenu));
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &TickInput::with_event(InputEvent::Start));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_landing_in_full_tick() {
        let mut state = playing_state(5);
        // One plain platform right under the player, top at 100
        state.platforms = vec![Platform::new(
            Vec2::new(200.0, 95.0),
            Vec2::new(60.0, 10.0),
            PlatformKind::Static,
        )];
        state.coins.clear();
        state.boosts.clear();
        state.player.pos = Vec2::new(200.0, 131.0);
        state.player.vel = Vec2::new(0.0, -1.7);

        // vy -> -2.0, bottom 101 -> 99 crosses 100
        tick(&mut state, &TickInput::default());
        assert!(state.events.contains(&GameEvent::Jumped { boosted: false }));
        assert_eq!(state.player.bottom(), 100.0);
        assert_eq!(state.player.vel.y, 10.0);
    }

    #[test]
    fn test_boost_pickup_then_decay() {
        let mut state = playing_state(5);
        state.boosts.clear();
        let pos = state.player.pos;
        state.boosts.push(Collectible::high_jump(pos, 20.0));

        tick(&mut state, &TickInput::default());
        assert!(state.events.contains(&GameEvent::BoostCollected));
        assert!(state.player.has_boost);
        // Decay runs after pickup within the same tick
        assert_eq!(state.player.boost_timer, 299);
        // Collected item is reaped by the same tick's cull
        assert!(state.boosts.is_empty());

        // A second boost mid-way resets the timer instead of stacking
        for _ in 0..50 {
            state.player.pos = Vec2::new(200.0, 120.0);
            state.player.vel.y = 0.0;
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.boost_timer, 249);
        let pos = state.player.pos;
        state.boosts.push(Collectible::high_jump(pos, 20.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.boost_timer, 299);
        assert_eq!(
            state.player.jump_velocity(&state.tuning),
            state.tuning.boosted_jump_strength
        );
    }

    #[test]
    fn test_coin_counted_once() {
        let mut state = playing_state(5);
        let pos = state.player.pos;
        state.coins = vec![Collectible::coin(pos, 15.0)];
        tick(&mut state, &TickInput::default());
        assert_eq!(state.coins_collected, 1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.coins_collected, 1);
    }

    #[test]
    fn test_camera_follows_up_only() {
        let mut state = playing_state(9);
        state.player.pos.y = 800.0;
        state.player.vel.y = 0.0;
        tick(&mut state, &TickInput::default());
        let camera = state.camera_y;
        assert!((camera - (state.player.pos.y - 300.0)).abs() < 1e-3);

        // Falling never pulls the camera back down
        tick(&mut state, &TickInput::default());
        assert_eq!(state.camera_y, camera);
    }

    #[test]
    fn test_generation_keeps_ahead_of_camera() {
        let mut state = GameState::with_seed(2024);
        let input = TickInput::idle();
        let mut playing_ticks = 0;
        for _ in 0..5_000 {
            tick(&mut state, &input);
            if state.phase == GamePhase::Playing {
                playing_ticks += 1;
                let last = state.last_platform_y().expect("platforms exist");
                assert!(last >= state.camera_top());
                assert!(state.coins.iter().all(|c| c.active));
                assert!(
                    state
                        .platforms
                        .iter()
                        .all(|p| p.pos.y >= state.camera_y - p.size.y)
                );
            }
        }
        assert!(playing_ticks > 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::with_seed(99999);
        let mut state2 = GameState::with_seed(99999);

        let inputs = [
            TickInput::with_event(InputEvent::Start),
            TickInput::with_event(InputEvent::MoveLeft),
            TickInput::default(),
            TickInput::with_event(InputEvent::StopHorizontal),
            TickInput::idle(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.platforms.len(), state2.platforms.len());
    }
}
