//! Idle/demo mode steering
//!
//! Picks the discrete input a player would give this tick: start or restart
//! runs automatically, and while playing steer toward the platform the body
//! is most likely to land on next.

use super::state::{GamePhase, GameState, Platform};
use super::tick::InputEvent;

/// Horizontal distance under which the autopilot stops steering
const DEAD_ZONE: f32 = 6.0;

/// The input the autopilot gives for the current state
pub fn steer(state: &GameState) -> Option<InputEvent> {
    match state.phase {
        GamePhase::Menu => Some(InputEvent::Start),
        GamePhase::GameOver => Some(InputEvent::Restart),
        GamePhase::Playing => Some(steer_horizontal(state)),
    }
}

fn steer_horizontal(state: &GameState) -> InputEvent {
    let Some(target) = target_platform(state) else {
        return InputEvent::StopHorizontal;
    };
    let dx = target.pos.x - state.player.pos.x;
    if dx.abs() < DEAD_ZONE {
        InputEvent::StopHorizontal
    } else if dx < 0.0 {
        InputEvent::MoveLeft
    } else {
        InputEvent::MoveRight
    }
}

/// Rising: the lowest solid platform still above the feet.
/// Falling: the highest solid platform below the feet.
fn target_platform(state: &GameState) -> Option<&Platform> {
    let feet = state.player.bottom();
    let solid = state.platforms.iter().filter(|p| p.is_solid());
    if state.player.vel.y > 0.0 {
        solid
            .filter(|p| p.top() > feet)
            .min_by(|a, b| a.top().total_cmp(&b.top()))
    } else {
        solid
            .filter(|p| p.top() <= feet)
            .max_by(|a, b| a.top().total_cmp(&b.top()))
    }
}
