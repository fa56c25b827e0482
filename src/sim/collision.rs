//! Collision detection and response
//!
//! Landing uses a swept test on the player's bottom edge: the edge must have
//! been at or above a platform's top before this tick's vertical step and be
//! strictly below it after. A thin platform can't be skipped no matter how
//! fast the fall, without substepping. Collectibles use a plain overlap test.

use super::state::{GameEvent, GameState, Platform, Player};

/// Outcome of a resolved landing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingResult {
    /// Index into `GameState::platforms`
    pub platform_index: usize,
    /// Y the player's bottom edge was snapped to
    pub surface: f32,
    /// Vertical velocity assigned by the bounce
    pub jump_velocity: f32,
    /// Whether this landing broke a breakable platform
    pub broke: bool,
}

/// Swept crossing test for a downward-moving edge
#[inline]
pub fn crosses_surface(previous_bottom: f32, current_bottom: f32, surface: f32) -> bool {
    previous_bottom >= surface && current_bottom < surface
}

/// First platform, in generation order, the player lands on this tick.
///
/// Only a falling player can land. Broken platforms are skipped.
pub fn find_landing(player: &Player, platforms: &[Platform]) -> Option<usize> {
    if player.vel.y >= 0.0 {
        return None;
    }
    let body = player.aabb();
    let previous_bottom = player.previous_bottom();
    let current_bottom = player.bottom();

    platforms.iter().position(|p| {
        p.is_solid()
            && body.overlaps_x(&p.aabb())
            && crosses_surface(previous_bottom, current_bottom, p.top())
    })
}

/// Resolve at most one landing: snap onto the surface and bounce.
///
/// The jump velocity replaces the current vertical velocity outright.
pub fn resolve_landing(state: &mut GameState) -> Option<LandingResult> {
    let index = find_landing(&state.player, &state.platforms)?;

    let platform = &mut state.platforms[index];
    let surface = platform.top();
    let broke = platform.on_landed();

    let boosted = state.player.has_boost;
    let jump_velocity = state.player.jump_velocity(&state.tuning);
    state.player.rest_on(surface);
    state.player.vel.y = jump_velocity;

    state.events.push(GameEvent::Jumped { boosted });
    if broke {
        state.events.push(GameEvent::PlatformBroken);
    }

    Some(LandingResult {
        platform_index: index,
        surface,
        jump_velocity,
        broke,
    })
}

/// Collect every active coin and boost the player overlaps.
///
/// Coins are checked before boosts. Returns the number of items collected.
pub fn resolve_pickups(state: &mut GameState) -> usize {
    let body = state.player.aabb();
    let boost_duration = state.tuning.boost_duration;
    let mut collected = 0;

    for item in state.coins.iter_mut().chain(state.boosts.iter_mut()) {
        if !item.check_collision(&body) {
            continue;
        }
        if let Some(event) =
            item.apply_effect(&mut state.player, &mut state.coins_collected, boost_duration)
        {
            state.events.push(event);
            collected += 1;
        }
    }
    collected
}
