//! Procedural world generation
//!
//! Platforms are laid out in a single upward column, one `platform_spacing`
//! apart, each at a random X. Every platform carries a coin; boosts are
//! sprinkled in rarely. The initial span is built once per run, after which
//! `extend_frontier` keeps the column ahead of the camera every tick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Collectible, GameState, Platform, PlatformKind};
use crate::tuning::Tuning;

/// Lay out the starting span of a run.
///
/// Starts from a plain platform centered at `first_platform_y` and stacks
/// `initial_platforms - 1` more above it. No score is awarded. If the span is
/// long enough a single boost is placed around its middle.
pub fn generate_initial_world(state: &mut GameState) {
    state.platforms.clear();
    state.coins.clear();
    state.boosts.clear();

    let tuning = &state.tuning;
    let size = Vec2::new(tuning.platform_width, tuning.platform_height);
    let first = Platform::new(
        Vec2::new(tuning.window_width / 2.0, tuning.first_platform_y),
        size,
        PlatformKind::Static,
    );
    push_platform(state, first);

    let count = state.tuning.initial_platforms;
    for i in 1..count {
        let y = state.tuning.first_platform_y + i as f32 * state.tuning.platform_spacing;
        let platform = roll_platform(&mut state.rng, &state.tuning, y);
        push_platform(state, platform);
    }

    if count > state.tuning.initial_boost_threshold {
        let tuning = &state.tuning;
        let margin = tuning.boost_size;
        let x = state
            .rng
            .random_range(margin..=tuning.window_width - margin);
        let y = state.platforms[count / 2].pos.y + tuning.platform_spacing * 0.75;
        state.boosts.push(Collectible::high_jump(Vec2::new(x, y), tuning.boost_size));
    }

    log::debug!(
        "Initial world: {} platforms, {} coins, {} boosts",
        state.platforms.len(),
        state.coins.len(),
        state.boosts.len()
    );
}

/// Generate platforms until the newest one reaches the frontier.
///
/// New platforms anchor on the most recently appended one. With no platforms
/// at all the camera bottom stands in as the anchor. Each platform adds
/// `score_per_platform` to the score. Returns the number generated.
pub fn extend_frontier(state: &mut GameState) -> usize {
    let frontier = state.frontier();
    let spacing = state.tuning.platform_spacing;
    let mut last_y = state.last_platform_y().unwrap_or(state.camera_y);
    let mut spawned = 0;

    // Terminates: spacing is validated positive
    while last_y < frontier {
        let y = last_y + spacing;
        let platform = roll_platform(&mut state.rng, &state.tuning, y);
        let platform_y = platform.pos.y;
        push_platform(state, platform);
        state.score += state.tuning.score_per_platform;

        if state.rng.random_range(0..state.tuning.boost_one_in) == 0 {
            let tuning = &state.tuning;
            let margin = tuning.boost_margin;
            let x = state
                .rng
                .random_range(margin..=tuning.window_width - margin);
            let lift = 0.25 + state.rng.random_range(0.0f32..0.5);
            let y = platform_y + spacing * lift;
            state.boosts.push(Collectible::high_jump(Vec2::new(x, y), tuning.boost_size));
        }

        last_y = y;
        spawned += 1;
    }

    if spawned > 0 {
        log::trace!("Generated {} platforms up to y={:.1}", spawned, last_y);
    }
    spawned
}

/// Append a platform along with the coin floating above it
fn push_platform(state: &mut GameState, platform: Platform) {
    let coin_pos = platform.pos + Vec2::new(0.0, state.tuning.coin_offset());
    state.coins.push(Collectible::coin(coin_pos, state.tuning.coin_size));
    state.platforms.push(platform);
}

/// A platform at height `y` with random X and random kind
fn roll_platform(rng: &mut Pcg32, tuning: &Tuning, y: f32) -> Platform {
    let half = tuning.platform_half_width();
    let x = rng.random_range(half..=tuning.window_width - half);
    let kind = roll_platform_kind(rng, tuning);
    Platform::new(
        Vec2::new(x, y),
        Vec2::new(tuning.platform_width, tuning.platform_height),
        kind,
    )
}

/// One draw decides the kind, so moving and breakable never coincide
fn roll_platform_kind(rng: &mut Pcg32, tuning: &Tuning) -> PlatformKind {
    let roll: f32 = rng.random();
    if roll < tuning.moving_chance {
        PlatformKind::Moving {
            vel_x: tuning.platform_speed,
        }
    } else if roll < tuning.moving_chance + tuning.breakable_chance {
        PlatformKind::Breakable { broken: false }
    } else {
        PlatformKind::Static
    }
}
