//! Skyhop - An endless vertical platform jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, generation, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound effect call-sites (stubbed)

pub mod audio;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal simulation cadence (one tick per 16 ms frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 400.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const MOVE_SPEED: f32 = 4.0;

    /// Per-tick downward acceleration
    pub const GRAVITY: f32 = 0.3;
    pub const JUMP_STRENGTH: f32 = 10.0;
    pub const BOOSTED_JUMP_STRENGTH: f32 = 18.0;
    /// High jump duration in ticks (5 seconds at 60 Hz)
    pub const BOOST_DURATION_TICKS: u32 = 300;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 60.0;
    pub const PLATFORM_HEIGHT: f32 = 10.0;
    pub const PLATFORM_SPEED: f32 = 2.0;
    pub const PLATFORM_SPACING: f32 = 80.0;
    pub const INITIAL_PLATFORMS: usize = 10;
    pub const FIRST_PLATFORM_Y: f32 = 50.0;

    /// Collectible defaults
    pub const COIN_SIZE: f32 = 15.0;
    pub const COIN_GAP: f32 = 5.0;
    pub const BOOST_SIZE: f32 = 20.0;

    /// Points awarded per generated platform
    pub const SCORE_PER_PLATFORM: u64 = 10;
}

/// Wrap a horizontal position around the window edges.
///
/// The box only reappears on the opposite side once it has fully left
/// the window, so a body straddling an edge is left alone.
#[inline]
pub fn wrap_horizontal(x: f32, half_width: f32, window_width: f32) -> f32 {
    if x > window_width + half_width {
        -half_width
    } else if x < -half_width {
        window_width + half_width
    } else {
        x
    }
}
