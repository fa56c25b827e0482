//! Data-driven game balance
//!
//! Every constant the simulation reads lives here so runs can be tuned
//! from a JSON file without recompiling. Defaults match `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning file can be rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be between 0.0 and 1.0, got {value}")]
    InvalidChance { field: &'static str, value: f32 },
    #[error("moving and breakable chances sum to {0}, above 1.0")]
    ChanceOverflow(f32),
    #[error("{field} ({value}) does not fit inside a window {window_width} wide")]
    TooWide {
        field: &'static str,
        value: f32,
        window_width: f32,
    },
    #[error("boost_one_in must be at least 1")]
    ZeroBoostOdds,
    #[error("initial_platforms must be at least 1")]
    NoInitialPlatforms,
}

/// Tunable world parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Window ===
    pub window_width: f32,
    pub window_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal speed while a direction is held
    pub move_speed: f32,
    /// Subtracted from vertical velocity every tick
    pub gravity: f32,
    pub jump_strength: f32,
    pub boosted_jump_strength: f32,
    /// High jump lifetime in ticks
    pub boost_duration: u32,

    // === Platforms ===
    pub platform_width: f32,
    pub platform_height: f32,
    /// Horizontal speed of moving platforms
    pub platform_speed: f32,
    /// Vertical distance between consecutive platforms
    pub platform_spacing: f32,
    pub initial_platforms: usize,
    pub first_platform_y: f32,

    // === Collectibles ===
    pub coin_size: f32,
    /// Space between a platform's surface and its coin
    pub coin_gap: f32,
    pub boost_size: f32,
    /// Horizontal margin for randomly placed boosts during infinite generation
    pub boost_margin: f32,

    // === Spawn odds ===
    pub moving_chance: f32,
    pub breakable_chance: f32,
    /// One boost per this many generated platforms, on average
    pub boost_one_in: u32,
    /// The initial span gets a boost only when it holds more platforms than this
    pub initial_boost_threshold: usize,

    // === Scoring ===
    pub score_per_platform: u64,
    /// Points per cosmetic stage
    pub stage_score_step: u64,
    pub stage_count: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            move_speed: MOVE_SPEED,
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            boosted_jump_strength: BOOSTED_JUMP_STRENGTH,
            boost_duration: BOOST_DURATION_TICKS,

            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            platform_speed: PLATFORM_SPEED,
            platform_spacing: PLATFORM_SPACING,
            initial_platforms: INITIAL_PLATFORMS,
            first_platform_y: FIRST_PLATFORM_Y,

            coin_size: COIN_SIZE,
            coin_gap: COIN_GAP,
            boost_size: BOOST_SIZE,
            boost_margin: 30.0,

            moving_chance: 0.2,
            breakable_chance: 0.2,
            boost_one_in: 15,
            initial_boost_threshold: 4,

            score_per_platform: SCORE_PER_PLATFORM,
            stage_score_step: 100,
            stage_count: 4,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would stall generation or break spawn ranges
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("jump_strength", self.jump_strength),
            ("boosted_jump_strength", self.boosted_jump_strength),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("platform_spacing", self.platform_spacing),
            ("coin_size", self.coin_size),
            ("boost_size", self.boost_size),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        if self.gravity.is_nan() || self.gravity < 0.0 {
            return Err(TuningError::NonPositive {
                field: "gravity",
                value: self.gravity,
            });
        }

        for (field, value) in [
            ("moving_chance", self.moving_chance),
            ("breakable_chance", self.breakable_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::InvalidChance { field, value });
            }
        }
        let total = self.moving_chance + self.breakable_chance;
        if total > 1.0 {
            return Err(TuningError::ChanceOverflow(total));
        }

        let window_width = self.window_width;
        for (field, value) in [
            ("platform_width", self.platform_width),
            ("boost_margin * 2", self.boost_margin * 2.0),
            ("boost_size * 2", self.boost_size * 2.0),
        ] {
            if value >= window_width {
                return Err(TuningError::TooWide {
                    field,
                    value,
                    window_width,
                });
            }
        }

        if self.boost_one_in == 0 {
            return Err(TuningError::ZeroBoostOdds);
        }
        if self.initial_platforms == 0 {
            return Err(TuningError::NoInitialPlatforms);
        }
        Ok(())
    }

    /// Half the platform width, the minimum distance from a window edge
    #[inline]
    pub fn platform_half_width(&self) -> f32 {
        self.platform_width / 2.0
    }

    /// Vertical offset from a platform's center to its coin's center
    #[inline]
    pub fn coin_offset(&self) -> f32 {
        self.platform_height / 2.0 + self.coin_size / 2.0 + self.coin_gap
    }

    /// Player spawn point: horizontally centered, a fifth of the way up
    pub fn spawn_point(&self) -> (f32, f32) {
        (self.window_width / 2.0, self.window_height / 5.0)
    }
}
