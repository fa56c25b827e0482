//! Game state and core simulation types
//!
//! The world aggregate owns every entity collection. Collections are kept
//! in generation order: the generator anchors on the last platform and the
//! landing sweep breaks ties by spawn order.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::tuning::{Tuning, TuningError};
use crate::wrap_horizontal;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended, waiting for restart or menu
    GameOver,
}

impl GamePhase {
    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(self, next: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, next),
            (Menu, Playing) | (Playing, GameOver) | (GameOver, Menu) | (GameOver, Playing)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "Menu",
            GamePhase::Playing => "Playing",
            GamePhase::GameOver => "GameOver",
        }
    }
}

/// Things that happened during a tick, for audio and HUD consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run began
    RunStarted,
    /// Player bounced off a platform
    Jumped { boosted: bool },
    /// A breakable platform gave way under the player
    PlatformBroken,
    CoinCollected,
    BoostCollected,
    /// Player fell out of the camera window
    GameOver { score: u64, new_high_score: bool },
}

/// The player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Box center
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub has_boost: bool,
    /// Ticks of high jump remaining
    pub boost_timer: u32,
}

impl Player {
    /// Spawn at the tuning's spawn point, at rest
    pub fn new(tuning: &Tuning) -> Self {
        let (x, y) = tuning.spawn_point();
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            has_boost: false,
            boost_timer: 0,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    /// Bottom edge before this tick's vertical step (undoes `y += vy`)
    #[inline]
    pub fn previous_bottom(&self) -> f32 {
        (self.pos.y - self.vel.y) - self.size.y / 2.0
    }

    /// Apply gravity, move, and wrap horizontally
    pub fn integrate(&mut self, gravity: f32, window_width: f32) {
        self.vel.y -= gravity;
        self.pos.y += self.vel.y;
        self.pos.x += self.vel.x;
        self.pos.x = wrap_horizontal(self.pos.x, self.size.x / 2.0, window_width);
    }

    /// Place the bottom edge exactly on `surface`
    pub fn rest_on(&mut self, surface: f32) {
        self.pos.y = surface + self.size.y / 2.0;
    }

    /// Arm (or re-arm) the high jump. Never stacks.
    pub fn arm_boost(&mut self, duration: u32) {
        self.has_boost = true;
        self.boost_timer = duration;
    }

    /// Count down the high jump, clearing it when it runs out
    pub fn decay_boost(&mut self) {
        if self.has_boost {
            self.boost_timer = self.boost_timer.saturating_sub(1);
            if self.boost_timer == 0 {
                self.has_boost = false;
            }
        }
    }

    /// Upward velocity assigned on landing
    pub fn jump_velocity(&self, tuning: &Tuning) -> f32 {
        if self.has_boost {
            tuning.boosted_jump_strength
        } else {
            tuning.jump_strength
        }
    }
}

/// Platform behavior. Moving and breakable are exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    Static,
    /// Slides horizontally, reflecting at the window edges
    Moving { vel_x: f32 },
    /// Breaks permanently the first time it is landed on
    Breakable { broken: bool },
}

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Box center
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(pos: Vec2, size: Vec2, kind: PlatformKind) -> Self {
        Self { pos, size, kind }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Landing surface
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.kind, PlatformKind::Moving { .. })
    }

    pub fn is_breakable(&self) -> bool {
        matches!(self.kind, PlatformKind::Breakable { .. })
    }

    pub fn is_broken(&self) -> bool {
        matches!(self.kind, PlatformKind::Breakable { broken: true })
    }

    /// Broken platforms are inert: no collision and no rendering
    pub fn is_solid(&self) -> bool {
        !self.is_broken()
    }

    /// Advance a moving platform by one tick
    pub fn update(&mut self, window_width: f32) {
        if let PlatformKind::Moving { ref mut vel_x } = self.kind {
            self.pos.x += *vel_x;
            let half = self.size.x / 2.0;
            if self.pos.x < half || self.pos.x > window_width - half {
                *vel_x = -*vel_x;
            }
        }
    }

    /// React to the player landing. Returns true if this landing broke it.
    pub fn on_landed(&mut self) -> bool {
        if let PlatformKind::Breakable { ref mut broken } = self.kind {
            if !*broken {
                *broken = true;
                return true;
            }
        }
        false
    }
}

/// Collectible variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Adds to the coin counter
    Coin,
    /// Arms the high jump
    HighJump,
}

/// A collectible entity (coin or high-jump boost)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    /// Box center
    pub pos: Vec2,
    /// Side of the square box
    pub size: f32,
    /// False once picked up; inactive items are never drawn or collided
    pub active: bool,
}

impl Collectible {
    pub fn coin(pos: Vec2, size: f32) -> Self {
        Self {
            kind: CollectibleKind::Coin,
            pos,
            size,
            active: true,
        }
    }

    pub fn high_jump(pos: Vec2, size: f32) -> Self {
        Self {
            kind: CollectibleKind::HighJump,
            pos,
            size,
            active: true,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    /// Plain overlap test against an active item
    pub fn check_collision(&self, other: &Aabb) -> bool {
        self.active && self.aabb().overlaps(other)
    }

    /// Deactivate and apply this item's effect.
    ///
    /// Returns `None` if the item was already collected, so repeated calls
    /// never apply the effect twice.
    pub fn apply_effect(
        &mut self,
        player: &mut Player,
        coins_collected: &mut u32,
        boost_duration: u32,
    ) -> Option<GameEvent> {
        if !self.active {
            return None;
        }
        self.active = false;
        match self.kind {
            CollectibleKind::Coin => {
                *coins_collected += 1;
                Some(GameEvent::CoinCollected)
            }
            CollectibleKind::HighJump => {
                player.arm_boost(boost_duration);
                Some(GameEvent::BoostCollected)
            }
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// World parameters, validated at construction
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Platforms in generation order
    pub platforms: Vec<Platform>,
    /// Coins in generation order
    pub coins: Vec<Collectible>,
    /// High-jump boosts in generation order
    pub boosts: Vec<Collectible>,
    /// Bottom of the visible window; never decreases during a run
    pub camera_y: f32,
    /// Grows by `score_per_platform` per generated platform
    pub score: u64,
    /// Best score this process has seen
    pub high_score: u64,
    pub coins_collected: u32,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session in the menu, with an initial world laid out.
    ///
    /// The tuning is validated first; generation relies on its spawn ranges
    /// being non-empty.
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::with_valid_tuning(seed, tuning))
    }

    /// Create a session with default tuning
    pub fn with_seed(seed: u64) -> Self {
        Self::with_valid_tuning(seed, Tuning::default())
    }

    fn with_valid_tuning(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(&tuning);
        let mut state = Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            player,
            platforms: Vec::new(),
            coins: Vec::new(),
            boosts: Vec::new(),
            camera_y: 0.0,
            score: 0,
            high_score: 0,
            coins_collected: 0,
            time_ticks: 0,
            events: Vec::new(),
        };
        super::generate::generate_initial_world(&mut state);
        state
    }

    /// World parameters this session was built with
    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Put the player back at spawn and rebuild the world.
    ///
    /// The high score survives; everything else about the run is cleared.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.tuning);
        self.camera_y = 0.0;
        self.score = 0;
        self.coins_collected = 0;
        self.time_ticks = 0;
        self.events.clear();
        super::generate::generate_initial_world(self);
        log::info!(
            "World reset: {} platforms, {} boosts",
            self.platforms.len(),
            self.boosts.len()
        );
    }

    /// Cosmetic stage derived from score
    pub fn stage(&self) -> u64 {
        if self.tuning.stage_score_step == 0 || self.tuning.stage_count == 0 {
            return 0;
        }
        (self.score / self.tuning.stage_score_step) % self.tuning.stage_count
    }

    /// Top of the visible window
    #[inline]
    pub fn camera_top(&self) -> f32 {
        self.camera_y + self.tuning.window_height
    }

    /// Y the newest platform must reach before generation stops
    #[inline]
    pub fn frontier(&self) -> f32 {
        self.camera_top() + self.tuning.platform_spacing
    }

    /// Y of the most recently generated platform, if any
    pub fn last_platform_y(&self) -> Option<f32> {
        self.platforms.last().map(|p| p.pos.y)
    }

    /// Commit the current score as high score if it beats it
    pub(crate) fn commit_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}
