//! Read-only view of the world for renderers and HUDs
//!
//! Built once per frame from `GameState`. Holds plain copies so consumers
//! never borrow simulation state across ticks.

use serde::Serialize;

use super::state::{Collectible, GamePhase, GameState, Platform, Player};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    pub has_boost: bool,
    pub boost_timer: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformView {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub moving: bool,
    pub breakable: bool,
    /// Broken platforms should not be drawn
    pub broken: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectibleView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub active: bool,
}

/// Everything a frame needs to draw the world and HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: PlayerView,
    pub platforms: Vec<PlatformView>,
    pub coins: Vec<CollectibleView>,
    pub boosts: Vec<CollectibleView>,
    pub camera_y: f32,
    pub score: u64,
    pub high_score: u64,
    pub coins_collected: u32,
    /// Cosmetic stage, e.g. for background tint
    pub stage: u64,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        Self {
            x: p.pos.x,
            y: p.pos.y,
            w: p.size.x,
            h: p.size.y,
            vx: p.vel.x,
            vy: p.vel.y,
            has_boost: p.has_boost,
            boost_timer: p.boost_timer,
        }
    }
}

impl From<&Platform> for PlatformView {
    fn from(p: &Platform) -> Self {
        Self {
            x: p.pos.x,
            y: p.pos.y,
            w: p.size.x,
            h: p.size.y,
            moving: p.is_moving(),
            breakable: p.is_breakable(),
            broken: p.is_broken(),
        }
    }
}

impl From<&Collectible> for CollectibleView {
    fn from(c: &Collectible) -> Self {
        Self {
            x: c.pos.x,
            y: c.pos.y,
            size: c.size,
            active: c.active,
        }
    }
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            player: PlayerView::from(&state.player),
            platforms: state.platforms.iter().map(PlatformView::from).collect(),
            coins: state.coins.iter().map(CollectibleView::from).collect(),
            boosts: state.boosts.iter().map(CollectibleView::from).collect(),
            camera_y: state.camera_y,
            score: state.score,
            high_score: state.high_score,
            coins_collected: state.coins_collected,
            stage: state.stage(),
        }
    }
}

impl GameState {
    /// Capture the current frame for external consumers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }
}

impl Snapshot {
    /// Serialize for logging or piping to another process
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
