//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (generation order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod autopilot;
pub mod collision;
pub mod cull;
pub mod generate;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{LandingResult, crosses_surface, find_landing, resolve_landing, resolve_pickups};
pub use cull::{CullStats, cull};
pub use generate::{extend_frontier, generate_initial_world};
pub use snapshot::{CollectibleView, PlatformView, PlayerView, Snapshot};
pub use state::{
    Collectible, CollectibleKind, GameEvent, GamePhase, GameState, Platform, PlatformKind, Player,
};
pub use tick::{InputEvent, TickInput, apply_event, tick};
