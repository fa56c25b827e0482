//! Trailing-edge culling
//!
//! Entities are dropped once they have fully scrolled below the camera.
//! Picked-up collectibles are reaped on the same pass. Must run after
//! collision resolution so a pickup is settled before its item disappears.

use super::state::GameState;

/// Counts of entities removed by one culling pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    pub platforms: usize,
    pub coins: usize,
    pub boosts: usize,
}

impl CullStats {
    pub fn total(&self) -> usize {
        self.platforms + self.coins + self.boosts
    }
}

/// Remove everything below `camera_y - own height` plus inactive collectibles
pub fn cull(state: &mut GameState) -> CullStats {
    let camera_y = state.camera_y;

    let before = (state.platforms.len(), state.coins.len(), state.boosts.len());
    // Broken platforms stay until they scroll away
    state.platforms.retain(|p| p.pos.y >= camera_y - p.size.y);
    state
        .coins
        .retain(|c| c.active && c.pos.y >= camera_y - c.size);
    state
        .boosts
        .retain(|b| b.active && b.pos.y >= camera_y - b.size);

    let stats = CullStats {
        platforms: before.0 - state.platforms.len(),
        coins: before.1 - state.coins.len(),
        boosts: before.2 - state.boosts.len(),
    };
    if stats.total() > 0 {
        log::trace!(
            "Culled {} platforms, {} coins, {} boosts below y={:.1}",
            stats.platforms,
            stats.coins,
            stats.boosts,
            camera_y
        );
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlatformKind;

    #[test]
    fn test_nothing_culled_at_start() {
        let mut state = GameState::with_seed(1);
        assert_eq!(cull(&mut state), CullStats::default());
        assert_eq!(state.platforms.len(), 10);
    }

    #[test]
    fn test_culls_below_camera_margin() {
        let mut state = GameState::with_seed(1);
        // First platform at y=50, height 10: kept down to camera_y=60
        state.camera_y = 60.0;
        assert_eq!(cull(&mut state).platforms, 0);

        state.camera_y = 60.5;
        let stats = cull(&mut state);
        assert_eq!(stats.platforms, 1);
        assert_eq!(state.platforms[0].pos.y, 130.0);
        // Coin of the first platform sits at 67.5 with size 15: still retained
        assert_eq!(stats.coins, 0);
    }

    #[test]
    fn test_reaps_inactive_collectibles() {
        let mut state = GameState::with_seed(1);
        state.coins[3].active = false;
        state.boosts[0].active = false;
        let stats = cull(&mut state);
        assert_eq!(stats.coins, 1);
        assert_eq!(stats.boosts, 1);
        assert!(state.coins.iter().all(|c| c.active));
        assert!(state.boosts.is_empty());
    }

    #[test]
    fn test_broken_platforms_are_not_reaped_early() {
        let mut state = GameState::with_seed(1);
        state.platforms[4].kind = PlatformKind::Breakable { broken: true };
        cull(&mut state);
        assert_eq!(state.platforms.len(), 10);
        assert!(state.platforms[4].is_broken());
    }

    #[test]
    fn test_preserves_generation_order() {
        let mut state = GameState::with_seed(1);
        state.camera_y = 200.0;
        cull(&mut state);
        let ys: Vec<f32> = state.platforms.iter().map(|p| p.pos.y).collect();
        let mut sorted = ys.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(ys, sorted);
    }
}
