//! Sound effect call-sites
//!
//! The simulation raises `GameEvent`s; this maps them to effects and hands
//! them to a stub mixer that only logs. A real backend plugs in behind
//! `AudioManager::play`.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bounce off a platform
    Jump,
    /// Bounce while the high jump is armed
    HighJump,
    /// Breakable platform gave way
    PlatformBreak,
    CoinCollect,
    PowerUpCollect,
    /// Run started
    Start,
    /// Fell out of the window
    GameOver,
    /// New high score
    HighScore,
}

impl SoundEffect {
    /// The effect a simulation event should trigger
    pub fn for_event(event: &GameEvent) -> Self {
        match *event {
            GameEvent::RunStarted => SoundEffect::Start,
            GameEvent::Jumped { boosted: true } => SoundEffect::HighJump,
            GameEvent::Jumped { boosted: false } => SoundEffect::Jump,
            GameEvent::PlatformBroken => SoundEffect::PlatformBreak,
            GameEvent::CoinCollected => SoundEffect::CoinCollect,
            GameEvent::BoostCollected => SoundEffect::PowerUpCollect,
            GameEvent::GameOver {
                new_high_score: true,
                ..
            } => SoundEffect::HighScore,
            GameEvent::GameOver { .. } => SoundEffect::GameOver,
        }
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Effects requested so far
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set sound effects volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective gain for effects
    fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let gain = self.gain();
        if gain <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("sfx {:?} (gain {:.2})", effect, gain);
    }

    /// Play the effects for every event of a tick
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }

    /// Number of effects that reached the mixer
    pub fn played(&self) -> u64 {
        self.played
    }
}
