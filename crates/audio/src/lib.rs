//! Simple audio playback utilities.

use common::GameResult;

/// Supported sound effect kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    /// Hook thrown up through the surface.
    Splash,
    /// A clean haul was scored.
    Catch,
    /// A hazard jammed the rod.
    Miss,
    /// The round ended.
    TimeUp,
}

/// Basic audio manager storing volume level.
#[derive(Debug)]
pub struct AudioManager {
    volume: u8,
}

impl AudioManager {
    /// Creates a new manager with the given volume (0-10).
    pub fn new(volume: u8) -> Self {
        Self {
            volume: volume.min(10),
        }
    }

    /// Sets the playback volume (0-10).
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(10);
    }

    /// Returns current volume.
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Plays the requested sound effect.
    pub fn play(&self, sound: Sound) -> GameResult<()> {
        println!("Play sound {:?} at volume {}", sound, self.volume);
        Ok(())
    }
}
