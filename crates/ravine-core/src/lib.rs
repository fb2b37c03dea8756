//! Player physics and tile-collision core for Ravine.
//!
//! Everything is deterministic 24.8 fixed-point arithmetic, advanced one
//! frame per call by an external vsync-locked loop. The crate owns the
//! player state machine (run, jump, coyote time, 8-way dash), the
//! axis-separated swept collision against a tile grid (with ledge-pop and
//! ceiling corner correction), and the dead-zone follow camera. Rendering,
//! level assets, and input polling live with the callers.

pub mod camera;
pub mod collision;
pub mod fixed;
pub mod input;
pub mod level;
pub mod player;
pub mod tuning;

use serde::{Deserialize, Serialize};

pub use camera::Camera;
pub use input::Keys;
pub use level::{Level, SolidityPolicy, TileId};
pub use player::Player;
pub use tuning::Tuning;

/// One playthrough: a level with the player/camera pair that lives for its
/// duration. Exclusively owns its state; simulating several playthroughs in
/// parallel just means several `Session` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    level: Level,
    pub player: Player,
    pub camera: Camera,
    tuning: Tuning,
}

impl Session {
    /// Start a playthrough with default tuning, spawning the player at the
    /// level's spawn point.
    pub fn new(level: Level) -> Self {
        Self::with_tuning(level, Tuning::default())
    }

    pub fn with_tuning(level: Level, tuning: Tuning) -> Self {
        let player = Player::spawn(&level);
        tracing::debug!(
            width = level.width,
            height = level.height,
            "Session started"
        );
        Self {
            level,
            player,
            camera: Camera::default(),
            tuning,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Advance one frame: interpret the input bitmask, run the player state
    /// machine and collision sweeps, then follow with the camera. Called
    /// once per vsync tick; runs to completion synchronously.
    pub fn tick(&mut self, keys: Keys) {
        self.player.update(keys, &self.level, &self.tuning);
        self.camera.update(&self.player, &self.level);
    }
}
