use serde::{Deserialize, Serialize};

use crate::fixed::to_px;
use crate::level::Level;
use crate::player::Player;

/// Display width in pixels.
pub const SCREEN_WIDTH: i32 = 240;
/// Display height in pixels.
pub const SCREEN_HEIGHT: i32 = 160;

/// Scroll offset in whole pixels. No fixed-point: the value feeds straight
/// into background scroll registers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
}

impl Camera {
    /// Dead-zone follow: while the player stays within the middle third of
    /// the screen on an axis, the camera holds still; outside it, the camera
    /// shifts by exactly the excess so the player lands back on the dead-zone
    /// boundary rather than the center (recentering would jitter).
    pub fn update(&mut self, player: &Player, level: &Level) {
        let player_screen_x = to_px(player.x) - self.x;
        let player_screen_y = to_px(player.y) - self.y;

        let dead_zone_left = SCREEN_WIDTH / 3;
        let dead_zone_right = 2 * SCREEN_WIDTH / 3;
        if player_screen_x < dead_zone_left {
            self.x += player_screen_x - dead_zone_left;
        } else if player_screen_x > dead_zone_right {
            self.x += player_screen_x - dead_zone_right;
        }

        let dead_zone_top = SCREEN_HEIGHT / 3;
        let dead_zone_bottom = 2 * SCREEN_HEIGHT / 3;
        if player_screen_y < dead_zone_top {
            self.y += player_screen_y - dead_zone_top;
        } else if player_screen_y > dead_zone_bottom {
            self.y += player_screen_y - dead_zone_bottom;
        }

        // Clamp to level bounds; a level smaller than the screen pins the
        // camera at the origin
        let max_x = (level.width_px() - SCREEN_WIDTH).max(0);
        let max_y = (level.height_px() - SCREEN_HEIGHT).max(0);
        self.x = self.x.clamp(0, max_x);
        self.y = self.y.clamp(0, max_y);
    }
}
