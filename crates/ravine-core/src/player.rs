use serde::{Deserialize, Serialize};

use crate::collision;
use crate::fixed::{FIXED_SHIFT, Fp, from_px};
use crate::input::{Keys, buttons, just_pressed};
use crate::level::Level;
use crate::tuning::Tuning;

/// Half the player's collision square, in pixels (16x16 bounding box).
pub const PLAYER_RADIUS: i32 = 8;

/// Number of slots in the dash trail ring buffer.
pub const TRAIL_LENGTH: usize = 10;

/// 181/256, a fixed-point approximation of 1/sqrt(2). Scaling both diagonal
/// dash components by it keeps diagonal dash speed equal to axis-aligned.
const DIAGONAL_SCALE: Fp = 181;

/// Off-world parking position for unused trail slots.
const TRAIL_OFFSCREEN: Fp = from_px(-1000);

/// Cosmetic position history recorded during a dash. The core only appends;
/// the renderer decides how to draw and fade it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashTrail {
    pub x: [Fp; TRAIL_LENGTH],
    pub y: [Fp; TRAIL_LENGTH],
    pub facing_right: [bool; TRAIL_LENGTH],
    index: usize,
    timer: i32,
    fade_timer: i32,
}

impl DashTrail {
    fn new(facing_right: bool) -> Self {
        Self {
            x: [TRAIL_OFFSCREEN; TRAIL_LENGTH],
            y: [TRAIL_OFFSCREEN; TRAIL_LENGTH],
            facing_right: [facing_right; TRAIL_LENGTH],
            index: 0,
            timer: 0,
            // Start fully faded
            fade_timer: (TRAIL_LENGTH * 2) as i32,
        }
    }

    /// Most recently written slot.
    pub fn head(&self) -> usize {
        self.index
    }

    /// Frames since the dash ended, saturating at `TRAIL_LENGTH * 2`.
    pub fn fade_frames(&self) -> i32 {
        self.fade_timer
    }

    fn begin_dash(&mut self) {
        self.fade_timer = 0;
        self.x = [TRAIL_OFFSCREEN; TRAIL_LENGTH];
        self.y = [TRAIL_OFFSCREEN; TRAIL_LENGTH];
    }

    fn end_dash(&mut self) {
        self.timer = 0;
        self.fade_timer = 0;
    }

    fn advance_fade(&mut self, dashing: i32) {
        if dashing == 0 && self.fade_timer < (TRAIL_LENGTH * 2) as i32 {
            self.fade_timer += 1;
        }
    }

    /// Record every 2nd frame while dashing, and briefly after the dash ends
    /// so the buffer fills out behind the player.
    fn maybe_record(&mut self, x: Fp, y: Fp, facing_right: bool, dashing: i32) {
        if dashing > 0 || self.fade_timer < 10 {
            self.timer += 1;
            if self.timer >= 2 {
                self.timer = 0;
                self.index = (self.index + 1) % TRAIL_LENGTH;
                self.x[self.index] = x;
                self.y[self.index] = y;
                self.facing_right[self.index] = facing_right;
            }
        }
    }
}

/// The player: fixed-point kinematics plus dash/jump/coyote state.
///
/// Position is the center of the collision square, in 24.8 world pixel
/// coordinates. One instance per playthrough, mutated in place once per
/// frame by [`Player::update`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: Fp,
    pub y: Fp,
    pub vx: Fp,
    pub vy: Fp,
    /// Recomputed every frame by the vertical sweep.
    pub on_ground: bool,
    /// Grace frames remaining for a post-ledge jump.
    pub coyote_time: i32,
    /// Dash frames remaining; 0 = not dashing.
    pub dashing: i32,
    /// Frames until another dash may trigger.
    pub dash_cooldown: i32,
    pub facing_right: bool,
    /// Last frame's input, for rising-edge detection.
    pub prev_keys: Keys,
    pub trail: DashTrail,
}

impl Player {
    /// Create a player at the level's spawn point.
    pub fn spawn(level: &Level) -> Self {
        Self {
            x: from_px(level.spawn_x),
            y: from_px(level.spawn_y),
            vx: 0,
            vy: 0,
            on_ground: false,
            coyote_time: 0,
            dashing: 0,
            dash_cooldown: 0,
            facing_right: true,
            prev_keys: 0,
            trail: DashTrail::new(true),
        }
    }

    /// Advance one frame: interpret input, integrate velocity, resolve
    /// collisions, and update dash/coyote bookkeeping.
    pub fn update(&mut self, keys: Keys, level: &Level, tuning: &Tuning) {
        let pressed = just_pressed(keys, self.prev_keys);

        if self.dash_cooldown > 0 {
            self.dash_cooldown -= 1;
        }

        // Dash trigger: edge-triggered, gated by cooldown
        if pressed & buttons::DASH != 0 && self.dash_cooldown == 0 && self.dashing == 0 {
            self.dashing = tuning.dash_frames;
            self.dash_cooldown = tuning.dash_cooldown_frames;
            self.trail.begin_dash();
            self.apply_dash_velocity(keys, tuning);
        }

        if self.dashing > 0 {
            self.dashing -= 1;
            if self.dashing == 0 {
                self.trail.end_dash();
            }
        }
        self.trail.advance_fade(self.dashing);

        // Horizontal control is suspended for the dash duration
        if self.dashing == 0 {
            if keys & buttons::LEFT != 0 {
                self.vx -= tuning.acceleration;
                if self.vx < -tuning.max_speed {
                    self.vx = -tuning.max_speed;
                }
                self.facing_right = false;
            } else if keys & buttons::RIGHT != 0 {
                self.vx += tuning.acceleration;
                if self.vx > tuning.max_speed {
                    self.vx = tuning.max_speed;
                }
                self.facing_right = true;
            } else {
                // Friction toward zero, never overshooting past it
                let friction = if self.on_ground {
                    tuning.friction
                } else {
                    tuning.air_friction
                };
                if self.vx > 0 {
                    self.vx = (self.vx - friction).max(0);
                } else if self.vx < 0 {
                    self.vx = (self.vx + friction).min(0);
                }
            }
        }

        // Jump: grounded or within the coyote window, edge-triggered
        if pressed & buttons::JUMP != 0 && (self.on_ground || self.coyote_time > 0) {
            self.vy = -tuning.jump_strength;
            self.on_ground = false;
            self.coyote_time = 0;
        }

        // Gravity, except on the ground and during a dash (the dash
        // trajectory is gravity-immune for its duration)
        if !self.on_ground && self.dashing == 0 {
            self.vy += tuning.gravity;
        }

        // Axis-separated sweeps, horizontal strictly first
        collision::sweep_horizontal(self, level, tuning);
        collision::sweep_vertical(self, level, tuning);

        if self.on_ground {
            self.coyote_time = tuning.coyote_time;
        } else if self.coyote_time > 0 {
            self.coyote_time -= 1;
        }

        self.trail
            .maybe_record(self.x, self.y, self.facing_right, self.dashing);

        self.prev_keys = keys;
    }

    /// Instantaneous dash velocity from the HELD directional bits (8-way),
    /// defaulting to the facing direction when none is held.
    fn apply_dash_velocity(&mut self, keys: Keys, tuning: &Tuning) {
        let mut dash_x = 0;
        let mut dash_y = 0;
        if keys & buttons::LEFT != 0 {
            dash_x = -1;
        }
        if keys & buttons::RIGHT != 0 {
            dash_x = 1;
        }
        if keys & buttons::UP != 0 {
            dash_y = -1;
        }
        if keys & buttons::DOWN != 0 {
            dash_y = 1;
        }

        if dash_x == 0 && dash_y == 0 {
            dash_x = if self.facing_right { 1 } else { -1 };
        }

        if dash_x != 0 && dash_y != 0 {
            self.vx = (dash_x * tuning.dash_speed * DIAGONAL_SCALE) >> FIXED_SHIFT;
            self.vy = (dash_y * tuning.dash_speed * DIAGONAL_SCALE) >> FIXED_SHIFT;
        } else {
            self.vx = dash_x * tuning.dash_speed;
            self.vy = dash_y * tuning.dash_speed;
        }
    }
}
