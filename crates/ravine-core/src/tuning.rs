use serde::{Deserialize, Serialize};

use crate::fixed::{FIXED_ONE, Fp};

/// Gravity applied per airborne frame.
pub const GRAVITY: Fp = FIXED_ONE / 2;
/// Initial upward velocity of a jump.
pub const JUMP_STRENGTH: Fp = FIXED_ONE * 5;
/// Horizontal speed cap outside dash frames.
pub const MAX_SPEED: Fp = FIXED_ONE * 3;
/// Horizontal acceleration per frame of held input.
pub const ACCELERATION: Fp = FIXED_ONE;
/// Deceleration per frame with no input while grounded.
pub const FRICTION: Fp = FIXED_ONE / 6;
/// Deceleration per frame with no input while airborne.
pub const AIR_FRICTION: Fp = FIXED_ONE / 4;
/// Dash velocity magnitude.
pub const DASH_SPEED: Fp = FIXED_ONE * 5;
/// Frames a dash lasts.
pub const DASH_FRAMES: i32 = 8;
/// Frames before another dash may trigger.
pub const DASH_COOLDOWN_FRAMES: i32 = 30;
/// Grace frames after walking off a ledge during which a jump still fires.
pub const COYOTE_TIME: i32 = 6;
/// Max upward pop when a dash clips a ledge corner.
pub const DASH_LEDGE_POP_HEIGHT: Fp = FIXED_ONE * 6;
/// Max sideways nudge when bonking a ceiling corner.
pub const BONK_NUDGE_RANGE: Fp = FIXED_ONE * 6;

/// Physics feel parameters, loadable from TOML.
///
/// Velocities and distances are 24.8 fixed-point units, durations are frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: Fp,
    pub jump_strength: Fp,
    pub max_speed: Fp,
    pub acceleration: Fp,
    pub friction: Fp,
    pub air_friction: Fp,
    pub dash_speed: Fp,
    pub dash_frames: i32,
    pub dash_cooldown_frames: i32,
    pub coyote_time: i32,
    pub dash_ledge_pop_height: Fp,
    pub bonk_nudge_range: Fp,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            friction: FRICTION,
            air_friction: AIR_FRICTION,
            dash_speed: DASH_SPEED,
            dash_frames: DASH_FRAMES,
            dash_cooldown_frames: DASH_COOLDOWN_FRAMES,
            coyote_time: COYOTE_TIME,
            dash_ledge_pop_height: DASH_LEDGE_POP_HEIGHT,
            bonk_nudge_range: BONK_NUDGE_RANGE,
        }
    }
}

impl Tuning {
    /// Load tuning from a TOML file. Falls back to defaults if the file is
    /// missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("RAVINE_PHYSICS_CONFIG")
            .unwrap_or_else(|_| "config/physics.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<Tuning>(&content) {
                Ok(tuning) => tuning,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Tuning::default()
                },
            },
            Err(_) => Tuning::default(),
        }
    }
}
