//! Raw per-frame button bitmask.
//!
//! The caller polls the pad once per tick and hands the whole mask to
//! [`Player::update`](crate::player::Player::update); this module only fixes
//! the bit assignments and the rising-edge rule.

/// Per-frame input bitmask.
pub type Keys = u16;

/// Fixed bit assignments for the six buttons the core reads.
pub mod buttons {
    use super::Keys;

    pub const LEFT: Keys = 1 << 0;
    pub const RIGHT: Keys = 1 << 1;
    pub const UP: Keys = 1 << 2;
    pub const DOWN: Keys = 1 << 3;
    pub const JUMP: Keys = 1 << 4;
    pub const DASH: Keys = 1 << 5;
}

/// Bits set this frame that were not set last frame.
#[inline(always)]
pub const fn just_pressed(keys: Keys, prev_keys: Keys) -> Keys {
    keys & !prev_keys
}
