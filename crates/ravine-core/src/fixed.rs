//! 24.8 signed fixed-point conventions shared by all kinematic code.
//!
//! One unit is 1/256 of a pixel. Conversions use arithmetic shifts, never
//! division: `>>` floors toward negative infinity, so a slow leftward drift
//! lands on the pixel below the value, matching the hardware build.

/// Fixed-point scalar, 8 fractional bits.
pub type Fp = i32;

/// Number of fractional bits.
pub const FIXED_SHIFT: u32 = 8;

/// One pixel in fixed-point units (256).
pub const FIXED_ONE: Fp = 1 << FIXED_SHIFT;

/// Convert fixed-point to whole screen pixels (floor).
#[inline(always)]
pub const fn to_px(v: Fp) -> i32 {
    v >> FIXED_SHIFT
}

/// Convert whole pixels to fixed-point.
#[inline(always)]
pub const fn from_px(px: i32) -> Fp {
    px << FIXED_SHIFT
}
