//! Axis-separated swept collision against the tile grid.
//!
//! Each sweep integrates one velocity component, then resolves the player's
//! 16x16 box against level bounds and solid tiles, mutating position,
//! velocity, and `on_ground` in place. Ties between multiple solid tiles are
//! broken by row-major scan order (top-to-bottom, left-to-right), not by
//! nearest distance: the scan stops at the first hit.

use crate::fixed::{FIXED_ONE, Fp, from_px, to_px};
use crate::level::{Level, TILE_SIZE};
use crate::player::{PLAYER_RADIUS, Player};
use crate::tuning::Tuning;

/// Whether the player box centered at the given screen position overlaps any
/// solid tile.
fn position_collides(level: &Level, screen_x: i32, screen_y: i32) -> bool {
    let tile_min_x = (screen_x - PLAYER_RADIUS) / TILE_SIZE;
    let tile_max_x = (screen_x + PLAYER_RADIUS) / TILE_SIZE;
    let tile_min_y = (screen_y - PLAYER_RADIUS) / TILE_SIZE;
    let tile_max_y = (screen_y + PLAYER_RADIUS) / TILE_SIZE;

    let player_left = screen_x - PLAYER_RADIUS;
    let player_right = screen_x + PLAYER_RADIUS;
    let player_top = screen_y - PLAYER_RADIUS;
    let player_bottom = screen_y + PLAYER_RADIUS;

    for ty in tile_min_y..=tile_max_y {
        for tx in tile_min_x..=tile_max_x {
            if !level.solid_at(tx, ty) {
                continue;
            }

            let tile_left = tx * TILE_SIZE;
            let tile_right = tile_left + TILE_SIZE;
            let tile_top = ty * TILE_SIZE;
            let tile_bottom = tile_top + TILE_SIZE;

            if player_right > tile_left
                && player_left < tile_right
                && player_bottom > tile_top
                && player_top < tile_bottom
            {
                return true;
            }
        }
    }

    false
}

/// Move the player by `vx` and resolve horizontally.
///
/// Level side bounds clamp position and zero `vx`. Otherwise the first solid
/// tile in scan order snaps the player flush against its near edge. While
/// dashing, a shallow clip of a ledge corner pops the player upward instead
/// of killing the dash (see `try_ledge_pop`).
pub fn sweep_horizontal(player: &mut Player, level: &Level, tuning: &Tuning) {
    player.x += player.vx;
    let screen_x = to_px(player.x);
    let screen_y = to_px(player.y);

    let level_width_px = level.width_px();
    if screen_x < PLAYER_RADIUS {
        player.x = from_px(PLAYER_RADIUS);
        player.vx = 0;
        return;
    }
    if screen_x > level_width_px - PLAYER_RADIUS {
        player.x = from_px(level_width_px - PLAYER_RADIUS);
        player.vx = 0;
        return;
    }

    let tile_min_x = (screen_x - PLAYER_RADIUS) / TILE_SIZE;
    let tile_max_x = (screen_x + PLAYER_RADIUS) / TILE_SIZE;
    let tile_min_y = (screen_y - PLAYER_RADIUS) / TILE_SIZE;
    let tile_max_y = (screen_y + PLAYER_RADIUS) / TILE_SIZE;

    let player_left = screen_x - PLAYER_RADIUS;
    let player_right = screen_x + PLAYER_RADIUS;
    let player_top = screen_y - PLAYER_RADIUS;
    let player_bottom = screen_y + PLAYER_RADIUS;

    for ty in tile_min_y..=tile_max_y {
        for tx in tile_min_x..=tile_max_x {
            if !level.solid_at(tx, ty) {
                continue;
            }

            let tile_left = tx * TILE_SIZE;
            let tile_right = tile_left + TILE_SIZE;
            let tile_top = ty * TILE_SIZE;
            let tile_bottom = tile_top + TILE_SIZE;

            if player_right > tile_left
                && player_left < tile_right
                && player_bottom > tile_top
                && player_top < tile_bottom
            {
                // Snap flush to the tile edge instead of reverting the move
                let snapped_x = if player.vx > 0 {
                    from_px(tile_left - PLAYER_RADIUS)
                } else {
                    from_px(tile_right + PLAYER_RADIUS)
                };

                let popped = player.dashing > 0
                    && try_ledge_pop(player, level, tuning, snapped_x, player_bottom, tile_top);

                player.x = snapped_x;
                if !popped {
                    player.vx = 0;
                }
                return;
            }
        }
    }
}

/// Dash ledge pop: if the vertical overlap with the colliding tile is small
/// enough and the lifted position is clear, raise the player over the corner
/// and keep the dash moving. Returns whether the pop happened.
fn try_ledge_pop(
    player: &mut Player,
    level: &Level,
    tuning: &Tuning,
    snapped_x: Fp,
    player_bottom: i32,
    tile_top: i32,
) -> bool {
    let required_pop_px = player_bottom - tile_top;
    let required_pop = from_px(required_pop_px);
    if required_pop_px <= 0 || required_pop > tuning.dash_ledge_pop_height {
        return false;
    }

    let new_y = player.y - required_pop;
    if position_collides(level, to_px(snapped_x), to_px(new_y)) {
        return false;
    }

    player.y = new_y;
    true
}

/// Move the player by `vy` and resolve vertically.
///
/// `on_ground` is recomputed from scratch every sweep: cleared up front, set
/// again only by landing on a tile or by the standing probe.
pub fn sweep_vertical(player: &mut Player, level: &Level, tuning: &Tuning) {
    player.y += player.vy;
    let screen_x = to_px(player.x);
    let screen_y = to_px(player.y);

    player.on_ground = false;

    if screen_y - PLAYER_RADIUS < 0 {
        player.y = from_px(PLAYER_RADIUS);
        player.vy = 0;
    } else if resolve_vertical_hit(player, level, tuning, screen_x, screen_y) {
        // Tile hit resolved; skip the standing probe this frame
        return;
    }

    probe_standing(player, level);
}

/// Scan the box at the new Y and resolve against the first solid tile.
/// Returns whether a hit was resolved.
fn resolve_vertical_hit(
    player: &mut Player,
    level: &Level,
    tuning: &Tuning,
    screen_x: i32,
    screen_y: i32,
) -> bool {
    let tile_min_x = (screen_x - PLAYER_RADIUS) / TILE_SIZE;
    let tile_max_x = (screen_x + PLAYER_RADIUS) / TILE_SIZE;
    let tile_min_y = (screen_y - PLAYER_RADIUS) / TILE_SIZE;
    let tile_max_y = (screen_y + PLAYER_RADIUS) / TILE_SIZE;

    let player_left = screen_x - PLAYER_RADIUS;
    let player_right = screen_x + PLAYER_RADIUS;
    let player_top = screen_y - PLAYER_RADIUS;
    let player_bottom = screen_y + PLAYER_RADIUS;

    for ty in tile_min_y..=tile_max_y {
        for tx in tile_min_x..=tile_max_x {
            if !level.solid_at(tx, ty) {
                continue;
            }

            let tile_left = tx * TILE_SIZE;
            let tile_right = tile_left + TILE_SIZE;
            let tile_top = ty * TILE_SIZE;
            let tile_bottom = tile_top + TILE_SIZE;

            if player_right > tile_left
                && player_left < tile_right
                && player_bottom > tile_top
                && player_top < tile_bottom
            {
                if player.vy > 0 {
                    // Moving down: land on the tile. Landing always
                    // interrupts a dash.
                    player.y = from_px(tile_top - PLAYER_RADIUS);
                    player.vy = 0;
                    player.on_ground = true;
                    if player.dashing > 0 {
                        player.dashing = 0;
                    }
                } else {
                    ceiling_bonk(player, level, tuning, screen_y, tile_bottom);
                }
                return true;
            }
        }
    }

    false
}

/// Ceiling corner correction: nudge X by growing offsets in both directions;
/// apply a nudge only when exactly one side clears. Ambiguous cases (both
/// clear or both blocked) fall through to a hard snap under the tile.
fn ceiling_bonk(player: &mut Player, level: &Level, tuning: &Tuning, screen_y: i32, tile_bottom: i32) {
    let original_x = player.x;
    let mut nudge = FIXED_ONE;

    while nudge <= tuning.bonk_nudge_range {
        let right_x = original_x + nudge;
        let clear_right = !position_collides(level, to_px(right_x), screen_y);

        let left_x = original_x - nudge;
        let clear_left = !position_collides(level, to_px(left_x), screen_y);

        if clear_right ^ clear_left {
            player.x = if clear_right { right_x } else { left_x };
            return;
        }

        nudge += FIXED_ONE;
    }

    player.x = original_x;
    player.y = from_px(tile_bottom + PLAYER_RADIUS);
    player.vy = 0;
}

/// Standing re-detection: with no tile hit this sweep, check only the tile
/// row under the feet. Within 1px of a solid tile top counts as grounded,
/// without moving the player. This catches walking to the exact edge of a
/// platform, where integer rounding would otherwise flicker `on_ground`.
fn probe_standing(player: &mut Player, level: &Level) {
    if player.on_ground || player.vy < 0 {
        return;
    }

    let screen_x = to_px(player.x);
    let screen_y = to_px(player.y);
    let player_bottom = screen_y + PLAYER_RADIUS;
    let player_left = screen_x - PLAYER_RADIUS;
    let player_right = screen_x + PLAYER_RADIUS;
    let feet_y = (player_bottom + 1) / TILE_SIZE;
    let tile_min_x = (screen_x - PLAYER_RADIUS) / TILE_SIZE;
    let tile_max_x = (screen_x + PLAYER_RADIUS) / TILE_SIZE;

    for tx in tile_min_x..=tile_max_x {
        if !level.solid_at(tx, feet_y) {
            continue;
        }
        let tile_top = feet_y * TILE_SIZE;
        let tile_left = tx * TILE_SIZE;
        let tile_right = tile_left + TILE_SIZE;
        if player_right > tile_left
            && player_left < tile_right
            && player_bottom >= tile_top - 1
            && player_bottom <= tile_top + 1
        {
            player.on_ground = true;
            break;
        }
    }
}
