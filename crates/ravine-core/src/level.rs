use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Tile identifier as stored in level data. Id 0 is always empty air.
pub type TileId = u16;

/// The empty/out-of-bounds sentinel id.
pub const EMPTY_TILE: TileId = 0;

/// Tile edge length in pixels.
pub const TILE_SIZE: i32 = 8;

/// Decides which tile ids collide.
///
/// Early levels use a plain id-range rule; later levels ship an explicit
/// per-id collision bitmap because their id space is sparse. Both are total:
/// any id, including ones past the bitmap, has an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolidityPolicy {
    /// Ids in `min..=max` are solid.
    Threshold { min: TileId, max: TileId },
    /// One bit per id, LSB-first within each byte. Ids past the end are air.
    Bitmap(Vec<u8>),
}

impl SolidityPolicy {
    pub fn is_solid(&self, id: TileId) -> bool {
        if id == EMPTY_TILE {
            return false;
        }
        match self {
            SolidityPolicy::Threshold { min, max } => id >= *min && id <= *max,
            SolidityPolicy::Bitmap(bits) => {
                let byte = (id / 8) as usize;
                let bit = id % 8;
                bits.get(byte).is_some_and(|b| b & (1 << bit) != 0)
            },
        }
    }
}

/// An immutable tile grid with a spawn point and a solidity policy.
///
/// Tile (0,0) is the top-left corner; coordinates grow right and down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Tile data stored row-major (y * width + x).
    pub tiles: Vec<TileId>,
    /// Player spawn X in pixels.
    pub spawn_x: i32,
    /// Player spawn Y in pixels.
    pub spawn_y: i32,
    pub solidity: SolidityPolicy,
}

impl Level {
    /// Tile id at the given tile coordinates. Out of bounds reads as empty,
    /// so the collision scan never branches on an error case.
    pub fn tile_at(&self, x: i32, y: i32) -> TileId {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return EMPTY_TILE;
        }
        self.tiles[y as usize * self.width as usize + x as usize]
    }

    pub fn is_solid(&self, id: TileId) -> bool {
        self.solidity.is_solid(id)
    }

    /// Whether the tile at the given coordinates collides.
    pub fn solid_at(&self, x: i32, y: i32) -> bool {
        self.is_solid(self.tile_at(x, y))
    }

    /// Level width in pixels.
    pub fn width_px(&self) -> i32 {
        self.width as i32 * TILE_SIZE
    }

    /// Level height in pixels.
    pub fn height_px(&self) -> i32 {
        self.height as i32 * TILE_SIZE
    }

    fn set_tile(&mut self, x: u32, y: u32, id: TileId) {
        if x < self.width && y < self.height {
            self.tiles[y as usize * self.width as usize + x as usize] = id;
        }
    }
}

/// Chunk width in tiles (each procedural section is this wide).
const CHUNK_WIDTH: u32 = 10;
/// Generated level height in tiles.
const LEVEL_HEIGHT: u32 = 20;
/// Number of chunks in a generated level.
const NUM_CHUNKS: u32 = 10;
/// Solid tile id used by the generator.
const SOLID: TileId = 1;

/// Generate a deterministic playfield from a seed: a solid floor along the
/// bottom, then per-chunk features (pits, raised platforms, staircases,
/// walls with a gap). Used by demos and tests; real levels come from the
/// asset pipeline.
pub fn generate_level(seed: u64) -> Level {
    let width = CHUNK_WIDTH * NUM_CHUNKS;
    let height = LEVEL_HEIGHT;
    let floor_y = height - 2;
    let mut level = Level {
        width,
        height,
        tiles: vec![EMPTY_TILE; (width * height) as usize],
        spawn_x: 3 * TILE_SIZE,
        spawn_y: (floor_y as i32 - 2) * TILE_SIZE,
        solidity: SolidityPolicy::Threshold { min: 1, max: 55 },
    };

    let mut rng = StdRng::seed_from_u64(seed);

    // Solid floor (bottom two rows)
    for x in 0..width {
        level.set_tile(x, floor_y, SOLID);
        level.set_tile(x, floor_y + 1, SOLID);
    }

    for chunk_idx in 1..NUM_CHUNKS {
        let base_x = chunk_idx * CHUNK_WIDTH;
        generate_chunk(&mut level, &mut rng, base_x, floor_y);
    }

    level
}

fn generate_chunk(level: &mut Level, rng: &mut StdRng, base_x: u32, floor_y: u32) {
    let pattern = rng.random_range(0u8..4);

    match pattern {
        0 => {
            // Pit in the floor
            let pit_start = base_x + rng.random_range(3..7);
            let pit_width = rng.random_range(2..4);
            for x in pit_start..pit_start + pit_width {
                level.set_tile(x, floor_y, EMPTY_TILE);
                level.set_tile(x, floor_y + 1, EMPTY_TILE);
            }
        },
        1 => {
            // Raised platform
            let plat_y = floor_y - rng.random_range(3u32..6);
            let plat_start = base_x + rng.random_range(1..4);
            let plat_len = rng.random_range(3..6);
            for x in plat_start..plat_start + plat_len {
                level.set_tile(x, plat_y, SOLID);
            }
        },
        2 => {
            // Staircase going up from the floor
            for i in 0..4u32 {
                let x = base_x + i * 2;
                let y = floor_y - 1 - i;
                level.set_tile(x, y, SOLID);
                level.set_tile(x + 1, y, SOLID);
            }
        },
        _ => {
            // Wall with a two-tile gap
            let wall_x = base_x + CHUNK_WIDTH / 2;
            let gap_y = floor_y - rng.random_range(3u32..6);
            for y in (floor_y - 8)..floor_y {
                if y != gap_y && y != gap_y + 1 {
                    level.set_tile(wall_x, y, SOLID);
                }
            }
        },
    }
}
