//! Slippy-map tile coordinates.
//!
//! A tile is identified by `(zoom, x, y)` per the standard web-map tiling
//! scheme: `x` is the column (increases eastward), `y` is the row (increases
//! southward). The coordinate doubles as the join key when pairing two tile
//! directories, so its ordering matters: `Ord` is derived over `(z, x, y)`
//! and every consumer that needs a deterministic tile order sorts with it.

use std::fmt;

/// Maximum zoom level accepted for a tile directory component.
pub const MAX_ZOOM: u8 = 22;

/// A slippy-map tile coordinate.
///
/// Field order is significant: the derived `Ord` compares `z`, then `x`,
/// then `y`, which is the total order the paired dataset relies on for its
/// alignment invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileCoord {
    /// Zoom level (0 to 22)
    pub z: u8,
    /// Tile column (X coordinate, increases eastward)
    pub x: u32,
    /// Tile row (Y coordinate, increases southward)
    pub y: u32,
}

impl TileCoord {
    /// Creates a tile coordinate.
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}
