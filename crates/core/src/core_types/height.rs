//! Per-tile elevation bounds.

use serde::{Deserialize, Serialize};

/// Top and bottom of the ramp built inside one tile.
///
/// Invariant (enforced by the decoder): `0 <= z_bottom <= z_top`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeightPair {
    /// Elevation at the high end of the ramp
    pub z_top: f32,
    /// Base elevation of the tile
    pub z_bottom: f32,
}

impl HeightPair {
    /// Create a height pair
    pub const fn new(z_top: f32, z_bottom: f32) -> Self {
        Self { z_top, z_bottom }
    }

    /// Flat tile at a single elevation
    pub const fn flat(z: f32) -> Self {
        Self {
            z_top: z,
            z_bottom: z,
        }
    }

    /// Whether the tile has no ramp
    pub fn is_flat(&self) -> bool {
        self.z_top == self.z_bottom
    }

    /// 2×2 corner block `[corner_row][corner_col]` interpolated inside the
    /// tile. The two-height model rises from `z_bottom` on the tile's low-X
    /// edge to `z_top` on its high-X edge; diagonal corners are not
    /// independent.
    pub fn corners(&self) -> [[f32; 2]; 2] {
        [
            [self.z_bottom, self.z_top],
            [self.z_bottom, self.z_top],
        ]
    }
}
