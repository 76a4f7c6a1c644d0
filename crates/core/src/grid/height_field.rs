//! Dense height field built from per-tile height pairs
//!
//! Each tile is expanded into a `granularity × granularity` block by two
//! linear passes over its 2×2 corner block: first along the tile's local
//! columns (once per corner row), then along its local rows between the
//! first-pass results. Tiles never read their neighbours, so the field is
//! continuous across a tile border only where the two tiles' edge values
//! agree. Steps between tiles are cliffs, not artifacts.
//!
//! Blocks are written into the row-major field through the explicit
//! `lattice_index` transform rather than by reshaping tile-major storage.

use super::array::Grid;
use super::lattice::{lattice_index, lattice_shape, linspace};
use crate::core_types::HeightPair;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Elevation at every lattice sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightField {
    z: Grid<f32>,
    min_elevation: f32,
    max_elevation: f32,
}

impl HeightField {
    /// Wrap an elevation grid, recording its range
    pub fn from_grid(z: Grid<f32>) -> Self {
        let (min_elevation, max_elevation) = z
            .as_slice()
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        Self {
            z,
            min_elevation,
            max_elevation,
        }
    }

    /// Elevation grid
    pub fn z(&self) -> &Grid<f32> {
        &self.z
    }

    /// Consume the field, returning the elevation grid
    pub fn into_grid(self) -> Grid<f32> {
        self.z
    }

    /// `(rows, cols)`, equal to the lattice shape
    pub fn shape(&self) -> (usize, usize) {
        self.z.shape()
    }

    /// Elevation at lattice sample `(row, col)`
    #[inline]
    pub fn elevation_at(&self, row: usize, col: usize) -> f32 {
        self.z[(row, col)]
    }

    /// Lowest elevation in the field
    pub fn min_elevation(&self) -> f32 {
        self.min_elevation
    }

    /// Highest elevation in the field
    pub fn max_elevation(&self) -> f32 {
        self.max_elevation
    }
}

/// Expands coarse tile heights into a dense field
#[derive(Debug, Clone, Copy)]
pub struct HeightFieldBuilder {
    granularity: usize,
}

impl HeightFieldBuilder {
    /// Create a builder producing `granularity` samples per tile per axis.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidGranularity` if `granularity` is zero.
    pub fn new(granularity: usize) -> Result<Self, ConfigError> {
        if granularity == 0 {
            return Err(ConfigError::InvalidGranularity(granularity));
        }
        Ok(Self { granularity })
    }

    /// Samples per tile per axis
    pub fn granularity(&self) -> usize {
        self.granularity
    }

    /// Build the field for an `H × W` grid of height pairs.
    ///
    /// The result has shape `(H · granularity, W · granularity)`.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidGranularity` if the sample count
    /// overflows.
    pub fn build(&self, tiles: &Grid<HeightPair>) -> Result<HeightField, ConfigError> {
        self.build_from_corners(&tiles.map(HeightPair::corners))
    }

    /// Build the field from explicit 2×2 corner blocks, one per tile
    /// (`[corner_row][corner_col]`).
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidGranularity` if the sample count
    /// overflows.
    pub fn build_from_corners(
        &self,
        corners: &Grid<[[f32; 2]; 2]>,
    ) -> Result<HeightField, ConfigError> {
        let g = self.granularity;
        let (tile_rows, tile_cols) = corners.shape();
        let (rows, cols) =
            lattice_shape(tile_cols, tile_rows, g).ok_or(ConfigError::InvalidGranularity(g))?;
        let mut z = Grid::filled(rows, cols, 0.0_f32);

        for tile_row in 0..tile_rows {
            for tile_col in 0..tile_cols {
                let block = interpolate_tile(&corners[(tile_row, tile_col)], g);
                for local_row in 0..g {
                    for local_col in 0..g {
                        let idx = lattice_index(g, tile_row, tile_col, local_row, local_col);
                        z[idx] = block[(local_row, local_col)];
                    }
                }
            }
        }

        debug!(
            tiles = tile_rows * tile_cols,
            rows = z.rows(),
            cols = z.cols(),
            "Built height field"
        );

        Ok(HeightField::from_grid(z))
    }
}

/// Two-pass interpolation of one tile's corner block into a `g × g` block
fn interpolate_tile(corners: &[[f32; 2]; 2], g: usize) -> Grid<f32> {
    // Pass 1: along local columns, one ramp per corner row
    let top_edge = linspace(corners[0][0], corners[0][1], g);
    let bottom_edge = linspace(corners[1][0], corners[1][1], g);

    // Pass 2: along local rows, between the pass-1 ramps
    let mut block = Grid::filled(g, g, 0.0_f32);
    for local_col in 0..g {
        let column = linspace(top_edge[local_col], bottom_edge[local_col], g);
        for (local_row, value) in column.into_iter().enumerate() {
            block[(local_row, local_col)] = value;
        }
    }
    block
}
