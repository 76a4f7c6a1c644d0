//! Dense XY sample lattice centered on the origin
//!
//! The lattice has `granularity` samples per tile along each axis, so tile
//! boundaries always fall between whole lattice rows/columns. X varies along
//! columns and Y along rows. Both axes include their end points, which sit at
//! `±tiles · tile_size / 2`.

use super::array::Grid;
use crate::error::ConfigError;

/// `n` evenly spaced samples from `start` to `stop`, both included.
///
/// Sample `i` is `start + i * step`; the last sample is exactly `stop`.
/// One sample yields `[start]`, zero samples an empty vector.
pub fn linspace(start: f32, stop: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f32;
            let mut samples: Vec<f32> = (0..n).map(|i| start + i as f32 * step).collect();
            samples[n - 1] = stop;
            samples
        }
    }
}

/// Lattice `(rows, cols)` for a `tiles_x × tiles_y` map.
///
/// Returns `None` if the row count, column count or total sample count
/// overflows `usize`.
pub fn lattice_shape(
    tiles_x: usize,
    tiles_y: usize,
    granularity: usize,
) -> Option<(usize, usize)> {
    let rows = tiles_y.checked_mul(granularity)?;
    let cols = tiles_x.checked_mul(granularity)?;
    rows.checked_mul(cols)?;
    Some((rows, cols))
}

/// XY sample positions for a `tiles_x × tiles_y` map
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    tiles_x: usize,
    tiles_y: usize,
    granularity: usize,
    tile_size: f32,
    x: Grid<f32>,
    y: Grid<f32>,
}

impl Lattice {
    /// Build the lattice.
    ///
    /// # Errors
    /// Returns `ConfigError` if `granularity` is zero or makes the sample
    /// count overflow, if either tile count is zero, or if `tile_size` is not
    /// finite and positive.
    pub fn new(
        tiles_x: usize,
        tiles_y: usize,
        granularity: usize,
        tile_size: f32,
    ) -> Result<Self, ConfigError> {
        if granularity == 0 {
            return Err(ConfigError::InvalidGranularity(granularity));
        }
        if tiles_x == 0 || tiles_y == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: Some(tiles_x),
                height: Some(tiles_y),
            });
        }
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(ConfigError::InvalidTileSize(tile_size));
        }

        let (rows, cols) = lattice_shape(tiles_x, tiles_y, granularity)
            .ok_or(ConfigError::InvalidGranularity(granularity))?;
        let half_x = tiles_x as f32 * tile_size / 2.0;
        let half_y = tiles_y as f32 * tile_size / 2.0;

        let xs = linspace(-half_x, half_x, cols);
        let ys = linspace(-half_y, half_y, rows);

        let x = Grid::from_fn(rows, cols, |_, col| xs[col]);
        let y = Grid::from_fn(rows, cols, |row, _| ys[row]);

        Ok(Self {
            tiles_x,
            tiles_y,
            granularity,
            tile_size,
            x,
            y,
        })
    }

    /// Map `(tile_row, tile_col, local_row, local_col)` to `(lattice_row, lattice_col)`
    #[inline]
    pub fn lattice_index(
        &self,
        tile_row: usize,
        tile_col: usize,
        local_row: usize,
        local_col: usize,
    ) -> (usize, usize) {
        lattice_index(self.granularity, tile_row, tile_col, local_row, local_col)
    }

    /// Lattice rows (`tiles_y · granularity`)
    pub fn rows(&self) -> usize {
        self.x.rows()
    }

    /// Lattice columns (`tiles_x · granularity`)
    pub fn cols(&self) -> usize {
        self.x.cols()
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    /// Tiles along X
    pub fn tiles_x(&self) -> usize {
        self.tiles_x
    }

    /// Tiles along Y
    pub fn tiles_y(&self) -> usize {
        self.tiles_y
    }

    /// Samples per tile per axis
    pub fn granularity(&self) -> usize {
        self.granularity
    }

    /// Physical size of one tile
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// X coordinate of every sample
    pub fn x(&self) -> &Grid<f32> {
        &self.x
    }

    /// Y coordinate of every sample
    pub fn y(&self) -> &Grid<f32> {
        &self.y
    }

    /// Consume the lattice, returning the X and Y arrays
    pub fn into_xy(self) -> (Grid<f32>, Grid<f32>) {
        (self.x, self.y)
    }
}

/// Tile-major to row-major index transform.
///
/// `lattice_row = tile_row · g + local_row`, `lattice_col = tile_col · g + local_col`.
#[inline]
pub fn lattice_index(
    granularity: usize,
    tile_row: usize,
    tile_col: usize,
    local_row: usize,
    local_col: usize,
) -> (usize, usize) {
    debug_assert!(local_row < granularity && local_col < granularity);
    (
        tile_row * granularity + local_row,
        tile_col * granularity + local_col,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints() {
        assert_eq!(linspace(0.0, 4.0, 3), vec![0.0, 2.0, 4.0]);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());

        let samples = linspace(-0.3, 0.7, 7);
        assert_eq!(samples[0], -0.3);
        assert_eq!(samples[6], 0.7);
    }

    #[test]
    fn test_lattice_is_centered() {
        let lattice = Lattice::new(4, 2, 5, 10.0).unwrap();

        assert_eq!(lattice.shape(), (10, 20));
        assert_eq!(lattice.x()[(0, 0)], -20.0);
        assert_eq!(lattice.x()[(0, 19)], 20.0);
        assert_eq!(lattice.y()[(0, 0)], -10.0);
        assert_eq!(lattice.y()[(9, 0)], 10.0);

        // X constant down a column, Y constant along a row
        assert!(lattice.x().column(7).all(|&v| v == lattice.x()[(0, 7)]));
        assert!(lattice.y().row(3).iter().all(|&v| v == lattice.y()[(3, 0)]));

        let step = lattice.x()[(0, 1)] - lattice.x()[(0, 0)];
        assert_relative_eq!(step, 40.0 / 19.0, epsilon = 1e-5);
    }

    #[test]
    fn test_lattice_index_transform() {
        let lattice = Lattice::new(3, 2, 4, 1.0).unwrap();
        assert_eq!(lattice.lattice_index(0, 0, 0, 0), (0, 0));
        assert_eq!(lattice.lattice_index(1, 2, 3, 1), (7, 9));
    }

    #[test]
    fn test_invalid_lattice_rejected() {
        assert_eq!(
            Lattice::new(2, 2, 0, 10.0),
            Err(ConfigError::InvalidGranularity(0))
        );
        assert!(matches!(
            Lattice::new(0, 2, 3, 10.0),
            Err(ConfigError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Lattice::new(2, 2, 3, f32::NAN),
            Err(ConfigError::InvalidTileSize(_))
        ));
    }

    #[test]
    fn test_oversized_granularity_rejected() {
        assert_eq!(
            Lattice::new(2, 2, usize::MAX, 10.0),
            Err(ConfigError::InvalidGranularity(usize::MAX))
        );
        // Each axis fits, but the sample count does not
        assert_eq!(lattice_shape(1, 1, usize::MAX), None);
        assert_eq!(lattice_shape(3, 2, 4), Some((8, 12)));
    }
}
