//! Side skirts and bottom cap closing the terrain into a volume
//!
//! Every skirt vertex on the terrain edge is copied from the top surface, never
//! recomputed, so the seams match bit for bit. Row/column order of each piece
//! is chosen so its triangulation faces away from the enclosed volume:
//!
//! | Piece            | Top-surface edge | Faces |
//! |------------------|------------------|-------|
//! | `skirt_south`    | first row        | -Y    |
//! | `skirt_north`    | last row         | +Y    |
//! | `skirt_west`     | first column     | -X    |
//! | `skirt_east`     | last column      | +X    |
//! | `bottom_surface` | four corners     | -Z    |

use super::surface::StructuredSurface;
use crate::core_types::Vec3;
use crate::error::DegenerateLatticeError;
use tracing::debug;

/// Name of the bottom cap
pub const BOTTOM_SURFACE: &str = "bottom_surface";

/// One side of the lattice boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// First lattice row (lowest Y)
    South,
    /// Last lattice row (highest Y)
    North,
    /// First lattice column (lowest X)
    West,
    /// Last lattice column (highest X)
    East,
}

impl Side {
    /// All sides in scene order
    pub const ALL: [Side; 4] = [Side::South, Side::North, Side::West, Side::East];

    /// Surface name of this side's skirt
    pub fn skirt_name(self) -> &'static str {
        match self {
            Side::South => "skirt_south",
            Side::North => "skirt_north",
            Side::West => "skirt_west",
            Side::East => "skirt_east",
        }
    }
}

/// Builds skirts and the bottom cap down to a fixed elevation
#[derive(Debug, Clone, Copy)]
pub struct ClosureBuilder {
    down: f32,
}

impl ClosureBuilder {
    /// Close surfaces down to elevation `down`
    pub fn new(down: f32) -> Self {
        Self { down }
    }

    /// Base elevation of skirts and bottom cap
    pub fn down(&self) -> f32 {
        self.down
    }

    /// Bottom cap followed by the four skirts (south, north, west, east).
    ///
    /// # Errors
    /// Returns `DegenerateLatticeError` if the top surface has fewer than two
    /// samples along either axis.
    pub fn build(
        &self,
        top: &StructuredSurface,
    ) -> Result<Vec<StructuredSurface>, DegenerateLatticeError> {
        check_closable(top)?;

        let mut pieces = Vec::with_capacity(5);
        pieces.push(self.bottom(top)?);
        for side in Side::ALL {
            pieces.push(self.skirt(top, side)?);
        }

        debug!(down = self.down, pieces = pieces.len(), "Closed top surface");
        Ok(pieces)
    }

    /// Vertical strip joining one boundary edge to the base elevation.
    ///
    /// # Errors
    /// Returns `DegenerateLatticeError` for a lattice thinner than 2×2.
    pub fn skirt(
        &self,
        top: &StructuredSurface,
        side: Side,
    ) -> Result<StructuredSurface, DegenerateLatticeError> {
        check_closable(top)?;

        let (rows, cols) = top.shape();
        let down = self.down;
        let dropped = |p: Vec3| Vec3::new(p.x, p.y, down);

        let skirt = match side {
            // 2 × cols; row 0 at the base so the strip faces -Y
            Side::South => StructuredSurface::from_fn(side.skirt_name(), 2, cols, |r, c| {
                let p = top.vertex(0, c);
                if r == 0 {
                    dropped(p)
                } else {
                    p
                }
            }),
            // 2 × cols; row 0 on the terrain so the strip faces +Y
            Side::North => StructuredSurface::from_fn(side.skirt_name(), 2, cols, |r, c| {
                let p = top.vertex(rows - 1, c);
                if r == 0 {
                    p
                } else {
                    dropped(p)
                }
            }),
            // rows × 2; column 0 at the base so the strip faces -X
            Side::West => StructuredSurface::from_fn(side.skirt_name(), rows, 2, |r, c| {
                let p = top.vertex(r, 0);
                if c == 0 {
                    dropped(p)
                } else {
                    p
                }
            }),
            // rows × 2; column 0 on the terrain so the strip faces +X
            Side::East => StructuredSurface::from_fn(side.skirt_name(), rows, 2, |r, c| {
                let p = top.vertex(r, cols - 1);
                if c == 0 {
                    p
                } else {
                    dropped(p)
                }
            }),
        };

        Ok(skirt)
    }

    /// Flat 2×2 cap under the four outer corners, facing -Z.
    ///
    /// # Errors
    /// Returns `DegenerateLatticeError` for a lattice thinner than 2×2.
    pub fn bottom(
        &self,
        top: &StructuredSurface,
    ) -> Result<StructuredSurface, DegenerateLatticeError> {
        check_closable(top)?;

        let (rows, cols) = top.shape();
        let down = self.down;
        // Columns run from high X to low X, rows from low Y to high Y
        let corner = |r: usize, c: usize| {
            let src_row = if r == 0 { 0 } else { rows - 1 };
            let src_col = if c == 0 { cols - 1 } else { 0 };
            let p = top.vertex(src_row, src_col);
            Vec3::new(p.x, p.y, down)
        };

        Ok(StructuredSurface::from_fn(BOTTOM_SURFACE, 2, 2, corner))
    }
}

fn check_closable(top: &StructuredSurface) -> Result<(), DegenerateLatticeError> {
    let (rows, cols) = top.shape();
    if rows < 2 || cols < 2 {
        return Err(DegenerateLatticeError { rows, cols });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn sloped_top(rows: usize, cols: usize) -> StructuredSurface {
        StructuredSurface::from_fn("top_surface", rows, cols, |r, c| {
            let z = 0.1 * (r * cols + c) as f32 + 0.05;
            Vec3::new(c as f32 * 0.7 - 3.1, r as f32 * 1.3 - 2.2, z)
        })
    }

    #[test]
    fn test_skirt_shapes() {
        let top = sloped_top(4, 6);
        let closure = ClosureBuilder::new(-10.0);

        assert_eq!(closure.skirt(&top, Side::South).unwrap().shape(), (2, 6));
        assert_eq!(closure.skirt(&top, Side::North).unwrap().shape(), (2, 6));
        assert_eq!(closure.skirt(&top, Side::West).unwrap().shape(), (4, 2));
        assert_eq!(closure.skirt(&top, Side::East).unwrap().shape(), (4, 2));
    }

    #[test]
    fn test_skirt_top_edge_matches_surface_exactly() {
        let top = sloped_top(5, 7);
        let closure = ClosureBuilder::new(-10.0);

        let south = closure.skirt(&top, Side::South).unwrap();
        let north = closure.skirt(&top, Side::North).unwrap();
        for c in 0..7 {
            assert_eq!(south.vertex(1, c), top.vertex(0, c));
            assert_eq!(north.vertex(0, c), top.vertex(4, c));
            assert_eq!(south.vertex(0, c).z, -10.0);
            assert_eq!(north.vertex(1, c).z, -10.0);
        }

        let west = closure.skirt(&top, Side::West).unwrap();
        let east = closure.skirt(&top, Side::East).unwrap();
        for r in 0..5 {
            assert_eq!(west.vertex(r, 1), top.vertex(r, 0));
            assert_eq!(east.vertex(r, 0), top.vertex(r, 6));
            assert_eq!(west.vertex(r, 0).z, -10.0);
            assert_eq!(east.vertex(r, 1).z, -10.0);
        }
    }

    #[test]
    fn test_skirt_base_keeps_horizontal_position() {
        let top = sloped_top(3, 3);
        let south = ClosureBuilder::new(-4.0).skirt(&top, Side::South).unwrap();
        for c in 0..3 {
            assert_eq!(south.x()[(0, c)], top.x()[(0, c)]);
            assert_eq!(south.y()[(0, c)], top.y()[(0, c)]);
        }
    }

    #[test]
    fn test_bottom_cap_corners() {
        let top = sloped_top(3, 4);
        let bottom = ClosureBuilder::new(-10.0).bottom(&top).unwrap();

        assert_eq!(bottom.name(), BOTTOM_SURFACE);
        assert_eq!(bottom.shape(), (2, 2));
        assert!(bottom.z().as_slice().iter().all(|&z| z == -10.0));

        let mut xs: Vec<f32> = bottom.x().as_slice().to_vec();
        xs.sort_by(f32::total_cmp);
        assert_eq!(xs, vec![top.x()[(0, 0)], top.x()[(0, 0)], top.x()[(0, 3)], top.x()[(0, 3)]]);
    }

    #[test]
    fn test_pieces_face_outward() {
        let top = sloped_top(3, 3);
        let closure = ClosureBuilder::new(-10.0);

        let expect = [
            (Side::South, Vec3::new(0.0, -1.0, 0.0)),
            (Side::North, Vec3::new(0.0, 1.0, 0.0)),
            (Side::West, Vec3::new(-1.0, 0.0, 0.0)),
            (Side::East, Vec3::new(1.0, 0.0, 0.0)),
        ];
        for (side, outward) in expect {
            let mesh = closure.skirt(&top, side).unwrap().triangulate();
            for tri in 0..mesh.triangles.len() {
                assert!(mesh.face_normal(tri).dot(&outward) > 0.0, "{side:?} faces inward");
            }
        }

        let bottom = closure.bottom(&top).unwrap().triangulate();
        for tri in 0..bottom.triangles.len() {
            assert!(bottom.face_normal(tri).z < 0.0);
        }
    }

    #[test]
    fn test_build_order() {
        let top = sloped_top(2, 2);
        let pieces = ClosureBuilder::new(-1.0).build(&top).unwrap();
        let names: Vec<&str> = pieces.iter().map(StructuredSurface::name).collect();
        assert_eq!(
            names,
            vec![BOTTOM_SURFACE, "skirt_south", "skirt_north", "skirt_west", "skirt_east"]
        );
    }

    #[test]
    fn test_degenerate_lattice() {
        let thin = StructuredSurface::new(
            "top_surface",
            Grid::filled(1, 5, 0.0),
            Grid::filled(1, 5, 0.0),
            Grid::filled(1, 5, 0.0),
        )
        .unwrap();
        let err = ClosureBuilder::new(-10.0).build(&thin).unwrap_err();
        assert_eq!(err, DegenerateLatticeError { rows: 1, cols: 5 });
    }
}
