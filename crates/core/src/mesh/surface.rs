//! Structured quad surfaces
//!
//! A structured surface is three same-shaped coordinate arrays. Quad
//! `(row, col)` spans samples `(row, col)`, `(row, col + 1)`,
//! `(row + 1, col + 1)` and `(row + 1, col)`. Triangulation keeps that order,
//! so a surface whose columns advance along +X and rows along +Y faces +Z.

use super::scene::TriangleMesh;
use crate::core_types::Vec3;
use crate::grid::{Grid, HeightField, Lattice};
use serde::{Deserialize, Serialize};

/// Name of the terrain's upper surface
pub const TOP_SURFACE: &str = "top_surface";

/// Named quad mesh given by X, Y and Z arrays of identical shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredSurface {
    name: String,
    x: Grid<f32>,
    y: Grid<f32>,
    z: Grid<f32>,
}

impl StructuredSurface {
    /// Build a surface.
    ///
    /// Returns `None` if the three arrays differ in shape.
    pub fn new(name: impl Into<String>, x: Grid<f32>, y: Grid<f32>, z: Grid<f32>) -> Option<Self> {
        if x.shape() != y.shape() || x.shape() != z.shape() {
            return None;
        }
        Some(Self {
            name: name.into(),
            x,
            y,
            z,
        })
    }

    /// Build a surface from a shape and a per-sample position function
    pub(crate) fn from_fn(
        name: impl Into<String>,
        rows: usize,
        cols: usize,
        mut position: impl FnMut(usize, usize) -> Vec3,
    ) -> Self {
        let points = Grid::from_fn(rows, cols, |r, c| position(r, c));
        Self {
            name: name.into(),
            x: points.map(|p| p.x),
            y: points.map(|p| p.y),
            z: points.map(|p| p.z),
        }
    }

    /// Surface name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// X coordinates
    pub fn x(&self) -> &Grid<f32> {
        &self.x
    }

    /// Y coordinates
    pub fn y(&self) -> &Grid<f32> {
        &self.y
    }

    /// Z coordinates
    pub fn z(&self) -> &Grid<f32> {
        &self.z
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    /// Position of sample `(row, col)`
    #[inline]
    pub fn vertex(&self, row: usize, col: usize) -> Vec3 {
        Vec3::new(
            self.x[(row, col)],
            self.y[(row, col)],
            self.z[(row, col)],
        )
    }

    /// Number of quads
    pub fn quad_count(&self) -> usize {
        let (rows, cols) = self.shape();
        rows.saturating_sub(1) * cols.saturating_sub(1)
    }

    /// Split every quad into two triangles
    pub fn triangulate(&self) -> TriangleMesh {
        let (rows, cols) = self.shape();
        let mut mesh = TriangleMesh::default();
        mesh.positions.reserve(rows * cols);
        mesh.triangles.reserve(self.quad_count() * 2);

        for row in 0..rows {
            for col in 0..cols {
                mesh.positions.push(self.vertex(row, col));
            }
        }

        for row in 0..rows.saturating_sub(1) {
            for col in 0..cols.saturating_sub(1) {
                let v00 = row * cols + col;
                let v01 = v00 + 1;
                let v10 = v00 + cols;
                let v11 = v10 + 1;
                mesh.triangles.push([v00, v01, v11]);
                mesh.triangles.push([v00, v11, v10]);
            }
        }

        mesh
    }
}

/// Assemble the top surface from the lattice and height field, unchanged.
///
/// Returns `None` if the field does not match the lattice shape.
pub fn assemble_top_surface(lattice: &Lattice, field: &HeightField) -> Option<StructuredSurface> {
    StructuredSurface::new(
        TOP_SURFACE,
        lattice.x().clone(),
        lattice.y().clone(),
        field.z().clone(),
    )
}
