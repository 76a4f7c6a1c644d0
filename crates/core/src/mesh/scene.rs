//! Scene of named structured surfaces and its triangle-soup view

use super::surface::StructuredSurface;
use crate::core_types::Vec3;
use serde::{Deserialize, Serialize};

/// Ordered collection of structured surfaces produced by one map generation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    surfaces: Vec<StructuredSurface>,
}

impl Scene {
    /// Empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a surface
    pub fn push(&mut self, surface: StructuredSurface) {
        self.surfaces.push(surface);
    }

    /// Surfaces in insertion order
    pub fn surfaces(&self) -> &[StructuredSurface] {
        &self.surfaces
    }

    /// First surface with the given name
    pub fn get(&self, name: &str) -> Option<&StructuredSurface> {
        self.surfaces.iter().find(|s| s.name() == name)
    }

    /// Surface names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.surfaces.iter().map(StructuredSurface::name).collect()
    }

    /// Number of surfaces
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether the scene has no surfaces
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Triangulate every surface into one mesh. Vertices are not welded.
    pub fn to_triangle_mesh(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::default();
        for surface in &self.surfaces {
            mesh.append(&surface.triangulate());
        }
        mesh
    }
}

impl Extend<StructuredSurface> for Scene {
    fn extend<I: IntoIterator<Item = StructuredSurface>>(&mut self, iter: I) {
        self.surfaces.extend(iter);
    }
}

/// Indexed triangle soup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Triangles as indices into `positions`
    pub triangles: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Append another mesh, offsetting its indices
    pub fn append(&mut self, other: &TriangleMesh) {
        let offset = self.positions.len();
        self.positions.extend_from_slice(&other.positions);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
    }

    /// Unnormalized normal of triangle `index` (right-hand rule)
    pub fn face_normal(&self, index: usize) -> Vec3 {
        let [a, b, c] = self.corners(index);
        (b - a).cross(&(c - a))
    }

    /// Total triangle area
    pub fn surface_area(&self) -> f64 {
        (0..self.triangles.len())
            .map(|i| f64::from(self.face_normal(i).norm()) * 0.5)
            .sum()
    }

    /// Signed enclosed volume by the divergence theorem.
    ///
    /// Positive for a closed shell whose triangles face outward, negative
    /// if it faces inward. Meaningless for an open surface.
    pub fn signed_volume(&self) -> f64 {
        let sum: f64 = (0..self.triangles.len())
            .map(|i| {
                let [a, b, c] = self.corners(i);
                let (a, b, c) = (a.cast::<f64>(), b.cast::<f64>(), c.cast::<f64>());
                a.dot(&b.cross(&c))
            })
            .sum();
        sum / 6.0
    }

    fn corners(&self, index: usize) -> [Vec3; 3] {
        let [i0, i1, i2] = self.triangles[index];
        [
            self.positions[i0],
            self.positions[i1],
            self.positions[i2],
        ]
    }
}
