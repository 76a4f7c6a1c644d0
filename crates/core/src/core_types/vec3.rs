//! Vector type alias for mesh vertices.

use nalgebra::Vector3;

/// 3D position used for every surface vertex.
///
/// Alias for `nalgebra::Vector3<f32>`. X and Y are horizontal lattice
/// coordinates, Z is elevation.
pub type Vec3 = Vector3<f32>;
