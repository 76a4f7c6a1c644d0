//! Lattice and height field modules

pub mod array;
pub mod height_field;
pub mod lattice;

// Re-export main types
pub use array::Grid;
pub use height_field::{HeightField, HeightFieldBuilder};
pub use lattice::{lattice_index, lattice_shape, linspace, Lattice};
