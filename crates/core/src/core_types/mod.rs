//! Core types shared by every pipeline stage

pub mod height;
pub mod tile;
pub mod vec3;

pub use height::HeightPair;
pub use tile::{TileColor, TileImage};
pub use vec3::Vec3;
