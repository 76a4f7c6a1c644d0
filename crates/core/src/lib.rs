//! Tile Terrain Core Library
//!
//! Turns a small 2D tile map into a closed 3D terrain mesh ready for physics
//! and rendering.
//!
//! ## Pipeline
//!
//! - [`source`]: tile sources and the named-map cache
//! - [`decode`]: tile colors to per-tile `(z_top, z_bottom)` height pairs
//! - [`grid`]: the XY lattice and the dense height field built from the pairs
//! - [`mesh`]: top surface, side skirts and bottom cap as structured surfaces
//! - [`assembly`]: runs the stages in order and returns the artifacts
//!
//! ```rust,ignore
//! use tile_terrain_core::{generate_map, MapConfig, ScatterSource};
//!
//! let artifacts = generate_map(MapConfig::with_size(8, 8), ScatterSource::standard())?;
//! assert_eq!(artifacts.scene.len(), 6);
//! ```

// Core types and utilities
pub mod core_types;

pub mod assembly;
pub mod config;
pub mod decode;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod source;

// Re-export core types
pub use core_types::{HeightPair, TileColor, TileImage, Vec3};

// Re-export pipeline types
pub use assembly::{build_from_image, generate_map, MapArtifacts, MapAssembly};
pub use config::{GenerationParams, MapConfig};
pub use decode::{ColorMap, HeightDecoder, HeightPalette, TileCategory};
pub use error::{ConfigError, DecodeError, DegenerateLatticeError, GenerationError, MapError};
pub use grid::{Grid, HeightField, HeightFieldBuilder, Lattice};
pub use mesh::{ClosureBuilder, Scene, Side, StructuredSurface, TriangleMesh};
pub use source::{GenerationMode, GenerationRequest, MapCache, ScatterSource, TileFieldSource};
