//! Map generation configuration
//!
//! All options have defaults matching the reference terrain setup. Generation
//! parameters are opaque to the mesh pipeline and are handed to the tile
//! source unchanged.

use crate::error::ConfigError;
use crate::grid::lattice_shape;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default samples per tile per axis
pub const DEFAULT_GRANULARITY: usize = 10;

/// Parameters forwarded to the tile source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Wrap the generated map at its borders
    pub periodic_output: bool,
    /// Pattern size for overlapping generation
    pub n: usize,
    /// Treat the reference image as wrapping
    pub periodic_input: bool,
    /// Pin the bottom row of patterns to the ground
    pub ground: bool,
    /// Number of maps to sample
    pub nb_samples: usize,
    /// Number of pattern symmetries considered
    pub symmetry: usize,
    /// Fixed seed; `None` lets the source choose
    pub seed: Option<u64>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            periodic_output: false,
            n: 2,
            periodic_input: false,
            ground: false,
            nb_samples: 1,
            symmetry: 1,
            seed: None,
        }
    }
}

/// Full map configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map width in tiles (taken from the cached map when `specific_map` is set)
    pub width: Option<usize>,
    /// Map height in tiles (taken from the cached map when `specific_map` is set)
    pub height: Option<usize>,
    /// Physical size of one tile
    pub tile_size: f32,
    /// Lattice samples per tile per axis
    pub granularity: usize,
    /// Elevation per channel level
    pub height_constant: f32,
    /// Elevation ceiling
    pub max_height: f32,
    /// Elevation of skirts and bottom cap
    pub down: f32,
    /// Folder holding the `maps/` cache
    pub gen_folder: PathBuf,
    /// Reuse the named cached map instead of generating one
    pub specific_map: Option<String>,
    /// Resample a new map from the named cached map
    pub sample_from: Option<String>,
    /// Tile source parameters
    pub generation: GenerationParams,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            tile_size: 10.0,
            granularity: DEFAULT_GRANULARITY,
            height_constant: 0.2,
            max_height: 8.0,
            down: -10.0,
            gen_folder: PathBuf::from(".gen_files"),
            specific_map: None,
            sample_from: None,
            generation: GenerationParams::default(),
        }
    }
}

impl MapConfig {
    /// Configuration for a `width × height` tile map with default settings
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file. Missing keys take their
    /// defaults; the result is validated when an assembly is created.
    ///
    /// # Errors
    /// Returns `ConfigError::Read` or `ConfigError::Parse`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check every option that does not depend on the tile source.
    ///
    /// # Errors
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.granularity == 0 {
            return Err(ConfigError::InvalidGranularity(self.granularity));
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        if !self.height_constant.is_finite() || self.height_constant < 0.0 {
            return Err(ConfigError::InvalidHeightScale(format!(
                "height_constant must be finite and non-negative, got {}",
                self.height_constant
            )));
        }
        if !self.max_height.is_finite() || self.max_height < 0.0 {
            return Err(ConfigError::InvalidHeightScale(format!(
                "max_height must be finite and non-negative, got {}",
                self.max_height
            )));
        }
        if !self.down.is_finite() {
            return Err(ConfigError::InvalidHeightScale(format!(
                "down must be finite, got {}",
                self.down
            )));
        }

        // A named map supplies its own size
        if self.specific_map.is_none() {
            let (width, height) = self.requested_size()?;
            if lattice_shape(width, height, 1).is_none() {
                return Err(ConfigError::InvalidDimensions {
                    width: self.width,
                    height: self.height,
                });
            }
            if lattice_shape(width, height, self.granularity).is_none() {
                return Err(ConfigError::InvalidGranularity(self.granularity));
            }
        }
        Ok(())
    }

    /// Requested `(width, height)`.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidDimensions` if either is missing or zero.
    pub fn requested_size(&self) -> Result<(usize, usize), ConfigError> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
            (width, height) => Err(ConfigError::InvalidDimensions { width, height }),
        }
    }
}
