//! Error types for map generation
//!
//! Each pipeline stage has its own error family. `MapError` wraps them so the
//! orchestrator can thread every stage through `?`. No stage retries or
//! substitutes default geometry: the first error is returned to the caller.

use std::fmt;

/// Failure to turn a tile color into a height pair
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Blue channel does not name a known tile category
    UnknownCategory {
        /// Tile column
        x: usize,
        /// Tile row
        y: usize,
        /// Offending category code
        code: u8,
    },
    /// Ramp tile whose bottom level sits above its top level
    InvertedRamp {
        /// Tile column
        x: usize,
        /// Tile row
        y: usize,
        /// Encoded top level
        top: u8,
        /// Encoded bottom level
        bottom: u8,
    },
    /// Palette index outside the image palette
    PaletteIndex {
        /// Tile column
        x: usize,
        /// Tile row
        y: usize,
        /// Offending index
        index: u8,
        /// Palette length
        palette_len: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownCategory { x, y, code } => {
                write!(f, "Tile ({x}, {y}): unknown tile category {code}")
            }
            DecodeError::InvertedRamp { x, y, top, bottom } => write!(
                f,
                "Tile ({x}, {y}): ramp bottom level {bottom} above top level {top}"
            ),
            DecodeError::PaletteIndex {
                x,
                y,
                index,
                palette_len,
            } => write!(
                f,
                "Tile ({x}, {y}): palette index {index} out of range (palette has {palette_len} colors)"
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Lattice too small to close into a volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateLatticeError {
    /// Lattice rows
    pub rows: usize,
    /// Lattice columns
    pub cols: usize,
}

impl fmt::Display for DegenerateLatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lattice of {}×{} samples cannot be closed (need at least 2 along each axis)",
            self.rows, self.cols
        )
    }
}

impl std::error::Error for DegenerateLatticeError {}

/// Tile source failure, including the named-map cache
#[derive(Debug)]
pub enum GenerationError {
    /// The source reported a failure
    Failed(String),
    /// The source returned an image of the wrong size
    DimensionMismatch {
        /// Requested `(width, height)`
        expected: (usize, usize),
        /// Returned `(width, height)`
        actual: (usize, usize),
    },
    /// Overlapping generation requested with an empty reference image
    EmptyReference,
    /// Cached map could not be read
    CacheRead(String),
    /// Cached map could not be parsed
    CacheParse(String),
    /// Map could not be written to the cache
    CacheWrite(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Failed(msg) => write!(f, "Tile generation failed: {msg}"),
            GenerationError::DimensionMismatch { expected, actual } => write!(
                f,
                "Tile source returned {}×{} tiles, expected {}×{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            GenerationError::EmptyReference => {
                write!(f, "Reference image for overlapping generation is empty")
            }
            GenerationError::CacheRead(msg) => write!(f, "Failed to read cached map: {msg}"),
            GenerationError::CacheParse(msg) => write!(f, "Failed to parse cached map: {msg}"),
            GenerationError::CacheWrite(msg) => write!(f, "Failed to write cached map: {msg}"),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Invalid map configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `granularity` must be at least 1
    InvalidGranularity(usize),
    /// Width/height missing or zero
    InvalidDimensions {
        /// Configured width
        width: Option<usize>,
        /// Configured height
        height: Option<usize>,
    },
    /// `tile_size` must be finite and positive
    InvalidTileSize(f32),
    /// `height_constant`, `max_height` or `down` not usable
    InvalidHeightScale(String),
    /// Requested dimensions disagree with the named map
    CachedDimensionMismatch {
        /// Name of the cached map
        name: String,
        /// Requested `(width, height)`
        requested: (Option<usize>, Option<usize>),
        /// Cached `(width, height)`
        cached: (usize, usize),
    },
    /// Config file could not be read
    Read(String),
    /// Config file could not be parsed
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidGranularity(g) => {
                write!(f, "Granularity must be at least 1, got {g}")
            }
            ConfigError::InvalidDimensions { width, height } => write!(
                f,
                "Map width and height must be positive, got {width:?}×{height:?}"
            ),
            ConfigError::InvalidTileSize(size) => {
                write!(f, "Tile size must be finite and positive, got {size}")
            }
            ConfigError::InvalidHeightScale(msg) => write!(f, "Invalid height settings: {msg}"),
            ConfigError::CachedDimensionMismatch {
                name,
                requested,
                cached,
            } => write!(
                f,
                "Map '{name}' is {}×{} tiles but {:?}×{:?} was requested",
                cached.0, cached.1, requested.0, requested.1
            ),
            ConfigError::Read(msg) => write!(f, "Failed to read config: {msg}"),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Any failure of the map generation pipeline
#[derive(Debug)]
pub enum MapError {
    /// Tile color decoding failed
    Decode(DecodeError),
    /// Lattice could not be closed
    DegenerateLattice(DegenerateLatticeError),
    /// Tile source or cache failed
    Generation(GenerationError),
    /// Configuration rejected
    Config(ConfigError),
    /// Height field shape disagrees with the lattice
    ShapeMismatch {
        /// Lattice `(rows, cols)`
        expected: (usize, usize),
        /// Height field `(rows, cols)`
        actual: (usize, usize),
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Decode(e) => write!(f, "{e}"),
            MapError::DegenerateLattice(e) => write!(f, "{e}"),
            MapError::Generation(e) => write!(f, "{e}"),
            MapError::Config(e) => write!(f, "{e}"),
            MapError::ShapeMismatch { expected, actual } => write!(
                f,
                "Height field is {}×{} but the lattice is {}×{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Decode(e) => Some(e),
            MapError::DegenerateLattice(e) => Some(e),
            MapError::Generation(e) => Some(e),
            MapError::Config(e) => Some(e),
            MapError::ShapeMismatch { .. } => None,
        }
    }
}

impl From<DecodeError> for MapError {
    fn from(e: DecodeError) -> Self {
        MapError::Decode(e)
    }
}

impl From<DegenerateLatticeError> for MapError {
    fn from(e: DegenerateLatticeError) -> Self {
        MapError::DegenerateLattice(e)
    }
}

impl From<GenerationError> for MapError {
    fn from(e: GenerationError) -> Self {
        MapError::Generation(e)
    }
}

impl From<ConfigError> for MapError {
    fn from(e: ConfigError) -> Self {
        MapError::Config(e)
    }
}
