//! Tile sources
//!
//! The tile arrangement comes from an external constraint solver. The mesh
//! pipeline only needs something that turns a [`GenerationRequest`] into an
//! indexed [`TileImage`] of the requested size, so the solver sits behind the
//! [`TileFieldSource`] trait. The call is blocking and has no timeout; a
//! wrapper can add one if the backing solver needs it.
//!
//! Two requests exist, mirroring the solver's two modes:
//! - [`GenerationMode::SimpleTiled`]: build a fresh map from the tile set
//! - [`GenerationMode::Overlapping`]: resample a new map from a reference map

pub mod cache;
pub mod scatter;

pub use cache::MapCache;
pub use scatter::ScatterSource;

use crate::config::GenerationParams;
use crate::core_types::TileImage;
use crate::error::GenerationError;

/// Which generation routine to run
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationMode {
    /// Fresh map from tiles and their adjacency constraints
    SimpleTiled,
    /// New map sampled from the patterns of a reference map
    Overlapping {
        /// Map to sample patterns from
        reference: TileImage,
    },
}

impl GenerationMode {
    /// Short name for logs
    pub fn label(&self) -> &'static str {
        match self {
            GenerationMode::SimpleTiled => "simple-tiled",
            GenerationMode::Overlapping { .. } => "overlapping",
        }
    }
}

/// One request to a tile source
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Width in tiles
    pub width: usize,
    /// Height in tiles
    pub height: usize,
    /// Generation routine
    pub mode: GenerationMode,
    /// Solver parameters, passed through untouched
    pub params: GenerationParams,
}

/// Producer of indexed tile images
pub trait TileFieldSource {
    /// Produce a `request.width × request.height` tile image.
    ///
    /// # Errors
    /// Returns `GenerationError` if the source cannot produce a map.
    fn generate(&mut self, request: &GenerationRequest) -> Result<TileImage, GenerationError>;
}

impl<F> TileFieldSource for F
where
    F: FnMut(&GenerationRequest) -> Result<TileImage, GenerationError>,
{
    fn generate(&mut self, request: &GenerationRequest) -> Result<TileImage, GenerationError> {
        self(request)
    }
}

/// Run a source and check the image it returns has the requested size.
///
/// # Errors
/// Returns the source's error, or `GenerationError::DimensionMismatch`.
pub fn generate_checked(
    source: &mut dyn TileFieldSource,
    request: &GenerationRequest,
) -> Result<TileImage, GenerationError> {
    let image = source.generate(request)?;
    let actual = (image.width(), image.height());
    let expected = (request.width, request.height);
    if actual != expected {
        return Err(GenerationError::DimensionMismatch { expected, actual });
    }
    Ok(image)
}
