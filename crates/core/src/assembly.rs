//! Map assembly: tile source to closed terrain scene
//!
//! Pipeline, each stage consuming the previous one in full:
//! 1. Obtain a tile image (named cached map, resampled map, or fresh map)
//! 2. Decode tile colors into height pairs
//! 3. Expand the pairs into a dense height field over the lattice
//! 4. Build the top surface
//! 5. Close it with skirts and a bottom cap
//!
//! Only step 1 touches the filesystem or the tile source. Everything after it
//! is a pure function of the image and the configuration
//! ([`build_from_image`]), so identical inputs give bit-identical output.

use crate::config::MapConfig;
use crate::core_types::TileImage;
use crate::decode::{ColorMap, HeightDecoder};
use crate::error::{ConfigError, MapError};
use crate::grid::{Grid, HeightFieldBuilder, Lattice};
use crate::mesh::{assemble_top_surface, ClosureBuilder, Scene};
use crate::source::{
    generate_checked, GenerationMode, GenerationRequest, MapCache, TileFieldSource,
};
use tracing::{debug, info};

/// Everything produced by one map generation
#[derive(Debug, Clone, PartialEq)]
pub struct MapArtifacts {
    /// Lattice X coordinates, shape `(H · g, W · g)`
    pub x: Grid<f32>,
    /// Lattice Y coordinates, shape `(H · g, W · g)`
    pub y: Grid<f32>,
    /// Height field, shape `(H · g, W · g)`
    pub z: Grid<f32>,
    /// Decoded `(H, W)` tile map
    pub color_map: ColorMap,
    /// Top surface, bottom cap and four skirts
    pub scene: Scene,
    /// Tile image the map was built from
    pub tiles: TileImage,
}

impl MapArtifacts {
    /// The `(X, Y, Z)` numeric triple
    pub fn xyz(&self) -> (&Grid<f32>, &Grid<f32>, &Grid<f32>) {
        (&self.x, &self.y, &self.z)
    }
}

/// Orchestrates one tile source and the mesh pipeline
pub struct MapAssembly<S: TileFieldSource> {
    config: MapConfig,
    source: S,
    cache: MapCache,
}

impl<S: TileFieldSource> MapAssembly<S> {
    /// Create an assembly after validating `config`.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn new(config: MapConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let cache = MapCache::new(&config.gen_folder);
        Ok(Self {
            config,
            source,
            cache,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Named-map cache under the configured `gen_folder`
    pub fn cache(&self) -> &MapCache {
        &self.cache
    }

    /// Run the full pipeline.
    ///
    /// # Errors
    /// Returns the first `MapError` raised by any stage. Nothing partial is
    /// returned.
    pub fn generate(&mut self) -> Result<MapArtifacts, MapError> {
        let tiles = self.tile_image()?;
        build_from_image(&self.config, tiles)
    }

    /// Obtain the tile image for this configuration
    fn tile_image(&mut self) -> Result<TileImage, MapError> {
        if let Some(name) = &self.config.specific_map {
            let image = self.cache.load(name)?;
            check_cached_size(name, &self.config, &image)?;
            info!(
                name = name.as_str(),
                width = image.width(),
                height = image.height(),
                "Reusing cached map"
            );
            return Ok(image);
        }

        let (width, height) = self.config.requested_size()?;
        let mode = match &self.config.sample_from {
            Some(name) => GenerationMode::Overlapping {
                reference: self.cache.load(name)?,
            },
            None => GenerationMode::SimpleTiled,
        };

        info!(mode = mode.label(), width, height, "Requesting tile map");

        let request = GenerationRequest {
            width,
            height,
            mode,
            params: self.config.generation.clone(),
        };
        Ok(generate_checked(&mut self.source, &request)?)
    }
}

/// Requested sizes, where given, must agree with the cached map
fn check_cached_size(
    name: &str,
    config: &MapConfig,
    image: &TileImage,
) -> Result<(), ConfigError> {
    let cached = (image.width(), image.height());
    let width_ok = config.width.is_none_or(|w| w == cached.0);
    let height_ok = config.height.is_none_or(|h| h == cached.1);
    if width_ok && height_ok {
        Ok(())
    } else {
        Err(ConfigError::CachedDimensionMismatch {
            name: name.to_string(),
            requested: (config.width, config.height),
            cached,
        })
    }
}

/// Build every artifact from a tile image. Pure and deterministic.
///
/// # Errors
/// Returns `MapError` for invalid settings, undecodable tiles or a lattice
/// too small to close.
pub fn build_from_image(config: &MapConfig, tiles: TileImage) -> Result<MapArtifacts, MapError> {
    if !config.down.is_finite() {
        return Err(ConfigError::InvalidHeightScale(format!(
            "down must be finite, got {}",
            config.down
        ))
        .into());
    }
    let decoder = HeightDecoder::new(config.height_constant, config.max_height)?;
    let color_map = decoder.decode_image(&tiles)?;

    let lattice = Lattice::new(
        tiles.width(),
        tiles.height(),
        config.granularity,
        config.tile_size,
    )?;
    let field = HeightFieldBuilder::new(config.granularity)?.build(color_map.heights())?;

    let top = assemble_top_surface(&lattice, &field).ok_or_else(|| MapError::ShapeMismatch {
        expected: lattice.shape(),
        actual: field.shape(),
    })?;
    let closure = ClosureBuilder::new(config.down).build(&top)?;

    let mut scene = Scene::new();
    scene.push(top);
    scene.extend(closure);

    debug!(
        min_elevation = field.min_elevation(),
        max_elevation = field.max_elevation(),
        "Height field range"
    );
    info!(
        tiles_x = tiles.width(),
        tiles_y = tiles.height(),
        rows = lattice.rows(),
        cols = lattice.cols(),
        surfaces = scene.len(),
        "Assembled terrain scene"
    );

    let (x, y) = lattice.into_xy();
    Ok(MapArtifacts {
        x,
        y,
        z: field.into_grid(),
        color_map,
        scene,
        tiles,
    })
}

/// Generate a map with `source` in one call.
///
/// # Errors
/// See [`MapAssembly::new`] and [`MapAssembly::generate`].
pub fn generate_map<S: TileFieldSource>(
    config: MapConfig,
    source: S,
) -> Result<MapArtifacts, MapError> {
    MapAssembly::new(config, source)?.generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::TileColor;

    #[test]
    fn test_cached_size_check() {
        let image = TileImage::from_colors(3, 2, &[TileColor::new(0, 0, 0); 6]).unwrap();

        let mut config = MapConfig::default();
        assert!(check_cached_size("m", &config, &image).is_ok());

        config.width = Some(3);
        assert!(check_cached_size("m", &config, &image).is_ok());

        config.height = Some(5);
        assert!(matches!(
            check_cached_size("m", &config, &image),
            Err(ConfigError::CachedDimensionMismatch { cached: (3, 2), .. })
        ));
    }

    #[test]
    fn test_single_sample_lattice_cannot_close() {
        let config = MapConfig {
            granularity: 1,
            ..MapConfig::with_size(1, 1)
        };
        let image = TileImage::from_colors(1, 1, &[TileColor::new(5, 0, 0)]).unwrap();
        assert!(matches!(
            build_from_image(&config, image),
            Err(MapError::DegenerateLattice(_))
        ));
    }
}
