//! Tile color to height decoding
//!
//! # Color encoding
//!
//! - Blue channel: tile category code, looked up in a [`HeightPalette`]
//! - Red channel: top level of the tile
//! - Green channel: bottom level of the tile (ramp tiles only)
//!
//! A level maps to an elevation as `level · height_constant`, clamped to
//! `[0, max_height]`. The standard palette knows two categories:
//! - Code 0: flat tile, both heights taken from red
//! - Code 255: ramp tile, top from red and bottom from green
//!
//! Anything else is a [`DecodeError`]; tiles are never given a default height.

use crate::core_types::{HeightPair, TileColor, TileImage};
use crate::error::{ConfigError, DecodeError};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a tile's channels turn into heights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileCategory {
    /// Single elevation from the red channel
    Flat,
    /// Ramp from green (bottom) up to red (top)
    Ramp,
}

/// Category lookup keyed by the blue channel
#[derive(Debug, Clone)]
pub struct HeightPalette {
    categories: Vec<Option<TileCategory>>,
}

impl HeightPalette {
    /// Standard palette: code 0 is flat, code 255 is a ramp
    pub fn standard() -> Self {
        let mut categories = vec![None; 256];
        categories[0] = Some(TileCategory::Flat);
        categories[255] = Some(TileCategory::Ramp);
        Self { categories }
    }

    /// Custom palette where index is the category code
    pub fn custom(categories: Vec<Option<TileCategory>>) -> Self {
        Self { categories }
    }

    /// Category for a code, if recognized
    pub fn category(&self, code: u8) -> Option<TileCategory> {
        self.categories.get(code as usize).copied().flatten()
    }

    /// Set or clear the category for a code
    pub fn set_category(&mut self, code: u8, category: Option<TileCategory>) {
        let idx = code as usize;
        if idx >= self.categories.len() {
            self.categories.resize(idx + 1, None);
        }
        self.categories[idx] = category;
    }
}

impl Default for HeightPalette {
    fn default() -> Self {
        Self::standard()
    }
}

/// Decoded `H × W` map: the raw tile colors and their height pairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMap {
    colors: Grid<TileColor>,
    heights: Grid<HeightPair>,
}

impl ColorMap {
    /// Tile colors, one per tile
    pub fn colors(&self) -> &Grid<TileColor> {
        &self.colors
    }

    /// Height pairs, one per tile
    pub fn heights(&self) -> &Grid<HeightPair> {
        &self.heights
    }

    /// `(H, W)`
    pub fn shape(&self) -> (usize, usize) {
        self.heights.shape()
    }
}

/// Maps tile colors to height pairs
#[derive(Debug, Clone)]
pub struct HeightDecoder {
    height_constant: f32,
    max_height: f32,
    palette: HeightPalette,
}

impl HeightDecoder {
    /// Create a decoder with the standard palette.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidHeightScale` if either value is negative
    /// or not finite.
    pub fn new(height_constant: f32, max_height: f32) -> Result<Self, ConfigError> {
        if !height_constant.is_finite() || height_constant < 0.0 {
            return Err(ConfigError::InvalidHeightScale(format!(
                "height_constant must be finite and non-negative, got {height_constant}"
            )));
        }
        if !max_height.is_finite() || max_height < 0.0 {
            return Err(ConfigError::InvalidHeightScale(format!(
                "max_height must be finite and non-negative, got {max_height}"
            )));
        }
        Ok(Self {
            height_constant,
            max_height,
            palette: HeightPalette::standard(),
        })
    }

    /// Replace the category palette
    pub fn with_palette(mut self, palette: HeightPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Elevation for one channel level
    #[inline]
    pub fn level(&self, channel: u8) -> f32 {
        (f32::from(channel) * self.height_constant).clamp(0.0, self.max_height)
    }

    /// Decode the color of tile `(x, y)`.
    ///
    /// # Errors
    /// Returns `DecodeError` for an unknown category or a ramp whose bottom
    /// level exceeds its top level.
    pub fn decode_color(
        &self,
        x: usize,
        y: usize,
        color: TileColor,
    ) -> Result<HeightPair, DecodeError> {
        match self.palette.category(color.b) {
            Some(TileCategory::Flat) => Ok(HeightPair::flat(self.level(color.r))),
            Some(TileCategory::Ramp) => {
                if color.g > color.r {
                    return Err(DecodeError::InvertedRamp {
                        x,
                        y,
                        top: color.r,
                        bottom: color.g,
                    });
                }
                // Clamping is monotone, so bottom <= top still holds
                Ok(HeightPair::new(self.level(color.r), self.level(color.g)))
            }
            None => Err(DecodeError::UnknownCategory {
                x,
                y,
                code: color.b,
            }),
        }
    }

    /// Decode every tile of an indexed image.
    ///
    /// # Errors
    /// Returns the first `DecodeError` in row-major order, including palette
    /// indices outside the image palette.
    pub fn decode_image(&self, image: &TileImage) -> Result<ColorMap, DecodeError> {
        let (width, height) = (image.width(), image.height());
        let mut colors = Vec::with_capacity(width * height);
        let mut heights = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                let color = image.color_at(x, y).ok_or_else(|| DecodeError::PaletteIndex {
                    x,
                    y,
                    index: image.index_at(x, y),
                    palette_len: image.palette().len(),
                })?;
                heights.push(self.decode_color(x, y, color)?);
                colors.push(color);
            }
        }

        debug!(width, height, "Decoded tile image");

        Ok(ColorMap {
            colors: Grid::from_fn(height, width, |r, c| colors[r * width + c]),
            heights: Grid::from_fn(height, width, |r, c| heights[r * width + c]),
        })
    }
}
