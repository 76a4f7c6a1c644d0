//! Tile colors and the indexed raster produced by a tile source.
//!
//! A tile source hands back an indexed image: a small palette of RGB colors
//! plus one palette index per tile, stored row-major (`[y * width + x]`).
//! The image is immutable once produced.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// RGB color of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileColor {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl TileColor {
    /// Create a color from its three channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Indexed raster of `width × height` tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TileImageData")]
pub struct TileImage {
    width: usize,
    height: usize,
    palette: Vec<TileColor>,
    /// Palette index per tile, row-major
    indices: Vec<u8>,
}

impl TileImage {
    /// Build an indexed image.
    ///
    /// Returns `None` if `indices` does not hold exactly `width * height`
    /// entries, or if that product overflows. Palette indices are not checked
    /// here; an out-of-range index surfaces as a decode error when the tile
    /// is read.
    pub fn new(
        width: usize,
        height: usize,
        palette: Vec<TileColor>,
        indices: Vec<u8>,
    ) -> Option<Self> {
        if width.checked_mul(height) != Some(indices.len()) {
            return None;
        }
        Some(Self {
            width,
            height,
            palette,
            indices,
        })
    }

    /// Build an image from one color per tile, collecting the palette in
    /// first-seen order.
    ///
    /// Returns `None` on a size mismatch or if more than 256 distinct
    /// colors are present.
    pub fn from_colors(width: usize, height: usize, colors: &[TileColor]) -> Option<Self> {
        if width.checked_mul(height) != Some(colors.len()) {
            return None;
        }

        let mut palette: Vec<TileColor> = Vec::new();
        let mut lookup: FxHashMap<TileColor, u8> = FxHashMap::default();
        let mut indices = Vec::with_capacity(colors.len());
        for color in colors {
            let idx = if let Some(&idx) = lookup.get(color) {
                idx
            } else {
                let idx = u8::try_from(palette.len()).ok()?;
                palette.push(*color);
                lookup.insert(*color, idx);
                idx
            };
            indices.push(idx);
        }

        Self::new(width, height, palette, indices)
    }

    /// Width in tiles
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles
    pub fn height(&self) -> usize {
        self.height
    }

    /// Palette colors
    pub fn palette(&self) -> &[TileColor] {
        &self.palette
    }

    /// Raw palette index at tile `(x, y)`
    #[inline]
    pub fn index_at(&self, x: usize, y: usize) -> u8 {
        self.indices[y * self.width + x]
    }

    /// Color at tile `(x, y)`, or `None` if its index is outside the palette
    pub fn color_at(&self, x: usize, y: usize) -> Option<TileColor> {
        self.palette.get(self.index_at(x, y) as usize).copied()
    }
}

/// Unchecked serialized form, validated on the way in
#[derive(Deserialize)]
struct TileImageData {
    width: usize,
    height: usize,
    palette: Vec<TileColor>,
    indices: Vec<u8>,
}

impl TryFrom<TileImageData> for TileImage {
    type Error = String;

    fn try_from(data: TileImageData) -> Result<Self, Self::Error> {
        let len = data.indices.len();
        TileImage::new(data.width, data.height, data.palette, data.indices).ok_or_else(|| {
            format!(
                "{} indices for a {}×{} image",
                len, data.width, data.height
            )
        })
    }
}
