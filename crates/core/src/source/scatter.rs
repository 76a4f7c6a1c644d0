//! Seeded stand-in tile source
//!
//! `ScatterSource` does not solve adjacency constraints. It exists so the
//! pipeline can run without the external solver:
//! - Simple-tiled requests draw every tile uniformly from a palette
//! - Overlapping requests copy `n × n` windows from the reference map at
//!   random offsets; with `periodic_input` a window may wrap around the
//!   reference edges
//!
//! The same seed and request always give the same image. Without a seed the
//! generator is seeded from the OS.

use super::{GenerationMode, GenerationRequest, TileFieldSource};
use crate::core_types::{TileColor, TileImage};
use crate::error::GenerationError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Random tile source for demos and tests
#[derive(Debug, Clone)]
pub struct ScatterSource {
    palette: Vec<TileColor>,
}

impl ScatterSource {
    /// Source drawing simple-tiled maps from `palette`
    pub fn new(palette: Vec<TileColor>) -> Self {
        Self { palette }
    }

    /// Palette of flat tiles at a few levels plus two ramps, all decodable by
    /// the standard height palette
    pub fn standard() -> Self {
        Self::new(vec![
            TileColor::new(0, 0, 0),
            TileColor::new(10, 0, 0),
            TileColor::new(20, 0, 0),
            TileColor::new(40, 0, 0),
            TileColor::new(20, 0, 255),
            TileColor::new(40, 20, 255),
        ])
    }

    fn scatter(
        &self,
        rng: &mut StdRng,
        width: usize,
        height: usize,
    ) -> Result<TileImage, GenerationError> {
        if self.palette.is_empty() {
            return Err(GenerationError::Failed("empty tile palette".to_string()));
        }
        let count = width
            .checked_mul(height)
            .ok_or_else(|| GenerationError::Failed(format!("{width}×{height} map is too large")))?;
        let colors: Vec<TileColor> = (0..count)
            .map(|_| self.palette[rng.random_range(0..self.palette.len())])
            .collect();
        TileImage::from_colors(width, height, &colors)
            .ok_or_else(|| GenerationError::Failed("palette exceeds 256 colors".to_string()))
    }
}

impl Default for ScatterSource {
    fn default() -> Self {
        Self::standard()
    }
}

impl TileFieldSource for ScatterSource {
    fn generate(&mut self, request: &GenerationRequest) -> Result<TileImage, GenerationError> {
        let mut rng = match request.params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        debug!(
            mode = request.mode.label(),
            width = request.width,
            height = request.height,
            seed = ?request.params.seed,
            "Scattering tiles"
        );

        match &request.mode {
            GenerationMode::SimpleTiled => self.scatter(&mut rng, request.width, request.height),
            GenerationMode::Overlapping { reference } => resample(
                &mut rng,
                reference,
                request.width,
                request.height,
                request.params.n,
                request.params.periodic_input,
            ),
        }
    }
}

/// Fill the output with `n × n` windows copied from `reference`
fn resample(
    rng: &mut StdRng,
    reference: &TileImage,
    width: usize,
    height: usize,
    n: usize,
    periodic_input: bool,
) -> Result<TileImage, GenerationError> {
    let (ref_w, ref_h) = (reference.width(), reference.height());
    if ref_w == 0 || ref_h == 0 {
        return Err(GenerationError::EmptyReference);
    }

    let n = n.max(1);
    // Without wrapping, a window has to fit inside the reference
    let (win_w, win_h) = if periodic_input {
        (n, n)
    } else {
        (n.min(ref_w), n.min(ref_h))
    };
    let (span_x, span_y) = if periodic_input {
        (ref_w, ref_h)
    } else {
        (ref_w - win_w + 1, ref_h - win_h + 1)
    };

    let blocks_x = width.div_ceil(win_w);
    let blocks_y = height.div_ceil(win_h);
    let origins: Vec<(usize, usize)> = (0..blocks_x * blocks_y)
        .map(|_| (rng.random_range(0..span_x), rng.random_range(0..span_y)))
        .collect();

    let count = width
        .checked_mul(height)
        .ok_or_else(|| GenerationError::Failed(format!("{width}×{height} map is too large")))?;
    let mut colors = Vec::with_capacity(count);
    for y in 0..height {
        for x in 0..width {
            let (ox, oy) = origins[(y / win_h) * blocks_x + x / win_w];
            let sx = (ox + x % win_w) % ref_w;
            let sy = (oy + y % win_h) % ref_h;
            let color = reference.color_at(sx, sy).ok_or_else(|| {
                GenerationError::Failed(format!("reference tile ({sx}, {sy}) has no color"))
            })?;
            colors.push(color);
        }
    }

    TileImage::from_colors(width, height, &colors)
        .ok_or_else(|| GenerationError::Failed("reference palette exceeds 256 colors".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationParams;

    fn request(mode: GenerationMode, seed: Option<u64>) -> GenerationRequest {
        GenerationRequest {
            width: 6,
            height: 4,
            mode,
            params: GenerationParams {
                seed,
                ..GenerationParams::default()
            },
        }
    }

    #[test]
    fn test_seeded_generation_is_repeatable() {
        let mut source = ScatterSource::standard();
        let a = source.generate(&request(GenerationMode::SimpleTiled, Some(42))).unwrap();
        let b = source.generate(&request(GenerationMode::SimpleTiled, Some(42))).unwrap();
        assert_eq!(a, b);
        assert_eq!((a.width(), a.height()), (6, 4));
    }

    #[test]
    fn test_colors_come_from_palette() {
        let mut source = ScatterSource::standard();
        let image = source.generate(&request(GenerationMode::SimpleTiled, Some(3))).unwrap();
        let allowed = ScatterSource::standard().palette;
        for y in 0..4 {
            for x in 0..6 {
                assert!(allowed.contains(&image.color_at(x, y).unwrap()));
            }
        }
    }

    #[test]
    fn test_overlapping_uses_reference_colors() {
        let a = TileColor::new(5, 0, 0);
        let b = TileColor::new(9, 0, 0);
        let reference = TileImage::from_colors(2, 2, &[a, b, b, a]).unwrap();

        let mut source = ScatterSource::new(vec![TileColor::new(200, 0, 0)]);
        let image = source
            .generate(&request(GenerationMode::Overlapping { reference }, Some(11)))
            .unwrap();

        for y in 0..4 {
            for x in 0..6 {
                let c = image.color_at(x, y).unwrap();
                assert!(c == a || c == b);
            }
        }
    }

    #[test]
    fn test_overlapping_copies_whole_windows() {
        // With n equal to the reference size and no wrapping, every window is
        // the reference itself, so the output tiles it exactly
        let colors: Vec<TileColor> = (0..4).map(|i| TileColor::new(i, 0, 0)).collect();
        let reference = TileImage::from_colors(2, 2, &colors).unwrap();
        let mode = GenerationMode::Overlapping {
            reference: reference.clone(),
        };
        let mut req = request(mode, Some(1));
        req.params.n = 2;

        let image = ScatterSource::standard().generate(&req).unwrap();
        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(image.color_at(x, y), reference.color_at(x % 2, y % 2));
            }
        }
    }

    #[test]
    fn test_oversized_request_fails() {
        let mut req = request(GenerationMode::SimpleTiled, Some(0));
        req.width = usize::MAX;
        assert!(matches!(
            ScatterSource::standard().generate(&req),
            Err(GenerationError::Failed(_))
        ));
    }

    #[test]
    fn test_empty_palette_fails() {
        let mut source = ScatterSource::new(Vec::new());
        assert!(matches!(
            source.generate(&request(GenerationMode::SimpleTiled, Some(0))),
            Err(GenerationError::Failed(_))
        ));
    }

    #[test]
    fn test_empty_reference_fails() {
        let reference = TileImage::from_colors(0, 0, &[]).unwrap();
        let mut source = ScatterSource::standard();
        assert!(matches!(
            source.generate(&request(GenerationMode::Overlapping { reference }, Some(0))),
            Err(GenerationError::EmptyReference)
        ));
    }
}
