use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tile_terrain_core::{MapArtifacts, MapAssembly, MapConfig, MapError, ScatterSource};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Terrain generation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "tile-terrain-demo")]
#[command(about = "Generate a closed terrain mesh from a tile map", long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map width in tiles
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Map height in tiles
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Physical size of one tile
    #[arg(long)]
    tile_size: Option<f32>,

    /// Lattice samples per tile per axis
    #[arg(short, long)]
    granularity: Option<usize>,

    /// Elevation per color level
    #[arg(long)]
    height_constant: Option<f32>,

    /// Elevation ceiling
    #[arg(long)]
    max_height: Option<f32>,

    /// Elevation of skirts and bottom cap
    #[arg(long, allow_hyphen_values = true)]
    down: Option<f32>,

    /// Seed for the tile source
    #[arg(short, long)]
    seed: Option<u64>,

    /// Folder holding the cached maps
    #[arg(long)]
    gen_folder: Option<PathBuf>,

    /// Reuse a cached map by name
    #[arg(long)]
    specific_map: Option<String>,

    /// Resample a new map from a cached map
    #[arg(long)]
    sample_from: Option<String>,

    /// Pattern size when resampling
    #[arg(short, long)]
    n: Option<usize>,

    /// Let resampled patterns wrap around the reference map
    #[arg(long)]
    periodic_input: bool,

    /// Store the tile map in the cache under this name
    #[arg(long)]
    save_as: Option<String>,

    /// Write the scene as JSON to this file
    #[arg(long)]
    scene_out: Option<PathBuf>,

    /// Check that the generated shell faces outward
    #[arg(short, long)]
    validate: bool,
}

impl Args {
    fn map_config(&self) -> Result<MapConfig, MapError> {
        let mut config = match &self.config {
            Some(path) => MapConfig::from_json_file(path)?,
            None => MapConfig::default(),
        };

        if self.width.is_some() {
            config.width = self.width;
        }
        if self.height.is_some() {
            config.height = self.height;
        }
        if let Some(tile_size) = self.tile_size {
            config.tile_size = tile_size;
        }
        if let Some(granularity) = self.granularity {
            config.granularity = granularity;
        }
        if let Some(height_constant) = self.height_constant {
            config.height_constant = height_constant;
        }
        if let Some(max_height) = self.max_height {
            config.max_height = max_height;
        }
        if let Some(down) = self.down {
            config.down = down;
        }
        if let Some(gen_folder) = &self.gen_folder {
            config.gen_folder.clone_from(gen_folder);
        }
        if self.specific_map.is_some() {
            config.specific_map.clone_from(&self.specific_map);
        }
        if self.sample_from.is_some() {
            config.sample_from.clone_from(&self.sample_from);
        }
        if self.seed.is_some() {
            config.generation.seed = self.seed;
        }
        if let Some(n) = self.n {
            config.generation.n = n;
        }
        config.generation.periodic_input |= self.periodic_input;

        // Small default map so the demo runs without any flags
        if config.specific_map.is_none() {
            config.width = config.width.or(Some(8));
            config.height = config.height.or(Some(8));
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Tile Terrain Demo ===\n");

    let config = args.map_config()?;
    let mut assembly = MapAssembly::new(config, ScatterSource::standard())?;
    let artifacts = assembly.generate()?;

    print_summary(&artifacts);

    if let Some(name) = &args.save_as {
        let path = assembly.cache().store(name, &artifacts.tiles)?;
        println!("Saved tile map as '{name}' ({})", path.display());
    }

    if let Some(path) = &args.scene_out {
        let json = serde_json::to_string_pretty(&artifacts.scene)?;
        fs::write(path, json)?;
        info!(path = %path.display(), "Wrote scene");
        println!("Wrote scene to {}", path.display());
    }

    if args.validate {
        validate(&artifacts)?;
    }

    Ok(())
}

fn print_summary(artifacts: &MapArtifacts) {
    let (rows, cols) = artifacts.z.shape();
    let (tiles_y, tiles_x) = artifacts.color_map.shape();
    let z = artifacts.z.as_slice();
    let min = z.iter().copied().fold(f32::INFINITY, f32::min);
    let max = z.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    println!("Tiles: {tiles_x}×{tiles_y}");
    println!("Lattice: {rows} rows × {cols} columns");
    println!("Elevation: {min:.2} .. {max:.2}");
    println!("\nSurfaces:");
    for surface in artifacts.scene.surfaces() {
        let (r, c) = surface.shape();
        println!("  {:<16} {r:>4} × {c:<4}", surface.name());
    }
}

fn validate(artifacts: &MapArtifacts) -> Result<(), String> {
    let mesh = artifacts.scene.to_triangle_mesh();
    let volume = mesh.signed_volume();
    let area = mesh.surface_area();

    println!("\n=== Validation ===");
    println!("Triangles: {}", mesh.triangles.len());
    println!("Surface area: {area:.2}");
    println!("Enclosed volume: {volume:.2}");

    if volume > 0.0 {
        println!("✓ Shell faces outward (positive volume)");
        Ok(())
    } else {
        Err(format!("shell volume {volume:.2} is not positive"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_terrain_core::generate_map;

    #[test]
    fn test_validate_generated_map() {
        let mut config = MapConfig::with_size(3, 2);
        config.generation.seed = Some(4);
        let artifacts = generate_map(config, ScatterSource::standard()).unwrap();
        assert!(validate(&artifacts).is_ok());
    }

    #[test]
    fn test_validate_rejects_inward_shell() {
        let mut config = MapConfig::with_size(2, 2);
        config.generation.seed = Some(4);
        config.down = 500.0;
        // Base above every surface point turns the shell inside out
        let artifacts = generate_map(config, ScatterSource::standard()).unwrap();
        assert!(validate(&artifacts).is_err());
    }
}
