//! The top surface, skirts and bottom cap must form one closed outward shell

use approx::assert_relative_eq;
use tile_terrain_core::{
    build_from_image, generate_map, GenerationParams, Grid, MapArtifacts, MapConfig, ScatterSource,
    TileColor, TileImage,
};

fn unit_config(width: usize, height: usize, granularity: usize) -> MapConfig {
    MapConfig {
        granularity,
        height_constant: 1.0,
        max_height: 255.0,
        ..MapConfig::with_size(width, height)
    }
}

fn seeded(seed: u64, width: usize, height: usize, granularity: usize) -> MapArtifacts {
    let config = MapConfig {
        granularity,
        generation: GenerationParams {
            seed: Some(seed),
            ..Default::default()
        },
        ..MapConfig::with_size(width, height)
    };
    generate_map(config, ScatterSource::standard()).unwrap()
}

/// Volume between the triangulated top surface and the base plane
fn volume_above_base(x: &Grid<f32>, y: &Grid<f32>, z: &Grid<f32>, down: f32) -> f64 {
    let (rows, cols) = z.shape();
    let at = |g: &Grid<f32>, r: usize, c: usize| f64::from(g[(r, c)]);
    let mut volume = 0.0;
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let area = (at(x, r, c + 1) - at(x, r, c)) * (at(y, r + 1, c) - at(y, r, c));
            let (z00, z01) = (at(z, r, c), at(z, r, c + 1));
            let (z10, z11) = (at(z, r + 1, c), at(z, r + 1, c + 1));
            let mean = ((z00 + z01 + z11) + (z00 + z11 + z10)) / 6.0;
            volume += area * (mean - f64::from(down));
        }
    }
    volume
}

#[test]
fn test_flat_block_volume() {
    let image = TileImage::from_colors(2, 2, &[TileColor::new(4, 0, 0); 4]).unwrap();
    let artifacts = build_from_image(&unit_config(2, 2, 3), image).unwrap();

    // 20 × 20 footprint from z = -10 up to z = 4
    let mesh = artifacts.scene.to_triangle_mesh();
    assert_relative_eq!(mesh.signed_volume(), 5600.0, max_relative = 1e-5);

    // Four sides of 20 × 14 plus top and bottom of 20 × 20
    assert_relative_eq!(mesh.surface_area(), 4.0 * 280.0 + 2.0 * 400.0, max_relative = 1e-5);
}

#[test]
fn test_single_ramp_volume() {
    let image = TileImage::from_colors(1, 1, &[TileColor::new(4, 0, 255)]).unwrap();
    let artifacts = build_from_image(&unit_config(1, 1, 2), image).unwrap();

    // Mean top elevation 2 over a 10 × 10 tile, base at -10
    let mesh = artifacts.scene.to_triangle_mesh();
    assert_relative_eq!(mesh.signed_volume(), 1200.0, max_relative = 1e-5);
}

#[test]
fn test_seeded_maps_are_closed_and_outward() {
    for seed in [0_u64, 7, 99, 2024] {
        let artifacts = seeded(seed, 5, 4, 4);
        let mesh = artifacts.scene.to_triangle_mesh();
        let expected = volume_above_base(&artifacts.x, &artifacts.y, &artifacts.z, -10.0);

        assert!(mesh.signed_volume() > 0.0, "seed {seed}: shell faces inward");
        assert_relative_eq!(mesh.signed_volume(), expected, max_relative = 1e-4);
    }
}

#[test]
fn test_skirts_meet_top_edges_exactly() {
    let artifacts = seeded(31, 6, 3, 5);
    let scene = &artifacts.scene;
    let top = scene.get("top_surface").unwrap();
    let (rows, cols) = top.shape();

    let south = scene.get("skirt_south").unwrap();
    let north = scene.get("skirt_north").unwrap();
    for c in 0..cols {
        assert_eq!(south.vertex(1, c), top.vertex(0, c));
        assert_eq!(south.vertex(0, c).z, -10.0);
        assert_eq!(north.vertex(0, c), top.vertex(rows - 1, c));
        assert_eq!(north.vertex(1, c).z, -10.0);
    }

    let west = scene.get("skirt_west").unwrap();
    let east = scene.get("skirt_east").unwrap();
    for r in 0..rows {
        assert_eq!(west.vertex(r, 1), top.vertex(r, 0));
        assert_eq!(west.vertex(r, 0).z, -10.0);
        assert_eq!(east.vertex(r, 0), top.vertex(r, cols - 1));
        assert_eq!(east.vertex(r, 1).z, -10.0);
    }
}

#[test]
fn test_bottom_cap_spans_footprint() {
    let artifacts = seeded(3, 4, 2, 3);
    let bottom = artifacts.scene.get("bottom_surface").unwrap();
    assert_eq!(bottom.shape(), (2, 2));

    let xs: Vec<f32> = bottom.x().as_slice().to_vec();
    let ys: Vec<f32> = bottom.y().as_slice().to_vec();
    assert_eq!(xs, vec![20.0, -20.0, 20.0, -20.0]);
    assert_eq!(ys, vec![-10.0, -10.0, 10.0, 10.0]);
    assert!(bottom.z().as_slice().iter().all(|&z| z == -10.0));
}

#[test]
fn test_custom_base_elevation() {
    let config = MapConfig {
        down: -3.5,
        ..unit_config(2, 1, 2)
    };
    let image = TileImage::from_colors(2, 1, &[TileColor::new(1, 0, 0); 2]).unwrap();
    let artifacts = build_from_image(&config, image).unwrap();

    for surface in artifacts.scene.surfaces().iter().skip(1) {
        assert!(surface.z().as_slice().contains(&-3.5), "{}", surface.name());
    }
    // 20 × 10 footprint, 4.5 tall
    let mesh = artifacts.scene.to_triangle_mesh();
    assert_relative_eq!(mesh.signed_volume(), 900.0, max_relative = 1e-5);
}
