//! Whole-pipeline properties of the grid packer.

use std::collections::BTreeSet;

use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tessera::algo::pack::{pack, pack_with_layout, Corner, LayoutRng, PackOptions, Polygon};
use tessera::io::UvFile;

const EPS: f64 = 1e-9;

/// Quads on randomly oriented vertical walls, plus a few tilted triangles.
fn random_polygons(n: usize, seed: u64) -> Vec<Polygon> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut next_loop = 0u32;
    let mut polygons = Vec::with_capacity(n);

    for i in 0..n {
        let origin = Point3::new(
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
            rng.gen_range(0.0..30.0),
        );
        let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let along = Vector3::new(angle.cos(), angle.sin(), 0.0);
        let normal = along.cross(&Vector3::z());

        let corners: Vec<Point3<f64>> = if i % 5 == 4 {
            let lean = Vector3::new(0.0, 0.0, 1.0) + normal * 0.3;
            vec![origin, origin + along * 2.0, origin + lean]
        } else {
            let w = rng.gen_range(0.2..4.0);
            let h = rng.gen_range(0.2..4.0);
            vec![
                origin,
                origin + along * w,
                origin + along * w + Vector3::z() * h,
                origin + Vector3::z() * h,
            ]
        };

        let corners = corners
            .into_iter()
            .map(|p| {
                next_loop += 1;
                Corner::new(next_loop * 3, p)
            })
            .collect();
        polygons.push(Polygon::new(normal * rng.gen_range(0.5..3.0), corners));
    }
    polygons
}

/// Keeps the input order and sends every polygon to one cell.
struct OneCell {
    row: usize,
    col: usize,
    picks: usize,
}

impl LayoutRng for OneCell {
    fn shuffle_order(&mut self, _order: &mut [usize]) {}

    fn pick(&mut self, _bound: usize) -> usize {
        self.picks += 1;
        if self.picks % 2 == 1 {
            self.row
        } else {
            self.col
        }
    }
}

fn rect(first_loop: u32, width: f64, height: f64) -> Polygon {
    Polygon::new(
        Vector3::new(0.0, -1.0, 0.0),
        vec![
            Corner::new(first_loop, Point3::new(0.0, 0.0, 0.0)),
            Corner::new(first_loop + 1, Point3::new(width, 0.0, 0.0)),
            Corner::new(first_loop + 2, Point3::new(width, 0.0, height)),
            Corner::new(first_loop + 3, Point3::new(0.0, 0.0, height)),
        ],
    )
}

#[test]
fn output_covers_exactly_the_input_loops() {
    for seed in 0..8 {
        let polygons = random_polygons(80, seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed + 100);
        let uvs = pack(&polygons, &PackOptions::default(), &mut rng).unwrap();

        let expected: BTreeSet<u32> = polygons
            .iter()
            .flat_map(|p| p.corners.iter().map(|c| c.loop_index))
            .collect();
        let actual: BTreeSet<u32> = uvs.loop_indices().collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn every_uv_stays_in_its_cell() {
    let options = PackOptions::default().with_grid(4, 6).with_scale_uv(0.125);
    let polygons = random_polygons(150, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let out = pack_with_layout(&polygons, &options, &mut rng).unwrap();

    let extent = options.grid_extent();
    for placement in &out.placements {
        let (row, col) = placement.slot.cell;
        let (u0, v0) = (col as f64 * options.scale_uv, row as f64 * options.scale_uv);

        for corner in &polygons[placement.polygon].corners {
            let uv = out.uvs.get(corner.loop_index).unwrap();
            assert!(uv.x >= u0 - EPS && uv.x <= u0 + options.scale_uv + EPS, "{:?}", uv);
            assert!(uv.y >= v0 - EPS && uv.y <= v0 + options.scale_uv + EPS, "{:?}", uv);
            assert!(uv.x <= extent.x + EPS && uv.y <= extent.y + EPS);
        }
    }
}

#[test]
fn aspect_ratio_is_preserved() {
    let mut rng = OneCell { row: 1, col: 2, picks: 0 };
    let out = pack_with_layout(&[rect(0, 10.0, 2.0)], &PackOptions::default(), &mut rng).unwrap();

    let placement = &out.placements[0];
    assert!((placement.footprint.x / placement.footprint.y - 5.0).abs() < EPS);
    assert!((placement.footprint.y - placement.footprint.x * 0.2).abs() < EPS);

    let (min, max) = out.uvs.bounding_box().unwrap();
    assert!((max.x - min.x - placement.footprint.x).abs() < EPS);
    assert!((max.y - min.y - placement.footprint.y).abs() < EPS);
    assert!((min.x - placement.slot.origin.x).abs() < EPS);
    assert!((min.y - placement.slot.origin.y).abs() < EPS);
}

#[test]
fn zero_width_polygon_gets_constant_u() {
    // Every corner shares the same projected x.
    let sliver = Polygon::new(
        Vector3::new(0.0, -1.0, 0.0),
        vec![
            Corner::new(0, Point3::new(3.0, 0.0, 0.0)),
            Corner::new(1, Point3::new(3.0, 0.0, 1.0)),
            Corner::new(2, Point3::new(3.0, 0.0, 2.0)),
        ],
    );
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let out = pack_with_layout(&[sliver], &PackOptions::default(), &mut rng).unwrap();

    let origin = out.placements[0].slot.origin;
    for (_, uv) in out.uvs.iter() {
        assert_eq!(uv.x, origin.x);
        assert!(uv.y.is_finite());
    }
}

#[test]
fn same_seed_gives_identical_output() {
    let polygons = random_polygons(200, 9);
    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let uvs = pack(&polygons, &PackOptions::default(), &mut rng).unwrap();
        serde_json::to_string(&UvFile::new(Some(seed), &uvs)).unwrap()
    };

    assert_eq!(run(1234), run(1234));
    assert_ne!(run(1234), run(4321));
}

#[test]
fn seven_polygons_in_one_cell() {
    let polygons: Vec<Polygon> = (0..7).map(|i| rect(i * 4, 1.0, 1.0)).collect();
    let mut rng = OneCell { row: 3, col: 0, picks: 0 };
    let out = pack_with_layout(&polygons, &PackOptions::default(), &mut rng).unwrap();

    assert_eq!(out.occupied_cells(), 1);
    for p in &out.placements {
        assert_eq!(p.slot.cell, (3, 0));
        assert_eq!(p.slot.subdiv, 3);
    }
    assert_eq!(out.placements[6].slot.slot, (2, 0));
    assert_eq!(out.placements[5].slot.slot, (1, 2));
}

#[test]
fn three_squares_follow_offset_formulas() {
    let options = PackOptions::default();
    let polygons: Vec<Polygon> = (0..3).map(|i| rect(i * 4, 1.0, 1.0)).collect();
    let mut rng = OneCell { row: 0, col: 0, picks: 0 };
    let out = pack_with_layout(&polygons, &options, &mut rng).unwrap();

    let subdiv = 2.0;
    let subcell = (options.scale_uv / subdiv) * (1.0 - options.cell_padding);
    let cell_offset = (options.scale_uv / subdiv) * options.cell_padding / 2.0;
    let inset = subcell * options.subcell_padding / 2.0;
    let size = subcell * (1.0 - options.subcell_padding);

    let expected = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
    for (p, &(col, row)) in out.placements.iter().zip(expected.iter()) {
        assert_eq!(p.slot.subdiv, 2);
        assert!((p.slot.origin.x - (cell_offset + col * subcell + inset)).abs() < EPS);
        assert!((p.slot.origin.y - (cell_offset + row * subcell + inset)).abs() < EPS);
        assert!((p.slot.size - size).abs() < EPS);
    }

    // The fourth sub-cell, (1, 1), stays empty.
    assert!(out.placements.iter().all(|p| p.slot.slot != (1, 1)));
    assert_eq!(out.uvs.len(), 12);
}
