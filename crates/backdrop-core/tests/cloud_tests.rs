// Host-side tests for point cloud generation.

use backdrop_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn points_lie_inside_unit_ball() {
    let mut rng = StdRng::seed_from_u64(42);
    let cloud = PointCloud::generate(2000, &[[1.0, 0.0, 0.0]], &mut rng);
    assert_eq!(cloud.len(), 2000);
    for p in &cloud.positions {
        assert!(p.length() <= 1.0 + 1e-6, "point {:?} outside ball", p);
    }
}

#[test]
fn randoms_are_in_unit_interval() {
    let mut rng = StdRng::seed_from_u64(5);
    let cloud = PointCloud::generate(500, &[[1.0, 1.0, 1.0]], &mut rng);
    assert_eq!(cloud.randoms.len(), 500);
    for r in &cloud.randoms {
        for c in r.to_array() {
            assert!((0.0..1.0).contains(&c));
        }
    }
}

#[test]
fn white_palette_gives_white_points() {
    let palette = parse_palette(&["#ffffff"], &[]).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let cloud = PointCloud::generate(300, &palette, &mut rng);
    assert!(cloud.colors.iter().all(|c| *c == [1.0, 1.0, 1.0]));
}

#[test]
fn colors_are_drawn_from_palette() {
    let palette = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let mut rng = StdRng::seed_from_u64(1);
    let cloud = PointCloud::generate(600, &palette, &mut rng);
    for c in &cloud.colors {
        assert!(palette.contains(c));
    }
    // every entry shows up with this many draws
    for p in &palette {
        assert!(cloud.colors.contains(p));
    }
}

#[test]
fn empty_count_gives_empty_cloud() {
    let mut rng = StdRng::seed_from_u64(0);
    let cloud = PointCloud::generate(0, &[[1.0, 1.0, 1.0]], &mut rng);
    assert!(cloud.is_empty());
}

#[test]
fn sampling_is_deterministic_for_a_seed() {
    let a = PointCloud::generate(50, &[[1.0, 1.0, 1.0]], &mut StdRng::seed_from_u64(77));
    let b = PointCloud::generate(50, &[[1.0, 1.0, 1.0]], &mut StdRng::seed_from_u64(77));
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.randoms, b.randoms);
}
