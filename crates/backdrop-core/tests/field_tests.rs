// Host-side tests for the velocity field: seeding, relaxation and injection.

use backdrop_core::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn seeded_values_fall_in_seed_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let field = VelocityField::seeded(16, 0.9, &mut rng);
    assert_eq!(field.data().len(), 16 * 16 * 4);
    for texel in field.data().chunks_exact(4) {
        for &v in &texel[..2] {
            assert!((-125.0..130.0).contains(&v), "seed value {} out of range", v);
        }
        // blue/alpha are never written
        assert_eq!(texel[2], 0.0);
        assert_eq!(texel[3], 0.0);
    }
}

#[test]
fn decay_scales_every_cell() {
    let mut field = VelocityField::new(4, 0.5);
    field.set(1, 2, Vec2::new(8.0, -4.0));
    field.set(3, 3, Vec2::new(1.0, 1.0));
    field.decay();
    assert_eq!(field.get(1, 2), Some(Vec2::new(4.0, -2.0)));
    assert_eq!(field.get(3, 3), Some(Vec2::new(0.5, 0.5)));
    assert_eq!(field.get(0, 0), Some(Vec2::ZERO));
}

#[test]
fn repeated_decay_converges_to_zero() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut field = VelocityField::seeded(8, 0.9, &mut rng);
    let start = field.norm();
    for _ in 0..200 {
        field.decay();
    }
    assert!(field.norm() < start * 1e-8);
}

#[test]
fn inject_at_cell_raises_center_and_leaves_far_cells() {
    // grid 10, decay 0.9, pointer on cell (5,5) moving right, radius 3
    let mut field = VelocityField::new(10, 0.9);
    field.decay();
    field.inject(5.0, 5.0, 1.0, 0.0, 3.0, 1.0);

    let center = field.get(5, 5).unwrap();
    assert!(center.x > 0.0);
    assert_eq!(center.y, 0.0);
    assert_eq!(field.get(9, 9), Some(Vec2::ZERO));
}

#[test]
fn inject_falloff_is_clamped_and_radius_exclusive() {
    let mut field = VelocityField::new(10, 0.9);
    field.inject(5.0, 5.0, 1.0, 0.0, 3.0, 1.0);
    // distance 0 uses the clamp: 100 * 1 * 10
    assert!((field.get(5, 5).unwrap().x - 1000.0).abs() < 1e-3);
    // distance 1: falloff 3
    assert!((field.get(6, 5).unwrap().x - 300.0).abs() < 1e-3);
    // distance exactly 3 is outside
    assert_eq!(field.get(8, 5), Some(Vec2::ZERO));
}

#[test]
fn inject_negates_vertical_component() {
    let mut field = VelocityField::new(6, 0.9);
    field.inject(2.0, 2.0, 0.0, 0.5, 2.0, 0.1);
    let v = field.get(2, 3).unwrap();
    assert_eq!(v.x, 0.0);
    assert!(v.y < 0.0);
}

#[test]
fn zero_velocity_injection_changes_nothing() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut field = VelocityField::seeded(10, 0.9, &mut rng);
    let before = field.data().to_vec();
    field.inject(5.0, 5.0, 0.0, 0.0, 2.0, 0.1);
    assert_eq!(field.data(), &before[..]);
}

#[test]
fn dirty_flag_is_taken_once() {
    let mut field = VelocityField::new(4, 0.9);
    assert!(field.take_dirty());
    assert!(!field.take_dirty());
    field.decay();
    assert!(field.is_dirty());
}

#[test]
fn out_of_range_cells_are_ignored() {
    let mut field = VelocityField::new(4, 0.9);
    assert_eq!(field.get(4, 0), None);
    field.set(0, 9, Vec2::ONE);
    assert_eq!(field.norm(), 0.0);
}
