// Host-side tests for the particle group transform, oscillation and clock.

use backdrop_core::constants::ELAPSED_WRAP_MS;
use backdrop_core::*;
use glam::{Vec2, Vec3, Vec4};
use std::f32::consts::TAU;

fn step(target: Vec2, elapsed: f64, rotate: bool) -> GroupStep {
    GroupStep {
        target,
        follow_strength: 0.5,
        smoothing: 0.1,
        elapsed,
        speed: 0.1,
        rotate,
    }
}

#[test]
fn group_eases_towards_scaled_target() {
    let mut group = ParticleGroup::default();
    group.update(&step(Vec2::new(1.0, -1.0), 0.0, true));
    assert!((group.position - Vec2::new(0.05, -0.05)).length() < 1e-6);
    for _ in 0..500 {
        group.update(&step(Vec2::new(1.0, -1.0), 0.0, true));
    }
    assert!((group.position - Vec2::new(0.5, -0.5)).length() < 1e-4);
}

#[test]
fn rotation_disabled_keeps_identity_rotation() {
    let mut group = ParticleGroup::default();
    for i in 0..100 {
        group.update(&step(Vec2::ZERO, i as f64 * 16.0, false));
    }
    assert_eq!(group.rotation, Vec3::ZERO);
    assert_eq!(group.model_matrix(), glam::Mat4::IDENTITY);
}

#[test]
fn rotation_follows_elapsed_time() {
    let mut group = ParticleGroup::default();
    group.update(&step(Vec2::ZERO, 1000.0, true));
    assert!((group.rotation.x - (0.2f32).sin() * 0.1).abs() < 1e-6);
    assert!((group.rotation.y - (0.5f32).cos() * 0.15).abs() < 1e-6);
    assert!((group.rotation.z - 0.001).abs() < 1e-6);
}

#[test]
fn z_rotation_stays_wrapped() {
    let mut group = ParticleGroup::default();
    let big = GroupStep {
        speed: 100.0,
        ..step(Vec2::ZERO, 0.0, true)
    };
    for _ in 0..1000 {
        group.update(&big);
        assert!(group.rotation.z >= 0.0 && group.rotation.z < TAU);
    }
}

#[test]
fn time_advances_per_frame() {
    let mut group = ParticleGroup::default();
    for _ in 0..60 {
        group.update(&step(Vec2::ZERO, 0.0, true));
    }
    assert!((group.time() - 0.1).abs() < 1e-5);
}

#[test]
fn oscillation_is_bounded() {
    for i in 0..50 {
        let r = Vec4::new(
            (i as f32 * 0.37).fract(),
            (i as f32 * 0.61).fract(),
            (i as f32 * 0.13).fract(),
            (i as f32 * 0.89).fract(),
        );
        for t in [0.0, 1.3, 42.0, 1000.5] {
            let o = oscillation_offset(r, t);
            assert!(o.abs().max_element() <= 1.5 + 1e-5);
        }
    }
}

#[test]
fn oscillation_at_zero_time_is_phase_only() {
    let r = Vec4::new(0.0, 0.0, 0.0, 0.25);
    let o = oscillation_offset(r, 0.0);
    assert!((o.x - (6.28f32 * 0.25).sin() * 0.1).abs() < 1e-6);
    assert!(o.y.abs() < 1e-6);
}

#[test]
fn point_size_shrinks_with_distance() {
    assert!((point_size(100.0, 1.0, 0.5, 20.0) - 5.0).abs() < 1e-6);
    assert!((point_size(100.0, 1.0, 1.0, 20.0) - 7.5).abs() < 1e-6);
    assert!(point_size(100.0, 0.0, 0.9, 40.0) < point_size(100.0, 0.0, 0.9, 20.0));
}

#[test]
fn clock_scales_and_wraps() {
    let mut clock = FrameClock::new(1000.0, 0.5);
    let t = clock.tick(1016.0);
    assert_eq!(t.delta_ms, 16.0);
    assert_eq!(t.elapsed, 8.0);
    assert_eq!(t.frame, 1);

    // timestamps going backwards never rewind
    let t = clock.tick(900.0);
    assert_eq!(t.delta_ms, 0.0);
    assert_eq!(t.elapsed, 8.0);

    let mut clock = FrameClock::new(0.0, 1.0);
    let t = clock.tick(ELAPSED_WRAP_MS + 10.0);
    assert!((t.elapsed - 10.0).abs() < 1e-6);
}

#[test]
fn plane_mesh_layout() {
    let mesh = PlaneMesh::grid(2);
    assert_eq!(mesh.vertices.len(), 9);
    assert_eq!(mesh.indices.len(), 24);
    let first = mesh.vertices[0];
    assert_eq!(first.position, [-0.5, 0.5, 0.0]);
    assert_eq!(first.uv, [0.0, 1.0]);
    let last = mesh.vertices[8];
    assert_eq!(last.position, [0.5, -0.5, 0.0]);
    assert_eq!(last.uv, [1.0, 0.0]);
    assert!(mesh.indices.iter().all(|&i| i < 9));
}

#[test]
fn sprite_color_stays_premultiplied_for_white_points() {
    let white = Vec3::ONE;
    // sweep time so the shimmer hits its positive peak somewhere
    for i in 0..64 {
        let time = i as f32 * 0.1;
        for uv in [Vec2::splat(0.5), Vec2::new(0.45, 0.55), Vec2::new(0.2, 0.5)] {
            let Some(c) = sprite_color(white, uv, time, 0.3) else {
                continue;
            };
            assert!(c.w > 0.0 && c.w <= 0.8);
            assert!(c.x <= c.w + 1e-6 && c.y <= c.w + 1e-6 && c.z <= c.w + 1e-6);
            assert!(c.x >= 0.0 && c.y >= 0.0 && c.z >= 0.0);
        }
    }
    let center = sprite_color(white, Vec2::splat(0.5), 0.0, 0.25).unwrap();
    assert!((center.w - 0.8).abs() < 1e-6);
    assert!((center.x - 0.8).abs() < 1e-6);
}

#[test]
fn sprite_outside_disc_is_discarded() {
    assert_eq!(sprite_color(Vec3::ONE, Vec2::new(0.0, 0.0), 0.0, 0.0), None);
    assert_eq!(sprite_color(Vec3::ONE, Vec2::new(1.0, 0.5), 0.0, 0.0), None);
}
