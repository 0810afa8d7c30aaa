// Host-side tests for configuration defaults, JSON options and colour parsing.

use backdrop_core::constants::{MAX_GRID, MAX_PARTICLES};
use backdrop_core::*;

#[test]
fn defaults_validate_once_image_is_set() {
    let cfg = EffectConfig::default();
    assert_eq!(cfg.validate(), Err(ConfigError::MissingImage));
    let cfg = EffectConfig::with_image("bg.jpg");
    assert_eq!(cfg.validate(), Ok(()));
    assert_eq!(cfg.grid, 40);
    assert_eq!(cfg.relaxation, 0.9);
    assert_eq!(cfg.particle_count, 400);
}

#[test]
fn camel_case_json_options() {
    let json = r##"{
        "imageSrc": "photo.png",
        "grid": 24,
        "mouseRadius": 0.3,
        "particleColors": ["#f00", "#00ff00"],
        "disableRotation": true
    }"##;
    let cfg: EffectConfig = serde_json::from_str(json).unwrap();
    assert_eq!(cfg.image_src, "photo.png");
    assert_eq!(cfg.grid, 24);
    assert!(cfg.disable_rotation);
    // untouched fields keep their defaults
    assert_eq!(cfg.particle_speed, 0.1);
    assert!((cfg.influence_radius_cells() - 7.2).abs() < 1e-5);
    assert_eq!(
        cfg.palette_rgb().unwrap(),
        vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
    );
}

#[test]
fn structural_equality_detects_changes() {
    let a = EffectConfig::with_image("a.png");
    let mut b = a.clone();
    assert_eq!(a, b);
    b.particle_colors.push("#123456".into());
    assert_ne!(a, b);
}

#[test]
fn invalid_values_are_rejected() {
    let mut cfg = EffectConfig::with_image("a.png");
    cfg.relaxation = 1.0;
    assert_eq!(cfg.validate(), Err(ConfigError::Relaxation(1.0)));

    let mut cfg = EffectConfig::with_image("a.png");
    cfg.grid = 1;
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::Grid {
            value: 1,
            max: MAX_GRID
        })
    );

    let mut cfg = EffectConfig::with_image("a.png");
    cfg.camera_distance = 0.0;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::NotPositive { field: "cameraDistance", .. })
    ));

    let mut cfg = EffectConfig::with_image("a.png");
    cfg.mouse_force = f32::NAN;
    assert!(matches!(cfg.validate(), Err(ConfigError::NotFinite { .. })));
}

#[test]
fn oversized_grid_and_particle_count_are_rejected() {
    let mut cfg = EffectConfig::with_image("a.png");
    cfg.grid = MAX_GRID;
    assert_eq!(cfg.validate(), Ok(()));

    for grid in [9000, 70_000] {
        cfg.grid = grid;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::Grid {
                value: grid,
                max: MAX_GRID
            })
        );
    }

    let mut cfg = EffectConfig::with_image("a.png");
    cfg.particle_count = MAX_PARTICLES + 1;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::ParticleCount { max: MAX_PARTICLES, .. })
    ));
    cfg.particle_count = 0;
    assert_eq!(cfg.validate(), Ok(()));
}

#[test]
fn bad_palette_entry_reports_index() {
    let mut cfg = EffectConfig::with_image("a.png");
    cfg.particle_colors = vec!["#ffffff".into(), "#zzz".into()];
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::Palette { index: 1, source: ColorError::Digit(_) })
    ));
}

#[test]
fn empty_palette_falls_back_to_white() {
    let mut cfg = EffectConfig::with_image("a.png");
    cfg.particle_colors.clear();
    assert_eq!(cfg.palette_rgb().unwrap(), vec![[1.0, 1.0, 1.0]; 3]);
}

#[test]
fn hex_parsing() {
    assert_eq!(hex_to_rgb("#ffffff"), Ok([1.0, 1.0, 1.0]));
    assert_eq!(hex_to_rgb("000"), Ok([0.0, 0.0, 0.0]));
    assert_eq!(hex_to_rgb("#f80"), hex_to_rgb("#ff8800"));
    let [r, g, b] = hex_to_rgb("#336699").unwrap();
    assert!((r - 0x33 as f32 / 255.0).abs() < 1e-6);
    assert!((g - 0x66 as f32 / 255.0).abs() < 1e-6);
    assert!((b - 0x99 as f32 / 255.0).abs() < 1e-6);
}

#[test]
fn hex_parsing_errors() {
    assert!(matches!(hex_to_rgb("#ffff"), Err(ColorError::Length(_))));
    assert!(matches!(hex_to_rgb(""), Err(ColorError::Length(_))));
    assert!(matches!(hex_to_rgb("#+12345"), Err(ColorError::Digit(_))));
    assert!(matches!(hex_to_rgb("#gg0000"), Err(ColorError::Digit(_))));
}

#[test]
fn rejected_update_does_not_ask_for_remount() {
    let current = EffectConfig::with_image("a.png");
    assert_eq!(current.remount_needed(&current.clone()), Ok(false));

    let mut next = current.clone();
    next.particle_count = 50;
    assert_eq!(current.remount_needed(&next), Ok(true));

    next.relaxation = 2.0;
    assert_eq!(
        current.remount_needed(&next),
        Err(ConfigError::Relaxation(2.0))
    );
    next = EffectConfig::default();
    assert_eq!(current.remount_needed(&next), Err(ConfigError::MissingImage));
}
