use glam::{Vec3, Vec4};
use rand::Rng;

/// Fixed set of points sampled once inside the unit ball.
///
/// `randoms` seed each point's oscillation frequency, phase and amplitude;
/// `colors` are picked uniformly from the configured palette.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub randoms: Vec<Vec4>,
    pub colors: Vec<[f32; 3]>,
}

impl PointCloud {
    pub fn generate<R: Rng + ?Sized>(count: usize, palette: &[[f32; 3]], rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut randoms = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(sample_unit_ball(rng));
            randoms.push(Vec4::new(rng.gen(), rng.gen(), rng.gen(), rng.gen()));
            let color = if palette.is_empty() {
                [1.0, 1.0, 1.0]
            } else {
                palette[rng.gen_range(0..palette.len())]
            };
            colors.push(color);
        }
        Self {
            positions,
            randoms,
            colors,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Uniform point inside the solid unit sphere.
///
/// A point is found by rejection sampling in the cube, then scaled by the cube
/// root of a uniform variate.
pub fn sample_unit_ball<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let p = loop {
        let p = Vec3::new(
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
        );
        let len_sq = p.length_squared();
        if len_sq <= 1.0 && len_sq > 0.0 {
            break p;
        }
    };
    p * rng.gen::<f32>().cbrt()
}
