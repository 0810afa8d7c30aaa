use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed unit plane in the XY plane, `segments × segments` quads.
///
/// Vertices span [-0.5, 0.5]² and the UV origin is the bottom-left corner.
#[derive(Clone, Debug)]
pub struct PlaneMesh {
    pub vertices: Vec<PlaneVertex>,
    pub indices: Vec<u32>,
}

impl PlaneMesh {
    pub fn grid(segments: u32) -> Self {
        let segments = segments.max(1);
        let row = segments + 1;
        let mut vertices = Vec::with_capacity((row * row) as usize);
        for iy in 0..row {
            let v = iy as f32 / segments as f32;
            for ix in 0..row {
                let u = ix as f32 / segments as f32;
                vertices.push(PlaneVertex {
                    position: [u - 0.5, 0.5 - v, 0.0],
                    uv: [u, 1.0 - v],
                });
            }
        }
        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for iy in 0..segments {
            for ix in 0..segments {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = ix + 1 + row * (iy + 1);
                let d = ix + 1 + row * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        Self { vertices, indices }
    }
}
