//! Particle cloud drawn as instanced screen-sized quads.
//!
//! WebGPU has no sized point primitive, so each point expands a unit quad in
//! clip space by its pixel size, computed in the vertex stage from the same
//! formula the oscillation helpers in `backdrop_core::motion` describe.

use crate::helpers::{single_target_pass, uniform_entry};
use backdrop_core::{Dispose, EffectConfig, FrameSnapshot, PointCloud};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub time: f32,
    pub spread: f32,
    pub base_size: f32,
    pub size_randomness: f32,
    pub _pad: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub random: [f32; 4],
    pub color: [f32; 3],
}

/// Per-mount constants of the particle material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleStyle {
    pub spread: f32,
    pub base_size: f32,
    pub size_randomness: f32,
}

impl ParticleStyle {
    pub fn from_config(config: &EffectConfig) -> Self {
        Self {
            spread: config.particle_spread,
            base_size: config.particle_base_size,
            size_randomness: config.size_randomness,
        }
    }
}

pub fn instances_from_cloud(cloud: &PointCloud) -> Vec<ParticleInstance> {
    cloud
        .positions
        .iter()
        .zip(&cloud.randoms)
        .zip(&cloud.colors)
        .map(|((p, r), c)| ParticleInstance {
            position: p.to_array(),
            random: r.to_array(),
            color: *c,
        })
        .collect()
}

/// Number of instances that fit in one vertex buffer of `max_buffer_size` bytes.
pub fn max_instances(max_buffer_size: u64) -> usize {
    let per_instance = std::mem::size_of::<ParticleInstance>() as u64;
    usize::try_from(max_buffer_size / per_instance).unwrap_or(usize::MAX)
}

impl ParticleUniforms {
    pub fn new(snapshot: &FrameSnapshot, style: &ParticleStyle, resolution: (u32, u32)) -> Self {
        Self {
            projection: snapshot.particle_projection.to_cols_array_2d(),
            view: snapshot.particle_view.to_cols_array_2d(),
            model: snapshot.particle_model.to_cols_array_2d(),
            resolution: [resolution.0.max(1) as f32, resolution.1.max(1) as f32],
            time: snapshot.particle_time,
            spread: style.spread,
            base_size: style.base_size,
            size_randomness: style.size_randomness,
            _pad: [0.0; 2],
        }
    }
}

pub struct ParticlePass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_count: u32,
    style: ParticleStyle,
}

impl ParticlePass {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        cloud: &PointCloud,
        style: ParticleStyle,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::PARTICLES_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particles_uniforms"),
            size: std::mem::size_of::<ParticleUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Quad corners for two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particles_quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let mut instances = instances_from_cloud(cloud);
        let limit = max_instances(device.limits().max_buffer_size);
        if instances.len() > limit {
            log::warn!(
                "[particles] {} points exceed the buffer limit, drawing {}",
                instances.len(),
                limit
            );
            instances.truncate(limit);
        }
        let instance_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particles_instance_vb"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("particles_bgl"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("particles_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particles_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: per-point data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 28,
                        shader_location: 3,
                    },
                ],
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particles_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            quad_vb,
            instance_vb,
            instance_count: instances.len() as u32,
            style,
        }
    }

    pub fn style(&self) -> &ParticleStyle {
        &self.style
    }

    /// `resolution` is the render target size in pixels.
    pub fn prepare(&self, queue: &wgpu::Queue, snapshot: &FrameSnapshot, resolution: (u32, u32)) {
        let uniforms = ParticleUniforms::new(snapshot, &self.style, resolution);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        load: wgpu::LoadOp<wgpu::Color>,
    ) {
        let mut rpass = single_target_pass(encoder, "particles_pass", view, load);
        if self.instance_count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
        rpass.draw(0..6, 0..self.instance_count);
    }
}

impl Dispose for ParticlePass {
    fn dispose(self) {
        self.uniform_buffer.destroy();
        self.quad_vb.destroy();
        self.instance_vb.destroy();
    }
}
