//! Displacement-mapped image plane.

use crate::decode::LoadedImage;
use crate::helpers::{create_texture_2d, single_target_pass, uniform_entry, write_texture_2d};
use backdrop_core::constants::{FIELD_CHANNELS, WARP_LOOKUP_SCALE};
use backdrop_core::{Dispose, FrameSnapshot, PlaneMesh, PlaneVertex};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WarpUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// x: uv offset per unit of field value
    pub params: [f32; 4],
}

impl WarpUniforms {
    pub fn from_snapshot(snapshot: &FrameSnapshot) -> Self {
        Self {
            view_proj: snapshot.warp_view_proj.to_cols_array_2d(),
            model: snapshot.warp_model.to_cols_array_2d(),
            params: [WARP_LOOKUP_SCALE, 0.0, 0.0, 0.0],
        }
    }
}

const IMAGE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
const FIELD_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;

pub struct ImageWarpPass {
    pipeline: wgpu::RenderPipeline,
    bgl: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    sampler: wgpu::Sampler,
    field_tex: wgpu::Texture,
    field_view: wgpu::TextureView,
    image_tex: wgpu::Texture,
    image_view: wgpu::TextureView,
    grid: u32,
}

impl ImageWarpPass {
    /// Build the pass for a `grid × grid` field. A transparent placeholder is
    /// bound as the image until [`set_image`](Self::set_image) is called.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        grid: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("warp_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::WARP_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("warp_bgl"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                // read with textureLoad, no sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
            ],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("warp_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        };
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("warp_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
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

        let mesh = PlaneMesh::grid(grid.saturating_sub(1));
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("warp_vb"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("warp_ib"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("warp_uniforms"),
            size: std::mem::size_of::<WarpUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("warp_image_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let (field_tex, field_view) = create_texture_2d(
            device,
            "warp_field",
            grid,
            grid,
            FIELD_FORMAT,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        let (image_tex, image_view) = upload_image(device, queue, &LoadedImage::blank());
        let bind_group = make_bind_group(
            device,
            &bgl,
            &uniform_buffer,
            &image_view,
            &sampler,
            &field_view,
        );

        Self {
            pipeline,
            bgl,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            sampler,
            field_tex,
            field_view,
            image_tex,
            image_view,
            grid,
        }
    }

    /// Replace the bound image; the previous texture is destroyed. Images
    /// larger than the device's 2D texture limit are downscaled first.
    pub fn set_image(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, image: LoadedImage) {
        let image = image.fit_within(device.limits().max_texture_dimension_2d);
        let (tex, view) = upload_image(device, queue, &image);
        let old = std::mem::replace(&mut self.image_tex, tex);
        self.image_view = view;
        self.bind_group = make_bind_group(
            device,
            &self.bgl,
            &self.uniform_buffer,
            &self.image_view,
            &self.sampler,
            &self.field_view,
        );
        old.destroy();
        log::info!("[warp] image {}x{} bound", image.width, image.height);
    }

    /// Upload RGBA f32 field texels; data of the wrong length is rejected.
    pub fn upload_field(&self, queue: &wgpu::Queue, data: &[f32]) {
        let expected = FIELD_CHANNELS * (self.grid * self.grid) as usize;
        if data.len() != expected {
            log::warn!(
                "[warp] field upload of {} floats, expected {}",
                data.len(),
                expected
            );
            return;
        }
        write_texture_2d(
            queue,
            &self.field_tex,
            (FIELD_CHANNELS * std::mem::size_of::<f32>()) as u32,
            bytemuck::cast_slice(data),
        );
    }

    pub fn prepare(&self, queue: &wgpu::Queue, snapshot: &FrameSnapshot) {
        let uniforms = WarpUniforms::from_snapshot(snapshot);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        load: wgpu::LoadOp<wgpu::Color>,
    ) {
        let mut rpass = single_target_pass(encoder, "warp_pass", view, load);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

impl Dispose for ImageWarpPass {
    fn dispose(self) {
        self.image_tex.destroy();
        self.field_tex.destroy();
        self.uniform_buffer.destroy();
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

fn upload_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    image: &LoadedImage,
) -> (wgpu::Texture, wgpu::TextureView) {
    let (tex, view) = create_texture_2d(
        device,
        "warp_image",
        image.width,
        image.height,
        IMAGE_FORMAT,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    write_texture_2d(queue, &tex, 4, &image.rgba);
    (tex, view)
}

fn make_bind_group(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    uniforms: &wgpu::Buffer,
    image_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    field_view: &wgpu::TextureView,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("warp_bg"),
        layout: bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(image_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(field_view),
            },
        ],
    })
}
