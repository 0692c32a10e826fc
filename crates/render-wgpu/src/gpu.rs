use bytemuck::{Pod, Zeroable};
use prism_common::DemoKind;
use prism_scene::{Frame, MeshBuffers};
use wgpu::util::DeviceExt;

use crate::cube_grid::CubeGridRenderer;
use crate::pyramid::PyramidRenderer;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub(crate) const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.15,
    a: 1.0,
};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

impl Vertex {
    pub(crate) const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
        ],
    };
}

/// Interleave a mesh into GPU vertices.
pub(crate) fn interleave(mesh: &MeshBuffers) -> Vec<Vertex> {
    mesh.positions
        .iter()
        .zip(&mesh.normals)
        .map(|(&position, &normal)| Vertex { position, normal })
        .collect()
}

/// Static vertex + index buffers uploaded once.
pub(crate) struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub(crate) fn upload(device: &wgpu::Device, label: &str, mesh: &MeshBuffers) -> Self {
        let vertices = interleave(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertex_buffer")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_index_buffer")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// A uniform buffer plus the bind group exposing it at group 0, binding 0.
pub(crate) struct UniformBinding {
    pub buffer: wgpu::Buffer,
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl UniformBinding {
    pub(crate) fn new<T: Pod>(
        device: &wgpu::Device,
        label: &str,
        initial: &T,
        visibility: wgpu::ShaderStages,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_uniform_buffer")),
            contents: bytemuck::bytes_of(initial),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label}_bind_group_layout")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label}_bind_group")),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
        }
    }

    pub(crate) fn write<T: Pod>(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }
}

/// Depth-tested, back-face-culled triangle pipeline shared by both demos.
pub(crate) fn mesh_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader_source: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    buffers: &[wgpu::VertexBufferLayout<'_>],
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{label}_shader")),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label}_pipeline_layout")),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label}_pipeline")),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

pub(crate) fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

/// Clear colour and depth, then hand back the pass for drawing.
pub(crate) fn begin_main_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    target: &wgpu::TextureView,
    depth: &wgpu::TextureView,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("main_pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        ..Default::default()
    })
}

/// wgpu renderer for whichever demo is running.
pub enum WgpuRenderer {
    CubeGrid(CubeGridRenderer),
    Pyramid(PyramidRenderer),
}

impl WgpuRenderer {
    /// Build the pipelines for `kind`. `max_instances` sizes the cube
    /// instance buffer and is ignored for the pyramid.
    pub fn new(
        device: &wgpu::Device,
        kind: DemoKind,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        max_instances: usize,
    ) -> Self {
        tracing::debug!(%kind, width, height, "creating wgpu renderer");
        match kind {
            DemoKind::Camera => WgpuRenderer::CubeGrid(CubeGridRenderer::new(
                device,
                surface_format,
                width,
                height,
                max_instances,
            )),
            DemoKind::Lighting => {
                WgpuRenderer::Pyramid(PyramidRenderer::new(device, surface_format, width, height))
            }
        }
    }

    pub fn kind(&self) -> DemoKind {
        match self {
            WgpuRenderer::CubeGrid(_) => DemoKind::Camera,
            WgpuRenderer::Pyramid(_) => DemoKind::Lighting,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        match self {
            WgpuRenderer::CubeGrid(r) => r.resize(device, width, height),
            WgpuRenderer::Pyramid(r) => r.resize(device, width, height),
        }
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        match self {
            WgpuRenderer::CubeGrid(r) => r.surface_format(),
            WgpuRenderer::Pyramid(r) => r.surface_format(),
        }
    }

    /// Render one frame into `view`. Frames for the other demo are skipped.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &Frame,
    ) {
        match (self, frame) {
            (WgpuRenderer::CubeGrid(r), Frame::Camera(f)) => r.render(device, queue, view, f),
            (WgpuRenderer::Pyramid(r), Frame::Lighting(f)) => r.render(device, queue, view, f),
            _ => tracing::warn!(
                renderer = %self.kind(),
                frame = %frame.kind(),
                "frame does not match renderer, skipping"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_scene::{cube_mesh, pyramid_mesh};

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::LAYOUT.array_stride, 24);
    }

    #[test]
    fn interleave_keeps_order() {
        let mesh = pyramid_mesh();
        let vertices = interleave(&mesh);
        assert_eq!(vertices.len(), 18);
        assert_eq!(vertices[6].position, mesh.positions[6]);
        assert_eq!(vertices[6].normal, mesh.normals[6]);
    }

    #[test]
    fn cube_indices_fit_u16() {
        let mesh = cube_mesh();
        assert!(mesh.indices.iter().all(|&i| (i as usize) < interleave(&mesh).len()));
    }
}
