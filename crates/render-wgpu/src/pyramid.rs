use bytemuck::{Pod, Zeroable};
use prism_scene::{LightingFrame, pyramid_mesh};

use crate::gpu::{self, GpuMesh, UniformBinding, Vertex};
use crate::shaders;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    world_view_projection: [[f32; 4]; 4],
    world_inverse_transpose: [[f32; 4]; 4],
    world: [[f32; 4]; 4],
    color_front: [f32; 4],
    color_back: [f32; 4],
    light_world_position: [f32; 4],
    view_world_position: [f32; 4],
    /// xyz direction, w shininess
    light_direction: [f32; 4],
    /// inner cos, outer cos, ambient, unused
    spot: [f32; 4],
}

impl From<&LightingFrame> for Uniforms {
    fn from(frame: &LightingFrame) -> Self {
        Self {
            world_view_projection: frame.object.world_view_projection.to_cols_array_2d(),
            world_inverse_transpose: frame.object.world_inverse_transpose.to_cols_array_2d(),
            world: frame.object.world.to_cols_array_2d(),
            color_front: frame.color_front.to_array(),
            color_back: frame.color_back.to_array(),
            light_world_position: frame.light_world_position.extend(1.0).to_array(),
            view_world_position: frame.view_world_position.extend(1.0).to_array(),
            light_direction: frame.light_direction.extend(frame.shininess).to_array(),
            spot: [frame.spot_inner_cos, frame.spot_outer_cos, frame.ambient, 0.0],
        }
    }
}

/// Draws the lit pyramid.
pub struct PyramidRenderer {
    pipeline: wgpu::RenderPipeline,
    uniforms: UniformBinding,
    mesh: GpuMesh,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl PyramidRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniforms = UniformBinding::new(
            device,
            "pyramid",
            &Uniforms::zeroed(),
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );

        let pipeline = gpu::mesh_pipeline(
            device,
            "pyramid",
            shaders::PYRAMID_SHADER,
            &uniforms.layout,
            &[Vertex::LAYOUT],
            surface_format,
        );

        let mesh = GpuMesh::upload(device, "pyramid", &pyramid_mesh());

        Self {
            pipeline,
            uniforms,
            mesh,
            depth_texture: gpu::create_depth_texture(device, width, height),
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = gpu::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame of the lighting demo.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &LightingFrame,
    ) {
        self.uniforms.write(queue, &Uniforms::from(frame));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("pyramid_encoder"),
        });

        {
            let mut pass = gpu::begin_main_pass(&mut encoder, view, &self.depth_texture);
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniforms.bind_group, &[]);
            pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(self.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.mesh.index_count, 0, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
        tracing::trace!(rotation = frame.rotation_degrees, "pyramid frame submitted");
    }
}
