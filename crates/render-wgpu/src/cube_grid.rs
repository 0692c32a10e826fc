use bytemuck::{Pod, Zeroable};
use prism_scene::{CameraFrame, CubeInstance, cube_mesh};

use crate::gpu::{self, GpuMesh, UniformBinding, Vertex};
use crate::shaders;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    light_dir: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    wvp_0: [f32; 4],
    wvp_1: [f32; 4],
    wvp_2: [f32; 4],
    wvp_3: [f32; 4],
    wit_0: [f32; 4],
    wit_1: [f32; 4],
    wit_2: [f32; 4],
    wit_3: [f32; 4],
    color: [f32; 4],
}

impl InstanceData {
    const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceData>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
            7 => Float32x4,
            8 => Float32x4,
            9 => Float32x4,
            10 => Float32x4,
        ],
    };
}

impl From<&CubeInstance> for InstanceData {
    fn from(instance: &CubeInstance) -> Self {
        let wvp = instance.transforms.world_view_projection.to_cols_array_2d();
        let wit = instance.transforms.world_inverse_transpose.to_cols_array_2d();
        Self {
            wvp_0: wvp[0],
            wvp_1: wvp[1],
            wvp_2: wvp[2],
            wvp_3: wvp[3],
            wit_0: wit[0],
            wit_1: wit[1],
            wit_2: wit[2],
            wit_3: wit[3],
            color: instance.color.to_array(),
        }
    }
}

/// Draws the cube grid as one instanced call.
pub struct CubeGridRenderer {
    pipeline: wgpu::RenderPipeline,
    uniforms: UniformBinding,
    mesh: GpuMesh,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl CubeGridRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        max_instances: usize,
    ) -> Self {
        let uniforms = UniformBinding::new(
            device,
            "cube_grid",
            &Uniforms {
                light_dir: [0.0, 1.0, 0.0, 0.0],
            },
            wgpu::ShaderStages::FRAGMENT,
        );

        let pipeline = gpu::mesh_pipeline(
            device,
            "cube_grid",
            shaders::CUBE_GRID_SHADER,
            &uniforms.layout,
            &[Vertex::LAYOUT, InstanceData::LAYOUT],
            surface_format,
        );

        let mesh = GpuMesh::upload(device, "cube", &cube_mesh());

        // Instance buffer (pre-allocated for the whole grid)
        let max_instances = u32::try_from(max_instances.max(1)).unwrap_or(u32::MAX);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cube_instance_buffer"),
            size: (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            uniforms,
            mesh,
            instance_buffer,
            max_instances,
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

    /// Render one frame of the camera demo.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &CameraFrame,
    ) {
        self.uniforms.write(
            queue,
            &Uniforms {
                light_dir: frame.light_direction.extend(0.0).to_array(),
            },
        );

        if frame.instances.len() > self.max_instances as usize {
            tracing::warn!(
                requested = frame.instances.len(),
                capacity = self.max_instances,
                "cube instances exceed buffer capacity, truncating"
            );
        }
        let instances: Vec<InstanceData> = frame
            .instances
            .iter()
            .take(self.max_instances as usize)
            .map(InstanceData::from)
            .collect();

        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("cube_grid_encoder"),
        });

        {
            let mut pass = gpu::begin_main_pass(&mut encoder, view, &self.depth_texture);
            if !instances.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.uniforms.bind_group, &[]);
                pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                pass.set_index_buffer(self.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.mesh.index_count, 0, 0..instances.len() as u32);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        tracing::trace!(instances = instances.len(), "cube grid frame submitted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_common::{DemoKind, PrismConfig};
    use prism_scene::{Demo, Frame};

    #[test]
    fn instance_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<InstanceData>(), 9 * 16);
        assert_eq!(InstanceData::LAYOUT.attributes.len(), 9);
        assert_eq!(InstanceData::LAYOUT.attributes[8].offset, 8 * 16);
    }

    #[test]
    fn instance_data_copies_columns() {
        let Frame::Camera(frame) = Demo::new(DemoKind::Camera, &PrismConfig::default()).frame(1.0)
        else {
            panic!("expected camera frame");
        };
        let instance = &frame.instances[0];
        let data = InstanceData::from(instance);
        let cols = instance.transforms.world_view_projection.to_cols_array_2d();
        assert_eq!(data.wvp_3, cols[3]);
        // normal matrix of a translation: identity upper 3x3
        let wit_x = glam::Vec4::from_array(data.wit_0).truncate();
        assert!(wit_x.abs_diff_eq(glam::Vec3::X, 1e-6));
        assert_eq!(data.color, instance.color.to_array());
    }
}
