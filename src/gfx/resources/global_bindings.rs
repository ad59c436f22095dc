//! Global uniform bindings for camera and light data
//!
//! Per-frame state shared by every object in the room, bound to slot 0 in
//! the render pipeline.

use crate::{
    config::LightConfig,
    gfx::camera::CameraUniform,
    wgpu_utils::{binding_types, UniformBuffer},
};

/// Global uniform buffer content.
/// MUST match the GlobalUniform struct in shader.wgsl exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    light_position: [f32; 3],
    light_intensity: f32,
    light_color: [f32; 3],
    _padding: f32,
    ambient: [f32; 4],
}
// 16 + 64 + 16 + 16 + 16 = 128 bytes

impl GlobalUniform {
    pub fn new(camera: CameraUniform, light: &LightConfig) -> Self {
        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_position: light.position,
            light_intensity: light.intensity,
            light_color: light.color,
            _padding: 0.0,
            ambient: [light.ambient[0], light.ambient[1], light.ambient[2], 1.0],
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUniform>;

/// Writes camera and light data for this frame
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    light: &LightConfig,
) {
    ubo.update_content(queue, GlobalUniform::new(camera, light));
}

/// Layout and bind group for the global uniform buffer
pub struct GlobalBindings {
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let layout = binding_types::single_uniform_layout(device, "Globals Bind Group Layout");
        let bind_group = binding_types::single_uniform_bind_group(
            device,
            &layout,
            ubo.binding_resource(),
            "Global Bind Group",
        );
        Self { layout, bind_group }
    }

    /// Used when creating render pipelines that read the global uniforms
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 128);
        assert_eq!(std::mem::size_of::<GlobalUniform>() % 16, 0);
    }

    #[test]
    fn test_light_fields_packed() {
        let light = LightConfig {
            position: [1.0, 2.0, 3.0],
            color: [0.5, 0.5, 0.5],
            intensity: 2.0,
            ambient: [0.1, 0.2, 0.3],
        };
        let uniform = GlobalUniform::new(CameraUniform::default(), &light);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&uniform));
        assert_eq!(&floats[20..24], &[1.0, 2.0, 3.0, 2.0]);
        assert_eq!(&floats[24..27], &[0.5, 0.5, 0.5]);
        assert_eq!(&floats[28..32], &[0.1, 0.2, 0.3, 1.0]);
    }
}
