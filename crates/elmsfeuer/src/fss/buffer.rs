use bytemuck::{Pod, Zeroable};

use super::geometry::Vertex;
use super::scene::{Light, Scene};

/// Per-vertex attributes packed for a vertex buffer (48 bytes).
/// Field order matches the shader's `FssVertex` input.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub time: f32,
    // 16 bytes
    pub anchor: [f32; 3],
    pub gradient: f32,
    // 32 bytes
    pub v0: [f32; 3],
    pub _pad: f32,
}

impl From<&Vertex> for GpuVertex {
    fn from(v: &Vertex) -> Self {
        Self {
            position: v.position.to_array(),
            time: v.time,
            anchor: v.anchor.to_array(),
            gradient: v.gradient,
            v0: v.v0.to_array(),
            _pad: 0.0,
        }
    }
}

/// One light in the uniform light array (48 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuLight {
    pub position: [f32; 3],
    pub speed: f32,
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
}

impl From<&Light> for GpuLight {
    fn from(l: &Light) -> Self {
        Self {
            position: l.position.to_array(),
            speed: l.speed as f32,
            ambient: l.ambient.to_array(),
            diffuse: l.diffuse.to_array(),
        }
    }
}

impl Scene {
    pub fn gpu_vertices(&self) -> Vec<GpuVertex> {
        self.vertices().iter().map(GpuVertex::from).collect()
    }

    pub fn gpu_lights(&self) -> Vec<GpuLight> {
        self.lights.iter().map(GpuLight::from).collect()
    }

    /// Flattened triangle indices for an index buffer.
    pub fn gpu_indices(&self) -> Vec<u32> {
        self.mesh.geometry.triangles.iter().flatten().copied().collect()
    }
}
