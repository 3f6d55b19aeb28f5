//! Flat-surface-shader scene construction: a subdivided plane with
//! per-vertex oscillation state, lit by two or three moving lights.

pub mod buffer;
pub mod fuzz;
pub mod geometry;
pub mod scene;

pub use buffer::{GpuLight, GpuVertex};
pub use fuzz::{CarryOver, FuzzRanges, VertexFuzz};
pub use geometry::{MAX_VERTICES, PlaneGeometry, Vertex};
pub use scene::{
    Light, LightRole, Material, Mesh, Scene, build_scene, build_scene_with_thread_rng,
};
