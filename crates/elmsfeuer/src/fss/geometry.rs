use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One grid point of the deformable plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Rest coordinate on the undeformed grid.
    pub position: Vec3,
    /// Oscillation center, fixed at build time.
    pub anchor: Vec3,
    /// Per-axis oscillation seed.
    pub v0: Vec3,
    /// Phase in `[0, 2π)`.
    pub time: f32,
    pub gradient: f32,
}

impl Vertex {
    /// Animated position for the current phase.
    pub fn displaced(&self, amplitude: [f32; 3]) -> Vec3 {
        self.anchor + self.v0 * Vec3::from_array(amplitude) * self.time.sin()
    }
}

/// Column-major `(cols + 1) × (rows + 1)` grid centered on the origin, `y` up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
    pub segments: u32,
    pub slices: u32,
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<[u32; 3]>,
}

/// Largest grid the scene builder will allocate.
pub const MAX_VERTICES: usize = 1 << 20;

impl PlaneGeometry {
    /// `None` when the count does not fit in `usize`.
    pub fn vertex_count(segments: u32, slices: u32) -> Option<usize> {
        let cols = usize::try_from(segments).ok()?.checked_add(1)?;
        let rows = usize::try_from(slices).ok()?.checked_add(1)?;
        cols.checked_mul(rows)
    }

    /// Rest positions in vertex index order.
    pub fn grid_positions(width: f32, height: f32, segments: u32, slices: u32) -> Vec<Vec3> {
        let offset_x = width * -0.5;
        let offset_y = height * 0.5;
        let segment_width = width / segments as f32;
        let slice_height = height / slices as f32;
        let mut positions = Vec::with_capacity(Self::vertex_count(segments, slices).unwrap_or(0));
        for x in 0..=segments {
            for y in 0..=slices {
                positions.push(Vec3::new(
                    offset_x + x as f32 * segment_width,
                    offset_y - y as f32 * slice_height,
                    0.0,
                ));
            }
        }
        positions
    }

    /// Two triangles per cell, indices into the column-major grid.
    ///
    /// `None` when the grid has more vertices than a `u32` index can address.
    pub fn grid_triangles(segments: u32, slices: u32) -> Option<Vec<[u32; 3]>> {
        u32::try_from(Self::vertex_count(segments, slices)?).ok()?;
        // Every index is below the vertex count, so this cannot overflow.
        let stride = slices + 1;
        let index = |x: u32, y: u32| x * stride + y;
        let mut triangles = Vec::with_capacity(2 * segments as usize * slices as usize);
        for x in 0..segments {
            for y in 0..slices {
                let v0 = index(x, y);
                let v1 = index(x, y + 1);
                let v2 = index(x + 1, y);
                let v3 = index(x + 1, y + 1);
                triangles.push([v0, v1, v2]);
                triangles.push([v2, v1, v3]);
            }
        }
        Some(triangles)
    }
}
