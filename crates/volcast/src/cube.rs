//! The proxy cube rasterized to start rays.

use glam::{Mat4, Vec3};

static VERTICES: [[f32; 3]; 8] = [
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
];

static INDICES: [u32; 36] = [
    // front
    0, 1, 2, 0, 2, 3, //
    // right
    1, 5, 6, 1, 6, 2, //
    // back
    5, 4, 7, 5, 7, 6, //
    // left
    4, 0, 3, 4, 3, 7, //
    // top
    2, 6, 7, 2, 7, 3, //
    // bottom
    4, 5, 1, 4, 1, 0,
];

/// A two-unit cube, corners at ±1 on each axis, with outward-facing
/// counter-clockwise triangles.
///
/// The model matrix of a [`VolumeGeometry`](volcast_core::VolumeGeometry)
/// scales this cube onto the volume's bounding box.
pub struct UnitCube;

impl UnitCube {
    /// Corner positions.
    pub fn vertices() -> &'static [[f32; 3]; 8] {
        &VERTICES
    }

    /// Triangle indices, two per face.
    pub fn indices() -> &'static [u32; 36] {
        &INDICES
    }

    /// Vertex buffer contents.
    pub fn vertex_bytes() -> &'static [u8] {
        bytemuck::cast_slice(&VERTICES)
    }

    /// Index buffer contents.
    pub fn index_bytes() -> &'static [u8] {
        bytemuck::cast_slice(&INDICES)
    }

    /// Corners after applying `model`.
    pub fn transformed_corners(model: Mat4) -> [Vec3; 8] {
        VERTICES.map(|v| model.transform_point3(Vec3::from_array(v)))
    }
}
