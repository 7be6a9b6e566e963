//! Bounding geometry of a volume in normalized model space.
//!
//! The ray marcher draws a two-unit cube (corners at ±1) and marches through
//! the axis-aligned box spanned by [`VolumeGeometry::bottom`] and
//! [`VolumeGeometry::top`]. This module computes the transform that fits that
//! cube to the physical proportions of a volume, with the longest side scaled
//! to one unit.

use glam::{Mat3, Mat4, UVec3, Vec3};

use crate::volume::ScalarVolume;

/// Geometry derived from the dimensions, spacing and origin of a volume.
///
/// Every quantity is recomputed from the inputs on demand.
///
/// Spacing must be positive on at least one axis; an all-zero spacing has no
/// meaningful extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeGeometry {
    dimensions: UVec3,
    spacing: Vec3,
    origin: Vec3,
}

impl VolumeGeometry {
    /// Creates the geometry of a grid with its origin at zero.
    pub fn new(dimensions: UVec3, spacing: Vec3) -> Self {
        Self {
            dimensions,
            spacing,
            origin: Vec3::ZERO,
        }
    }

    /// Sets the physical origin used by the shifted variants.
    #[must_use]
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Geometry of a loaded volume.
    pub fn from_volume(volume: &ScalarVolume) -> Self {
        Self::new(volume.dimensions(), volume.spacing()).with_origin(volume.origin())
    }

    pub fn dimensions(&self) -> UVec3 {
        self.dimensions
    }

    pub fn spacing(&self) -> Vec3 {
        self.spacing
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Size of the grid in physical units, `dimensions * spacing`.
    pub fn physical_extent(&self) -> Vec3 {
        self.dimensions.as_vec3() * self.spacing
    }

    /// The largest physical side length; the divisor that normalizes the extent.
    pub fn scale_factor(&self) -> f32 {
        self.physical_extent().abs().max_element()
    }

    /// Extent of the bounding box with the longest side equal to 1.
    pub fn extent(&self) -> Vec3 {
        self.physical_extent() / self.scale_factor()
    }

    /// Origin expressed in normalized model units.
    fn origin_offset(&self) -> Vec3 {
        self.origin / self.scale_factor()
    }

    /// Model matrix scaling the two-unit cube to the volume extent.
    ///
    /// With `shift`, the volume is also translated by its origin so that the
    /// physical origin lands on the world origin.
    pub fn model_transform(&self, shift: bool) -> Mat4 {
        let scale = Mat4::from_scale(0.5 * self.extent());
        if shift {
            Mat4::from_translation(-self.origin_offset()) * scale
        } else {
            scale
        }
    }

    /// Upper corner of the AABB, i.e. the top plane intercept on each axis.
    pub fn top(&self, shift: bool) -> Vec3 {
        let t = self.extent() / 2.0;
        if shift {
            t - self.origin_offset()
        } else {
            t
        }
    }

    /// Lower corner of the AABB, i.e. the bottom plane intercept on each axis.
    pub fn bottom(&self, shift: bool) -> Vec3 {
        let b = -self.extent() / 2.0;
        if shift {
            b - self.origin_offset()
        } else {
            b
        }
    }

    /// Normal matrix for `view * model`: the inverse transpose of its
    /// upper-left 3x3 block.
    pub fn normal_matrix(&self, view: Mat4, shift: bool) -> Mat3 {
        Mat3::from_mat4(view * self.model_transform(shift))
            .inverse()
            .transpose()
    }

    /// Uniform block for the ray-marching shader.
    pub fn uniforms(&self, shift: bool) -> VolumeUniforms {
        VolumeUniforms {
            model_matrix: self.model_transform(shift).to_cols_array_2d(),
            top: self.top(shift).to_array(),
            _padding0: 0.0,
            bottom: self.bottom(shift).to_array(),
            _padding1: 0.0,
        }
    }
}

/// GPU-compatible volume uniforms (`ModelMatrix`, `top`, `bottom`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VolumeUniforms {
    /// Column-major model matrix.
    pub model_matrix: [[f32; 4]; 4],
    /// Top plane intercepts.
    pub top: [f32; 3],
    /// Padding for alignment.
    pub _padding0: f32,
    /// Bottom plane intercepts.
    pub bottom: [f32; 3],
    /// Padding for alignment.
    pub _padding1: f32,
}

impl Default for VolumeUniforms {
    fn default() -> Self {
        VolumeGeometry::new(UVec3::ONE, Vec3::ONE).uniforms(false)
    }
}
