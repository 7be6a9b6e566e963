//! A volume prepared for ray marching.

use std::path::Path;

use glam::{Mat3, Mat4, UVec3, Vec3};
use volcast_core::{Options, Result, ScalarVolume, ValueRange, VolumeGeometry, VolumeUniforms};

use crate::noise::jitter_noise;
use crate::threshold::ThresholdControl;

/// A loaded volume together with the geometry and options used to render it.
///
/// This is what a rendering front end holds on to: the normalized bytes to
/// upload as a single-channel 3D texture, the original value range for the
/// threshold control, and the model matrix and AABB planes for the shader.
#[derive(Debug, Clone)]
pub struct RaycastVolume {
    volume: ScalarVolume,
    geometry: VolumeGeometry,
    options: Options,
}

impl RaycastVolume {
    /// Loads a VTK structured-points file and prepares it per `options`.
    pub fn load(path: impl AsRef<Path>, options: &Options) -> Result<Self> {
        let volume = volcast_vtk::load(path)?;
        Ok(Self::from_volume(volume, options))
    }

    /// Wraps an already loaded volume.
    pub fn from_volume(volume: ScalarVolume, options: &Options) -> Self {
        let mut this = Self {
            geometry: VolumeGeometry::from_volume(&volume),
            volume,
            options: options.clone(),
        };
        if options.normalize_on_load {
            this.normalize();
        }
        log::info!("volume ready for ray marching:\n{}", this.volume);
        this
    }

    /// Replaces the volume with the one at `path`.
    ///
    /// On error the current volume is kept unchanged.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> Result<()> {
        *self = Self::load(path, &self.options)?;
        Ok(())
    }

    /// Rescales the samples to 8 bits. Does nothing once the volume is
    /// normalized.
    pub fn normalize(&mut self) {
        self.volume.normalize_to_uint8();
    }

    /// Returns whether the samples hold one normalized byte per voxel.
    pub fn is_normalized(&self) -> bool {
        self.volume.is_normalized()
    }

    pub fn volume(&self) -> &ScalarVolume {
        &self.volume
    }

    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Texture contents: one byte per voxel once normalized.
    pub fn texture_data(&self) -> &[u8] {
        self.volume.samples()
    }

    /// Texture size in voxels.
    pub fn dimensions(&self) -> UVec3 {
        self.volume.dimensions()
    }

    /// Range of the original intensities.
    pub fn range(&self) -> ValueRange {
        self.volume.value_range()
    }

    pub fn extent(&self) -> Vec3 {
        self.geometry.extent()
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.geometry.model_transform(self.options.shift_to_origin)
    }

    pub fn top(&self) -> Vec3 {
        self.geometry.top(self.options.shift_to_origin)
    }

    pub fn bottom(&self) -> Vec3 {
        self.geometry.bottom(self.options.shift_to_origin)
    }

    /// Normal matrix for the given view matrix.
    pub fn normal_matrix(&self, view: Mat4) -> Mat3 {
        self.geometry
            .normal_matrix(view, self.options.shift_to_origin)
    }

    /// Uniform block with `ModelMatrix`, `top` and `bottom`.
    pub fn uniforms(&self) -> VolumeUniforms {
        self.geometry.uniforms(self.options.shift_to_origin)
    }

    /// Threshold control over the original range, at the configured
    /// initial percentage.
    pub fn threshold_control(&self) -> ThresholdControl {
        ThresholdControl::new(self.range(), self.options.initial_threshold_percent)
    }

    /// Jitter noise for a viewport, seeded from the options.
    pub fn jitter_noise(&self, width: u32, height: u32) -> Vec<u8> {
        jitter_noise(width, height, self.options.noise_seed)
    }
}
