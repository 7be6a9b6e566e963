//! volcast: load volumetric data and prepare it for GPU ray marching.
//!
//! Volumes are read from VTK legacy structured-points files, rescaled to one
//! byte per voxel, and fitted into a normalized bounding box whose longest
//! side is one unit.
//!
//! # Quick Start
//!
//! ```no_run
//! use volcast::*;
//!
//! fn main() -> Result<()> {
//!     init();
//!
//!     let volume = RaycastVolume::load("head.vtk", &Options::default())?;
//!
//!     // Upload as an R8 3D texture of this size
//!     let _size = volume.dimensions();
//!     let _texels = volume.texture_data();
//!
//!     // Bind as ModelMatrix, top and bottom
//!     let _uniforms = volume.uniforms();
//!
//!     // Map the user's threshold onto the normalized texture
//!     let mut threshold = volume.threshold_control();
//!     threshold.set_intensity(300.0);
//!     let _value = threshold.shader_value();
//!
//!     Ok(())
//! }
//! ```

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod cube;
pub mod noise;
pub mod raycast_volume;
pub mod threshold;

pub use cube::UnitCube;
pub use noise::jitter_noise;
pub use raycast_volume::RaycastVolume;
pub use threshold::ThresholdControl;

// Re-export core types
pub use volcast_core::{
    element::{Element, ElementType},
    error::{Result, VolcastError},
    geometry::{VolumeGeometry, VolumeUniforms},
    options::Options,
    range::ValueRange,
    volume::ScalarVolume,
    Mat3, Mat4, UVec3, Vec3,
};

// Re-export the file format
pub use volcast_vtk::{load, read_from, save, write_to, Encoding, Header};

/// Installs the `env_logger` backend for the `log` facade.
///
/// Logging is configured through `RUST_LOG`. Calling this more than once, or
/// after another logger was installed, has no effect.
pub fn init() {
    if env_logger::try_init().is_ok() {
        log::debug!("volcast logging initialized");
    }
}
