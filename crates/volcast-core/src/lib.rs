//! Core types for volcast.
//!
//! This crate provides the data model shared by the volume reader and the
//! ray-marching front end:
//! - [`ScalarVolume`], a regular grid of scalar samples with its metadata
//! - [`ElementType`] and the [`Element`] trait, with [`with_element_type!`]
//!   to dispatch generic code over the runtime element type
//! - [`ValueRange`] for mapping original intensities to the 8-bit texture domain
//! - [`VolumeGeometry`] for the model transform and bounding planes
//! - Configuration [`Options`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod element;
pub mod error;
pub mod geometry;
pub mod options;
pub mod range;
pub mod volume;

pub use element::{Element, ElementType};
pub use error::{Result, VolcastError};
pub use geometry::{VolumeGeometry, VolumeUniforms};
pub use options::Options;
pub use range::{RangeTracker, ValueRange};
pub use volume::ScalarVolume;

// Re-export glam types for convenience
pub use glam::{Mat3, Mat4, UVec3, Vec3};
