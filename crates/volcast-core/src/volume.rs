//! In-memory scalar volumes.

use std::fmt;

use glam::{UVec3, Vec3};

use crate::element::{iter_native, Element, ElementType};
use crate::error::{Result, VolcastError};
use crate::range::{RangeTracker, ValueRange};
use crate::with_element_type;

/// A regular grid of scalar samples together with its metadata.
///
/// Samples are stored as raw native-endian bytes tagged by
/// [`ScalarVolume::element_type`], in x-fastest order. After
/// [`ScalarVolume::normalize_to_uint8`] they hold one byte per voxel and the
/// element type is [`ElementType::Uint8`], while [`ScalarVolume::value_range`]
/// still reports the range of the original samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarVolume {
    dimensions: UVec3,
    origin: Vec3,
    spacing: Vec3,
    element_type: ElementType,
    value_range: ValueRange,
    samples: Vec<u8>,
    normalized: bool,
}

impl ScalarVolume {
    /// Builds a volume from typed samples, computing their range.
    ///
    /// # Errors
    ///
    /// Returns [`VolcastError::SizeMismatch`] if `values` does not hold one
    /// element per voxel.
    pub fn from_elements<T: Element>(
        dimensions: UVec3,
        origin: Vec3,
        spacing: Vec3,
        values: &[T],
    ) -> Result<Self> {
        let mut tracker = RangeTracker::new();
        for &v in values {
            tracker.push(v);
        }
        Self::from_raw_parts(
            dimensions,
            origin,
            spacing,
            T::TYPE,
            tracker.finish().unwrap_or_default(),
            bytemuck::cast_slice(values).to_vec(),
        )
    }

    /// Builds a volume from already-decoded native-endian bytes and a range
    /// computed by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`VolcastError::SizeMismatch`] if `samples` is not exactly one
    /// element of `element_type` per voxel, or [`VolcastError::HeaderFormat`]
    /// if the byte size of `dimensions` overflows `usize`.
    pub fn from_raw_parts(
        dimensions: UVec3,
        origin: Vec3,
        spacing: Vec3,
        element_type: ElementType,
        value_range: ValueRange,
        samples: Vec<u8>,
    ) -> Result<Self> {
        let expected = voxel_count(dimensions)
            .and_then(|count| count.checked_mul(element_type.size_bytes()))
            .ok_or_else(|| VolcastError::header("volume dimensions overflow"))?;
        if samples.len() != expected {
            return Err(VolcastError::SizeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            dimensions,
            origin,
            spacing,
            element_type,
            value_range,
            samples,
            normalized: false,
        })
    }

    /// Number of voxels along each axis.
    pub fn dimensions(&self) -> UVec3 {
        self.dimensions
    }

    pub fn nx(&self) -> usize {
        self.dimensions.x as usize
    }

    pub fn ny(&self) -> usize {
        self.dimensions.y as usize
    }

    pub fn nz(&self) -> usize {
        self.dimensions.z as usize
    }

    /// Physical position of voxel `(0, 0, 0)`.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Physical distance between adjacent voxel centers.
    pub fn spacing(&self) -> Vec3 {
        self.spacing
    }

    /// Current element type of [`ScalarVolume::samples`].
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Range of the original samples, before any normalization.
    pub fn value_range(&self) -> ValueRange {
        self.value_range
    }

    /// Raw sample bytes.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Total number of voxels.
    pub fn element_count(&self) -> usize {
        self.samples.len() / self.element_type.size_bytes()
    }

    /// Returns true if the volume holds no voxels.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Copies the samples out as `T`, or `None` if `T` is not the current
    /// element type.
    pub fn samples_as<T: Element>(&self) -> Option<Vec<T>> {
        (T::TYPE == self.element_type).then(|| iter_native::<T>(&self.samples).collect())
    }

    /// Widens every sample to `f64`.
    pub fn values_f64(&self) -> Vec<f64> {
        with_element_type!(self.element_type, T => {
            iter_native::<T>(&self.samples).map(Element::to_f64).collect()
        })
    }

    /// Linear index of voxel `(i, j, k)`.
    pub fn flatten_index(&self, i: u32, j: u32, k: u32) -> usize {
        i as usize + self.nx() * (j as usize + self.ny() * k as usize)
    }

    /// Sample at voxel `(i, j, k)`, widened to `f64`.
    pub fn value_at(&self, i: u32, j: u32, k: u32) -> Option<f64> {
        if i >= self.dimensions.x || j >= self.dimensions.y || k >= self.dimensions.z {
            return None;
        }
        let index = self.flatten_index(i, j, k);
        Some(with_element_type!(self.element_type, T => {
            crate::element::read_native::<T>(&self.samples, index).to_f64()
        }))
    }

    /// Rescales every sample linearly into `[0, 255]` and stores one byte
    /// per voxel.
    ///
    /// The sample at the range minimum maps to 0 and the one at the maximum
    /// to 255. A flat volume becomes all zeros. The element type becomes
    /// [`ElementType::Uint8`]; the value range is left as it was.
    ///
    /// Calling this on an already normalized volume does nothing, since its
    /// bytes no longer live in the units of the value range.
    pub fn normalize_to_uint8(&mut self) {
        if self.normalized {
            return;
        }
        let range = self.value_range;
        if range.is_degenerate() {
            log::warn!(
                "degenerate value range [{}, {}], normalizing to zero",
                range.min,
                range.max
            );
        }
        let normalized = with_element_type!(self.element_type, T => {
            quantize_samples::<T>(&self.samples, range)
        });
        self.samples = normalized;
        self.element_type = ElementType::Uint8;
        self.normalized = true;
    }

    /// Returns whether [`ScalarVolume::normalize_to_uint8`] has been applied.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }
}

impl fmt::Display for ScalarVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Dimensions: {} {} {}",
            self.dimensions.x, self.dimensions.y, self.dimensions.z
        )?;
        writeln!(
            f,
            "Origin: {} {} {}",
            self.origin.x, self.origin.y, self.origin.z
        )?;
        writeln!(
            f,
            "Spacing: {} {} {}",
            self.spacing.x, self.spacing.y, self.spacing.z
        )?;
        writeln!(f, "Data type: {}", self.element_type)?;
        write!(
            f,
            "Range: {} {}",
            self.value_range.min, self.value_range.max
        )
    }
}

fn quantize_samples<T: Element>(samples: &[u8], range: ValueRange) -> Vec<u8> {
    iter_native::<T>(samples)
        .map(|v| range.quantize(v.to_f64()))
        .collect()
}

fn voxel_count(dimensions: UVec3) -> Option<usize> {
    (dimensions.x as usize)
        .checked_mul(dimensions.y as usize)?
        .checked_mul(dimensions.z as usize)
}
