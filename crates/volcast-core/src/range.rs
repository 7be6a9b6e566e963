//! Intensity ranges and the linear map into the 8-bit texture domain.

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// Closed `[min, max]` range of sample intensities, in original units.
///
/// A volume keeps the range of its raw samples after normalization so that
/// values in original units can still be mapped onto the normalized texture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Creates a range from its bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the range. Overflows to infinity for bounds near the ends
    /// of the `f64` domain.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true when the range cannot be used as a divisor, i.e. a flat
    /// volume or non-finite bounds.
    pub fn is_degenerate(&self) -> bool {
        !(self.min.is_finite() && self.max.is_finite() && self.max > self.min)
    }

    /// Returns whether `value` lies within the range.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Clamps `value` into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Maps `value` to `[0, 1]`. A degenerate range maps everything to 0.
    pub fn to_fraction(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        // Halved operands keep the differences finite over the whole f64 range.
        let half_span = self.max / 2.0 - self.min / 2.0;
        ((value / 2.0 - self.min / 2.0) / half_span).clamp(0.0, 1.0)
    }

    /// Inverse of [`ValueRange::to_fraction`].
    pub fn from_fraction(&self, fraction: f64) -> f64 {
        let fraction = fraction.clamp(0.0, 1.0);
        self.min * (1.0 - fraction) + self.max * fraction
    }

    /// Maps `value` onto the `[0, 255]` texture domain without rounding.
    pub fn to_texture_domain(&self, value: f64) -> f64 {
        255.0 * self.to_fraction(value)
    }

    /// Maps a texture-domain value back to original units.
    pub fn from_texture_domain(&self, value: f64) -> f64 {
        self.from_fraction(value / 255.0)
    }

    /// Quantizes `value` to the byte stored in a normalized volume.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn quantize(&self, value: f64) -> u8 {
        if self.is_degenerate() {
            return 0;
        }
        let scaled = 255.0 * self.to_fraction(value);
        scaled.round().clamp(0.0, 255.0) as u8
    }
}

/// Running minimum and maximum of a stream of elements.
///
/// Comparisons use the element's own ordering, so 64-bit integers are
/// compared exactly and only widened to `f64` once the scan is done.
/// Unordered values (NaN) are skipped.
#[derive(Debug, Clone, Copy)]
pub struct RangeTracker<T: Element> {
    bounds: Option<(T, T)>,
}

impl<T: Element> Default for RangeTracker<T> {
    fn default() -> Self {
        Self { bounds: None }
    }
}

impl<T: Element> RangeTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one element into the tracker.
    pub fn push(&mut self, value: T) {
        if value.partial_cmp(&value).is_none() {
            return;
        }
        match &mut self.bounds {
            None => self.bounds = Some((value, value)),
            Some((min, max)) => {
                if value < *min {
                    *min = value;
                }
                if value > *max {
                    *max = value;
                }
            }
        }
    }

    /// The range seen so far, or `None` if no ordered element was pushed.
    pub fn finish(&self) -> Option<ValueRange> {
        self.bounds
            .map(|(min, max)| ValueRange::new(min.to_f64(), max.to_f64()))
    }
}
