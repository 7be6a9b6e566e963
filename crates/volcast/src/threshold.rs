//! Isosurface threshold control.
//!
//! The threshold is shown to the user in original intensity units and as a
//! percentage of the value range, while the shader compares it against
//! samples of the normalized texture.

use volcast_core::ValueRange;

/// A threshold kept consistent across intensity, percentage and texture
/// domains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdControl {
    range: ValueRange,
    intensity: f64,
}

impl ThresholdControl {
    /// Creates a control over `range`, starting at `percent` of the range.
    pub fn new(range: ValueRange, percent: f64) -> Self {
        let mut control = Self {
            range,
            intensity: range.min,
        };
        control.set_percent(percent);
        control
    }

    /// Range of original intensities the threshold moves within.
    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Threshold in original intensity units.
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Sets the threshold in original units, clamped to the range.
    pub fn set_intensity(&mut self, intensity: f64) {
        self.intensity = self.range.clamp(intensity);
    }

    /// Threshold as a percentage of the range.
    pub fn percent(&self) -> f64 {
        100.0 * self.range.to_fraction(self.intensity)
    }

    /// Sets the threshold as a percentage of the range, clamped to `[0, 100]`.
    pub fn set_percent(&mut self, percent: f64) {
        self.intensity = self.range.from_fraction(percent / 100.0);
    }

    /// Threshold in the `[0, 255]` domain of the normalized samples.
    pub fn texture_value(&self) -> f64 {
        self.range.to_texture_domain(self.intensity)
    }

    /// Threshold as sampled from an 8-bit normalized texture, in `[0, 1]`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn shader_value(&self) -> f32 {
        self.range.to_fraction(self.intensity) as f32
    }
}
