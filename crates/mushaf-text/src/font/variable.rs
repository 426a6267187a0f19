//! Variable font axes
//!
//! Justification stretch is expressed by the shaper as normalized
//! coordinates on the font's first two design axes. Painting needs them in
//! user space, which is what ttf-parser accepts.

use ttf_parser::Tag;

/// Variation axis definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariationAxis {
    /// 4-character axis tag
    pub tag: Tag,
    /// Minimum value
    pub min_value: f32,
    /// Default value
    pub default_value: f32,
    /// Maximum value
    pub max_value: f32,
}

impl VariationAxis {
    /// Create a new axis
    pub fn new(tag: Tag, min: f32, default: f32, max: f32) -> Self {
        Self {
            tag,
            min_value: min,
            default_value: default,
            max_value: max,
        }
    }

    /// Get axis tag as string
    pub fn tag_string(&self) -> String {
        String::from_utf8_lossy(&self.tag.to_bytes()).to_string()
    }

    /// Clamp value to axis range
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min_value, self.max_value)
    }

    /// Map a normalized `[-1, 1]` coordinate to a user-space value
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let n = normalized.clamp(-1.0, 1.0);
        let value = if n >= 0.0 {
            self.default_value + n * (self.max_value - self.default_value)
        } else {
            self.default_value + n * (self.default_value - self.min_value)
        };
        self.clamp(value)
    }
}

impl From<ttf_parser::VariationAxis> for VariationAxis {
    fn from(axis: ttf_parser::VariationAxis) -> Self {
        Self::new(axis.tag, axis.min_value, axis.def_value, axis.max_value)
    }
}
