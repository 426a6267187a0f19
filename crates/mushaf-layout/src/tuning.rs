//! Empirical layout constants

use serde::{Deserialize, Serialize};

/// Tuning knobs for page planning and justification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTuning {
    /// Extra fraction added to the measured pitch
    pub pitch_inflation: f32,
    /// Minimum slack, as a fraction of the target width, before fillers are padded
    pub pad_threshold: f32,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            pitch_inflation: 0.02,
            pad_threshold: 0.01,
        }
    }
}
