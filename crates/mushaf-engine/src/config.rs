//! Render configuration

use mushaf_layout::LayoutTuning;
use mushaf_render::{default_foreground, Color};
use serde::{Deserialize, Serialize};

/// Per-call page render options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Color glyphs from the font's tajweed lookups
    pub tajweed: bool,
    /// Justify body lines to their target width
    pub justify: bool,
    /// Font size multiplier, clamped to `[0.5, 2.0]`
    pub font_scale: f32,
    /// Background as `0xRRGGBBAA`
    pub background_color: u32,
    /// Text color as `0xRRGGBBAA`, derived from the background when unset
    pub text_color: Option<u32>,
    /// Explicit font size in pixels, overrides `font_scale`
    pub font_size: Option<f32>,
    /// Paint every glyph and layer in the text color
    pub use_foreground: bool,
    /// Explicit baseline pitch in pixels
    pub line_pitch: Option<f32>,
    /// Extra space above the first line, in pitch units
    pub top_margin_lines: Option<f32>,
    pub tuning: LayoutTuning,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tajweed: true,
            justify: true,
            font_scale: 1.0,
            background_color: 0xFFFF_FFFF,
            text_color: None,
            font_size: None,
            use_foreground: false,
            line_pitch: None,
            top_margin_lines: None,
            tuning: LayoutTuning::default(),
        }
    }
}

impl RenderConfig {
    pub fn background(&self) -> Color {
        Color::from_rgba_u32(self.background_color)
    }

    pub fn foreground(&self) -> Color {
        default_foreground(self.background(), self.text_color.map(Color::from_rgba_u32))
    }
}

/// Options for drawing free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Font size in pixels
    pub font_size: f32,
    /// Background as `0xRRGGBBAA`
    pub background_color: u32,
    /// Text color as `0xRRGGBBAA`, derived from the background when unset
    pub text_color: Option<u32>,
    pub tajweed: bool,
    /// Pad inter-word fillers to `line_width`
    pub justify: bool,
    /// Target width in pixels, the buffer width when unset
    pub line_width: Option<f32>,
    pub use_foreground: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_size: 48.0,
            background_color: 0xFFFF_FFFF,
            text_color: None,
            tajweed: true,
            justify: false,
            line_width: None,
            use_foreground: false,
        }
    }
}

impl TextConfig {
    pub fn background(&self) -> Color {
        Color::from_rgba_u32(self.background_color)
    }

    pub fn foreground(&self) -> Color {
        default_foreground(self.background(), self.text_color.map(Color::from_rgba_u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let config = RenderConfig::default();
        assert!(config.tajweed);
        assert!(config.justify);
        assert_eq!(config.font_scale, 1.0);
        assert_eq!(config.background(), Color::WHITE);
        assert_eq!(config.foreground(), Color::BLACK);
    }

    #[test]
    fn test_dark_background_foreground() {
        let config = RenderConfig {
            background_color: 0x1E1E1EFF,
            ..RenderConfig::default()
        };
        assert_eq!(config.foreground(), Color::WHITE);

        let explicit = RenderConfig {
            text_color: Some(0xFF0000FF),
            ..config
        };
        assert_eq!(explicit.foreground(), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_json_partial_config() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"justify": false, "tuning": {"pitch_inflation": 0.05}}"#).unwrap();
        assert!(!config.justify);
        assert!(config.tajweed);
        assert_eq!(config.tuning.pitch_inflation, 0.05);
        assert_eq!(config.tuning.pad_threshold, 0.01);
    }

    #[test]
    fn test_text_defaults() {
        let config = TextConfig::default();
        assert_eq!(config.font_size, 48.0);
        assert!(!config.justify);
        assert_eq!(config.foreground(), Color::BLACK);
    }
}
