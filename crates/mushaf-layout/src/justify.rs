//! Per-line justification decisions

use mushaf_text::LineMetrics;

use crate::corpus::Justification;
use crate::tuning::LayoutTuning;

/// How a line's glyphs are adjusted to its target width
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// Glyphs are drawn at their shaped advances
    Natural,
    /// The whole line is scaled down uniformly
    Shrink { ratio: f32 },
    /// Every filler glyph advances by `filler_advance` font units
    PadFillers { filler_advance: f32 },
}

/// Outcome of justifying one line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub adjustment: Adjustment,
    /// Offset from the line's right edge to the first glyph, in font units
    /// of the target width
    pub lead: f32,
    /// Target width in font units
    pub target_width: f32,
    /// Width occupied by the glyphs after adjustment, in target font units
    pub content_width: f32,
}

impl LineFit {
    /// Uniform scale applied to the line
    pub fn ratio(&self) -> f32 {
        match self.adjustment {
            Adjustment::Shrink { ratio } => ratio,
            _ => 1.0,
        }
    }

    /// Padded advance for fillers, if any
    pub fn filler_advance(&self) -> Option<f32> {
        match self.adjustment {
            Adjustment::PadFillers { filler_advance } => Some(filler_advance),
            _ => None,
        }
    }
}

/// Chooses between shrinking, padding fillers, centering and leaving a line
/// at its natural width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JustificationDecider {
    pad_threshold: f32,
}

impl JustificationDecider {
    pub fn new(tuning: &LayoutTuning) -> Self {
        Self {
            pad_threshold: tuning.pad_threshold,
        }
    }

    pub fn decide(
        &self,
        metrics: &LineMetrics,
        target_width: f32,
        justify: bool,
        mode: Justification,
    ) -> LineFit {
        let advance = metrics.advance_width;
        let slack = target_width - metrics.text_width;

        let (adjustment, content_width) = if advance > target_width && advance > 0.0 {
            (Adjustment::Shrink { ratio: target_width / advance }, target_width)
        } else if justify
            && mode == Justification::Justify
            && metrics.filler_count > 0
            && slack > 0.0
            && slack > self.pad_threshold * target_width
        {
            let filler_advance = slack / metrics.filler_count as f32;
            (Adjustment::PadFillers { filler_advance }, target_width)
        } else {
            (Adjustment::Natural, advance)
        };

        let lead = match mode {
            Justification::Center => ((target_width - content_width) / 2.0).max(0.0),
            Justification::Justify => 0.0,
        };

        tracing::trace!(?adjustment, lead, target_width, advance, "line fit");

        LineFit {
            adjustment,
            lead,
            target_width,
            content_width,
        }
    }
}

impl Default for JustificationDecider {
    fn default() -> Self {
        Self::new(&LayoutTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(advance_width: f32, text_width: f32, filler_count: usize) -> LineMetrics {
        LineMetrics {
            advance_width,
            text_width,
            filler_count,
        }
    }

    #[test]
    fn test_overlong_line_shrinks() {
        let fit = JustificationDecider::default().decide(
            &metrics(12000.0, 11000.0, 4),
            10000.0,
            true,
            Justification::Justify,
        );
        assert_eq!(fit.adjustment, Adjustment::Shrink { ratio: 10000.0 / 12000.0 });
        assert_eq!(fit.filler_advance(), None);
        assert_eq!(fit.content_width, 10000.0);
    }

    #[test]
    fn test_short_line_pads_fillers() {
        let fit = JustificationDecider::default().decide(
            &metrics(9000.0, 8000.0, 4),
            10000.0,
            true,
            Justification::Justify,
        );
        assert_eq!(fit.filler_advance(), Some(500.0));
        assert_eq!(fit.ratio(), 1.0);
        assert_eq!(fit.lead, 0.0);
    }

    #[test]
    fn test_slack_below_threshold_stays_natural() {
        // Text is 99.5% of the target, under the 1% threshold
        let fit = JustificationDecider::default().decide(
            &metrics(9950.0, 9950.0, 2),
            10000.0,
            true,
            Justification::Justify,
        );
        assert_eq!(fit.adjustment, Adjustment::Natural);
    }

    #[test]
    fn test_no_fillers_stays_natural() {
        let fit = JustificationDecider::default().decide(
            &metrics(5000.0, 5000.0, 0),
            10000.0,
            true,
            Justification::Justify,
        );
        assert_eq!(fit.adjustment, Adjustment::Natural);
    }

    #[test]
    fn test_justify_off_stays_natural() {
        let fit = JustificationDecider::default().decide(
            &metrics(9000.0, 8000.0, 4),
            10000.0,
            false,
            Justification::Justify,
        );
        assert_eq!(fit.adjustment, Adjustment::Natural);
    }

    #[test]
    fn test_center_line_leads_half_slack() {
        let fit = JustificationDecider::default().decide(
            &metrics(6000.0, 5500.0, 2),
            10000.0,
            true,
            Justification::Center,
        );
        assert_eq!(fit.adjustment, Adjustment::Natural);
        assert_eq!(fit.lead, 2000.0);
    }

    #[test]
    fn test_shrunk_center_line_has_no_lead() {
        let fit = JustificationDecider::default().decide(
            &metrics(14000.0, 13000.0, 2),
            10000.0,
            true,
            Justification::Center,
        );
        assert_eq!(fit.lead, 0.0);
        assert!(fit.ratio() < 1.0);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let loose = JustificationDecider::new(&LayoutTuning {
            pad_threshold: 0.0,
            ..LayoutTuning::default()
        });
        let fit = loose.decide(&metrics(9950.0, 9950.0, 2), 10000.0, true, Justification::Justify);
        assert_eq!(fit.filler_advance(), Some(25.0));
    }
}
