use crate::classifier::label::DeficiencyLabel;
use crate::color::ChannelStatistics;

/// Cut-off points for the deficiency decision tree.
///
/// Values are on the 8-bit HSV scale produced by `color::rgb_to_hsv`: hue in
/// half-degrees [0, 180), saturation and value in [0, 255]. The defaults are
/// only meaningful under that hue scaling.
///
/// # Fields
/// - `low_sat_val`   — "dull" cut-off shared by the saturation and value
///                     checks of the nitrogen rule, and the saturation check
///                     of the potassium rule
/// - `hue_threshold` — splits the phosphorus (above) and potassium (below) rules
/// - `val_threshold` — "dark" cut-off for the phosphorus rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub low_sat_val: f64,
    pub hue_threshold: f64,
    pub val_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds { low_sat_val: 50.0, hue_threshold: 50.0, val_threshold: 50.0 }
    }
}

impl Thresholds {
    /// Maps channel averages to a label.
    ///
    /// Rules are checked in order and the first match wins; the conditions
    /// overlap, so reordering them changes results.
    pub fn label_for(&self, stats: &ChannelStatistics) -> DeficiencyLabel {
        let ChannelStatistics { hue, saturation, value } = *stats;

        if saturation < self.low_sat_val && value < self.low_sat_val {
            DeficiencyLabel::Nitrogen
        } else if hue > self.hue_threshold && value < self.val_threshold {
            DeficiencyLabel::Phosphorus
        } else if hue < self.hue_threshold && saturation > self.low_sat_val {
            DeficiencyLabel::Potassium
        } else {
            DeficiencyLabel::Balanced
        }
    }
}
