// Feature-weighted bar heights and colors

use crate::color::hsl_to_rgb;
use crate::types::{BarVisual, Bin, FeatureMode};

// ============================================================================
// HEIGHT AND HUE FORMULAS
// ============================================================================

// Bars are scaled into a fixed visual range so wildly different matrices
// (normalized GLCMs, raw counts) all produce a readable field.
pub const MIN_BAR_HEIGHT: f64 = 0.1;
pub const MAX_BAR_HEIGHT: f64 = 20.0;
const HEIGHT_SCALE: f64 = 20.0;

// Raw height factor before scaling and clamping
//
// Each mode applies the weight its statistical formula applies to the
// (row, col) cell, normalized so a full-weight cell at the maximum value
// lands near factor 1.0:
// - Contrast: val * (i-j)^2, normalized by the worst-case half-range weight
// - Dissimilarity: val * |i-j|, same normalization idea but linear
// - Homogeneity: val / (1 + (i-j)^2), diagonal cells keep full height
// - Energy / ASM: squared normalized value
// - Correlation / Default: plain normalized value
pub fn height_factor(mode: FeatureMode, val: f64, max_val: f64, bin: &Bin, bin_count: usize) -> f64 {
    assert!(max_val > 0.0, "Max value must be positive");
    assert!(bin_count >= 1, "Bin count must be at least 1");

    let diff = bin.row_bin as f64 - bin.col_bin as f64;
    let half = bin_count as f64 / 2.0;

    match mode {
        FeatureMode::Contrast => (val * diff * diff) / (max_val * half * half),
        FeatureMode::Dissimilarity => (val * diff.abs()) / (max_val * half),
        FeatureMode::Homogeneity => (val / (1.0 + diff * diff)) / max_val,
        FeatureMode::Energy | FeatureMode::Asm => {
            let norm = val / max_val;
            norm * norm
        }
        FeatureMode::Correlation | FeatureMode::Default => val / max_val,
    }
}

// Hue for a bar, in [0, 0.6] on the blue-to-red ramp
//
// Distance-weighted modes color by how far the bin sits from the diagonal;
// value-weighted modes color by the normalized value itself. 0.6 is the cold
// (blue) end, 0.0 the hot (red) end; homogeneity inverts the ramp because
// its high-contribution cells are ON the diagonal.
pub fn bar_hue(mode: FeatureMode, val: f64, max_val: f64, bin: &Bin, bin_count: usize) -> f64 {
    let dist = (bin.row_bin as f64 - bin.col_bin as f64).abs() / bin_count as f64;

    match mode {
        FeatureMode::Contrast => 0.6 - (dist * 1.5).min(0.6),
        FeatureMode::Dissimilarity => 0.6 - (dist * 1.2).min(0.6),
        FeatureMode::Homogeneity => (dist * 2.0).min(0.6),
        FeatureMode::Energy
        | FeatureMode::Asm
        | FeatureMode::Correlation
        | FeatureMode::Default => 0.6 - (val / max_val) * 0.6,
    }
}

// Map a bin to its rendered bar
//
// Height is the mode's factor scaled into [MIN_BAR_HEIGHT, MAX_BAR_HEIGHT];
// color is the mode's hue at full saturation, half lightness.
pub fn bar_visual(bin: &Bin, max_val: f64, mode: FeatureMode, bin_count: usize) -> BarVisual {
    let factor = height_factor(mode, bin.sum, max_val, bin, bin_count);
    let hue = bar_hue(mode, bin.sum, max_val, bin, bin_count);

    BarVisual {
        height: (factor * HEIGHT_SCALE).clamp(MIN_BAR_HEIGHT, MAX_BAR_HEIGHT),
        color: hsl_to_rgb(hue, 1.0, 0.5),
    }
}
