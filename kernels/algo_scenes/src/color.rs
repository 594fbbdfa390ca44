// HSL color ramp support

use crate::types::Rgb;

// ============================================================================
// HSL TO RGB CONVERSION
// ============================================================================

// Convert HSL to linear RGB
//
// All components are in [0, 1]; hue wraps (1.1 ≡ 0.1). The piecewise ramp
// matches the conversion the WebGL frontend applies, so a hue computed here
// renders as the same color the legend documents:
// - q is the chroma upper bound, p the lower bound
// - each channel samples the hue ramp at an offset of 1/3 around the wheel
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    // Achromatic: every channel equals the lightness
    if s == 0.0 {
        return [l as f32; 3];
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    ]
}

// Sample one RGB channel from the hue ramp
fn hue_channel(p: f64, q: f64, t: f64) -> f32 {
    let t = t.rem_euclid(1.0);

    let v = if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    };

    v as f32
}

// Evenly spaced class hue: class i of n gets hue i/n
//
// Used by the probability grid so each class keeps one color across every
// feature group and the legend.
#[inline]
pub fn class_hue(class_index: usize, num_classes: usize) -> f64 {
    assert!(num_classes > 0, "Class count must be positive");
    class_index as f64 / num_classes as f64
}
