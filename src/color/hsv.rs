//! 8-bit RGB → HSV conversion.
//!
//! Hue is stored in half-degrees so it fits a byte: [0, 180). Saturation and
//! value span [0, 255]. The arithmetic is the fixed-point scheme used by the
//! common 8-bit computer-vision conversion (12-bit shift, rounded reciprocal
//! tables), so averages match that convention bit for bit.

use image::Rgb;

const HSV_SHIFT: u32 = 12;
const ROUND: i32 = 1 << (HSV_SHIFT - 1);
const HUE_RANGE: i32 = 180;

/// `round((255 << 12) / v)`, zero for `v == 0`.
fn sat_divisor(v: i32) -> i32 {
    if v == 0 {
        0
    } else {
        ((255i64 << HSV_SHIFT) as f64 / v as f64).round() as i32
    }
}

/// `round((180 << 12) / (6 * diff))`, zero for `diff == 0`.
fn hue_divisor(diff: i32) -> i32 {
    if diff == 0 {
        0
    } else {
        (((HUE_RANGE as i64) << HSV_SHIFT) as f64 / (6.0 * diff as f64)).round() as i32
    }
}

/// Converts one RGB pixel to `[hue, saturation, value]`.
pub fn rgb_to_hsv(px: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = px.0.map(i32::from);

    let v = r.max(g).max(b);
    let vmin = r.min(g).min(b);
    let diff = v - vmin;

    let s = (diff * sat_divisor(v) + ROUND) >> HSV_SHIFT;

    // Ties resolve red first, then green.
    let raw_hue = if v == r {
        g - b
    } else if v == g {
        b - r + 2 * diff
    } else {
        r - g + 4 * diff
    };
    let mut h = (raw_hue * hue_divisor(diff) + ROUND) >> HSV_SHIFT;
    if h < 0 {
        h += HUE_RANGE;
    }

    [h as u8, s as u8, v as u8]
}
