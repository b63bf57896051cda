//! RGB to HSV conversion on the 8-bit convention.
//!
//! Hue is halved so a full turn fits in a byte (0..180); saturation and value
//! span 0..=255. Saturation and hue are computed in 12-bit fixed point with
//! reciprocal lookup tables, the same integer scheme OpenCV's `cvtColor`
//! applies to 8-bit images, so masks agree with it pixel for pixel.

use crate::canopy_pipeline::segmentation::types::Hsv;

const HSV_SHIFT: u32 = 12;
const HALF: i32 = 1 << (HSV_SHIFT - 1);

/// `round((255 << 12) / v)`, 0 for v = 0
const SATURATION_DIV: [i32; 256] = reciprocal_table(255 << HSV_SHIFT);
/// `round((180 << 12) / (6 * diff))`, 0 for diff = 0
const HUE_DIV: [i32; 256] = reciprocal_table((180 << HSV_SHIFT) / 6);

/// Integer `round(numerator / i)` for i in 1..256. No entry is an exact
/// half, so rounding direction never matters.
const fn reciprocal_table(numerator: i32) -> [i32; 256] {
    let mut table = [0i32; 256];
    let mut i = 1;
    while i < 256 {
        table[i] = (2 * numerator + i as i32) / (2 * i as i32);
        i += 1;
    }
    table
}

pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> Hsv {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let v = r.max(g).max(b);
    let diff = v - r.min(g).min(b);

    let s = (diff * SATURATION_DIV[v as usize] + HALF) >> HSV_SHIFT;

    // Sector offset in units of diff: red 0, green 2, blue 4 (x60 degrees).
    let x = if v == r {
        g - b
    } else if v == g {
        b - r + 2 * diff
    } else {
        r - g + 4 * diff
    };
    // Arithmetic shift floors negative hues before the wrap.
    let h = (x * HUE_DIV[diff as usize] + HALF) >> HSV_SHIFT;
    let h = if h < 0 { h + 180 } else { h };

    Hsv::new(h.clamp(0, 179) as u8, s.clamp(0, 255) as u8, v as u8)
}
