//! Segmentation types

use std::fmt;

use crate::canopy_pipeline::common::error::{CanopyError, Result};

/// HSV triple on the 8-bit convention: hue in [0, 180), saturation and
/// value in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    fn channels(self) -> [u8; 3] {
        [self.h, self.s, self.v]
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.h, self.s, self.v)
    }
}

/// Inclusive HSV bounds selecting the pixels that belong to the mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

/// Lower bound of the default green vegetation range
pub const GREEN_LOWER: Hsv = Hsv::new(35, 50, 50);
/// Upper bound of the default green vegetation range
pub const GREEN_UPPER: Hsv = Hsv::new(85, 255, 255);

impl Default for ColorRange {
    fn default() -> Self {
        Self {
            lower: GREEN_LOWER,
            upper: GREEN_UPPER,
        }
    }
}

impl ColorRange {
    pub fn new(lower: Hsv, upper: Hsv) -> Result<Self> {
        let range = Self { lower, upper };
        range.validate()?;
        Ok(range)
    }

    /// Fails with `InvalidRange` when any lower component exceeds its
    /// upper counterpart.
    pub fn validate(&self) -> Result<()> {
        let names = ["hue", "saturation", "value"];
        let lower = self.lower.channels();
        let upper = self.upper.channels();
        for c in 0..3 {
            if lower[c] > upper[c] {
                return Err(CanopyError::InvalidRange(format!(
                    "lower {} {} exceeds upper {} {}",
                    names[c], lower[c], names[c], upper[c]
                )));
            }
        }
        Ok(())
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.lower.h..=self.upper.h).contains(&hsv.h)
            && (self.lower.s..=self.upper.s).contains(&hsv.s)
            && (self.lower.v..=self.upper.v).contains(&hsv.v)
    }
}

impl fmt::Display for ColorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.lower, self.upper)
    }
}

/// Per-pixel inclusion map, same dimensions as the source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    /// Width of the mask in pixels
    pub width: usize,
    /// Height of the mask in pixels
    pub height: usize,
    /// Row-major inclusion flags
    pub data: Vec<bool>,
}

impl Mask {
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of cells set to true
    pub fn count_set(&self) -> u64 {
        self.data.iter().filter(|&&set| set).count() as u64
    }
}
