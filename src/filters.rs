// Per-pixel filters applied to the raw camera frame before detection.
// Both leave alpha alone and mutate the frame in place.

use image::{Rgba, RgbaImage};
use serde::Deserialize;

pub const DEFAULT_REMAP_CUTOFF: f32 = 0.35;
pub const DEFAULT_THRESHOLD: u8 = 105;

/// How a pixel is reduced to a single 0..=255 brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brightness {
    /// Green channel only.
    #[default]
    Green,
    /// Rec. 709 weighted luma.
    Luminance,
}

impl Brightness {
    #[inline]
    pub fn of(self, p: &Rgba<u8>) -> u8 {
        match self {
            Brightness::Green => p[1],
            Brightness::Luminance => {
                let y = 0.2126 * p[0] as f32 + 0.7152 * p[1] as f32 + 0.0722 * p[2] as f32;
                y.round().clamp(0.0, 255.0) as u8
            }
        }
    }
}

/// Levels adjustment with its black point at `cutoff` (0..1): anything darker
/// goes to 0 and the rest is stretched over the full range.
pub fn brightness_remap(frame: &mut RgbaImage, cutoff: f32) {
    let cutoff = cutoff.clamp(0.0, 0.999);
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        let c = v as f32 / 255.0;
        let stretched = ((c - cutoff) / (1.0 - cutoff)).clamp(0.0, 1.0);
        *out = (stretched * 255.0).round() as u8;
    }
    for p in frame.pixels_mut() {
        p[0] = lut[p[0] as usize];
        p[1] = lut[p[1] as usize];
        p[2] = lut[p[2] as usize];
    }
}

/// Binarize RGB: black below `threshold`, white at or above it.
pub fn black_white(frame: &mut RgbaImage, threshold: u8, brightness: Brightness) {
    for p in frame.pixels_mut() {
        let v = if brightness.of(p) < threshold { 0 } else { 255 };
        p[0] = v;
        p[1] = v;
        p[2] = v;
    }
}

/// Which filters run, in the order remap then threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterChain {
    pub remap: Option<f32>,
    pub threshold: Option<u8>,
    pub brightness: Brightness,
}

impl Default for FilterChain {
    fn default() -> Self {
        Self {
            remap: None,
            threshold: Some(DEFAULT_THRESHOLD),
            brightness: Brightness::Green,
        }
    }
}

impl FilterChain {
    pub fn apply(&self, frame: &mut RgbaImage) {
        if let Some(cutoff) = self.remap {
            brightness_remap(frame, cutoff);
        }
        if let Some(threshold) = self.threshold {
            black_white(frame, threshold, self.brightness);
        }
    }
}
