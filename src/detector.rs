// Segment brightness detector.
// Every distinct opaque mask color is a "segment". A segment reads hot (black on
// screen) as soon as one of its frame pixels is pure black after thresholding,
// cold (white) otherwise. The frame is overwritten with that grayscale verdict
// wherever the mask is opaque.

use crate::error::Error;
use crate::filters::Brightness;
use image::{Rgba, RgbaImage};
use std::collections::BTreeMap;
use tracing::debug;

/// Score a segment jumps to when it sees a black sample.
pub const SENTINEL: f32 = 1000.0;
/// Opaque red, as packed by [`segment_key`].
pub const DEFAULT_REFERENCE: u32 = 0xFF00_00FF;

/// Mask color packed as 0xRRGGBBAA.
#[inline]
pub fn segment_key(p: &Rgba<u8>) -> u32 {
    u32::from_be_bytes(p.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentStats {
    pub score: f32,
    pub count: u32,
}

impl SegmentStats {
    pub fn ratio(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.score / self.count as f32
        }
    }

    /// 255 for a cold segment, 0 for one that hit the sentinel.
    pub fn gray(&self) -> u8 {
        let level = (255.0 * (self.ratio() / SENTINEL)).round();
        (255.0 - level).clamp(0.0, 255.0) as u8
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SegmentDetector {
    /// Segment whose ratio is reported back from `detect`.
    pub reference: u32,
    pub brightness: Brightness,
}

impl Default for SegmentDetector {
    fn default() -> Self {
        Self { reference: DEFAULT_REFERENCE, brightness: Brightness::Green }
    }
}

impl SegmentDetector {
    pub fn new(reference: u32, brightness: Brightness) -> Self {
        Self { reference, brightness }
    }

    /// Score every segment of `mask` against `frame`, paint the result into
    /// `frame` and return the reference segment's ratio (0 when absent).
    /// Fails without touching `frame` if the two sizes differ.
    pub fn detect(&self, frame: &mut RgbaImage, mask: &RgbaImage) -> Result<f32, Error> {
        if frame.dimensions() != mask.dimensions() {
            return Err(Error::DimensionMismatch {
                frame: frame.dimensions(),
                mask: mask.dimensions(),
            });
        }

        let segments = self.score(frame, mask);

        let reference = segments
            .get(&self.reference)
            .map(SegmentStats::ratio)
            .unwrap_or(0.0);

        for (m, f) in mask.pixels().zip(frame.pixels_mut()) {
            if m[3] == 0 {
                continue;
            }
            if let Some(stats) = segments.get(&segment_key(m)) {
                let v = stats.gray();
                *f = Rgba([v, v, v, v]);
            }
        }

        for (key, stats) in &segments {
            debug!("segment {key:#010x} score={} count={}", stats.score, stats.count);
        }

        Ok(reference)
    }

    /// Build per-segment stats. Frame and mask are assumed the same size.
    pub fn score(&self, frame: &RgbaImage, mask: &RgbaImage) -> BTreeMap<u32, SegmentStats> {
        let mut segments = BTreeMap::new();
        for m in mask.pixels().filter(|m| m[3] != 0) {
            segments.entry(segment_key(m)).or_insert_with(SegmentStats::default);
        }

        for (m, f) in mask.pixels().zip(frame.pixels()) {
            if m[3] == 0 {
                continue;
            }
            let Some(stats) = segments.get_mut(&segment_key(m)) else {
                continue;
            };
            // once a segment has fired it stays at the sentinel
            if stats.score == 0.0 {
                if self.brightness.of(f) == 0 {
                    stats.score = SENTINEL;
                }
                stats.count = 1;
            }
        }
        segments
    }
}
