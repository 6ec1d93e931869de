// One frame's worth of work: filter the camera frame, render the mask at the
// frame's size, then let the detector paint its verdict into the frame.

use crate::detector::SegmentDetector;
use crate::error::Error;
use crate::filters::FilterChain;
use crate::geometry::Pose;
use crate::raster;
use image::RgbaImage;

pub struct Processed {
    /// The mask as drawn this frame; also what gets overlaid on screen.
    pub overlay: RgbaImage,
    /// Reference segment ratio from the detector.
    pub reading: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    pub filters: FilterChain,
    pub detector: SegmentDetector,
}

impl Pipeline {
    pub fn new(filters: FilterChain, detector: SegmentDetector) -> Self {
        Self { filters, detector }
    }

    pub fn process(&self, frame: &mut RgbaImage, mask: &RgbaImage, pose: &Pose) -> Result<Processed, Error> {
        self.filters.apply(frame);
        let (w, h) = frame.dimensions();
        let overlay = raster::render(mask, pose, w, h);
        let reading = self.detector.detect(frame, &overlay)?;
        Ok(Processed { overlay, reading })
    }
}
