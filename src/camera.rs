// Opens a camera and hands out RGBA frames.
// Visual expectation: when main.rs calls `next_frame()`, you get an RgbaImage
// (alpha always 255) sized to whatever resolution the device agreed to.

use crate::error::Error;
use image::{Rgba, RgbaImage};
use tracing::info;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// Anything that can produce frames for the pipeline.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<RgbaImage, Error>;
    fn resolution(&self) -> (u32, u32);
}

/// "2" picks a device by index, anything else is treated as a device path.
pub fn camera_index(device: &str) -> CameraIndex {
    match device.parse::<u32>() {
        Ok(n) => CameraIndex::Index(n),
        Err(_) => CameraIndex::String(device.to_string()),
    }
}

// A small wrapper around nokhwa::Camera so our main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open `device` at a target resolution (falls back if not exact).
    pub fn new(device: &str, width: u32, height: u32) -> Result<Self, Error> {
        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(camera_index(device), req)
            .map_err(|e| Error::CameraInit(format!("Create camera {device}: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();
        info!("camera {device} streaming at {}x{}", actual.width(), actual.height());

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }
}

impl FrameSource for CameraCapture {
    /// Blocks until the device delivers a frame, then widens RGB to RGBA.
    fn next_frame(&mut self) -> Result<RgbaImage, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        let mut out = RgbaImage::new(w, h);
        for (x, y, pixel) in rgb_img.enumerate_pixels() {
            out.put_pixel(x, y, Rgba([pixel[0], pixel[1], pixel[2], 255]));
        }
        Ok(out)
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_devices_are_indices() {
        assert_eq!(camera_index("0"), CameraIndex::Index(0));
        assert_eq!(camera_index("2"), CameraIndex::Index(2));
        assert_eq!(
            camera_index("/dev/video2"),
            CameraIndex::String("/dev/video2".to_string())
        );
    }
}
