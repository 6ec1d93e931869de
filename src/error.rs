// One error type for the whole crate.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed

    /// Frame and mask render disagree on size. Never transient.
    #[error("frame is {frame:?} but mask is {mask:?}")]
    DimensionMismatch { frame: (u32, u32), mask: (u32, u32) },

    #[error("image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("pose file {path}: {reason}")]
    PoseFormat { path: PathBuf, reason: String },
    #[error("config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}
