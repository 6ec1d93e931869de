use crate::detector::{DEFAULT_REFERENCE, SegmentDetector};
use crate::error::Error;
use crate::filters::{Brightness, DEFAULT_REMAP_CUTOFF, DEFAULT_THRESHOLD, FilterChain};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub mask: MaskConfig,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    /// Camera index ("0") or device path ("/dev/video2")
    #[serde(default = "default_device")]
    pub device: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MaskConfig {
    #[serde(default = "default_mask_path")]
    pub path: PathBuf,
    #[serde(default = "default_pose_path")]
    pub pose_path: PathBuf,
    /// Overlay opacity on screen, 0..=255
    #[serde(default = "default_opacity")]
    pub opacity: u8,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilterConfig {
    #[serde(default)]
    pub remap_enabled: bool,
    #[serde(default = "default_remap_cutoff")]
    pub remap_cutoff: f32,
    #[serde(default = "default_true")]
    pub threshold_enabled: bool,
    #[serde(default = "default_threshold")]
    pub threshold: u8,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectorConfig {
    /// Segment color reported as the reading, packed 0xRRGGBBAA
    #[serde(default = "default_reference")]
    pub reference: u32,
    #[serde(default)]
    pub brightness: Brightness,
}

fn default_device() -> String { "0".to_string() }
fn default_width() -> u32 { 640 }
fn default_height() -> u32 { 480 }
fn default_mask_path() -> PathBuf { PathBuf::from("mask/mask_maximized.png") }
fn default_pose_path() -> PathBuf { PathBuf::from("mask.pose") }
fn default_opacity() -> u8 { 100 }
fn default_remap_cutoff() -> f32 { DEFAULT_REMAP_CUTOFF }
fn default_true() -> bool { true }
fn default_threshold() -> u8 { DEFAULT_THRESHOLD }
fn default_reference() -> u32 { DEFAULT_REFERENCE }

impl Default for CameraConfig {
    fn default() -> Self {
        Self { device: default_device(), width: default_width(), height: default_height() }
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self { path: default_mask_path(), pose_path: default_pose_path(), opacity: default_opacity() }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            remap_enabled: false,
            remap_cutoff: default_remap_cutoff(),
            threshold_enabled: default_true(),
            threshold: default_threshold(),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self { reference: default_reference(), brightness: Brightness::default() }
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        Self::parse(&content).map_err(|reason| Error::Config { path: path.to_path_buf(), reason })
    }

    /// Read `path` if it exists, otherwise run on defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    pub fn filter_chain(&self) -> FilterChain {
        let brightness = self.detector.brightness;
        FilterChain {
            remap: self.filters.remap_enabled.then_some(self.filters.remap_cutoff),
            threshold: self.filters.threshold_enabled.then_some(self.filters.threshold),
            brightness,
        }
    }

    pub fn detector(&self) -> SegmentDetector {
        SegmentDetector::new(self.detector.reference, self.detector.brightness)
    }
}
