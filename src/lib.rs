//! Webcam mask overlay with a coarse segment "temperature" reading.
//!
//! A mask image is posed over the live camera frame (position, rotation,
//! independent x/y scale). Each distinct opaque mask color is a segment; after
//! the frame is thresholded, a segment reads hot when any of its frame pixels
//! is black.

pub mod camera;
pub mod config;
pub mod controls;
pub mod detector;
pub mod draw;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod maximize;
pub mod monitoring;
pub mod persist;
pub mod pipeline;
pub mod raster;
pub mod types;
