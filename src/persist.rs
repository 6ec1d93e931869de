//! Pose file: a fixed little-endian record.
//!
//! Layout (34 bytes): magic `TMPS`, `u16` version, then seven `f32` in the
//! order x, y, scale_x, scale_y, width, height, rotation.

use crate::error::Error;
use crate::geometry::Pose;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const MAGIC: [u8; 4] = *b"TMPS";
pub const VERSION: u16 = 1;
pub const RECORD_LEN: usize = 4 + 2 + 7 * 4;

pub fn encode(pose: &Pose) -> [u8; RECORD_LEN] {
    let mut out = [0u8; RECORD_LEN];
    out[0..4].copy_from_slice(&MAGIC);
    out[4..6].copy_from_slice(&VERSION.to_le_bytes());
    let fields = [
        pose.x,
        pose.y,
        pose.scale_x,
        pose.scale_y,
        pose.width,
        pose.height,
        pose.rotation,
    ];
    for (i, v) in fields.iter().enumerate() {
        let at = 6 + i * 4;
        out[at..at + 4].copy_from_slice(&v.to_le_bytes());
    }
    out
}

/// Parse a record; `Err` carries the reason for [`Error::PoseFormat`].
pub fn decode(bytes: &[u8]) -> Result<Pose, String> {
    if bytes.len() != RECORD_LEN {
        return Err(format!("expected {RECORD_LEN} bytes, found {}", bytes.len()));
    }
    if bytes[0..4] != MAGIC {
        return Err("bad magic".into());
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != VERSION {
        return Err(format!("unsupported version {version}"));
    }
    let f = |i: usize| {
        let at = 6 + i * 4;
        f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    };
    Ok(Pose {
        x: f(0),
        y: f(1),
        scale_x: f(2),
        scale_y: f(3),
        width: f(4),
        height: f(5),
        rotation: f(6),
    })
}

pub fn save(path: &Path, pose: &Pose) -> Result<(), Error> {
    fs::write(path, encode(pose)).map_err(|source| Error::Io { path: path.to_path_buf(), source })
}

pub fn load(path: &Path) -> Result<Pose, Error> {
    let bytes = fs::read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    decode(&bytes).map_err(|reason| Error::PoseFormat { path: path.to_path_buf(), reason })
}

/// Load a saved pose, or hand back `default` if there is none usable.
pub fn load_or(path: &Path, default: Pose) -> Pose {
    match load(path) {
        Ok(pose) => {
            debug!("loaded pose from {}: {pose:?}", path.display());
            pose
        }
        Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            debug!("no pose file at {}, using defaults", path.display());
            default
        }
        Err(e) => {
            warn!("ignoring pose file: {e}");
            default
        }
    }
}
