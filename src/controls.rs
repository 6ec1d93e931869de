// Keyboard-driven pose editing.
// Visual: WASD slides the mask, Left/Right spins it, Up/Down grows or shrinks it
// evenly, J/L and I/K stretch one axis. Hold Shift for fine steps.

use crate::geometry::Pose;

pub const SPEED: f32 = 3.0;
pub const SLOW_SPEED: f32 = 0.75;

/// Keys held during this frame (polled, not event driven).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub rotate_ccw: bool,
    pub rotate_cw: bool,
    pub grow: bool,
    pub shrink: bool,
    pub grow_x: bool,
    pub shrink_x: bool,
    pub grow_y: bool,
    pub shrink_y: bool,
    pub slow: bool,
}

impl Controls {
    pub fn speed(&self) -> f32 {
        if self.slow { SLOW_SPEED } else { SPEED }
    }

    /// Move the pose by one frame's worth of input.
    pub fn apply(&self, pose: &mut Pose) {
        let speed = self.speed();
        let turn = (speed * 0.25).to_radians();
        let step = speed * 0.001;

        if self.up { pose.y -= speed; }
        if self.down { pose.y += speed; }
        if self.left { pose.x -= speed; }
        if self.right { pose.x += speed; }

        if self.rotate_ccw { pose.rotation -= turn; }
        if self.rotate_cw { pose.rotation += turn; }

        if self.grow {
            pose.scale_x += step;
            pose.scale_y += step;
        }
        if self.shrink {
            pose.scale_x -= step;
            pose.scale_y -= step;
        }
        if self.grow_x { pose.scale_x += step; }
        if self.shrink_x { pose.scale_x -= step; }
        if self.grow_y { pose.scale_y += step; }
        if self.shrink_y { pose.scale_y -= step; }

        pose.clamp_scale();
    }
}
