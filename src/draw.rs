// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the filtered camera image with the mask on top.
// 2) A thin outline of the mask quad, so a hidden mask can still be placed.

use crate::controls::Controls;
use crate::error::Error;
use crate::geometry::Quad;
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the camera feed.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen. This also pumps the
    /// window's event queue, so key state is fresh afterwards.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn quit_requested(&self) -> bool {
        self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    /// Space: show/hide the mask overlay.
    pub fn toggle_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::Space, KeyRepeat::No)
    }

    /// Snapshot of every held pose key.
    pub fn controls(&self) -> Controls {
        let down = |k: Key| self.window.is_key_down(k);
        Controls {
            up: down(Key::W),
            down: down(Key::S),
            left: down(Key::A),
            right: down(Key::D),
            rotate_ccw: down(Key::Left),
            rotate_cw: down(Key::Right),
            grow: down(Key::Up),
            shrink: down(Key::Down),
            grow_x: down(Key::L),
            shrink_x: down(Key::J),
            grow_y: down(Key::I),
            shrink_y: down(Key::K),
            slow: down(Key::LeftShift) || down(Key::RightShift),
        }
    }
}

/* ---------- Software drawing: pixels and lines ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.pixels[y * fb.width + x] = color;
}

/// Bresenham line between (x0,y0) and (x1,y1).
fn draw_line(fb: &mut FrameBuffer, (mut x0, mut y0): (i32, i32), (x1, y1): (i32, i32), color: u32) {
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Trace the four edges of the quad (TL-TR-BR-BL).
pub fn draw_quad_outline(fb: &mut FrameBuffer, quad: &Quad, color: u32) {
    let p = quad.corners.map(|c| (c.x.round() as i32, c.y.round() as i32));
    let ring = [Quad::TOP_LEFT, Quad::TOP_RIGHT, Quad::BOTTOM_RIGHT, Quad::BOTTOM_LEFT];
    for i in 0..4 {
        let a = p[ring[i]];
        let b = p[ring[(i + 1) % 4]];
        draw_line(fb, a, b, color);
    }
}
