// Software rasterizer for the mask quad, plus the overlay blend used for display.
// Visual: the mask appears on the frame at its pose; outside the quad the
// render is fully transparent.

use crate::geometry::{Pose, Quad};
use crate::types::FrameBuffer;
use image::{Rgba, RgbaImage};

/// Draw `mask` through the pose's quad into a transparent `width`×`height` image.
pub fn render(mask: &RgbaImage, pose: &Pose, width: u32, height: u32) -> RgbaImage {
    let mut out = RgbaImage::new(width, height);
    draw_quad(&mut out, mask, &pose.quad());
    out
}

/// Textured quad fill. Quads built from a pose are parallelograms, so mapping a
/// pixel back to (s, t) along the TL→TR and TL→BL edges is a 2x2 solve.
/// Nearest-neighbour only: segment colors must survive unblended.
pub fn draw_quad(dst: &mut RgbaImage, texture: &RgbaImage, quad: &Quad) {
    let (tw, th) = texture.dimensions();
    if tw == 0 || th == 0 {
        return;
    }

    let origin = quad.corners[Quad::TOP_LEFT];
    let e1 = quad.corners[Quad::TOP_RIGHT] - origin;
    let e2 = quad.corners[Quad::BOTTOM_LEFT] - origin;
    let det = e1.x * e2.y - e1.y * e2.x;
    if det.abs() < f32::EPSILON {
        return; // collapsed quad, nothing covers any pixel
    }

    let t0 = quad.tex_coords[Quad::TOP_LEFT];
    let tu = quad.tex_coords[Quad::TOP_RIGHT] - t0;
    let tv = quad.tex_coords[Quad::BOTTOM_LEFT] - t0;

    // Only walk pixels inside the clipped bounding box.
    let (min, max) = quad.bounds();
    let (dw, dh) = dst.dimensions();
    let x0 = min.x.floor().max(0.0) as u32;
    let y0 = min.y.floor().max(0.0) as u32;
    let x1 = (max.x.ceil().max(0.0) as u32).min(dw);
    let y1 = (max.y.ceil().max(0.0) as u32).min(dh);

    for py in y0..y1 {
        for px in x0..x1 {
            // sample at the pixel centre
            let dx = px as f32 + 0.5 - origin.x;
            let dy = py as f32 + 0.5 - origin.y;
            let s = (dx * e2.y - dy * e2.x) / det;
            let t = (e1.x * dy - e1.y * dx) / det;
            if !(0.0..1.0).contains(&s) || !(0.0..1.0).contains(&t) {
                continue;
            }

            let tex = t0 + tu * s + tv * t;
            let sx = (tex.x.floor().max(0.0) as u32).min(tw - 1);
            let sy = (tex.y.floor().max(0.0) as u32).min(th - 1);
            let texel = texture.get_pixel(sx, sy);
            dst.put_pixel(px, py, tint(*texel, quad.color));
        }
    }
}

#[inline]
fn tint(texel: Rgba<u8>, color: Rgba<u8>) -> Rgba<u8> {
    let mul = |a: u8, b: u8| ((a as u16 * b as u16 + 127) / 255) as u8;
    Rgba([
        mul(texel[0], color[0]),
        mul(texel[1], color[1]),
        mul(texel[2], color[2]),
        mul(texel[3], color[3]),
    ])
}

/// Copy an RGBA frame into the 0x00RRGGBB screen buffer (alpha dropped).
pub fn to_screen(frame: &RgbaImage, screen: &mut FrameBuffer) {
    let w = screen.width.min(frame.width() as usize);
    let h = screen.height.min(frame.height() as usize);
    for y in 0..h {
        for x in 0..w {
            let p = frame.get_pixel(x as u32, y as u32);
            screen.pixels[y * screen.width + x] =
                ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32;
        }
    }
}

/// Composite `overlay` onto the screen. Each overlay pixel's own alpha is
/// scaled by `opacity` (0..=255) before mixing.
pub fn blend_over(screen: &mut FrameBuffer, overlay: &RgbaImage, opacity: u8) {
    let w = screen.width.min(overlay.width() as usize);
    let h = screen.height.min(overlay.height() as usize);
    for y in 0..h {
        for x in 0..w {
            let o = overlay.get_pixel(x as u32, y as u32);
            let a = o[3] as u32 * opacity as u32 / 255;
            if a == 0 {
                continue;
            }
            let idx = y * screen.width + x;
            let old = screen.pixels[idx];
            let mix = |shift: u32, src: u8| {
                let dst = (old >> shift) & 0xFF;
                (src as u32 * a + dst * (255 - a) + 127) / 255
            };
            screen.pixels[idx] = (mix(16, o[0]) << 16) | (mix(8, o[1]) << 8) | mix(0, o[2]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn numbered(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8 * 10 + 1, y as u8 * 10 + 1, 7, 255]))
    }

    fn unit_pose(mask: &RgbaImage) -> Pose {
        let mut pose = Pose::new(mask.width() as f32, mask.height() as f32);
        pose.scale_x = 1.0;
        pose.scale_y = 1.0;
        pose
    }

    #[test]
    fn identity_pose_reproduces_mask() {
        let mask = numbered(6, 4);
        let out = render(&mask, &unit_pose(&mask), 6, 4);
        assert_eq!(out, mask);
    }

    #[test]
    fn outside_quad_is_transparent() {
        let mask = numbered(2, 2);
        let mut pose = unit_pose(&mask);
        pose.x = 3.0;
        pose.y = 1.0;
        let out = render(&mask, &pose, 8, 8);
        for (x, y, p) in out.enumerate_pixels() {
            let inside = (3..5).contains(&x) && (1..3).contains(&y);
            if inside {
                assert_eq!(*p, *mask.get_pixel(x - 3, y - 1));
            } else {
                assert_eq!(p[3], 0, "pixel {x},{y} should be transparent");
            }
        }
    }

    #[test]
    fn doubled_scale_repeats_texels() {
        let mask = numbered(2, 2);
        let mut pose = unit_pose(&mask);
        pose.scale_x = 2.0;
        pose.scale_y = 2.0;
        let out = render(&mask, &pose, 4, 4);
        for (x, y, p) in out.enumerate_pixels() {
            assert_eq!(*p, *mask.get_pixel(x / 2, y / 2));
        }
    }

    #[test]
    fn quarter_turn_lays_rows_down_columns() {
        let mask = numbered(4, 2);
        let mut pose = unit_pose(&mask);
        pose.x = 10.0;
        pose.y = 10.0;
        pose.rotation = FRAC_PI_2;
        let out = render(&mask, &pose, 24, 24);

        let opaque = out.pixels().filter(|p| p[3] != 0).count();
        assert_eq!(opaque, 8);
        assert_eq!(out.get_pixel(12, 9), mask.get_pixel(0, 0));
        assert_eq!(out.get_pixel(11, 12), mask.get_pixel(3, 1));
    }

    #[test]
    fn quad_partly_off_frame_is_clipped() {
        let mask = numbered(4, 4);
        let mut pose = unit_pose(&mask);
        pose.x = -2.0;
        pose.y = -2.0;
        let out = render(&mask, &pose, 3, 3);
        assert_eq!(out.get_pixel(0, 0), mask.get_pixel(2, 2));
        assert_eq!(out.get_pixel(1, 1), mask.get_pixel(3, 3));
        assert_eq!(out.get_pixel(2, 2)[3], 0);
    }

    #[test]
    fn blend_respects_opacity_and_alpha() {
        let mut screen = FrameBuffer::new(2, 1);
        screen.pixels = vec![0x00_00_00_00, 0x00_10_20_30];
        let overlay = RgbaImage::from_vec(2, 1, vec![255, 255, 255, 255, 255, 0, 0, 0]).unwrap();

        blend_over(&mut screen, &overlay, 255);
        assert_eq!(screen.pixels[0], 0x00_FF_FF_FF);
        assert_eq!(screen.pixels[1], 0x00_10_20_30); // transparent overlay pixel

        let mut half = FrameBuffer::new(1, 1);
        let white = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        blend_over(&mut half, &white, 100);
        assert_eq!(half.pixels[0], 0x00_64_64_64);
    }

    #[test]
    fn screen_conversion_packs_rgb() {
        let frame = RgbaImage::from_pixel(2, 2, Rgba([0x12, 0x34, 0x56, 0x00]));
        let mut screen = FrameBuffer::new(2, 2);
        to_screen(&frame, &mut screen);
        assert!(screen.pixels.iter().all(|&p| p == 0x00_12_34_56));
    }
}
