// Push every channel of a mask image to 0 or 255 so that antialiased edges
// cannot create stray in-between colors (each of which would be its own segment).

use image::RgbaImage;

pub const MIDPOINT: u8 = 127;

#[inline]
pub fn maximize_channel(v: u8) -> u8 {
    if v < MIDPOINT { 0 } else { 255 }
}

pub fn maximize_image(img: &mut RgbaImage) {
    for p in img.pixels_mut() {
        for c in p.0.iter_mut() {
            *c = maximize_channel(*c);
        }
    }
}
