// Mask pose and the corner math that places the mask on the frame.
// Rotation is applied about the quad's own centroid: every corner keeps its
// scaled distance from the centroid and only its angle changes, so scale_x and
// scale_y can move independently without skewing the rotation.

use crate::types::Point;
use image::Rgba;

/// Smallest scale either axis may reach. Zero would collapse the quad.
pub const MIN_SCALE: f32 = 0.01;
pub const DEFAULT_SCALE: f32 = 0.2;

/// Where the mask sits on the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Unscaled mask image size in pixels.
    pub width: f32,
    pub height: f32,
    /// Radians, positive turns clockwise on screen (y points down).
    pub rotation: f32,
}

impl Pose {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: DEFAULT_SCALE,
            scale_y: DEFAULT_SCALE,
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn clamp_scale(&mut self) {
        self.scale_x = self.scale_x.max(MIN_SCALE);
        self.scale_y = self.scale_y.max(MIN_SCALE);
    }

    /// Scaled size actually drawn. Never degenerate, whatever the stored scale.
    pub fn scaled_size(&self) -> (f32, f32) {
        (
            self.width * self.scale_x.max(MIN_SCALE),
            self.height * self.scale_y.max(MIN_SCALE),
        )
    }

    /// Axis-aligned quad at the pose's position with rotation ignored.
    pub fn reference_quad(&self) -> Quad {
        let (w, h) = self.scaled_size();
        let (x, y) = (self.x, self.y);
        Quad {
            corners: [
                Point::new(x, y),
                Point::new(x + w, y),
                Point::new(x, y + h),
                Point::new(x + w, y + h),
            ],
            tex_coords: [
                Point::new(0.0, 0.0),
                Point::new(self.width, 0.0),
                Point::new(0.0, self.height),
                Point::new(self.width, self.height),
            ],
            color: Rgba([255, 255, 255, 255]),
        }
    }

    /// The quad the mask is drawn into: the reference quad turned by
    /// `rotation` about its centroid.
    pub fn quad(&self) -> Quad {
        let reference = self.reference_quad();
        let centre = reference.centroid();
        let offsets = reference.polar_offsets(centre);

        let mut quad = reference;
        for (corner, offset) in quad.corners.iter_mut().zip(offsets) {
            *corner = centre.polar(offset.radius, offset.angle + self.rotation);
        }
        quad
    }
}

/// Distance and direction of one corner from the centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarOffset {
    pub radius: f32,
    pub angle: f32,
}

/// Four corners in TL, TR, BL, BR order with matching texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub corners: [Point; 4],
    pub tex_coords: [Point; 4],
    /// Multiplied into every sampled texel.
    pub color: Rgba<u8>,
}

impl Quad {
    pub const TOP_LEFT: usize = 0;
    pub const TOP_RIGHT: usize = 1;
    pub const BOTTOM_LEFT: usize = 2;
    pub const BOTTOM_RIGHT: usize = 3;

    pub fn centroid(&self) -> Point {
        let sum = self
            .corners
            .iter()
            .fold(Point::default(), |acc, &p| acc + p);
        sum * 0.25
    }

    pub fn polar_offsets(&self, centre: Point) -> [PolarOffset; 4] {
        self.corners.map(|corner| PolarOffset {
            radius: centre.distance(corner),
            angle: centre.angle_to(corner),
        })
    }

    /// Pixel-space bounding box as (min, max).
    pub fn bounds(&self) -> (Point, Point) {
        let mut min = self.corners[0];
        let mut max = self.corners[0];
        for p in &self.corners[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn reference_quad_is_axis_aligned_and_scaled() {
        let mut pose = Pose::new(200.0, 100.0);
        pose.x = 10.0;
        pose.y = 20.0;
        pose.scale_x = 0.5;
        pose.scale_y = 2.0;
        let q = pose.reference_quad();
        assert_eq!(q.corners[Quad::TOP_LEFT], Point::new(10.0, 20.0));
        assert_eq!(q.corners[Quad::TOP_RIGHT], Point::new(110.0, 20.0));
        assert_eq!(q.corners[Quad::BOTTOM_LEFT], Point::new(10.0, 220.0));
        assert_eq!(q.corners[Quad::BOTTOM_RIGHT], Point::new(110.0, 220.0));
        assert_eq!(q.centroid(), Point::new(60.0, 120.0));
    }

    #[test]
    fn zero_rotation_keeps_reference_corners() {
        let mut pose = Pose::new(64.0, 32.0);
        pose.x = -7.0;
        pose.y = 3.0;
        let reference = pose.reference_quad();
        let rotated = pose.quad();
        for i in 0..4 {
            assert!(close(reference.corners[i], rotated.corners[i]));
        }
    }

    #[test]
    fn angles_are_translation_invariant() {
        let mut a = Pose::new(120.0, 80.0);
        a.scale_x = 0.7;
        a.scale_y = 1.3;
        let mut b = a;
        b.x += 250.0;
        b.y -= 91.5;

        let qa = a.reference_quad();
        let qb = b.reference_quad();
        let oa = qa.polar_offsets(qa.centroid());
        let ob = qb.polar_offsets(qb.centroid());
        for i in 0..4 {
            assert!((oa[i].angle - ob[i].angle).abs() < 1e-5);
        }
    }

    #[test]
    fn rotation_never_changes_corner_radii() {
        let mut pose = Pose::new(300.0, 120.0);
        pose.x = 40.0;
        pose.y = 60.0;
        pose.scale_x = 0.9;
        pose.scale_y = 0.3;
        let reference = pose.reference_quad();
        let radii = reference.polar_offsets(reference.centroid()).map(|o| o.radius);

        for step in 0..16 {
            pose.rotation = step as f32 * PI / 8.0 - PI;
            let q = pose.quad();
            let c = q.centroid();
            for (corner, r) in q.corners.iter().zip(radii) {
                assert!((c.distance(*corner) - r).abs() < 1e-2);
            }
            assert!(close(c, reference.centroid()));
        }
    }

    #[test]
    fn quarter_turn_moves_corners_clockwise() {
        let mut pose = Pose::new(4.0, 2.0);
        pose.x = 10.0;
        pose.y = 10.0;
        pose.scale_x = 1.0;
        pose.scale_y = 1.0;
        pose.rotation = FRAC_PI_2;
        let q = pose.quad();
        assert!(close(q.corners[Quad::TOP_LEFT], Point::new(13.0, 9.0)));
        assert!(close(q.corners[Quad::TOP_RIGHT], Point::new(13.0, 13.0)));
        assert!(close(q.corners[Quad::BOTTOM_LEFT], Point::new(11.0, 9.0)));
        assert!(close(q.corners[Quad::BOTTOM_RIGHT], Point::new(11.0, 13.0)));
    }

    #[test]
    fn half_turn_swaps_left_and_right() {
        let mut pose = Pose::new(10.0, 10.0);
        pose.scale_x = 1.0;
        pose.scale_y = 1.0;
        pose.rotation = PI;
        let q = pose.quad();
        assert!(close(q.corners[Quad::TOP_LEFT], Point::new(10.0, 10.0)));
        assert!(close(q.corners[Quad::BOTTOM_RIGHT], Point::new(0.0, 0.0)));
    }

    #[test]
    fn non_positive_scale_is_floored() {
        for requested in [0.0, -0.5, -100.0, 0.001] {
            let mut pose = Pose::new(50.0, 40.0);
            pose.scale_x = requested;
            pose.scale_y = requested;
            let (w, h) = pose.scaled_size();
            assert!(w > 0.0 && h > 0.0);

            pose.clamp_scale();
            assert_eq!(pose.scale_x, MIN_SCALE);
            assert_eq!(pose.scale_y, MIN_SCALE);

            let (min, max) = pose.reference_quad().bounds();
            assert!(max.x - min.x > 0.0);
            assert!(max.y - min.y > 0.0);
        }
    }
}
