// Core types shared by the geometry, render and window code.

/// Screen buffer handed to minifb every frame.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the frame is on screen (pixels)
    pub height: usize,    // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// A point in frame pixel space (x right, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance; symmetric and zero for the same point.
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of `other` seen from `self`, in radians, over all four quadrants.
    pub fn angle_to(self, other: Point) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// The point `radius` away from `self` in direction `angle`.
    pub fn polar(self, radius: f32, angle: f32) -> Point {
        Point::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Point {
    type Output = Point;
    fn mul(self, k: f32) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_matches_known_triangles() {
        let cases = [
            (Point::new(0.0, 0.0), Point::new(4.0, 3.0)),
            (Point::new(10.0, 10.0), Point::new(14.0, 13.0)),
            (Point::new(-10.0, -10.0), Point::new(-14.0, -13.0)),
            (Point::new(-0.0, -0.0), Point::new(-4.0, -3.0)),
        ];
        for (a, b) in cases {
            assert_eq!(a.distance(b), 5.0);
        }
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(3.5, -2.25),
            Point::new(-120.0, 44.0),
            Point::new(639.0, 479.0),
        ];
        for &a in &pts {
            assert_eq!(a.distance(a), 0.0);
            for &b in &pts {
                assert_eq!(a.distance(b), b.distance(a));
            }
        }
    }

    #[test]
    fn angle_covers_all_quadrants() {
        let o = Point::new(5.0, 5.0);
        let eps = 1e-6;
        assert!((o.angle_to(Point::new(6.0, 5.0)) - 0.0).abs() < eps);
        assert!((o.angle_to(Point::new(5.0, 6.0)) - std::f32::consts::FRAC_PI_2).abs() < eps);
        assert!((o.angle_to(Point::new(4.0, 5.0)).abs() - std::f32::consts::PI).abs() < eps);
        assert!((o.angle_to(Point::new(5.0, 4.0)) + std::f32::consts::FRAC_PI_2).abs() < eps);
        // left and up: must land in the third quadrant, not be mirrored
        let a = o.angle_to(Point::new(4.0, 4.0));
        assert!((a + 3.0 * std::f32::consts::FRAC_PI_4).abs() < eps);
    }

    #[test]
    fn polar_inverts_angle_and_distance() {
        let c = Point::new(2.0, -1.0);
        let p = Point::new(-3.0, -7.5);
        let back = c.polar(c.distance(p), c.angle_to(p));
        assert!((back.x - p.x).abs() < 1e-4);
        assert!((back.y - p.y).abs() < 1e-4);
    }
}
