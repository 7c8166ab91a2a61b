//! Geometry helpers on top of kurbo.
//!
//! Coordinates are y-down: `corner` is the top-left of a rectangle and
//! `corner + (width, height)` its bottom-right.

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Build the rectangle spanned by a top-left corner and a size.
pub fn rect_from_corner(corner: Point, width: f64, height: f64) -> Rect {
    Rect::new(corner.x, corner.y, corner.x + width, corner.y + height)
}

/// Affine transform rotating by `angle_deg` degrees about `center`.
///
/// Translates `center` to the origin, rotates, then translates back.
pub fn rotation_about(center: Point, angle_deg: f64) -> Affine {
    let offset = center.to_vec2();
    Affine::translate(offset) * Affine::rotate(angle_deg.to_radians()) * Affine::translate(-offset)
}

/// Apply `m` to every point in place.
pub fn transform_points(points: &mut [Point], m: Affine) {
    for point in points.iter_mut() {
        *point = m * *point;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_rect_from_corner() {
        let rect = rect_from_corner(Point::new(1.0, 2.0), 3.0, 4.0);
        assert_eq!(rect, Rect::new(1.0, 2.0, 4.0, 6.0));
    }

    #[test]
    fn test_rotation_keeps_center_fixed() {
        let center = Point::new(5.0, -3.0);
        let m = rotation_about(center, 37.0);
        assert_near(m * center, center);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let m = rotation_about(Point::new(1.0, 1.0), 90.0);
        assert_near(m * Point::new(0.0, 0.0), Point::new(2.0, 0.0));
        assert_near(m * Point::new(2.0, 0.0), Point::new(2.0, 2.0));
    }

    #[test]
    fn test_transform_points_in_place() {
        let mut points = [Point::new(0.0, 0.0), Point::new(1.0, 2.0)];
        transform_points(&mut points, Affine::translate((10.0, 20.0)));
        assert_eq!(points, [Point::new(10.0, 20.0), Point::new(11.0, 22.0)]);
    }
}
