//! Ellipse shape.

use super::{ATTR_LINE_WIDTH, DEFAULT_LINE_WIDTH, ElementShape, TYPE_ELLIPSE};
use crate::attributes::{self, ObjectNode, data_add_real, read_or};
use crate::bbox::ElementBBExtras;
use crate::change::ObjectChange;
use crate::connection::{ConnectionPoint, CpFlags};
use crate::element::{Element, Pose};
use crate::handle::{HandleId, HandleMoveReason, ModifierKeys};
use kurbo::{Point, Vec2};
use std::f64::consts::FRAC_1_SQRT_2;

/// Unit offsets of the perimeter connection points, in handle order.
const PERIMETER_OFFSETS: [(f64, f64); 8] = [
    (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    (0.0, -1.0),
    (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (0.0, 1.0),
    (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
];

/// An ellipse inscribed in its element rectangle.
///
/// Connection points sit on the curve, so their directions are inferred
/// from their quadrant rather than taken from the rectangle table.
#[derive(Debug)]
pub struct EllipseShape {
    element: Element,
    pub line_width: f64,
}

impl EllipseShape {
    /// Create an ellipse whose bounding rectangle starts at `corner`.
    pub fn new(corner: Point, width: f64, height: f64) -> Self {
        let mut element = Element::rectangular().with_pose(Pose::new(corner, width, height));
        element.object.connections[8].flags = CpFlags::MAIN;
        let mut shape = Self {
            element,
            line_width: DEFAULT_LINE_WIDTH,
        };
        shape.update_data();
        shape
    }

    /// Create an ellipse from its center and radii.
    pub fn from_center(center: Point, radius_x: f64, radius_y: f64) -> Self {
        let corner = center - Vec2::new(radius_x, radius_y);
        Self::new(corner, radius_x * 2.0, radius_y * 2.0)
    }

    fn update_connections(&mut self) {
        let center = self.element.center();
        let radii = Vec2::new(self.element.width / 2.0, self.element.height / 2.0);
        let cps = &mut self.element.object.connections;
        for (cp, (dx, dy)) in cps.iter_mut().zip(PERIMETER_OFFSETS) {
            cp.pos = Point::new(center.x + dx * radii.x, center.y + dy * radii.y);
        }
        if let Some(main) = cps.get_mut(8) {
            main.pos = center;
        }
        self.element.update_connections_directions();
    }
}

impl Default for EllipseShape {
    fn default() -> Self {
        let pose = Pose::default();
        Self::new(pose.corner, pose.width, pose.height)
    }
}

impl ElementShape for EllipseShape {
    fn type_name(&self) -> &'static str {
        TYPE_ELLIPSE
    }

    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn move_handle(
        &mut self,
        id: HandleId,
        to: Point,
        cp: Option<&ConnectionPoint>,
        reason: HandleMoveReason,
        modifiers: ModifierKeys,
    ) -> Option<Box<dyn ObjectChange>> {
        let change = self.element.move_handle(id, to, cp, reason, modifiers);
        self.update_data();
        change
    }

    fn update_data(&mut self) {
        self.element.extra_spacing = ElementBBExtras::from_line_width(self.line_width);
        self.element.object.position = self.element.corner;
        self.element.update_handles();
        self.update_connections();
        self.element.update_boundingbox();
    }

    fn save(&self, node: &mut ObjectNode) {
        self.element.save(node);
        data_add_real(node.new_attribute(ATTR_LINE_WIDTH), self.line_width);
    }

    fn load(&mut self, node: &ObjectNode) {
        self.element.load(node);
        self.line_width = read_or(node, ATTR_LINE_WIDTH, DEFAULT_LINE_WIDTH, attributes::data_real);
        self.update_data();
    }

    fn copy(&self) -> Self {
        Self {
            element: self.element.copy(),
            line_width: self.line_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Directions;

    #[test]
    fn test_connection_points_on_curve() {
        let shape = EllipseShape::new(Point::new(0.0, 0.0), 4.0, 2.0);
        let cps = &shape.element().object.connections;
        assert_eq!(cps[1].pos, Point::new(2.0, 0.0));
        assert_eq!(cps[4].pos, Point::new(4.0, 1.0));
        assert_eq!(cps[8].pos, Point::new(2.0, 1.0));
        for cp in cps.iter().take(8) {
            let nx = (cp.pos.x - 2.0) / 2.0;
            let ny = cp.pos.y - 1.0;
            assert!((nx * nx + ny * ny - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_directions_from_quadrants() {
        let shape = EllipseShape::new(Point::new(0.0, 0.0), 4.0, 2.0);
        let cps = &shape.element().object.connections;
        assert_eq!(cps[0].directions, Directions::NORTH | Directions::WEST);
        assert_eq!(cps[1].directions, Directions::NORTH);
        assert_eq!(cps[4].directions, Directions::EAST);
        assert_eq!(cps[7].directions, Directions::SOUTH | Directions::EAST);
        assert_eq!(cps[8].directions, Directions::ALL);
    }

    #[test]
    fn test_from_center() {
        let shape = EllipseShape::from_center(Point::new(5.0, 5.0), 2.0, 1.0);
        assert_eq!(shape.element().pose(), Pose::new(Point::new(3.0, 4.0), 4.0, 2.0));
    }

    #[test]
    fn test_drag_moves_points() {
        let mut shape = EllipseShape::new(Point::ZERO, 2.0, 2.0);
        shape.move_handle(
            HandleId::ResizeE,
            Point::new(6.0, 1.0),
            None,
            HandleMoveReason::User,
            ModifierKeys::NONE,
        );
        let elem = shape.element();
        assert_eq!(elem.width, 6.0);
        assert_eq!(elem.object.connections[4].pos, Point::new(6.0, 1.0));
        assert_eq!(elem.resize_handles()[4].pos, Point::new(6.0, 1.0));
    }
}
