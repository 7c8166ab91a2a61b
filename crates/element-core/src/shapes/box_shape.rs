//! Box shape.

use super::{ATTR_LINE_WIDTH, DEFAULT_LINE_WIDTH, ElementShape, TYPE_BOX};
use crate::attributes::{self, ObjectNode, data_add_int, data_add_real, read_or};
use crate::bbox::ElementBBExtras;
use crate::change::ObjectChange;
use crate::connection::{ConnectionPoint, CpFlags};
use crate::element::{Element, Pose};
use crate::handle::{HandleId, HandleMoveReason, ModifierKeys};
use kurbo::Point;
use serde::{Deserialize, Serialize};

const ATTR_ASPECT: &str = "aspect";

/// How a box reacts to resize drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectType {
    /// Width and height change independently.
    #[default]
    Free,
    /// The ratio at the start of the drag is kept.
    Fixed,
    /// Width and height are always equal.
    Square,
}

impl AspectType {
    fn to_int(self) -> i64 {
        match self {
            AspectType::Free => 0,
            AspectType::Fixed => 1,
            AspectType::Square => 2,
        }
    }

    fn from_int(value: i64) -> Self {
        match value {
            1 => AspectType::Fixed,
            2 => AspectType::Square,
            0 => AspectType::Free,
            other => {
                log::warn!("Unknown box aspect {}, using free", other);
                AspectType::Free
            }
        }
    }
}

/// A plain rectangle with nine connection points.
#[derive(Debug)]
pub struct BoxShape {
    element: Element,
    /// Stroke width; half of it pads the bounding box.
    pub line_width: f64,
    pub aspect: AspectType,
}

impl BoxShape {
    /// Create a box and lay out its decorations.
    pub fn new(corner: Point, width: f64, height: f64) -> Self {
        let mut element = Element::rectangular().with_pose(Pose::new(corner, width, height));
        element.object.connections[8].flags = CpFlags::MAIN;
        let mut shape = Self {
            element,
            line_width: DEFAULT_LINE_WIDTH,
            aspect: AspectType::Free,
        };
        shape.update_data();
        shape
    }

    /// Set the aspect behaviour.
    pub fn with_aspect(mut self, aspect: AspectType) -> Self {
        self.aspect = aspect;
        self.update_data();
        self
    }
}

impl Default for BoxShape {
    fn default() -> Self {
        let pose = Pose::default();
        Self::new(pose.corner, pose.width, pose.height)
    }
}

impl ElementShape for BoxShape {
    fn type_name(&self) -> &'static str {
        TYPE_BOX
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
        let change = match self.aspect {
            AspectType::Free => self.element.move_handle(id, to, cp, reason, modifiers),
            AspectType::Fixed => {
                let ratio = self.element.width / self.element.height;
                if ratio > 0.0 && ratio.is_finite() {
                    self.element.move_handle_aspect(id, to, ratio);
                    None
                } else {
                    // degenerate size has no ratio to keep
                    self.element.move_handle(id, to, cp, reason, modifiers)
                }
            }
            AspectType::Square => {
                self.element.move_handle_aspect(id, to, 1.0);
                None
            }
        };
        self.update_data();
        change
    }

    fn update_data(&mut self) {
        let elem = &mut self.element;
        if self.aspect == AspectType::Square {
            let size = elem.width.min(elem.height);
            elem.width = size;
            elem.height = size;
        }
        elem.extra_spacing = ElementBBExtras::from_line_width(self.line_width);
        elem.object.position = elem.corner;
        elem.update_handles();
        elem.update_connections_rectangle();
        elem.update_boundingbox();
    }

    fn save(&self, node: &mut ObjectNode) {
        self.element.save(node);
        data_add_real(node.new_attribute(ATTR_LINE_WIDTH), self.line_width);
        data_add_int(node.new_attribute(ATTR_ASPECT), self.aspect.to_int());
    }

    fn load(&mut self, node: &ObjectNode) {
        self.element.load(node);
        self.line_width = read_or(node, ATTR_LINE_WIDTH, DEFAULT_LINE_WIDTH, attributes::data_real);
        self.aspect = AspectType::from_int(read_or(node, ATTR_ASPECT, 0, attributes::data_int));
        self.update_data();
    }

    fn copy(&self) -> Self {
        Self {
            element: self.element.copy(),
            line_width: self.line_width,
            aspect: self.aspect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ElementChange;
    use crate::connection::Directions;

    const EPS: f64 = 1e-9;

    fn drag(shape: &mut BoxShape, id: HandleId, x: f64, y: f64) {
        shape.move_handle(
            id,
            Point::new(x, y),
            None,
            HandleMoveReason::User,
            ModifierKeys::NONE,
        );
    }

    #[test]
    fn test_new_box_decorations() {
        let shape = BoxShape::new(Point::new(0.0, 0.0), 4.0, 2.0);
        let elem = shape.element();
        assert_eq!(elem.resize_handles()[7].pos, Point::new(4.0, 2.0));
        assert_eq!(elem.object.connections[8].pos, Point::new(2.0, 1.0));
        assert!(elem.object.connections[8].is_main());
        assert_eq!(elem.object.connections[3].directions, Directions::WEST);
        assert!((elem.object.bounding_box.x0 + 0.05).abs() < EPS);
    }

    #[test]
    fn test_free_drag_relayouts() {
        let mut shape = BoxShape::new(Point::ZERO, 2.0, 2.0);
        drag(&mut shape, HandleId::ResizeSe, 5.0, 3.0);
        let elem = shape.element();
        assert_eq!(elem.pose(), Pose::new(Point::ZERO, 5.0, 3.0));
        assert_eq!(elem.resize_handles()[4].pos, Point::new(5.0, 1.5));
        assert_eq!(elem.object.connections[6].pos, Point::new(2.5, 3.0));
    }

    #[test]
    fn test_fixed_aspect_drag() {
        let mut shape = BoxShape::new(Point::ZERO, 4.0, 2.0).with_aspect(AspectType::Fixed);
        drag(&mut shape, HandleId::ResizeSe, 10.0, 3.0);
        let elem = shape.element();
        assert!((elem.width - 10.0).abs() < EPS);
        assert!((elem.height - 5.0).abs() < EPS);
    }

    #[test]
    fn test_fixed_aspect_degenerate_falls_back() {
        let mut shape = BoxShape::new(Point::ZERO, 4.0, 0.0).with_aspect(AspectType::Fixed);
        drag(&mut shape, HandleId::ResizeSe, 6.0, 3.0);
        assert_eq!(shape.element().pose(), Pose::new(Point::ZERO, 6.0, 3.0));
    }

    #[test]
    fn test_square_stays_square() {
        let mut shape = BoxShape::new(Point::ZERO, 4.0, 2.0).with_aspect(AspectType::Square);
        assert_eq!(shape.element().width, 2.0);
        drag(&mut shape, HandleId::ResizeE, 7.0, 1.0);
        let elem = shape.element();
        assert!((elem.width - elem.height).abs() < EPS);
        assert!((elem.width - 7.0).abs() < EPS);
    }

    #[test]
    fn test_gesture_undo() {
        let mut shape = BoxShape::new(Point::new(1.0, 1.0), 3.0, 4.0);
        let mut change = ElementChange::snapshot(shape.element());
        drag(&mut shape, HandleId::ResizeNw, 0.0, -1.0);
        assert_eq!(shape.element().pose(), Pose::new(Point::new(0.0, -1.0), 4.0, 6.0));

        change.revert(shape.element_mut());
        shape.update_data();
        assert_eq!(shape.element().pose(), Pose::new(Point::new(1.0, 1.0), 3.0, 4.0));
        assert_eq!(shape.element().resize_handles()[0].pos, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_save_load() {
        let mut shape =
            BoxShape::new(Point::new(2.0, 3.0), 5.0, 5.0).with_aspect(AspectType::Square);
        shape.line_width = 0.4;
        let mut node = ObjectNode::new(TYPE_BOX);
        shape.save(&mut node);

        let mut loaded = BoxShape::default();
        loaded.load(&node);
        assert_eq!(loaded.element().pose(), shape.element().pose());
        assert_eq!(loaded.line_width, 0.4);
        assert_eq!(loaded.aspect, AspectType::Square);
        assert_eq!(loaded.element().object.bounding_box, shape.element().object.bounding_box);
    }

    #[test]
    fn test_unknown_aspect_defaults_free() {
        assert_eq!(AspectType::from_int(7), AspectType::Free);
        for aspect in [AspectType::Free, AspectType::Fixed, AspectType::Square] {
            assert_eq!(AspectType::from_int(aspect.to_int()), aspect);
        }
    }

    #[test]
    fn test_aspect_serde() {
        let json = serde_json::to_string(&AspectType::Fixed).unwrap();
        assert_eq!(json, "\"Fixed\"");
        let back: AspectType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AspectType::Fixed);
    }

    #[test]
    fn test_copy_is_independent() {
        let shape = BoxShape::new(Point::ZERO, 2.0, 2.0);
        let mut copy = shape.copy();
        drag(&mut copy, HandleId::ResizeSe, 8.0, 8.0);
        assert_eq!(shape.element().pose(), Pose::new(Point::ZERO, 2.0, 2.0));
        assert_eq!(copy.element().pose(), Pose::new(Point::ZERO, 8.0, 8.0));
    }
}
