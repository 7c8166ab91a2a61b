//! Shapes built on [`Element`].

mod box_shape;
mod ellipse;

pub use box_shape::{AspectType, BoxShape};
pub use ellipse::EllipseShape;

use crate::attributes::{AttributeError, ObjectNode};
use crate::change::ObjectChange;
use crate::connection::ConnectionPoint;
use crate::element::Element;
use crate::handle::{HandleId, HandleMoveReason, ModifierKeys};
use crate::object::ObjectId;
use crate::properties::{ELEMENT_PROPS, PropDescription};
use kurbo::{Point, Rect};

/// Persisted type name of [`BoxShape`].
pub const TYPE_BOX: &str = "Standard - Box";
/// Persisted type name of [`EllipseShape`].
pub const TYPE_ELLIPSE: &str = "Standard - Ellipse";

/// Attribute holding the stroke width.
pub(crate) const ATTR_LINE_WIDTH: &str = "line_width";
/// Default stroke width for new shapes.
pub const DEFAULT_LINE_WIDTH: f64 = 0.1;

/// Object operations every element-based shape provides.
pub trait ElementShape {
    /// Persisted type name.
    fn type_name(&self) -> &'static str;

    fn element(&self) -> &Element;

    fn element_mut(&mut self) -> &mut Element;

    /// Drag a handle, then bring the decorations up to date.
    fn move_handle(
        &mut self,
        id: HandleId,
        to: Point,
        cp: Option<&ConnectionPoint>,
        reason: HandleMoveReason,
        modifiers: ModifierKeys,
    ) -> Option<Box<dyn ObjectChange>>;

    /// Recompute handles, connection points and bounding box from the pose.
    fn update_data(&mut self);

    /// Write all attributes into `node`.
    fn save(&self, node: &mut ObjectNode);

    /// Read attributes from `node` and update derived data.
    fn load(&mut self, node: &ObjectNode);

    /// Duplicate under a fresh id.
    fn copy(&self) -> Self
    where
        Self: Sized;

    /// Release object resources.
    fn destroy(&mut self) {
        self.element_mut().destroy();
    }

    /// Editable numeric properties.
    fn props(&self) -> &'static [PropDescription] {
        &ELEMENT_PROPS
    }
}

/// All element-based shape kinds.
#[derive(Debug)]
pub enum Shape {
    Box(BoxShape),
    Ellipse(EllipseShape),
}

impl Shape {
    pub fn id(&self) -> ObjectId {
        self.element().id()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Box(s) => s.type_name(),
            Shape::Ellipse(s) => s.type_name(),
        }
    }

    pub fn element(&self) -> &Element {
        match self {
            Shape::Box(s) => s.element(),
            Shape::Ellipse(s) => s.element(),
        }
    }

    pub fn element_mut(&mut self) -> &mut Element {
        match self {
            Shape::Box(s) => s.element_mut(),
            Shape::Ellipse(s) => s.element_mut(),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.element().object.bounding_box
    }

    pub fn move_handle(
        &mut self,
        id: HandleId,
        to: Point,
        cp: Option<&ConnectionPoint>,
        reason: HandleMoveReason,
        modifiers: ModifierKeys,
    ) -> Option<Box<dyn ObjectChange>> {
        match self {
            Shape::Box(s) => s.move_handle(id, to, cp, reason, modifiers),
            Shape::Ellipse(s) => s.move_handle(id, to, cp, reason, modifiers),
        }
    }

    pub fn update_data(&mut self) {
        match self {
            Shape::Box(s) => s.update_data(),
            Shape::Ellipse(s) => s.update_data(),
        }
    }

    /// Serialize into a fresh node tagged with the type name.
    pub fn save(&self) -> ObjectNode {
        let mut node = ObjectNode::new(self.type_name());
        match self {
            Shape::Box(s) => s.save(&mut node),
            Shape::Ellipse(s) => s.save(&mut node),
        }
        node
    }

    /// Rebuild a shape from a node, choosing the kind by type name.
    pub fn load(node: &ObjectNode) -> Result<Self, AttributeError> {
        let mut shape = match node.type_name.as_str() {
            TYPE_BOX => Shape::Box(BoxShape::default()),
            TYPE_ELLIPSE => Shape::Ellipse(EllipseShape::default()),
            other => return Err(AttributeError::UnknownType(other.to_string())),
        };
        match &mut shape {
            Shape::Box(s) => s.load(node),
            Shape::Ellipse(s) => s.load(node),
        }
        Ok(shape)
    }

    pub fn copy(&self) -> Self {
        match self {
            Shape::Box(s) => Shape::Box(s.copy()),
            Shape::Ellipse(s) => Shape::Ellipse(s.copy()),
        }
    }

    pub fn destroy(&mut self) {
        match self {
            Shape::Box(s) => s.destroy(),
            Shape::Ellipse(s) => s.destroy(),
        }
    }

    pub fn props(&self) -> &'static [PropDescription] {
        match self {
            Shape::Box(s) => s.props(),
            Shape::Ellipse(s) => s.props(),
        }
    }
}
