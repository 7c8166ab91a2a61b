//! Rectangular element: an object with eight resize handles on its corners
//! and edge midpoints, and connection points at the same places plus the
//! center.
//!
//! Mutating calls only touch the pose. The owner re-runs handle layout,
//! connection layout and [`Element::update_boundingbox`] afterwards.

use crate::attributes::{self, ObjectNode, data_add_point, data_add_real, read_or};
use crate::bbox::{ElementBBExtras, rectangle_bbox};
use crate::change::ObjectChange;
use crate::connection::ConnectionPoint;
use crate::geometry::{rect_from_corner, rotation_about, transform_points};
use crate::handle::{Handle, HandleId, HandleMoveReason, ModifierKeys};
use crate::layout;
use crate::object::{HandleRef, Object, ObjectId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resize handles every element carries.
pub const NUM_RESIZE_HANDLES: usize = 8;
/// Connection points laid out by [`layout::update_connections_rectangle`].
pub const NUM_RECT_CONNECTIONS: usize = 9;

pub const ATTR_ELEM_CORNER: &str = "elem_corner";
pub const ATTR_ELEM_WIDTH: &str = "elem_width";
pub const ATTR_ELEM_HEIGHT: &str = "elem_height";

/// Element errors. All of them are caller mistakes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElementError {
    #[error("an element needs at least 8 handles, got {requested}")]
    TooFewHandles { requested: usize },
    #[error("an element needs at least 9 connection points, got {requested}")]
    TooFewConnections { requested: usize },
    #[error("{0:?} is not a resize handle")]
    NotAResizeHandle(HandleId),
    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspect(f64),
    #[error("change recorded for object {expected} applied to object {found}")]
    ForeignObject { expected: ObjectId, found: ObjectId },
}

/// Placement of an element: top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub corner: Point,
    pub width: f64,
    pub height: f64,
}

impl Pose {
    pub fn new(corner: Point, width: f64, height: f64) -> Self {
        Self {
            corner,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        rect_from_corner(self.corner, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.corner.x + self.width / 2.0,
            self.corner.y + self.height / 2.0,
        )
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Point::ZERO, 1.0, 1.0)
    }
}

/// A rectangular diagram element.
#[derive(Debug)]
pub struct Element {
    pub object: Object,
    /// Top-left corner.
    pub corner: Point,
    pub width: f64,
    pub height: f64,
    resize_handles: [Handle; NUM_RESIZE_HANDLES],
    /// Padding applied by [`Element::update_boundingbox`].
    pub extra_spacing: ElementBBExtras,
}

impl Element {
    /// Create an element with `num_handles` handle slots and
    /// `num_connections` connection points.
    ///
    /// The first eight handle slots refer to the resize handles. Extra slots
    /// and all connection points are left for the owning type to fill.
    pub fn new(num_handles: usize, num_connections: usize) -> Result<Self, ElementError> {
        if num_handles < NUM_RESIZE_HANDLES {
            let err = ElementError::TooFewHandles {
                requested: num_handles,
            };
            log::error!("Element init: {}", err);
            return Err(err);
        }
        if num_connections < NUM_RECT_CONNECTIONS {
            let err = ElementError::TooFewConnections {
                requested: num_connections,
            };
            log::error!("Element init: {}", err);
            return Err(err);
        }
        Ok(Self::build(num_handles, num_connections))
    }

    /// Create an element with exactly eight handles and nine connection points.
    pub fn rectangular() -> Self {
        Self::build(NUM_RESIZE_HANDLES, NUM_RECT_CONNECTIONS)
    }

    fn build(num_handles: usize, num_connections: usize) -> Self {
        let mut object = Object::new(num_handles, num_connections);
        for (i, slot) in object.handles.iter_mut().take(NUM_RESIZE_HANDLES).enumerate() {
            *slot = HandleRef::Resize(i);
        }
        let pose = Pose::default();
        object.position = pose.corner;
        Self {
            object,
            corner: pose.corner,
            width: pose.width,
            height: pose.height,
            resize_handles: HandleId::RESIZE.map(Handle::resize),
            extra_spacing: ElementBBExtras::default(),
        }
    }

    /// Set the initial pose.
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.set_pose(pose);
        self
    }

    pub fn id(&self) -> ObjectId {
        self.object.id()
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.corner, self.width, self.height)
    }

    /// Replace the pose. The object position follows the corner.
    pub fn set_pose(&mut self, pose: Pose) {
        self.corner = pose.corner;
        self.width = pose.width;
        self.height = pose.height;
        self.object.position = pose.corner;
    }

    pub fn rect(&self) -> Rect {
        self.pose().rect()
    }

    pub fn center(&self) -> Point {
        self.pose().center()
    }

    pub fn resize_handles(&self) -> &[Handle; NUM_RESIZE_HANDLES] {
        &self.resize_handles
    }

    /// Resolve handle slot `index` of the object.
    pub fn handle(&self, index: usize) -> Option<&Handle> {
        match self.object.handles.get(index)? {
            HandleRef::Resize(i) => self.resize_handles.get(*i),
            HandleRef::Owned(handle) => Some(handle),
            HandleRef::Unset => None,
        }
    }

    /// All filled handle slots in order.
    pub fn handles(&self) -> impl Iterator<Item = &Handle> + '_ {
        (0..self.object.num_handles()).filter_map(|i| self.handle(i))
    }

    /// Recompute the bounding box from the pose and extra spacing.
    pub fn update_boundingbox(&mut self) {
        self.object.bounding_box = rectangle_bbox(self.rect(), &self.extra_spacing);
    }

    /// Move the resize handles to the corners and edge midpoints.
    pub fn update_handles(&mut self) {
        let pose = self.pose();
        layout::update_handles(&mut self.resize_handles, &pose);
    }

    /// Lay out the object's own connection points as a rectangle plus center.
    ///
    /// Logs and leaves the points untouched when there are fewer than nine.
    pub fn update_connections_rectangle(&mut self) {
        let pose = self.pose();
        if let Err(e) = layout::update_connections_rectangle(&pose, &mut self.object.connections) {
            log::error!("Element {}: {}", self.id(), e);
        }
    }

    /// Infer directions of the object's connection points from their quadrant.
    pub fn update_connections_directions(&mut self) {
        let center = self.center();
        layout::update_connections_directions(center, &mut self.object.connections);
    }

    /// Drag resize handle `id` to `to`.
    ///
    /// Any other handle id is logged and ignored. The connection point,
    /// reason and modifiers are accepted for the object operation signature
    /// but do not influence the result. Never returns an undo record: take an
    /// [`crate::ElementChange`] before the gesture starts.
    pub fn move_handle(
        &mut self,
        id: HandleId,
        to: Point,
        _cp: Option<&ConnectionPoint>,
        _reason: HandleMoveReason,
        _modifiers: ModifierKeys,
    ) -> Option<Box<dyn ObjectChange>> {
        if let Err(e) = self.try_move_handle(id, to) {
            log::warn!("Element move_handle: {}", e);
        }
        None
    }

    /// Drag resize handle `id` to `to`, reporting a non-resize id as an error.
    ///
    /// Sides opposite the dragged handle stay put, and the dragged side
    /// cannot cross them, so the size never goes negative.
    pub fn try_move_handle(&mut self, id: HandleId, to: Point) -> Result<(), ElementError> {
        let p = to - self.corner;

        let move_left = |elem: &mut Self| {
            if to.x < elem.corner.x + elem.width {
                elem.corner.x += p.x;
                elem.width -= p.x;
            }
        };
        let move_top = |elem: &mut Self| {
            if to.y < elem.corner.y + elem.height {
                elem.corner.y += p.y;
                elem.height -= p.y;
            }
        };
        let move_right = |elem: &mut Self| {
            if p.x > 0.0 {
                elem.width = p.x;
            }
        };
        let move_bottom = |elem: &mut Self| {
            if p.y > 0.0 {
                elem.height = p.y;
            }
        };

        match id {
            HandleId::ResizeNw => {
                move_left(self);
                move_top(self);
            }
            HandleId::ResizeN => move_top(self),
            HandleId::ResizeNe => {
                move_right(self);
                move_top(self);
            }
            HandleId::ResizeW => move_left(self),
            HandleId::ResizeE => move_right(self),
            HandleId::ResizeSw => {
                move_left(self);
                move_bottom(self);
            }
            HandleId::ResizeS => move_bottom(self),
            HandleId::ResizeSe => {
                move_right(self);
                move_bottom(self);
            }
            other => return Err(ElementError::NotAResizeHandle(other)),
        }

        log::debug!(
            "Element {} {:?} -> corner ({}, {}) size {}x{}",
            self.id(),
            id,
            self.corner.x,
            self.corner.y,
            self.width,
            self.height
        );
        Ok(())
    }

    /// Drag resize handle `id` to `to` keeping `width / height == aspect`.
    ///
    /// The point opposite the handle stays fixed (for edge handles, the
    /// middle of the opposite edge). Dragging through the anchor collapses
    /// the element to zero size. Invalid ids or ratios are logged and ignored.
    pub fn move_handle_aspect(&mut self, id: HandleId, to: Point, aspect: f64) {
        if let Err(e) = self.try_move_handle_aspect(id, to, aspect) {
            log::warn!("Element move_handle_aspect: {}", e);
        }
    }

    /// Aspect-preserving drag, reporting bad ids or ratios as errors.
    pub fn try_move_handle_aspect(
        &mut self,
        id: HandleId,
        to: Point,
        aspect: f64,
    ) -> Result<(), ElementError> {
        if !(aspect > 0.0 && aspect.is_finite()) {
            return Err(ElementError::InvalidAspect(aspect));
        }

        let p = to - self.corner;
        let (width, height) = (self.width, self.height);

        // (new width, new height, anchor x, anchor y); unset sizes are zero
        let (mut new_width, mut new_height, move_x, move_y) = match id {
            HandleId::ResizeNw => (width - p.x, height - p.y, 1.0, 1.0),
            HandleId::ResizeN => (0.0, height - p.y, 0.5, 1.0),
            HandleId::ResizeNe => (p.x, height - p.y, 0.0, 1.0),
            HandleId::ResizeW => (width - p.x, 0.0, 1.0, 0.5),
            HandleId::ResizeE => (p.x, 0.0, 0.0, 0.5),
            HandleId::ResizeSw => (width - p.x, p.y, 1.0, 0.0),
            HandleId::ResizeS => (0.0, p.y, 0.5, 0.0),
            HandleId::ResizeSe => (p.x, p.y, 0.0, 0.0),
            other => return Err(ElementError::NotAResizeHandle(other)),
        };

        if new_width > new_height * aspect {
            new_height = new_width / aspect;
        } else {
            new_width = new_height * aspect;
        }

        if new_width < 0.0 || new_height < 0.0 {
            new_width = 0.0;
            new_height = 0.0;
        }

        self.corner.x -= (new_width - width) * move_x;
        self.corner.y -= (new_height - height) * move_y;
        self.width = new_width;
        self.height = new_height;

        log::debug!(
            "Element {} {:?} (aspect {}) -> corner ({}, {}) size {}x{}",
            self.id(),
            id,
            aspect,
            self.corner.x,
            self.corner.y,
            self.width,
            self.height
        );
        Ok(())
    }

    /// The four corners clockwise from top-left, rotated by `angle_deg`
    /// degrees about the center. The pose is not modified.
    pub fn get_poly(&self, angle_deg: f64) -> [Point; 4] {
        let rect = self.rect();
        let mut corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ];
        if angle_deg != 0.0 {
            transform_points(&mut corners, rotation_about(self.center(), angle_deg));
        }
        corners
    }

    /// Duplicate this element.
    ///
    /// The copy gets a fresh id, its own resize handles (detached from any
    /// peer) and handle slots pointing at them, and unconnected connection
    /// points.
    pub fn copy(&self) -> Self {
        let mut object = self.object.copy();
        for (i, slot) in object.handles.iter_mut().take(NUM_RESIZE_HANDLES).enumerate() {
            *slot = HandleRef::Resize(i);
        }
        let resize_handles = self.resize_handles.clone().map(|handle| Handle {
            connected_to: None,
            ..handle
        });
        Self {
            object,
            corner: self.corner,
            width: self.width,
            height: self.height,
            resize_handles,
            extra_spacing: self.extra_spacing,
        }
    }

    /// Release the base object's handle and connection storage.
    pub fn destroy(&mut self) {
        self.object.destroy();
    }

    /// Write the base object attributes followed by corner, width and height.
    pub fn save(&self, node: &mut ObjectNode) {
        self.object.save(node);
        data_add_point(node.new_attribute(ATTR_ELEM_CORNER), self.corner);
        data_add_real(node.new_attribute(ATTR_ELEM_WIDTH), self.width);
        data_add_real(node.new_attribute(ATTR_ELEM_HEIGHT), self.height);
    }

    /// Read the base object attributes and the pose.
    ///
    /// Missing values default to corner `(0, 0)` and size `1 x 1`.
    pub fn load(&mut self, node: &ObjectNode) {
        self.object.load(node);
        let defaults = Pose::default();
        self.set_pose(Pose::new(
            read_or(node, ATTR_ELEM_CORNER, defaults.corner, attributes::data_point),
            read_or(node, ATTR_ELEM_WIDTH, defaults.width, attributes::data_real),
            read_or(node, ATTR_ELEM_HEIGHT, defaults.height, attributes::data_real),
        ));
    }
}
