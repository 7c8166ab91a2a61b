//! Reversible changes for the host's undo stack.

use crate::element::{Element, ElementError, Pose};
use crate::object::ObjectId;
use kurbo::Point;

/// Type tag of a change record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Corner and size of an element.
    ElementPose,
}

/// A change that can be applied and reverted on an element.
pub trait ObjectChange: std::fmt::Debug {
    /// Type tag.
    fn kind(&self) -> ChangeKind;

    /// Redo the change.
    fn apply(&mut self, elem: &mut Element);

    /// Undo the change.
    fn revert(&mut self, elem: &mut Element);
}

/// Pose change recorded by swapping.
///
/// Holds one pose; apply and revert both exchange it with the element's.
/// The record captures the pose current at construction, so it must be
/// created *before* the element is mutated. Apply and revert must alternate.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementChange {
    element: ObjectId,
    pose: Pose,
}

impl ElementChange {
    /// Snapshot the current pose of `elem`.
    pub fn snapshot(elem: &Element) -> Self {
        Self {
            element: elem.id(),
            pose: elem.pose(),
        }
    }

    /// Record for `elem`. The previous-pose arguments are not stored: the
    /// element's current pose is.
    pub fn new(_corner: Point, _width: f64, _height: f64, elem: &Element) -> Self {
        Self::snapshot(elem)
    }

    /// Id of the element this record belongs to.
    pub fn element(&self) -> ObjectId {
        self.element
    }

    /// The pose currently held by the record.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    fn swap(&mut self, elem: &mut Element) -> Result<(), ElementError> {
        if elem.id() != self.element {
            return Err(ElementError::ForeignObject {
                expected: self.element,
                found: elem.id(),
            });
        }
        let current = elem.pose();
        elem.set_pose(self.pose);
        self.pose = current;
        Ok(())
    }

    fn swap_logged(&mut self, elem: &mut Element) {
        if let Err(e) = self.swap(elem) {
            log::warn!("Element change: {}", e);
        }
    }
}

impl ObjectChange for ElementChange {
    fn kind(&self) -> ChangeKind {
        ChangeKind::ElementPose
    }

    fn apply(&mut self, elem: &mut Element) {
        self.swap_logged(elem);
    }

    fn revert(&mut self, elem: &mut Element) {
        self.swap_logged(elem);
    }
}

/// Allocate a pose change record for `elem`; see [`ElementChange::new`].
pub fn element_change_new(
    corner: Point,
    width: f64,
    height: f64,
    elem: &Element,
) -> Box<dyn ObjectChange> {
    Box::new(ElementChange::new(corner, width, height, elem))
}
