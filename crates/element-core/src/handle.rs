//! Handle definitions for element manipulation.

use crate::object::ObjectId;
use bitflags::bitflags;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Identity of a handle - determines what a drag on it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleId {
    // Resize handles, in canonical layout order
    ResizeNw,
    ResizeN,
    ResizeNe,
    ResizeW,
    ResizeE,
    ResizeSw,
    ResizeS,
    ResizeSe,
    // Endpoint handles (for connectors)
    MoveStartpoint,
    MoveEndpoint,
    // Subtype-specific handles
    Custom1,
    Custom2,
    Custom3,
    Custom4,
    Custom5,
    Custom6,
    Custom7,
    Custom8,
    Custom9,
}

impl HandleId {
    /// The eight resize handles in layout order.
    pub const RESIZE: [HandleId; 8] = [
        HandleId::ResizeNw,
        HandleId::ResizeN,
        HandleId::ResizeNe,
        HandleId::ResizeW,
        HandleId::ResizeE,
        HandleId::ResizeSw,
        HandleId::ResizeS,
        HandleId::ResizeSe,
    ];

    /// Slot of this handle in an element's resize handles, if it is one.
    pub fn resize_index(self) -> Option<usize> {
        Self::RESIZE.iter().position(|&id| id == self)
    }

    /// Check if this is one of the eight resize handles.
    pub fn is_resize(self) -> bool {
        self.resize_index().is_some()
    }
}

/// How a handle is presented and whether it can be dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandleType {
    NonMovable,
    #[default]
    MajorControl,
    MinorControl,
}

/// Whether a handle may attach to a connection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandleConnectType {
    #[default]
    NonConnectable,
    Connectable,
    /// Connectable, but the connection survives moving the whole object.
    ConnectableNoBreak,
}

/// What is causing a handle to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandleMoveReason {
    /// Interactive drag in progress.
    #[default]
    User,
    /// Interactive drag released.
    UserFinal,
    /// Following a connected object.
    Connected,
    /// Object creation drag in progress.
    Create,
    /// Object creation drag released.
    CreateFinal,
}

bitflags! {
    /// Modifier keys held during a gesture.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ModifierKeys: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
    }
}

impl Default for ModifierKeys {
    fn default() -> Self {
        Self::NONE
    }
}

/// A manipulation handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    pub id: HandleId,
    /// Position in diagram coordinates.
    pub pos: Point,
    pub handle_type: HandleType,
    pub connect_type: HandleConnectType,
    /// Object whose connection point this handle is attached to.
    pub connected_to: Option<ObjectId>,
}

impl Handle {
    /// Create an unattached handle.
    pub fn new(id: HandleId, pos: Point) -> Self {
        Self {
            id,
            pos,
            handle_type: HandleType::default(),
            connect_type: HandleConnectType::default(),
            connected_to: None,
        }
    }

    /// A resize handle: major control, never connectable.
    pub fn resize(id: HandleId) -> Self {
        Self::new(id, Point::ZERO)
            .with_type(HandleType::MajorControl)
            .with_connect_type(HandleConnectType::NonConnectable)
    }

    /// Set the handle type.
    pub fn with_type(mut self, handle_type: HandleType) -> Self {
        self.handle_type = handle_type;
        self
    }

    /// Set the connect type.
    pub fn with_connect_type(mut self, connect_type: HandleConnectType) -> Self {
        self.connect_type = connect_type;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_index() {
        for (i, id) in HandleId::RESIZE.iter().enumerate() {
            assert_eq!(id.resize_index(), Some(i));
        }
        assert_eq!(HandleId::MoveStartpoint.resize_index(), None);
        assert!(!HandleId::Custom9.is_resize());
    }

    #[test]
    fn test_resize_handle_defaults() {
        let handle = Handle::resize(HandleId::ResizeS);
        assert_eq!(handle.handle_type, HandleType::MajorControl);
        assert_eq!(handle.connect_type, HandleConnectType::NonConnectable);
        assert!(handle.connected_to.is_none());
    }

    #[test]
    fn test_modifier_keys() {
        let mods = ModifierKeys::SHIFT | ModifierKeys::ALT;
        assert!(mods.contains(ModifierKeys::SHIFT));
        assert!(!mods.contains(ModifierKeys::CONTROL));
        assert!(ModifierKeys::NONE.is_empty());
    }
}
