//! Element Core Library
//!
//! Geometry, resize handles, connection points and pose undo for diagram
//! objects whose footprint is an axis-aligned rectangle.

pub mod attributes;
pub mod bbox;
pub mod change;
pub mod connection;
pub mod element;
pub mod geometry;
pub mod handle;
pub mod layout;
pub mod object;
pub mod properties;
pub mod shapes;

pub use attributes::{Attribute, AttributeError, DataValue, ObjectNode};
pub use bbox::{ElementBBExtras, rectangle_bbox};
pub use change::{ChangeKind, ElementChange, ObjectChange, element_change_new};
pub use connection::{ConnectionPoint, CpFlags, Directions};
pub use element::{Element, ElementError, NUM_RECT_CONNECTIONS, NUM_RESIZE_HANDLES, Pose};
pub use handle::{Handle, HandleConnectType, HandleId, HandleMoveReason, HandleType, ModifierKeys};
pub use object::{HandleRef, Object, ObjectId};
pub use properties::{ELEMENT_PROPS, PropDescription, PropNumData, WIDTH_RANGE};
pub use shapes::{AspectType, BoxShape, ElementShape, EllipseShape, Shape};
