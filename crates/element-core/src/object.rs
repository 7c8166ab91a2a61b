//! Base object shared by every diagram object.

use crate::attributes::{self, ObjectNode, data_add_point, data_add_rectangle, read_or};
use crate::connection::ConnectionPoint;
use crate::handle::Handle;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for objects.
pub type ObjectId = Uuid;

pub const ATTR_OBJ_POS: &str = "obj_pos";
pub const ATTR_OBJ_BB: &str = "obj_bb";

/// Entry in an object's handle list.
///
/// Element handles live inline in the element; the object refers to them by
/// index so copies never share handle storage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum HandleRef {
    /// Slot not yet filled by the owning type.
    #[default]
    Unset,
    /// Index into the element's resize handles.
    Resize(usize),
    /// A handle owned by the object itself.
    Owned(Handle),
}

/// Base object state.
#[derive(Debug, Serialize, Deserialize)]
pub struct Object {
    id: ObjectId,
    /// Reference position, usually the element corner.
    pub position: Point,
    pub bounding_box: Rect,
    pub handles: Vec<HandleRef>,
    pub connections: Vec<ConnectionPoint>,
}

impl Object {
    /// Create an object with `num_handles` empty handle slots and
    /// `num_connections` default connection points.
    pub fn new(num_handles: usize, num_connections: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: Point::ZERO,
            bounding_box: Rect::ZERO,
            handles: vec![HandleRef::Unset; num_handles],
            connections: vec![ConnectionPoint::default(); num_connections],
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn num_handles(&self) -> usize {
        self.handles.len()
    }

    pub fn num_connections(&self) -> usize {
        self.connections.len()
    }

    /// Duplicate this object under a fresh id.
    ///
    /// Connection points keep their layout but nothing is attached to the
    /// copy; owned handles are detached as well.
    pub fn copy(&self) -> Self {
        let handles = self
            .handles
            .iter()
            .map(|h| match h {
                HandleRef::Owned(handle) => HandleRef::Owned(Handle {
                    connected_to: None,
                    ..handle.clone()
                }),
                other => other.clone(),
            })
            .collect();
        let connections = self
            .connections
            .iter()
            .map(|cp| ConnectionPoint {
                connected: Vec::new(),
                ..cp.clone()
            })
            .collect();
        Self {
            id: Uuid::new_v4(),
            position: self.position,
            bounding_box: self.bounding_box,
            handles,
            connections,
        }
    }

    /// Release handle and connection storage.
    pub fn destroy(&mut self) {
        let attached: usize = self.connections.iter().map(|cp| cp.connected.len()).sum();
        if attached > 0 {
            log::warn!("Destroying object {} with {} attached connection(s)", self.id, attached);
        }
        self.handles.clear();
        self.connections.clear();
    }

    /// Write position and bounding box.
    pub fn save(&self, node: &mut ObjectNode) {
        data_add_point(node.new_attribute(ATTR_OBJ_POS), self.position);
        data_add_rectangle(node.new_attribute(ATTR_OBJ_BB), self.bounding_box);
    }

    /// Read position and bounding box, defaulting when absent.
    pub fn load(&mut self, node: &ObjectNode) {
        self.position = read_or(node, ATTR_OBJ_POS, Point::ZERO, attributes::data_point);
        self.bounding_box = read_or(node, ATTR_OBJ_BB, Rect::ZERO, attributes::data_rectangle);
    }
}
