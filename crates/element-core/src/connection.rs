//! Connection points: anchors where connectors attach.

use crate::object::ObjectId;
use bitflags::bitflags;
use kurbo::Point;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Headings a connector may leave a connection point in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Directions: u8 {
        const NONE = 0;
        const NORTH = 1 << 0;
        const EAST = 1 << 1;
        const SOUTH = 1 << 2;
        const WEST = 1 << 3;
        const ALL = Self::NORTH.bits() | Self::EAST.bits() | Self::SOUTH.bits() | Self::WEST.bits();
    }
}

impl Default for Directions {
    fn default() -> Self {
        Self::NONE
    }
}

bitflags! {
    /// Connection point flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CpFlags: u8 {
        const NONE = 0;
        /// The object's main point, usually its center.
        const MAIN = 1 << 0;
    }
}

impl Default for CpFlags {
    fn default() -> Self {
        Self::NONE
    }
}

/// A connection point on an object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConnectionPoint {
    /// Position in diagram coordinates.
    pub pos: Point,
    /// Preferred outbound headings, used by connector routing.
    pub directions: Directions,
    pub flags: CpFlags,
    /// Objects whose handles are attached here.
    #[serde(default)]
    pub connected: Vec<ObjectId>,
    /// Optional user-visible name.
    #[serde(default)]
    pub name: Option<String>,
}

impl ConnectionPoint {
    /// Create an unconnected point.
    pub fn new(pos: Point, directions: Directions) -> Self {
        Self {
            pos,
            directions,
            ..Self::default()
        }
    }

    /// Set the flags.
    pub fn with_flags(mut self, flags: CpFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Check if this is the main point.
    pub fn is_main(&self) -> bool {
        self.flags.contains(CpFlags::MAIN)
    }

    /// Check if anything is attached.
    pub fn is_connected(&self) -> bool {
        !self.connected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_every_cardinal() {
        let cardinals = Directions::NORTH | Directions::EAST | Directions::SOUTH | Directions::WEST;
        assert_eq!(cardinals, Directions::ALL);
        assert!(Directions::ALL.contains(Directions::WEST));
        assert!(Directions::NONE.is_empty());
        assert_eq!(Directions::ALL.bits(), 0b1111);
    }

    #[test]
    fn test_serde_keeps_flags() {
        let cp = ConnectionPoint::new(Point::new(1.0, 2.0), Directions::NORTH | Directions::EAST)
            .with_flags(CpFlags::MAIN);
        let json = serde_json::to_string(&cp).unwrap();
        let back: ConnectionPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back.directions, Directions::NORTH | Directions::EAST);
        assert!(back.is_main());
        assert_eq!(ConnectionPoint::default().directions, Directions::NONE);
    }

    #[test]
    fn test_main_flag() {
        let cp = ConnectionPoint::default().with_flags(CpFlags::MAIN);
        assert!(cp.is_main());
        assert!(!ConnectionPoint::default().is_main());
    }
}
