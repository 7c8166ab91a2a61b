//! Canonical placement of resize handles and connection points.
//!
//! Positions follow the handle order: top row left to right, middle row
//! west then east, bottom row left to right. Connection layouts append the
//! center as a ninth point.

use crate::connection::{ConnectionPoint, CpFlags, Directions};
use crate::element::{ElementError, NUM_RECT_CONNECTIONS, Pose};
use crate::handle::{Handle, HandleId};
use kurbo::Point;

/// Directions of the nine rectangle connection points.
pub const RECT_DIRECTIONS: [Directions; 9] = [
    Directions::NORTH.union(Directions::WEST),
    Directions::NORTH,
    Directions::NORTH.union(Directions::EAST),
    Directions::WEST,
    Directions::EAST,
    Directions::SOUTH.union(Directions::WEST),
    Directions::SOUTH,
    Directions::SOUTH.union(Directions::EAST),
    Directions::ALL,
];

/// Corner and edge-midpoint positions in handle order.
pub fn perimeter_points(pose: &Pose) -> [Point; 8] {
    let Pose {
        corner,
        width,
        height,
    } = *pose;
    let (x0, xm, x1) = (corner.x, corner.x + width / 2.0, corner.x + width);
    let (y0, ym, y1) = (corner.y, corner.y + height / 2.0, corner.y + height);
    [
        Point::new(x0, y0),
        Point::new(xm, y0),
        Point::new(x1, y0),
        Point::new(x0, ym),
        Point::new(x1, ym),
        Point::new(x0, y1),
        Point::new(xm, y1),
        Point::new(x1, y1),
    ]
}

/// Write ids and positions of the eight resize handles.
pub fn update_handles(handles: &mut [Handle; 8], pose: &Pose) {
    let points = perimeter_points(pose);
    for ((handle, id), pos) in handles.iter_mut().zip(HandleId::RESIZE).zip(points) {
        handle.id = id;
        handle.pos = pos;
    }
}

/// Place the nine rectangle connection points and their fixed directions.
///
/// Fails without writing anything when `cps` holds fewer than nine points.
pub fn update_connections_rectangle(
    pose: &Pose,
    cps: &mut [ConnectionPoint],
) -> Result<(), ElementError> {
    if cps.len() < NUM_RECT_CONNECTIONS {
        return Err(ElementError::TooFewConnections {
            requested: cps.len(),
        });
    }
    let points = perimeter_points(pose).into_iter().chain([pose.center()]);
    for ((cp, pos), directions) in cps.iter_mut().zip(points).zip(RECT_DIRECTIONS) {
        cp.pos = pos;
        cp.directions = directions;
    }
    Ok(())
}

/// Infer directions from each point's quadrant relative to `center`.
///
/// Points on an axis get no bit for that axis. Main points accept all
/// directions.
pub fn update_connections_directions(center: Point, cps: &mut [ConnectionPoint]) {
    for cp in cps.iter_mut() {
        let mut dirs = Directions::NONE;
        if cp.pos.x > center.x {
            dirs |= Directions::EAST;
        } else if cp.pos.x < center.x {
            dirs |= Directions::WEST;
        }
        if cp.pos.y > center.y {
            dirs |= Directions::SOUTH;
        } else if cp.pos.y < center.y {
            dirs |= Directions::NORTH;
        }
        if cp.flags == CpFlags::MAIN {
            dirs |= Directions::ALL;
        }
        cp.directions = dirs;
    }
}
