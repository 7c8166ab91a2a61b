//! Bounding box padding for rectangular elements.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Extra spacing around an element's geometric rectangle.
///
/// Usually half the line width, so the bounding box encloses the stroke.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementBBExtras {
    /// Padding added on every side of the rectangle.
    pub border_trans: f64,
}

impl ElementBBExtras {
    /// Padding for a stroke of the given width.
    pub fn from_line_width(line_width: f64) -> Self {
        Self {
            border_trans: line_width / 2.0,
        }
    }
}

/// Expand `rect` by the element padding.
pub fn rectangle_bbox(rect: Rect, extra: &ElementBBExtras) -> Rect {
    let pad = extra.border_trans;
    Rect::new(rect.x0 - pad, rect.y0 - pad, rect.x1 + pad, rect.y1 + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padding_is_identity() {
        let rect = Rect::new(1.0, 2.0, 3.0, 5.0);
        assert_eq!(rectangle_bbox(rect, &ElementBBExtras::default()), rect);
    }

    #[test]
    fn test_padding_on_all_sides() {
        let rect = Rect::new(0.0, 0.0, 10.0, 4.0);
        let bb = rectangle_bbox(rect, &ElementBBExtras::from_line_width(0.2));
        assert!((bb.x0 + 0.1).abs() < 1e-12);
        assert!((bb.y0 + 0.1).abs() < 1e-12);
        assert!((bb.x1 - 10.1).abs() < 1e-12);
        assert!((bb.y1 - 4.1).abs() < 1e-12);
    }
}
