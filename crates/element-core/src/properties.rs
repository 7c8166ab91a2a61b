//! Property metadata advertised to property editors.

use crate::element::{ATTR_ELEM_HEIGHT, ATTR_ELEM_WIDTH};

/// Numeric range and step for a real-valued property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropNumData {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl PropNumData {
    /// Clamp `value` into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Range for element width and height.
///
/// Deliberately open in both directions; non-negativity is enforced by the
/// resize engines, not the editor.
pub const WIDTH_RANGE: PropNumData = PropNumData {
    min: -(f32::MAX as f64),
    max: f32::MAX as f64,
    step: 0.1,
};

/// A real-valued property an editor can show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropDescription {
    /// Attribute name the value is persisted under.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub range: PropNumData,
}

/// Size properties shared by every element.
pub const ELEMENT_PROPS: [PropDescription; 2] = [
    PropDescription {
        name: ATTR_ELEM_WIDTH,
        label: "Width",
        range: WIDTH_RANGE,
    },
    PropDescription {
        name: ATTR_ELEM_HEIGHT,
        label: "Height",
        range: WIDTH_RANGE,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_range() {
        assert_eq!(WIDTH_RANGE.max, f32::MAX as f64);
        assert_eq!(WIDTH_RANGE.min, -WIDTH_RANGE.max);
        assert!((WIDTH_RANGE.step - 0.1).abs() < f64::EPSILON);
        assert_eq!(WIDTH_RANGE.clamp(-3.0), -3.0);
        assert_eq!(WIDTH_RANGE.clamp(f64::MAX), f32::MAX as f64);
    }

    #[test]
    fn test_element_props() {
        let names: Vec<_> = ELEMENT_PROPS.iter().map(|p| p.name).collect();
        assert_eq!(names, ["elem_width", "elem_height"]);
    }
}
