//! Record types describing finalized board geometry.
//!
//! These are the post-layout records the validation stages consume and
//! produce. Shape enums are externally tagged with `shape` so a circle
//! cutout serializes as `{"shape":"circle",...}`, matching the record
//! format consumed by downstream exporters.

use pcad_math::Point2D;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw numeric value of this id.
            pub fn raw(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(v: u64) -> Self {
                Self(v)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Id of a [`Board`] record.
    BoardId,
    "board"
);
define_id!(
    /// Id of a [`Hole`] record.
    HoleId,
    "hole"
);
define_id!(
    /// Id of a [`Cutout`] record.
    CutoutId,
    "cutout"
);
define_id!(
    /// Id of a [`Pad`] record.
    PadId,
    "pad"
);
define_id!(
    /// Id of a [`Component`] record.
    ComponentId,
    "component"
);
define_id!(
    /// Id of an [`OverlapViolation`] record.
    ViolationId,
    "violation"
);
define_id!(
    /// Opaque reference to a layout group, carried through from hole to
    /// replacement cutout.
    GroupRef,
    "group"
);
define_id!(
    /// Opaque reference to a subcircuit, carried through from hole to
    /// replacement cutout.
    SubcircuitRef,
    "subcircuit"
);

/// Copper layer a pad sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Top copper layer.
    Top,
    /// Bottom copper layer.
    Bottom,
}

/// The physical board outline: an axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Unique id.
    pub id: BoardId,
    /// Center of the board rectangle.
    pub center: Point2D,
    /// Full width in mm.
    pub width: f64,
    /// Full height in mm.
    pub height: f64,
}

/// Shape of a drilled hole.
///
/// Only circles are drillable today; the enum leaves room for future
/// shapes, which the boundary clipper skips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum HoleShape {
    /// Round drilled hole.
    Circle {
        /// Center of the hole.
        center: Point2D,
        /// Drill diameter in mm.
        diameter: f64,
    },
}

/// A drilled through-board opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    /// Unique id.
    pub id: HoleId,
    /// Hole geometry.
    pub shape: HoleShape,
    /// Owning layout group, if any.
    pub group: Option<GroupRef>,
    /// Owning subcircuit, if any.
    pub subcircuit: Option<SubcircuitRef>,
}

/// Geometry of a non-drilled removed board region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum CutoutShape {
    /// Circular cutout.
    Circle {
        /// Center of the cutout.
        center: Point2D,
        /// Radius in mm.
        radius: f64,
    },
    /// Polygonal cutout with vertices in boundary order.
    Polygon {
        /// Ordered vertex list.
        points: Vec<Point2D>,
    },
}

/// A non-drilled removed region of board material.
///
/// Created by the boundary clipper to replace holes that cross the board
/// outline; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutout {
    /// Unique id.
    pub id: CutoutId,
    /// Cutout geometry.
    pub shape: CutoutShape,
    /// Group inherited from the replaced hole, if any.
    pub group: Option<GroupRef>,
    /// Subcircuit inherited from the replaced hole, if any.
    pub subcircuit: Option<SubcircuitRef>,
}

/// A copper contact area of a placed component footprint.
///
/// Read-only input to the overlap checker; modeled as a rectangle with
/// arbitrary rotation about its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    /// Unique id.
    pub id: PadId,
    /// Component this pad belongs to.
    pub component: ComponentId,
    /// Copper layer.
    pub layer: Layer,
    /// Center of the pad.
    pub center: Point2D,
    /// Full width in mm (along the pad's local X axis).
    pub width: f64,
    /// Full height in mm (along the pad's local Y axis).
    pub height: f64,
    /// Rotation in degrees, counter-clockwise.
    pub rotation_deg: f64,
}

/// A placed component and the pads it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique id.
    pub id: ComponentId,
    /// Reference designator, e.g. "R1".
    pub name: String,
    /// Placement center.
    pub center: Point2D,
    /// Placement rotation in degrees.
    pub rotation_deg: f64,
    /// Pads owned by this component.
    pub pads: Vec<PadId>,
}

/// A design-rule violation: two pads of different components overlap.
///
/// The message always contains the word "overlap"; downstream DRC
/// diagnostics rely on the message + pad id list shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapViolation {
    /// Unique id.
    pub id: ViolationId,
    /// Human-readable description. Always contains "overlap".
    pub message: String,
    /// The two offending pads, in ascending id order.
    pub pad_ids: [PadId; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(HoleId(3).to_string(), "hole_3");
        assert_eq!(PadId(0).to_string(), "pad_0");
        assert_eq!(ViolationId(12).to_string(), "violation_12");
    }

    #[test]
    fn test_cutout_shape_serializes_tagged() {
        let circle = CutoutShape::Circle {
            center: Point2D::new(1.0, 2.0),
            radius: 0.5,
        };
        let json = serde_json::to_value(&circle).unwrap();
        assert_eq!(json["shape"], "circle");
        assert_eq!(json["radius"], 0.5);

        let poly = CutoutShape::Polygon {
            points: vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)],
        };
        let json = serde_json::to_value(&poly).unwrap();
        assert_eq!(json["shape"], "polygon");
        assert_eq!(json["points"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_layer_serializes_snake_case() {
        assert_eq!(serde_json::to_value(Layer::Top).unwrap(), "top");
        assert_eq!(serde_json::to_value(Layer::Bottom).unwrap(), "bottom");
    }
}
