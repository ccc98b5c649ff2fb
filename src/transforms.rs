//! geometry types and transform constants shared across the crate

use serde::{Deserialize, Serialize};

/// PhantomData tag used to denote the f32 space of raw cursor positions
/// delivered by a viewer, before grid rounding
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct ViewportSpace;

/// PhantomData tag used to denote the i32 space in which the schematic exists
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct SchematicSpace;

/// ViewportSpace Point
pub type VSPoint = euclid::Point2D<f32, ViewportSpace>;
/// SchematicSpace Point
pub type SSPoint = euclid::Point2D<i32, SchematicSpace>;

/// ViewportSpace Box
pub type VSBox = euclid::Box2D<f32, ViewportSpace>;
/// SchematicSpace Box
pub type SSBox = euclid::Box2D<i32, SchematicSpace>;

/// ViewportSpace Vector
pub type VSVec = euclid::Vector2D<f32, ViewportSpace>;
/// SchematicSpace Vector
pub type SSVec = euclid::Vector2D<i32, SchematicSpace>;

/// schematic space transform
pub type SSTransform = euclid::Transform2D<i32, SchematicSpace, SchematicSpace>;

/// 90 deg clockwise rotation transform (y-axis down)
pub const SST_CWR: SSTransform = SSTransform::new(0, -1, 1, 0, 0, 0);

/// 90 deg counter clockwise rotation transform
pub const SST_CCWR: SSTransform = SSTransform::new(0, 1, -1, 0, 0, 0);

/// reflection about the x-axis (negates y)
pub const SST_MX: SSTransform = SSTransform::new(1, 0, 0, -1, 0, 0);

/// reflection about the y-axis (negates x)
pub const SST_MY: SSTransform = SSTransform::new(-1, 0, 0, 1, 0, 0);

/// rotation direction for rotate operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum AngleDirection {
    Clockwise,
    CounterClockwise,
}

/// mirror axis for mirror operations - exactly two valid values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Axis {
    /// reflect about the horizontal (x) axis, negating y
    X,
    /// reflect about the vertical (y) axis, negating x
    Y,
}

/// orientation of an item about its own reference point, an element of the
/// dihedral group of the square: a quadrant rotation composed after an
/// optional x-axis reflection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Orientation {
    /// number of 90 deg clockwise rotations, 0..4
    pub quadrants: u8,
    /// whether an x-axis reflection is applied before rotating
    pub mirrored: bool,
}

impl Orientation {
    pub fn rotated(self, dir: AngleDirection) -> Self {
        let quadrants = match dir {
            AngleDirection::Clockwise => (self.quadrants + 1) % 4,
            AngleDirection::CounterClockwise => (self.quadrants + 3) % 4,
        };
        Orientation {
            quadrants,
            mirrored: self.mirrored,
        }
    }

    /// compose a reflection on the left; `Mx . R^k . Mx^m == R^(4-k) . Mx^(m+1)`
    /// and `My == R^2 . Mx`
    pub fn mirrored_about(self, axis: Axis) -> Self {
        let quadrants = match axis {
            Axis::X => (4 - self.quadrants) % 4,
            Axis::Y => (6 - self.quadrants) % 4,
        };
        Orientation {
            quadrants,
            mirrored: !self.mirrored,
        }
    }

    /// the transform mapping item-local coordinates to its oriented frame
    pub fn transform(self) -> SSTransform {
        let mut t = if self.mirrored {
            SST_MX
        } else {
            SSTransform::identity()
        };
        for _ in 0..self.quadrants {
            t = t.then(&SST_CWR);
        }
        t
    }

    pub fn transform_point(self, p: SSPoint) -> SSPoint {
        self.transform().transform_point(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrant_rotations_cycle() {
        let mut o = Orientation::default();
        for _ in 0..4 {
            o = o.rotated(AngleDirection::Clockwise);
        }
        assert_eq!(o, Orientation::default());

        o = o.rotated(AngleDirection::Clockwise);
        o = o.rotated(AngleDirection::CounterClockwise);
        assert_eq!(o, Orientation::default());
    }

    #[test]
    fn mirror_is_involution() {
        for quadrants in 0..4 {
            for mirrored in [false, true] {
                let o = Orientation {
                    quadrants,
                    mirrored,
                };
                assert_eq!(o.mirrored_about(Axis::X).mirrored_about(Axis::X), o);
                assert_eq!(o.mirrored_about(Axis::Y).mirrored_about(Axis::Y), o);
            }
        }
    }

    #[test]
    fn orientation_matches_transform_composition() {
        // group operation on Orientation must match matrix composition on points
        let p = SSPoint::new(3, 5);
        let o = Orientation {
            quadrants: 1,
            mirrored: false,
        };
        let rotated = o.rotated(AngleDirection::Clockwise);
        assert_eq!(
            rotated.transform_point(p),
            SST_CWR.transform_point(o.transform_point(p))
        );
        let mx = o.mirrored_about(Axis::X);
        assert_eq!(
            mx.transform_point(p),
            SST_MX.transform_point(o.transform_point(p))
        );
        let my = o.mirrored_about(Axis::Y);
        assert_eq!(
            my.transform_point(p),
            SST_MY.transform_point(o.transform_point(p))
        );
    }
}
