use serde::{Deserialize, Serialize};

use crate::transforms::{SSBox, SSPoint, SSTransform, SSVec};

/// one straight segment of a wire, in wire-local coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WireLine {
    pub p0: SSPoint,
    pub p1: SSPoint,
}

impl WireLine {
    pub fn new(p0: SSPoint, p1: SSPoint) -> Self {
        WireLine { p0, p1 }
    }

    pub fn is_null(&self) -> bool {
        self.p0 == self.p1
    }

    /// true if the point lies on the segment (segments are axis aligned or
    /// oblique; collinearity is tested exactly in integer arithmetic)
    pub fn contains(&self, p: SSPoint) -> bool {
        let d = self.p1 - self.p0;
        let v = p - self.p0;
        if d.x as i64 * v.y as i64 != d.y as i64 * v.x as i64 {
            return false;
        }
        let dot = v.x as i64 * d.x as i64 + v.y as i64 * d.y as i64;
        let len2 = d.x as i64 * d.x as i64 + d.y as i64 * d.y as i64;
        if len2 == 0 {
            return v.x == 0 && v.y == 0;
        }
        0 <= dot && dot <= len2
    }

    /// true if the two segments are collinear and share more than one point
    pub fn overlaps(&self, other: &WireLine) -> bool {
        let d = self.p1 - self.p0;
        let collinear = |p: SSPoint| {
            let v = p - self.p0;
            d.x as i64 * v.y as i64 == d.y as i64 * v.x as i64
        };
        if self.is_null() || other.is_null() {
            return false;
        }
        if !collinear(other.p0) || !collinear(other.p1) {
            return false;
        }
        // project onto the dominant axis and compare intervals
        let axis = |p: SSPoint| if d.x != 0 { p.x } else { p.y };
        let (a0, a1) = (axis(self.p0).min(axis(self.p1)), axis(self.p0).max(axis(self.p1)));
        let (b0, b1) = (
            axis(other.p0).min(axis(other.p1)),
            axis(other.p0).max(axis(other.p1)),
        );
        a0.max(b0) < a1.min(b1)
    }
}

/// a wire's full geometry, captured for undoable state changes
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WireGeometry {
    pub pos: SSPoint,
    pub lines: Vec<WireLine>,
}

/// a polyline conductor; its two ports are the free ends of the first and
/// last segment
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Wire {
    pub lines: Vec<WireLine>,
}

impl Wire {
    /// a provisional single-segment wire anchored at the origin
    pub fn singleton() -> Self {
        Wire {
            lines: vec![WireLine::new(SSPoint::origin(), SSPoint::origin())],
        }
    }

    /// build a wire through the given local control points
    pub fn from_points(points: &[SSPoint]) -> Self {
        let lines = points
            .windows(2)
            .map(|w| WireLine::new(w[0], w[1]))
            .collect();
        Wire { lines }
    }

    pub fn local_bounds(&self) -> SSBox {
        SSBox::from_points(self.lines.iter().flat_map(|l| [l.p0, l.p1]))
    }

    /// move the free end of the last segment
    pub fn set_free_end(&mut self, local: SSPoint) {
        if let Some(last) = self.lines.last_mut() {
            last.p1 = local;
        }
    }

    pub fn free_end(&self) -> SSPoint {
        self.lines.last().map(|l| l.p1).unwrap_or_default()
    }

    /// move one of the two port endpoints; 0 is the start of the first
    /// segment, 1 the end of the last
    pub fn set_endpoint(&mut self, index: u8, local: SSPoint) {
        match index {
            0 => {
                if let Some(first) = self.lines.first_mut() {
                    first.p0 = local;
                }
            }
            1 => {
                if let Some(last) = self.lines.last_mut() {
                    last.p1 = local;
                }
            }
            _ => {}
        }
    }

    /// append a zero length segment at the current free end, to be stretched
    /// by subsequent cursor moves
    pub fn append_segment(&mut self) {
        let end = self.free_end();
        self.lines.push(WireLine::new(end, end));
    }

    /// strip degenerate zero length segments, keeping at least one line
    pub fn remove_null_lines(&mut self) {
        if self.lines.len() > 1 {
            self.lines.retain(|l| !l.is_null());
        }
        if self.lines.is_empty() {
            self.lines
                .push(WireLine::new(SSPoint::origin(), SSPoint::origin()));
        }
    }

    pub fn transform_lines(&mut self, t: &SSTransform) {
        for l in &mut self.lines {
            l.p0 = t.transform_point(l.p0);
            l.p1 = t.transform_point(l.p1);
        }
    }

    pub fn translate_lines(&mut self, delta: SSVec) {
        for l in &mut self.lines {
            l.p0 += delta;
            l.p1 += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_lines_are_stripped() {
        let mut w = Wire::from_points(&[
            SSPoint::new(0, 0),
            SSPoint::new(10, 0),
            SSPoint::new(10, 0),
            SSPoint::new(10, 10),
        ]);
        assert_eq!(w.lines.len(), 3);
        w.remove_null_lines();
        assert_eq!(w.lines.len(), 2);
    }

    #[test]
    fn last_line_survives_stripping() {
        let mut w = Wire::singleton();
        w.remove_null_lines();
        assert_eq!(w.lines.len(), 1);
    }

    #[test]
    fn collinear_overlap_detection() {
        let a = WireLine::new(SSPoint::new(0, 0), SSPoint::new(10, 0));
        let b = WireLine::new(SSPoint::new(5, 0), SSPoint::new(15, 0));
        let c = WireLine::new(SSPoint::new(10, 0), SSPoint::new(20, 0));
        let d = WireLine::new(SSPoint::new(0, 5), SSPoint::new(10, 5));
        let e = WireLine::new(SSPoint::new(5, -5), SSPoint::new(5, 5));
        assert!(a.overlaps(&b));
        // sharing a single endpoint is a junction, not an overlap
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&d));
        // a perpendicular crossing is not an overlap
        assert!(!a.overlaps(&e));
    }

    #[test]
    fn segment_containment() {
        let l = WireLine::new(SSPoint::new(0, 0), SSPoint::new(10, 10));
        assert!(l.contains(SSPoint::new(5, 5)));
        assert!(l.contains(SSPoint::new(0, 0)));
        assert!(!l.contains(SSPoint::new(11, 11)));
        assert!(!l.contains(SSPoint::new(5, 6)));
    }
}
