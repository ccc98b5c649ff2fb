//! grid configuration and position rounding

use serde::{Deserialize, Serialize};

use crate::transforms::{SSPoint, VSPoint};

/// rgb grid color, kept toolkit agnostic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        // light gray
        Color {
            r: 0xa0,
            g: 0xa0,
            b: 0xa0,
        }
    }
}

/// grid spacing, visibility and snapping configuration of a scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    pub visible: bool,
    pub color: Color,
    /// whether cursor positions are rounded to the grid at all
    pub snap: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            width: 10,
            height: 10,
            visible: true,
            color: Color::default(),
            snap: true,
        }
    }
}

impl GridConfig {
    /// Round a schematic position to the nearest grid point.
    ///
    /// Negative coordinates are offset by `spacing / 2 - 1` instead of
    /// `spacing / 2` before truncating, so rounding is asymmetric about the
    /// origin (e.g. -5 rounds to 0 while 5 rounds to 10 on a 10-grid). This
    /// mirrors long-standing editor behavior and is kept as is.
    ///
    /// A zero spacing (possible through deserialized settings) disables
    /// rounding on that axis instead of dividing by zero.
    pub fn nearing_grid_point(&self, pos: SSPoint) -> SSPoint {
        SSPoint::new(
            round_coord(pos.x, self.width as i32),
            round_coord(pos.y, self.height as i32),
        )
    }

    /// round a raw cursor position, honoring the snap flag
    pub fn smart_nearing_grid_point(&self, pos: VSPoint) -> SSPoint {
        let rounded = SSPoint::new(pos.x.round() as i32, pos.y.round() as i32);
        if self.snap {
            self.nearing_grid_point(rounded)
        } else {
            rounded
        }
    }

    pub fn is_on_grid(&self, pos: SSPoint) -> bool {
        self.nearing_grid_point(pos) == pos
    }
}

fn round_coord(mut c: i32, spacing: i32) -> i32 {
    if spacing <= 0 {
        return c;
    }
    if c < 0 {
        c -= spacing / 2 - 1;
    } else {
        c += spacing / 2;
    }
    c - c % spacing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridConfig {
        GridConfig::default()
    }

    #[test]
    fn rounds_to_multiples_of_spacing() {
        let g = grid();
        assert_eq!(g.nearing_grid_point(SSPoint::new(14, 16)), SSPoint::new(10, 20));
        assert_eq!(g.nearing_grid_point(SSPoint::new(0, 0)), SSPoint::new(0, 0));
        assert_eq!(g.nearing_grid_point(SSPoint::new(23, 27)), SSPoint::new(20, 30));
    }

    #[test]
    fn negative_rounding_is_asymmetric() {
        let g = grid();
        // kept behavior: the half-spacing offset differs by one below zero
        assert_eq!(g.nearing_grid_point(SSPoint::new(5, 0)).x, 10);
        assert_eq!(g.nearing_grid_point(SSPoint::new(-5, 0)).x, 0);
        assert_eq!(g.nearing_grid_point(SSPoint::new(-6, 0)).x, -10);
        assert_eq!(g.nearing_grid_point(SSPoint::new(-15, 0)).x, -10);
    }

    #[test]
    fn rounding_is_idempotent() {
        let g = grid();
        for x in -40..40 {
            for y in -40..40 {
                let once = g.nearing_grid_point(SSPoint::new(x, y));
                assert_eq!(g.nearing_grid_point(once), once);
            }
        }
    }

    #[test]
    fn zero_spacing_skips_rounding() {
        let mut g = grid();
        g.width = 0;
        g.height = 0;
        assert_eq!(g.nearing_grid_point(SSPoint::new(14, -7)), SSPoint::new(14, -7));
        // per axis: a live spacing still rounds its own coordinate
        g.width = 10;
        assert_eq!(g.nearing_grid_point(SSPoint::new(14, -7)), SSPoint::new(10, -7));
    }

    #[test]
    fn snap_flag_bypasses_rounding() {
        let mut g = grid();
        g.snap = false;
        assert_eq!(
            g.smart_nearing_grid_point(VSPoint::new(14.2, 16.0)),
            SSPoint::new(14, 16)
        );
        g.snap = true;
        assert_eq!(
            g.smart_nearing_grid_point(VSPoint::new(14.2, 16.0)),
            SSPoint::new(10, 20)
        );
    }
}
