//! graphical entities placed on a scene: components, wires, paintings

mod component;
mod painting;
mod port;
mod wire;

pub use component::Component;
pub use painting::{Painting, PaintingKind};
pub use port::{Port, PortId};
pub use wire::{Wire, WireGeometry, WireLine};

use serde::{Deserialize, Serialize};

use crate::transforms::{
    AngleDirection, Axis, Orientation, SSBox, SSPoint, SSVec, SST_CCWR, SST_CWR, SST_MX, SST_MY,
};

/// identity of an item within its owning scene; stable across undo/redo
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct ItemId(pub u64);

/// one entity on the canvas
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Item {
    pub pos: SSPoint,
    pub orientation: Orientation,
    pub selected: bool,
    pub visible: bool,
    pub body: ItemBody,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum ItemBody {
    Component(Component),
    Wire(Wire),
    Painting(Painting),
}

impl Item {
    pub fn new(pos: SSPoint, body: ItemBody) -> Self {
        Item {
            pos,
            orientation: Orientation::default(),
            selected: false,
            visible: true,
            body,
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(self.body, ItemBody::Component(_))
    }

    pub fn is_wire(&self) -> bool {
        matches!(self.body, ItemBody::Wire(_))
    }

    pub fn is_painting(&self) -> bool {
        matches!(self.body, ItemBody::Painting(_))
    }

    pub fn component(&self) -> Option<&Component> {
        match &self.body {
            ItemBody::Component(c) => Some(c),
            _ => None,
        }
    }

    pub fn component_mut(&mut self) -> Option<&mut Component> {
        match &mut self.body {
            ItemBody::Component(c) => Some(c),
            _ => None,
        }
    }

    pub fn wire(&self) -> Option<&Wire> {
        match &self.body {
            ItemBody::Wire(w) => Some(w),
            _ => None,
        }
    }

    pub fn wire_mut(&mut self) -> Option<&mut Wire> {
        match &mut self.body {
            ItemBody::Wire(w) => Some(w),
            _ => None,
        }
    }

    /// number of connection points this item exposes
    pub fn port_count(&self) -> u8 {
        match &self.body {
            ItemBody::Component(c) => c.ports.len() as u8,
            ItemBody::Wire(_) => 2,
            ItemBody::Painting(_) => 0,
        }
    }

    /// local offset of a port before orientation is applied
    pub fn port_offset(&self, index: u8) -> Option<SSVec> {
        match &self.body {
            ItemBody::Component(c) => c.ports.get(index as usize).map(|p| p.offset),
            ItemBody::Wire(w) => match index {
                0 => Some(w.lines.first()?.p0.to_vector()),
                1 => Some(w.lines.last()?.p1.to_vector()),
                _ => None,
            },
            ItemBody::Painting(_) => None,
        }
    }

    /// scene position of a port
    pub fn port_position(&self, index: u8) -> Option<SSPoint> {
        let offset = self.port_offset(index)?;
        let oriented = self.orientation.transform_point(offset.to_point());
        Some(self.pos + oriented.to_vector())
    }

    /// scene bounding box
    pub fn bounds(&self) -> SSBox {
        let local = match &self.body {
            ItemBody::Component(c) => c.bounds,
            ItemBody::Wire(w) => w.local_bounds(),
            ItemBody::Painting(p) => p.rect,
        };
        let t = self.orientation.transform();
        let corners = [
            t.transform_point(SSPoint::new(local.min.x, local.min.y)),
            t.transform_point(SSPoint::new(local.max.x, local.min.y)),
            t.transform_point(SSPoint::new(local.min.x, local.max.y)),
            t.transform_point(SSPoint::new(local.max.x, local.max.y)),
        ];
        SSBox::from_points(corners.iter().map(|p| *p + self.pos.to_vector()))
    }

    /// true if the item occupies the given scene coordinate; wires test
    /// against their segments, other items against their bounding box
    /// (inclusive of edges, unlike `Box2D::contains`)
    pub fn occupies(&self, ssp: SSPoint) -> bool {
        match &self.body {
            ItemBody::Wire(w) => {
                let local = ssp - self.pos.to_vector();
                w.lines.iter().any(|l| l.contains(local))
            }
            _ => {
                let b = self.bounds();
                b.min.x <= ssp.x && ssp.x <= b.max.x && b.min.y <= ssp.y && ssp.y <= b.max.y
            }
        }
    }

    pub fn translate(&mut self, delta: SSVec) {
        self.pos += delta;
    }

    /// rotate in place around the item's own reference point
    pub fn rotate(&mut self, dir: AngleDirection) {
        match &mut self.body {
            ItemBody::Wire(w) => {
                let t = match dir {
                    AngleDirection::Clockwise => SST_CWR,
                    AngleDirection::CounterClockwise => SST_CCWR,
                };
                w.transform_lines(&t);
            }
            _ => self.orientation = self.orientation.rotated(dir),
        }
    }

    /// reflect in place about an axis through the item's reference point
    pub fn mirror(&mut self, axis: Axis) {
        match &mut self.body {
            ItemBody::Wire(w) => {
                let t = match axis {
                    Axis::X => SST_MX,
                    Axis::Y => SST_MY,
                };
                w.transform_lines(&t);
            }
            _ => self.orientation = self.orientation.mirrored_about(axis),
        }
    }
}
