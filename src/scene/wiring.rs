//! interactive wire drawing
//!
//! An explicit three-state machine: no wire, a provisional single-segment
//! wire not yet in the scene, and a committed wire still accepting control
//! points. Each committed control point is its own undo macro; the free
//! endpoint tracks the cursor without touching the undo stack.

use log::trace;

use super::Scene;
use crate::command::Command;
use crate::items::{Item, ItemBody, ItemId, PortId, Wire, WireGeometry};
use crate::transforms::SSPoint;

#[derive(Clone, Debug, Default)]
pub enum WiringState {
    #[default]
    NoWire,
    /// first anchor placed; the wire exists only in this state, not in the
    /// scene
    SingletonWire { pos: SSPoint, wire: Wire },
    /// at least one control point committed; more may be appended
    ComplexWire { wire_id: ItemId, stored: WireGeometry },
}

impl Scene {
    pub fn wiring_state(&self) -> &WiringState {
        &self.wiring
    }

    /// geometry of the wire under construction, for host-side preview
    pub fn wiring_preview(&self) -> Option<WireGeometry> {
        match &self.wiring {
            WiringState::NoWire => None,
            WiringState::SingletonWire { pos, wire } => Some(WireGeometry {
                pos: *pos,
                lines: wire.lines.clone(),
            }),
            WiringState::ComplexWire { wire_id, .. } => self.schematic.wire_geometry(*wire_id),
        }
    }

    pub(crate) fn wiring_left_press(&mut self, pos: SSPoint) {
        match std::mem::take(&mut self.wiring) {
            WiringState::NoWire => {
                trace!("wiring anchored at {pos:?}");
                self.wiring = WiringState::SingletonWire {
                    pos,
                    wire: Wire::singleton(),
                };
            }
            WiringState::SingletonWire { pos: anchor, mut wire } => {
                wire.set_free_end(pos - anchor.to_vector());
                let candidate = WireGeometry {
                    pos: anchor,
                    lines: wire.lines.clone(),
                };
                if self.schematic.wire_overlaps(&candidate, None) {
                    self.wiring = WiringState::SingletonWire { pos: anchor, wire };
                    return;
                }
                wire.remove_null_lines();
                let id = self.commit_new_wire(anchor, wire);
                self.continue_or_finalize(id);
            }
            WiringState::ComplexWire { wire_id, stored } => {
                self.set_committed_free_end(wire_id, pos);
                let Some(current) = self.schematic.wire_geometry(wire_id) else {
                    return;
                };
                if self.schematic.wire_overlaps(&current, Some(wire_id)) {
                    self.wiring = WiringState::ComplexWire { wire_id, stored };
                    return;
                }
                self.commit_wire_change(wire_id, stored, current);
                self.continue_or_finalize(wire_id);
            }
        }
    }

    /// right click commits like a left click but always closes the wire
    pub(crate) fn wiring_right_press(&mut self, pos: SSPoint) {
        match std::mem::take(&mut self.wiring) {
            WiringState::NoWire => {}
            WiringState::SingletonWire { pos: anchor, mut wire } => {
                wire.set_free_end(pos - anchor.to_vector());
                let candidate = WireGeometry {
                    pos: anchor,
                    lines: wire.lines.clone(),
                };
                if self.schematic.wire_overlaps(&candidate, None) {
                    self.wiring = WiringState::SingletonWire { pos: anchor, wire };
                    return;
                }
                wire.remove_null_lines();
                let id = self.commit_new_wire(anchor, wire);
                self.finalize_wire(id);
            }
            WiringState::ComplexWire { wire_id, stored } => {
                self.set_committed_free_end(wire_id, pos);
                let Some(current) = self.schematic.wire_geometry(wire_id) else {
                    return;
                };
                if self.schematic.wire_overlaps(&current, Some(wire_id)) {
                    self.wiring = WiringState::ComplexWire { wire_id, stored };
                    return;
                }
                self.commit_wire_change(wire_id, stored, current);
                self.finalize_wire(wire_id);
            }
        }
    }

    /// visual feedback only; never transitions state or touches undo
    pub(crate) fn wiring_cursor_moved(&mut self, pos: SSPoint) {
        match &mut self.wiring {
            WiringState::NoWire => {}
            WiringState::SingletonWire { pos: anchor, wire } => {
                wire.set_free_end(pos - anchor.to_vector());
            }
            WiringState::ComplexWire { wire_id, .. } => {
                let id = *wire_id;
                self.set_committed_free_end(id, pos);
            }
        }
    }

    /// drop whatever wire is under construction
    pub(crate) fn cancel_wiring(&mut self) {
        match std::mem::take(&mut self.wiring) {
            WiringState::NoWire => {}
            WiringState::SingletonWire { .. } => trace!("wiring: provisional wire discarded"),
            WiringState::ComplexWire { wire_id, .. } => {
                trace!("wiring: discarding {wire_id:?}");
                self.schematic.remove(wire_id);
            }
        }
    }

    fn set_committed_free_end(&mut self, id: ItemId, pos: SSPoint) {
        if let Some(item) = self.schematic.item_mut(id) {
            let local = pos - item.pos.to_vector();
            if let Some(wire) = item.wire_mut() {
                wire.set_free_end(local);
            }
        }
    }

    fn commit_new_wire(&mut self, pos: SSPoint, wire: Wire) -> ItemId {
        let id = self.schematic.allocate_id();
        let mut item = Item::new(pos, ItemBody::Wire(wire));
        // hidden until finalized; hosts render the in-progress preview
        item.visible = false;
        self.undo_stack.begin_macro("Add wiring control point");
        self.undo_stack.push(
            Command::Insert {
                item: id,
                data: Box::new(item),
            },
            &mut self.schematic,
        );
        self.connect_one(id, true);
        self.undo_stack.end_macro();
        self.after_edit();
        id
    }

    fn commit_wire_change(&mut self, id: ItemId, stored: WireGeometry, current: WireGeometry) {
        let mut stripped = Wire {
            lines: current.lines,
        };
        stripped.remove_null_lines();
        let to = WireGeometry {
            pos: current.pos,
            lines: stripped.lines,
        };
        self.undo_stack.begin_macro("Add wiring control point");
        self.undo_stack.push(
            Command::WireStateChange {
                item: id,
                from: stored,
                to,
            },
            &mut self.schematic,
        );
        self.connect_one(id, true);
        self.undo_stack.end_macro();
        self.after_edit();
    }

    /// finalize if the free end landed on something electrical, otherwise
    /// stretch a fresh segment from it
    fn continue_or_finalize(&mut self, id: ItemId) {
        let free_port = PortId::new(id, 1);
        let landed = self.schematic.connectivity.has_connection(free_port)
            || self
                .schematic
                .port_position(free_port)
                .map_or(false, |p| self.schematic.electrically_occupies(p, Some(id)));
        if landed {
            self.finalize_wire(id);
            return;
        }
        if let Some(wire) = self.schematic.item_mut(id).and_then(Item::wire_mut) {
            wire.append_segment();
        }
        match self.schematic.wire_geometry(id) {
            Some(stored) => self.wiring = WiringState::ComplexWire { wire_id: id, stored },
            None => self.wiring = WiringState::NoWire,
        }
    }

    fn finalize_wire(&mut self, id: ItemId) {
        // the anchor end snaps onto its connected neighbor
        let anchor_port = PortId::new(id, 0);
        if let Some(neighbor) = self.schematic.connectivity.any_connection(anchor_port) {
            if let Some(neighbor_pos) = self.schematic.port_position(neighbor) {
                if let Some(item) = self.schematic.item_mut(id) {
                    let local = neighbor_pos - item.pos.to_vector();
                    if let Some(wire) = item.wire_mut() {
                        wire.set_endpoint(0, local);
                    }
                }
            }
        }
        if let Some(item) = self.schematic.item_mut(id) {
            item.visible = true;
            if let Some(wire) = item.wire_mut() {
                wire.remove_null_lines();
            }
        }
        trace!("wiring finalized {id:?}");
        self.wiring = WiringState::NoWire;
        self.after_edit();
    }
}
