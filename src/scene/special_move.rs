//! dragging the selection with live reconnection
//!
//! Before the drag starts the neighborhood of the selection is classified:
//! selected-component ports attached to an unselected component get severed
//! mid-drag with a fresh wire spliced in to preserve the connection, and
//! wires anchored outside the selection get re-anchored segment-wise instead
//! of translated. The whole drag commits as one "Move items" macro.

use std::collections::HashSet;

use log::trace;

use super::Scene;
use crate::command::Command;
use crate::items::{Item, ItemBody, ItemId, PortId, Wire, WireGeometry, WireLine};
use crate::transforms::{SSPoint, SSVec};

#[derive(Clone, Debug)]
struct MovingWire {
    id: ItemId,
    /// pre-drag geometry, for the undoable state-change on release
    stored: WireGeometry,
    /// selected wires drag their unconnected endpoints along
    selected: bool,
}

/// bookkeeping for one drag of the selection
#[derive(Clone, Debug)]
pub(crate) struct DragState {
    /// last grid-snapped cursor position
    last: SSPoint,
    /// pre-drag positions of the items that translate rigidly
    start_positions: Vec<(ItemId, SSPoint)>,
    /// (selected port, unselected anchor port) pairs awaiting severance
    disconnectibles: Vec<(PortId, PortId)>,
    moving_wires: Vec<MovingWire>,
}

impl Scene {
    pub(crate) fn begin_drag(&mut self, pos: SSPoint) {
        if self.drag.is_some() {
            return;
        }
        let selected = self.schematic.selected_ids();
        if selected.is_empty() {
            return;
        }
        let sel: HashSet<ItemId> = selected.iter().copied().collect();

        // wires anchored outside the selection resize, the rest translate
        let mut moving_wires = Vec::new();
        for (id, item) in self.schematic.iter() {
            let ItemBody::Wire(_) = item.body else { continue };
            let is_selected = sel.contains(&id);
            let mut anchored_outside = false;
            let mut touches_selection = false;
            for index in 0..2u8 {
                for n in self.schematic.connectivity.connections(PortId::new(id, index)) {
                    if sel.contains(&n.item) {
                        touches_selection = true;
                    } else {
                        anchored_outside = true;
                    }
                }
            }
            if (is_selected && anchored_outside) || (!is_selected && touches_selection) {
                if let Some(stored) = self.schematic.wire_geometry(id) {
                    moving_wires.push(MovingWire {
                        id,
                        stored,
                        selected: is_selected,
                    });
                }
            }
        }

        // selected-component ports whose link to an unselected component
        // will not survive the move as a direct connection
        let mut disconnectibles = Vec::new();
        for &id in &selected {
            let Some(item) = self.schematic.item(id) else { continue };
            if !item.is_component() {
                continue;
            }
            for index in 0..item.port_count() {
                let port = PortId::new(id, index);
                for n in self.schematic.connectivity.connections(port) {
                    let other_is_component = self
                        .schematic
                        .item(n.item)
                        .map_or(false, Item::is_component);
                    if other_is_component && !sel.contains(&n.item) {
                        disconnectibles.push((port, n));
                    }
                }
            }
        }

        let resizing: HashSet<ItemId> = moving_wires.iter().map(|m| m.id).collect();
        let start_positions = selected
            .iter()
            .filter(|id| !resizing.contains(id))
            .filter_map(|&id| self.schematic.item(id).map(|item| (id, item.pos)))
            .collect();

        trace!(
            "drag start: {} rigid, {} disconnectible, {} resizing",
            selected.len(),
            disconnectibles.len(),
            moving_wires.len()
        );
        self.undo_stack.begin_macro("Move items");
        self.drag = Some(DragState {
            last: pos,
            start_positions,
            disconnectibles,
            moving_wires,
        });
    }

    pub(crate) fn drag_tick(&mut self, pos: SSPoint) {
        let Some(mut drag) = self.drag.take() else { return };
        let delta = pos - drag.last;
        if delta != SSVec::zero() {
            drag.last = pos;
            for (id, _) in &drag.start_positions {
                self.schematic.translate_item(*id, delta);
            }
            self.sever_disconnectibles(&mut drag);
            self.reanchor_moving_wires(&drag, delta);
        }
        self.drag = Some(drag);
    }

    pub(crate) fn end_drag(&mut self, pos: SSPoint) {
        if self.drag.is_none() {
            return;
        }
        self.drag_tick(pos);
        let Some(drag) = self.drag.take() else { return };
        self.finish_drag(drag);
    }

    /// called when the drag is cut short (mode change, Esc); commits the
    /// accumulated movement exactly like a release would
    pub(crate) fn abort_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            self.finish_drag(drag);
        }
    }

    /// record the geometry changes applied during the drag and close the
    /// "Move items" macro, so the whole drag is one undoable unit
    fn finish_drag(&mut self, drag: DragState) {
        for (id, from) in &drag.start_positions {
            let Some(item) = self.schematic.item(*id) else { continue };
            let to = item.pos;
            if to != *from {
                self.undo_stack.push(
                    Command::Move {
                        item: *id,
                        from: *from,
                        to,
                    },
                    &mut self.schematic,
                );
            }
        }
        for mw in &drag.moving_wires {
            let Some(current) = self.schematic.wire_geometry(mw.id) else { continue };
            if current != mw.stored {
                self.undo_stack.push(
                    Command::WireStateChange {
                        item: mw.id,
                        from: mw.stored.clone(),
                        to: current,
                    },
                    &mut self.schematic,
                );
            }
        }
        // pick up any new coincidences at the drop position, resized wire
        // endpoints included
        let moved: Vec<ItemId> = drag
            .start_positions
            .iter()
            .map(|(id, _)| *id)
            .chain(drag.moving_wires.iter().map(|mw| mw.id))
            .collect();
        for id in &moved {
            self.connect_one(*id, true);
        }
        self.undo_stack.end_macro();
        self.after_edit();
    }

    /// once a disconnectible port separates from its anchor, sever the pair
    /// and splice a wire between them so the net survives
    fn sever_disconnectibles(&mut self, drag: &mut DragState) {
        let pairs = std::mem::take(&mut drag.disconnectibles);
        for (port, anchor) in pairs {
            let (Some(port_pos), Some(anchor_pos)) = (
                self.schematic.port_position(port),
                self.schematic.port_position(anchor),
            ) else {
                continue;
            };
            if port_pos == anchor_pos {
                drag.disconnectibles.push((port, anchor));
                continue;
            }
            self.undo_stack.push(
                Command::Disconnect { a: port, b: anchor },
                &mut self.schematic,
            );
            let wire = Wire {
                lines: vec![WireLine::new(
                    SSPoint::origin(),
                    port_pos - anchor_pos.to_vector(),
                )],
            };
            let id = self.schematic.allocate_id();
            self.undo_stack.push(
                Command::Insert {
                    item: id,
                    data: Box::new(Item::new(anchor_pos, ItemBody::Wire(wire))),
                },
                &mut self.schematic,
            );
            self.undo_stack.push(
                Command::Connect {
                    a: PortId::new(id, 0),
                    b: anchor,
                },
                &mut self.schematic,
            );
            self.undo_stack.push(
                Command::Connect {
                    a: PortId::new(id, 1),
                    b: port,
                },
                &mut self.schematic,
            );
            trace!("spliced {id:?} between {anchor:?} and {port:?}");
            if let Some(stored) = self.schematic.wire_geometry(id) {
                drag.moving_wires.push(MovingWire {
                    id,
                    stored,
                    selected: false,
                });
            }
        }
    }

    fn reanchor_moving_wires(&mut self, drag: &DragState, delta: SSVec) {
        for mw in &drag.moving_wires {
            for index in 0..2u8 {
                let port = PortId::new(mw.id, index);
                // connected endpoints follow their neighbor; a free endpoint
                // follows the drag only if the wire itself is selected
                let target = match self.schematic.connectivity.any_connection(port) {
                    Some(n) => self.schematic.port_position(n),
                    None if mw.selected => {
                        self.schematic.port_position(port).map(|p| p + delta)
                    }
                    None => None,
                };
                let Some(target) = target else { continue };
                if let Some(item) = self.schematic.item_mut(mw.id) {
                    let local = target - item.pos.to_vector();
                    if let Some(wire) = item.wire_mut() {
                        wire.set_endpoint(index, local);
                    }
                }
            }
        }
    }
}
