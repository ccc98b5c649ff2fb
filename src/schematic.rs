//! schematic content: the item arena and its port connectivity
//!
//! Holds everything the undo commands mutate. The interactive machinery
//! (modes, wiring, drag state) lives in [`crate::scene`]; this type stays
//! command-addressable so undo/redo never has to reach into tool state.

use indexmap::IndexMap;

use crate::connectivity::Connectivity;
use crate::items::{Item, ItemBody, ItemId, PortId, WireGeometry};
use crate::transforms::{SSBox, SSPoint, SSVec};

#[derive(Clone, Debug, Default)]
pub struct Schematic {
    items: IndexMap<ItemId, Item>,
    pub connectivity: Connectivity,
    next_id: u64,
}

impl Schematic {
    pub fn new() -> Self {
        Schematic::default()
    }

    pub fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    /// insert under a previously allocated id; reinsertion under the same id
    /// (undo of a remove) lands at the end of the z-order
    pub fn insert(&mut self, id: ItemId, item: Item) {
        debug_assert!(id.0 < self.next_id);
        self.items.insert(id, item);
    }

    pub fn insert_new(&mut self, item: Item) -> ItemId {
        let id = self.allocate_id();
        self.items.insert(id, item);
        id
    }

    /// remove an item and every connection its ports participate in
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.connectivity.remove_item(id);
        self.items.shift_remove(&id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.keys().copied().collect()
    }

    /// scene position of a port
    pub fn port_position(&self, port: PortId) -> Option<SSPoint> {
        self.item(port.item)?.port_position(port.index)
    }

    /// all ports coincident with the given scene position
    pub fn ports_at(&self, pos: SSPoint) -> Vec<PortId> {
        let mut found = Vec::new();
        for (id, item) in self.iter() {
            for index in 0..item.port_count() {
                if item.port_position(index) == Some(pos) {
                    found.push(PortId::new(id, index));
                }
            }
        }
        found
    }

    /// items occupying the given scene position, topmost (most recently
    /// inserted) first
    pub fn items_at(&self, pos: SSPoint) -> Vec<ItemId> {
        self.items
            .iter()
            .rev()
            .filter(|(_, item)| item.occupies(pos))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|(_, item)| item.selected)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn clear_selection(&mut self) {
        for item in self.items.values_mut() {
            item.selected = false;
        }
    }

    pub fn set_selected(&mut self, id: ItemId, selected: bool) {
        if let Some(item) = self.items.get_mut(&id) {
            item.selected = selected;
        }
    }

    /// select every item intersecting the given region (rubber band)
    pub fn select_region(&mut self, region: SSBox) {
        for item in self.items.values_mut() {
            if item.bounds().intersects(&region) {
                item.selected = true;
            }
        }
    }

    pub fn translate_item(&mut self, id: ItemId, delta: SSVec) {
        if let Some(item) = self.items.get_mut(&id) {
            item.translate(delta);
        }
    }

    pub fn set_item_pos(&mut self, id: ItemId, pos: SSPoint) {
        if let Some(item) = self.items.get_mut(&id) {
            item.pos = pos;
        }
    }

    pub fn wire_geometry(&self, id: ItemId) -> Option<WireGeometry> {
        let item = self.item(id)?;
        let wire = item.wire()?;
        Some(WireGeometry {
            pos: item.pos,
            lines: wire.lines.clone(),
        })
    }

    pub fn set_wire_geometry(&mut self, id: ItemId, geometry: &WireGeometry) {
        if let Some(item) = self.items.get_mut(&id) {
            item.pos = geometry.pos;
            if let ItemBody::Wire(w) = &mut item.body {
                w.lines = geometry.lines.clone();
            }
        }
    }

    /// true if any segment of the candidate wire geometry collinearly
    /// overlaps a segment of an existing wire; used to reject wiring clicks
    pub fn wire_overlaps(&self, geometry: &WireGeometry, exclude: Option<ItemId>) -> bool {
        for (id, item) in self.iter() {
            if Some(id) == exclude {
                continue;
            }
            let Some(wire) = item.wire() else {
                continue;
            };
            for theirs in &wire.lines {
                let theirs_scene = crate::items::WireLine::new(
                    theirs.p0 + item.pos.to_vector(),
                    theirs.p1 + item.pos.to_vector(),
                );
                for ours in &geometry.lines {
                    let ours_scene = crate::items::WireLine::new(
                        ours.p0 + geometry.pos.to_vector(),
                        ours.p1 + geometry.pos.to_vector(),
                    );
                    if ours_scene.overlaps(&theirs_scene) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// true if a port or a wire segment lies at the given position
    pub fn electrically_occupies(&self, pos: SSPoint, exclude: Option<ItemId>) -> bool {
        for (id, item) in self.iter() {
            if Some(id) == exclude {
                continue;
            }
            match &item.body {
                ItemBody::Wire(_) => {
                    if item.occupies(pos) {
                        return true;
                    }
                }
                ItemBody::Component(_) => {
                    for index in 0..item.port_count() {
                        if item.port_position(index) == Some(pos) {
                            return true;
                        }
                    }
                }
                ItemBody::Painting(_) => {}
            }
        }
        false
    }

    /// union bounding box of all items, if any
    pub fn bounding_box(&self) -> Option<SSBox> {
        let mut it = self.items.values();
        let first = it.next()?.bounds();
        Some(it.fold(first, |acc, item| acc.union(&item.bounds())))
    }
}
