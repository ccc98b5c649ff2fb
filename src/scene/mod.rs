//! the interactive scene: modal dispatch, batch editing, undo coordination
//!
//! [`Scene`] owns the schematic content, the undo stack, grid configuration
//! and all transient interaction state. Pointer events arrive through
//! [`Scene::mouse_event`] and are routed to the handler for the current
//! mouse action; every mutation flows through the undo stack so the visible
//! scene and the undo history never disagree.

mod actions;
mod special_move;
mod wiring;

pub use actions::{
    ChangingActiveStatus, Deleting, InsertingItems, InsertingWireLabel, Marking, MirroringX,
    MirroringY, MouseAction, MouseActionHandler, Normal, PaintingDrawEvent, Rotating,
    SettingOnGrid, Wiring, ZoomingAtPoint, ZoomingOutAtPoint,
};
pub use wiring::WiringState;

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace};

use crate::clipboard::{self, ClipboardError};
use crate::command::{Command, UndoStack};
use crate::event::MouseEvent;
use crate::grid::GridConfig;
use crate::items::{Component, Item, ItemBody, ItemId, Painting, PortId};
use crate::library::{Library, PAINT_TOOLS_CATEGORY};
use crate::schematic::Schematic;
use crate::settings::SceneSettings;
use crate::transforms::{AngleDirection, Axis, SSBox, SSPoint, SSVec, VSBox, VSPoint};
use crate::view::Viewer;

/// alignment targets for [`Scene::align`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Top,
    Bottom,
    HorizontalCenter,
    VerticalCenter,
    Center,
}

/// spacing axis for [`Scene::distribute`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Distribution {
    Horizontal,
    Vertical,
}

/// zoom rubber band progress in [`ZoomingAtPoint`] mode
#[derive(Clone, Copy, Debug, Default)]
pub(crate) enum ZoomBand {
    #[default]
    Idle,
    Anchored(VSPoint),
    Dragging(VSPoint, VSPoint),
}

/// a painting placed by its first click and being sized toward its second
#[derive(Clone, Debug)]
pub(crate) struct PaintingDraw {
    painting: Painting,
    pos: SSPoint,
}

pub struct Scene {
    pub schematic: Schematic,
    pub undo_stack: UndoStack,
    pub grid: GridConfig,
    mouse_action: MouseAction,
    wiring: WiringState,
    insertibles: Vec<Item>,
    painting_tool: Option<Painting>,
    painting_draw: Option<PaintingDraw>,
    zoom_band: ZoomBand,
    drag: Option<special_move::DragState>,
    viewers: Vec<Rc<RefCell<dyn Viewer>>>,
    shortcuts_blocked: bool,
    modified: bool,
}

impl Scene {
    pub fn new() -> Self {
        Scene {
            schematic: Schematic::new(),
            undo_stack: UndoStack::new(),
            grid: GridConfig::default(),
            mouse_action: MouseAction::default(),
            wiring: WiringState::default(),
            insertibles: Vec::new(),
            painting_tool: None,
            painting_draw: None,
            zoom_band: ZoomBand::Idle,
            drag: None,
            viewers: Vec::new(),
            shortcuts_blocked: false,
            modified: false,
        }
    }

    pub fn attach_viewer(&mut self, viewer: Rc<RefCell<dyn Viewer>>) {
        viewer
            .borrow_mut()
            .set_rubber_band_enabled(matches!(self.mouse_action, MouseAction::Normal(_)));
        self.viewers.push(viewer);
    }

    pub fn mouse_action(&self) -> MouseAction {
        self.mouse_action
    }

    /// true while single-key accelerators must not fire (item placement)
    pub fn shortcuts_blocked(&self) -> bool {
        self.shortcuts_blocked
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// the document was saved; the current undo cursor becomes the clean state
    pub fn mark_saved(&mut self) {
        self.undo_stack.set_clean();
        self.after_edit();
    }

    /// switch the scene mode; a no-op when the mode is unchanged, otherwise
    /// all transient interaction state is reset
    pub fn set_mouse_action(&mut self, action: MouseAction) {
        if self.mouse_action == action {
            return;
        }
        debug!("mouse action {:?} -> {:?}", self.mouse_action, action);
        self.mouse_action = action;
        // the shortcut lock is scoped to item placement and released on any
        // exit path from it
        self.shortcuts_blocked = matches!(action, MouseAction::InsertingItems(_));
        let rubber_band = matches!(action, MouseAction::Normal(_));
        for viewer in &self.viewers {
            viewer.borrow_mut().set_rubber_band_enabled(rubber_band);
        }
        self.reset_transient_state();
    }

    /// route a pointer event to the active mode's handler
    pub fn mouse_event(&mut self, ev: &MouseEvent) {
        let action = self.mouse_action;
        action.mouse_event(self, ev);
    }

    /// Esc leaves the current mode, or clears the selection in normal mode
    pub fn esc(&mut self) {
        if matches!(self.mouse_action, MouseAction::Normal(_)) {
            self.abort_drag();
            self.schematic.clear_selection();
        } else {
            self.set_mouse_action(Normal.into());
        }
    }

    pub fn undo(&mut self) -> bool {
        let done = self.undo_stack.undo(&mut self.schematic);
        if done {
            self.after_edit();
        }
        done
    }

    pub fn redo(&mut self) -> bool {
        let done = self.undo_stack.redo(&mut self.schematic);
        if done {
            self.after_edit();
        }
        done
    }

    pub fn settings(&self) -> SceneSettings {
        SceneSettings { grid: self.grid }
    }

    pub fn apply_settings(&mut self, settings: &SceneSettings) {
        self.grid = settings.grid;
    }

    // ---- connectivity maintenance ----

    /// auto-connect every coincident port pair involving the given items
    pub fn connect_items(&mut self, ids: &[ItemId], record: bool) {
        if record {
            self.undo_stack.begin_macro("Connect items");
        }
        for &id in ids {
            self.connect_one(id, record);
        }
        if record {
            self.undo_stack.end_macro();
        }
        self.after_edit();
    }

    /// sever every connection the given items participate in; ports with no
    /// connections contribute nothing to the undo macro
    pub fn disconnect_items(&mut self, ids: &[ItemId], record: bool) {
        if record {
            self.undo_stack.begin_macro("Disconnect items");
        }
        for &id in ids {
            let Some(item) = self.schematic.item(id) else { continue };
            let port_count = item.port_count();
            for index in 0..port_count {
                let port = PortId::new(id, index);
                for other in self.schematic.connectivity.connections(port) {
                    if record {
                        self.undo_stack.push(
                            Command::Disconnect { a: port, b: other },
                            &mut self.schematic,
                        );
                    } else {
                        self.schematic.connectivity.disconnect(port, other);
                    }
                }
            }
        }
        if record {
            self.undo_stack.end_macro();
        }
        self.after_edit();
    }

    pub(crate) fn connect_one(&mut self, id: ItemId, record: bool) {
        let Some(item) = self.schematic.item(id) else { return };
        let ports: Vec<(PortId, SSPoint)> = (0..item.port_count())
            .filter_map(|index| {
                item.port_position(index)
                    .map(|pos| (PortId::new(id, index), pos))
            })
            .collect();
        for (port, pos) in ports {
            for other in self.schematic.ports_at(pos) {
                if other.item == id || self.schematic.connectivity.is_connected(port, other) {
                    continue;
                }
                trace!("connect {port:?} <-> {other:?}");
                if record {
                    self.undo_stack
                        .push(Command::Connect { a: port, b: other }, &mut self.schematic);
                } else {
                    self.schematic.connectivity.connect(port, other);
                }
            }
        }
    }

    // ---- batch editing operations ----

    pub fn rotate_items(&mut self, ids: &[ItemId], dir: AngleDirection) {
        if ids.is_empty() {
            return;
        }
        self.undo_stack.begin_macro("Rotate items");
        self.disconnect_items(ids, true);
        self.undo_stack.push(
            Command::Rotate {
                items: ids.to_vec(),
                dir,
            },
            &mut self.schematic,
        );
        self.connect_items(ids, true);
        self.undo_stack.end_macro();
        self.after_edit();
    }

    pub fn mirror_items(&mut self, ids: &[ItemId], axis: Axis) {
        if ids.is_empty() {
            return;
        }
        self.undo_stack.begin_macro("Mirror items");
        self.disconnect_items(ids, true);
        self.undo_stack.push(
            Command::Mirror {
                items: ids.to_vec(),
                axis,
            },
            &mut self.schematic,
        );
        self.connect_items(ids, true);
        self.undo_stack.end_macro();
        self.after_edit();
    }

    /// align the selection; wires have no representative position and are
    /// left untouched. Returns false (and mutates nothing) for fewer than
    /// two selected items.
    pub fn align(&mut self, alignment: Alignment) -> bool {
        let selected = self.schematic.selected_ids();
        if selected.len() < 2 {
            return false;
        }
        let boxes: Vec<(ItemId, SSBox)> = selected
            .iter()
            .filter_map(|&id| {
                let item = self.schematic.item(id)?;
                (!item.is_wire()).then(|| (id, item.bounds()))
            })
            .collect();
        let Some(union) = boxes.iter().map(|(_, b)| *b).reduce(|a, b| a.union(&b)) else {
            return false;
        };
        let ids: Vec<ItemId> = boxes.iter().map(|(id, _)| *id).collect();

        self.undo_stack.begin_macro("Align items");
        self.disconnect_items(&ids, true);
        for (id, b) in &boxes {
            let delta = match alignment {
                Alignment::Left => SSVec::new(union.min.x - b.min.x, 0),
                Alignment::Right => SSVec::new(union.max.x - b.max.x, 0),
                Alignment::Top => SSVec::new(0, union.min.y - b.min.y),
                Alignment::Bottom => SSVec::new(0, union.max.y - b.max.y),
                Alignment::HorizontalCenter => SSVec::new(center_delta(&union, b).x, 0),
                Alignment::VerticalCenter => SSVec::new(0, center_delta(&union, b).y),
                Alignment::Center => center_delta(&union, b),
            };
            if delta == SSVec::zero() {
                continue;
            }
            let Some(item) = self.schematic.item(*id) else { continue };
            let from = item.pos;
            self.undo_stack.push(
                Command::Move {
                    item: *id,
                    from,
                    to: from + delta,
                },
                &mut self.schematic,
            );
        }
        self.connect_items(&ids, true);
        self.undo_stack.end_macro();
        self.after_edit();
        true
    }

    /// space the selection evenly between its first and last item along one
    /// axis; wires are skipped
    pub fn distribute(&mut self, distribution: Distribution) -> bool {
        let selected = self.schematic.selected_ids();
        if selected.len() < 2 {
            return false;
        }
        let mut movable: Vec<(ItemId, SSPoint)> = selected
            .iter()
            .filter_map(|&id| {
                let item = self.schematic.item(id)?;
                (!item.is_wire()).then(|| (id, item.pos))
            })
            .collect();
        if movable.len() < 2 {
            return false;
        }
        let coord = |p: &SSPoint| match distribution {
            Distribution::Horizontal => p.x,
            Distribution::Vertical => p.y,
        };
        movable.sort_by_key(|(_, p)| coord(p));
        let ids: Vec<ItemId> = movable.iter().map(|(id, _)| *id).collect();
        let first = coord(&movable[0].1) as f32;
        let last = coord(&movable[movable.len() - 1].1) as f32;
        let step = (last - first) / (movable.len() - 1) as f32;

        self.undo_stack.begin_macro("Distribute items");
        self.disconnect_items(&ids, true);
        for (i, (id, from)) in movable.iter().enumerate() {
            let target = (first + i as f32 * step).round() as i32;
            let to = match distribution {
                Distribution::Horizontal => SSPoint::new(target, from.y),
                Distribution::Vertical => SSPoint::new(from.x, target),
            };
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
        self.connect_items(&ids, true);
        self.undo_stack.end_macro();
        self.after_edit();
        true
    }

    /// move off-grid items to their nearest grid point; items already on
    /// grid are skipped entirely, and with nothing to move no macro is
    /// pushed at all
    pub fn set_items_on_grid(&mut self, ids: &[ItemId]) {
        let off_grid: Vec<(ItemId, SSPoint, SSPoint)> = ids
            .iter()
            .filter_map(|&id| {
                let pos = self.schematic.item(id)?.pos;
                let snapped = self.grid.nearing_grid_point(pos);
                (snapped != pos).then_some((id, pos, snapped))
            })
            .collect();
        if off_grid.is_empty() {
            return;
        }
        let moved: Vec<ItemId> = off_grid.iter().map(|(id, _, _)| *id).collect();
        self.undo_stack.begin_macro("Set items on grid");
        self.disconnect_items(&moved, true);
        for (id, from, to) in off_grid {
            self.undo_stack.push(
                Command::Move { item: id, from, to },
                &mut self.schematic,
            );
        }
        self.connect_items(&moved, true);
        self.undo_stack.end_macro();
        self.after_edit();
    }

    /// flip the active flag of the components in the batch; other items are
    /// ignored entirely
    pub fn toggle_active_status(&mut self, ids: &[ItemId]) {
        let components: Vec<ItemId> = ids
            .iter()
            .filter(|&&id| self.schematic.item(id).map_or(false, Item::is_component))
            .copied()
            .collect();
        if components.is_empty() {
            return;
        }
        self.undo_stack.begin_macro("Toggle active status");
        self.undo_stack.push(
            Command::ToggleActive { items: components },
            &mut self.schematic,
        );
        self.undo_stack.end_macro();
        self.after_edit();
    }

    pub fn delete_items(&mut self, ids: &[ItemId]) {
        let snapshots: Vec<(ItemId, Item)> = ids
            .iter()
            .filter_map(|&id| self.schematic.item(id).map(|item| (id, item.clone())))
            .collect();
        if snapshots.is_empty() {
            return;
        }
        self.undo_stack.begin_macro("Delete items");
        self.disconnect_items(ids, true);
        self.undo_stack
            .push(Command::Remove { items: snapshots }, &mut self.schematic);
        self.undo_stack.end_macro();
        self.after_edit();
    }

    // ---- clipboard ----

    /// serialize the selection; None when nothing is selected
    pub fn copy_selection(&self) -> Option<String> {
        let items: Vec<&Item> = self
            .schematic
            .selected_ids()
            .iter()
            .filter_map(|&id| self.schematic.item(id))
            .collect();
        if items.is_empty() {
            return None;
        }
        clipboard::write_items(&items).ok()
    }

    pub fn cut_selection(&mut self) -> Option<String> {
        let xml = self.copy_selection()?;
        let ids = self.schematic.selected_ids();
        self.delete_items(&ids);
        Some(xml)
    }

    /// parse clipboard XML and enter placement with the parsed items; a
    /// parse or version failure leaves the scene untouched
    pub fn paste(&mut self, xml: &str) -> Result<(), ClipboardError> {
        let items = clipboard::read_items(xml)?;
        if !items.is_empty() {
            self.begin_inserting_items(items);
        }
        Ok(())
    }

    // ---- item placement ----

    /// insert one item as an undoable "Insert item" macro, assigning the
    /// next free label suffix to unlabeled components
    pub fn place_item(&mut self, mut item: Item) -> ItemId {
        if let Some(c) = item.component_mut() {
            if c.label.is_empty() {
                let suffix = self.next_label_suffix(&c.label_prefix);
                c.label = format!("{}{}", c.label_prefix, suffix);
            }
        }
        let id = self.schematic.allocate_id();
        self.undo_stack.begin_macro("Insert item");
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

    /// enter placement mode with a floating set of items that follows the
    /// cursor; each left click stamps a copy into the scene
    pub fn begin_inserting_items(&mut self, items: Vec<Item>) {
        if items.is_empty() {
            return;
        }
        self.set_mouse_action(InsertingItems.into());
        self.insertibles = items;
    }

    /// resolve a sidebar click or drag-and-drop payload
    pub fn sidebar_item_clicked(
        &mut self,
        name: &str,
        category: &str,
        library: &dyn Library,
    ) -> bool {
        if category == PAINT_TOOLS_CATEGORY {
            if let Some(painting) = Painting::from_name(name) {
                self.arm_painting_tool(painting);
                return true;
            }
            return false;
        }
        match library.item_for_name(name, category) {
            Some(item) => {
                self.begin_inserting_items(vec![item]);
                true
            }
            None => false,
        }
    }

    /// enter painting mode with the given painting as the armed tool
    pub fn arm_painting_tool(&mut self, painting: Painting) {
        self.set_mouse_action(PaintingDrawEvent.into());
        self.painting_tool = Some(painting);
    }

    /// the floating items in placement mode, for host-side preview
    pub fn insertibles(&self) -> &[Item] {
        &self.insertibles
    }

    /// the painting under construction, for host-side preview
    pub fn painting_preview(&self) -> Option<(SSPoint, &Painting)> {
        self.painting_draw
            .as_ref()
            .map(|draw| (draw.pos, &draw.painting))
    }

    pub(crate) fn drag_insertibles(&mut self, pos: SSPoint) {
        let Some(bb) = self
            .insertibles
            .iter()
            .map(Item::bounds)
            .reduce(|a, b| a.union(&b))
        else {
            return;
        };
        // keep the set's relative layout, tracking its center
        let center = SSPoint::new((bb.min.x + bb.max.x) / 2, (bb.min.y + bb.max.y) / 2);
        let delta = pos - center;
        for item in &mut self.insertibles {
            item.translate(delta);
        }
    }

    pub(crate) fn stamp_insertibles(&mut self) {
        if self.insertibles.is_empty() {
            return;
        }
        let items = self.insertibles.clone();
        self.undo_stack.begin_macro("Insert items");
        for item in items {
            self.place_item(item);
        }
        self.undo_stack.end_macro();
        self.after_edit();
    }

    pub(crate) fn painting_click(&mut self, pos: SSPoint) {
        match self.painting_draw.take() {
            None => {
                let Some(tool) = self.painting_tool.clone() else { return };
                self.painting_draw = Some(PaintingDraw {
                    painting: tool,
                    pos,
                });
            }
            Some(mut draw) => {
                draw.painting.set_sizing_corner(pos - draw.pos.to_vector());
                self.place_item(Item::new(draw.pos, ItemBody::Painting(draw.painting)));
                // the tool stays armed for the next draw
            }
        }
    }

    pub(crate) fn painting_cursor_moved(&mut self, pos: SSPoint) {
        if let Some(draw) = &mut self.painting_draw {
            draw.painting.set_sizing_corner(pos - draw.pos.to_vector());
        }
    }

    // ---- helpers ----

    fn next_label_suffix(&self, prefix: &str) -> u32 {
        self.schematic
            .iter()
            .filter_map(|(_, item)| item.component())
            .filter(|c| c.label_prefix == prefix)
            .filter_map(Component::label_suffix)
            .max()
            .map_or(1, |max| max + 1)
    }

    fn reset_transient_state(&mut self) {
        self.schematic.clear_selection();
        self.cancel_wiring();
        self.abort_drag();
        self.painting_tool = None;
        self.painting_draw = None;
        self.insertibles.clear();
        self.zoom_band = ZoomBand::Idle;
        self.after_edit();
    }

    pub(crate) fn snap(&self, pos: VSPoint) -> SSPoint {
        self.grid.smart_nearing_grid_point(pos)
    }

    /// cursor position rounded but never grid-snapped, for hit testing
    pub(crate) fn raw(&self, pos: VSPoint) -> SSPoint {
        SSPoint::new(pos.x.round() as i32, pos.y.round() as i32)
    }

    pub(crate) fn zoom_in_at(&self, pos: VSPoint) {
        for viewer in &self.viewers {
            viewer.borrow_mut().zoom_in_at(pos);
        }
    }

    pub(crate) fn zoom_out_at(&self, pos: VSPoint) {
        for viewer in &self.viewers {
            viewer.borrow_mut().zoom_out_at(pos);
        }
    }

    pub(crate) fn zoom_to_rect(&self, rect: VSBox) {
        for viewer in &self.viewers {
            viewer.borrow_mut().zoom_to_rect(rect);
        }
    }

    pub(crate) fn after_edit(&mut self) {
        let modified = !self.undo_stack.is_clean();
        if modified != self.modified {
            self.modified = modified;
            for viewer in &self.viewers {
                viewer.borrow_mut().modified_changed(modified);
            }
        }
        for viewer in &self.viewers {
            viewer.borrow_mut().scene_changed();
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}

fn center_delta(union: &SSBox, b: &SSBox) -> SSVec {
    SSVec::new(
        (union.min.x + union.max.x) / 2 - (b.min.x + b.max.x) / 2,
        (union.min.y + union.max.y) / 2 - (b.min.y + b.max.y) / 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcut_lock_follows_placement_mode() {
        let mut scene = Scene::new();
        assert!(!scene.shortcuts_blocked());
        scene.set_mouse_action(InsertingItems.into());
        assert!(scene.shortcuts_blocked());
        // any exit path releases the lock
        scene.set_mouse_action(Wiring.into());
        assert!(!scene.shortcuts_blocked());
    }

    #[test]
    fn mode_change_to_same_mode_is_noop() {
        let mut scene = Scene::new();
        scene.begin_inserting_items(vec![Item::new(
            SSPoint::new(0, 0),
            ItemBody::Component(Component::two_port("resistor", "R", 10)),
        )]);
        assert_eq!(scene.insertibles().len(), 1);
        // setting the mode it is already in must not reset the insertibles
        scene.set_mouse_action(InsertingItems.into());
        assert_eq!(scene.insertibles().len(), 1);
    }

    #[test]
    fn esc_leaves_mode_then_clears_selection() {
        let mut scene = Scene::new();
        let id = scene.schematic.insert_new(Item::new(
            SSPoint::new(0, 0),
            ItemBody::Component(Component::two_port("resistor", "R", 10)),
        ));
        scene.schematic.set_selected(id, true);
        scene.set_mouse_action(Deleting.into());
        scene.esc();
        assert!(matches!(scene.mouse_action(), MouseAction::Normal(_)));
        scene.schematic.set_selected(id, true);
        scene.esc();
        assert!(scene.schematic.selected_ids().is_empty());
    }

    #[test]
    fn placed_components_get_sequential_labels() {
        let mut scene = Scene::new();
        let template = Item::new(
            SSPoint::new(0, 0),
            ItemBody::Component(Component::two_port("resistor", "R", 10)),
        );
        let a = scene.place_item(template.clone());
        let mut second = template.clone();
        second.pos = SSPoint::new(100, 0);
        let b = scene.place_item(second);
        let label = |id| {
            scene
                .schematic
                .item(id)
                .and_then(Item::component)
                .map(|c| c.label.clone())
                .unwrap_or_default()
        };
        assert_eq!(label(a), "R1");
        assert_eq!(label(b), "R2");
    }
}
