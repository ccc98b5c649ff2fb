//! reversible mutations and the undo stack
//!
//! Commands follow the push-executes pattern: pushing a command onto the
//! stack runs its `redo` immediately, so a command is never on the stack in
//! an unapplied state. Macros group commands into one atomic undo step and
//! may nest; an empty macro is discarded rather than committed.

use log::trace;

use crate::items::{Item, ItemId, PortId, WireGeometry};
use crate::schematic::Schematic;
use crate::transforms::{AngleDirection, Axis, SSPoint};

#[derive(Clone, Debug)]
pub enum Command {
    /// move one item between two positions
    Move {
        item: ItemId,
        from: SSPoint,
        to: SSPoint,
    },
    /// add an item to the scene; undo removes it again
    Insert { item: ItemId, data: Box<Item> },
    /// remove a batch of items; snapshots allow undo to resurrect them
    Remove { items: Vec<(ItemId, Item)> },
    /// replace a wire's geometry wholesale
    WireStateChange {
        item: ItemId,
        from: WireGeometry,
        to: WireGeometry,
    },
    Connect { a: PortId, b: PortId },
    Disconnect { a: PortId, b: PortId },
    Rotate {
        items: Vec<ItemId>,
        dir: AngleDirection,
    },
    Mirror { items: Vec<ItemId>, axis: Axis },
    ToggleActive { items: Vec<ItemId> },
    Macro {
        name: String,
        children: Vec<Command>,
    },
}

impl Command {
    pub fn redo(&self, sch: &mut Schematic) {
        match self {
            Command::Move { item, to, .. } => sch.set_item_pos(*item, *to),
            Command::Insert { item, data } => sch.insert(*item, (**data).clone()),
            Command::Remove { items } => {
                for (id, _) in items {
                    sch.remove(*id);
                }
            }
            Command::WireStateChange { item, to, .. } => sch.set_wire_geometry(*item, to),
            Command::Connect { a, b } => sch.connectivity.connect(*a, *b),
            Command::Disconnect { a, b } => sch.connectivity.disconnect(*a, *b),
            Command::Rotate { items, dir } => {
                for id in items {
                    if let Some(item) = sch.item_mut(*id) {
                        item.rotate(*dir);
                    }
                }
            }
            Command::Mirror { items, axis } => {
                for id in items {
                    if let Some(item) = sch.item_mut(*id) {
                        item.mirror(*axis);
                    }
                }
            }
            Command::ToggleActive { items } => {
                for id in items {
                    if let Some(c) = sch.item_mut(*id).and_then(|i| i.component_mut()) {
                        c.active = !c.active;
                    }
                }
            }
            Command::Macro { children, .. } => {
                for c in children {
                    c.redo(sch);
                }
            }
        }
    }

    pub fn undo(&self, sch: &mut Schematic) {
        match self {
            Command::Move { item, from, .. } => sch.set_item_pos(*item, *from),
            Command::Insert { item, .. } => {
                sch.remove(*item);
            }
            Command::Remove { items } => {
                for (id, item) in items {
                    sch.insert(*id, item.clone());
                }
            }
            Command::WireStateChange { item, from, .. } => sch.set_wire_geometry(*item, from),
            Command::Connect { a, b } => sch.connectivity.disconnect(*a, *b),
            Command::Disconnect { a, b } => sch.connectivity.connect(*a, *b),
            Command::Rotate { items, dir } => {
                let opposite = match dir {
                    AngleDirection::Clockwise => AngleDirection::CounterClockwise,
                    AngleDirection::CounterClockwise => AngleDirection::Clockwise,
                };
                for id in items {
                    if let Some(item) = sch.item_mut(*id) {
                        item.rotate(opposite);
                    }
                }
            }
            // mirror and toggle are involutions
            Command::Mirror { .. } | Command::ToggleActive { .. } => self.redo(sch),
            Command::Macro { children, .. } => {
                for c in children.iter().rev() {
                    c.undo(sch);
                }
            }
        }
    }
}

/// executed commands with a cursor; commands below the cursor are undoable,
/// above it redoable, and pushing truncates the redoable future
#[derive(Debug, Default)]
pub struct UndoStack {
    stack: Vec<Command>,
    index: usize,
    macros: Vec<(String, Vec<Command>)>,
    clean_index: Option<usize>,
}

impl UndoStack {
    pub fn new() -> Self {
        UndoStack {
            clean_index: Some(0),
            ..UndoStack::default()
        }
    }

    pub fn begin_macro(&mut self, name: impl Into<String>) {
        let name = name.into();
        trace!("begin macro {name:?}");
        if self.macros.is_empty() {
            self.stack.truncate(self.index);
        }
        self.macros.push((name, Vec::new()));
    }

    /// close the innermost macro; empty macros vanish without a stack entry
    pub fn end_macro(&mut self) {
        let Some((name, children)) = self.macros.pop() else {
            debug_assert!(false, "end_macro without begin_macro");
            return;
        };
        if children.is_empty() {
            trace!("discard empty macro {name:?}");
            return;
        }
        let group = Command::Macro { name, children };
        match self.macros.last_mut() {
            Some((_, parent)) => parent.push(group),
            None => self.commit(group),
        }
    }

    /// execute the command, then record it
    pub fn push(&mut self, cmd: Command, sch: &mut Schematic) {
        cmd.redo(sch);
        match self.macros.last_mut() {
            Some((_, children)) => children.push(cmd),
            None => {
                self.stack.truncate(self.index);
                self.commit(cmd);
            }
        }
    }

    fn commit(&mut self, cmd: Command) {
        // the future is gone; a clean state in it can never be reached again
        if self.clean_index.is_some_and(|c| c > self.index) {
            self.clean_index = None;
        }
        self.stack.push(cmd);
        self.index += 1;
    }

    pub fn can_undo(&self) -> bool {
        self.macros.is_empty() && self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.macros.is_empty() && self.index < self.stack.len()
    }

    pub fn undo(&mut self, sch: &mut Schematic) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.index -= 1;
        self.stack[self.index].undo(sch);
        true
    }

    pub fn redo(&mut self, sch: &mut Schematic) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.stack[self.index].redo(sch);
        self.index += 1;
        true
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn in_macro(&self) -> bool {
        !self.macros.is_empty()
    }

    /// mark the current cursor as the saved state
    pub fn set_clean(&mut self) {
        self.clean_index = Some(self.index);
    }

    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.index)
    }
}
