//! modal pointer handlers
//!
//! One handler type per mouse action; the active mode is dispatched through
//! [`MouseActionHandler`] so adding a mode is a compile-checked change
//! rather than a new arm in a long branch chain.

use enum_dispatch::enum_dispatch;

use super::{Scene, ZoomBand};
use crate::event::{Modifier, MouseEvent, MouseEventKind};
use crate::transforms::{AngleDirection, Axis, VSBox};

/// a zoom rectangle smaller than this on either side is treated as a click
const ZOOM_BAND_MIN: f32 = 4.0;

#[enum_dispatch]
pub trait MouseActionHandler {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Normal;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wiring;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deleting;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Marking;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rotating;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MirroringX;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MirroringY;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangingActiveStatus;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettingOnGrid;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZoomingAtPoint;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZoomingOutAtPoint;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintingDrawEvent;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertingItems;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertingWireLabel;

/// the closed set of scene modes
#[enum_dispatch(MouseActionHandler)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseAction {
    Normal,
    Wiring,
    Deleting,
    Marking,
    Rotating,
    MirroringX,
    MirroringY,
    ChangingActiveStatus,
    SettingOnGrid,
    ZoomingAtPoint,
    ZoomingOutAtPoint,
    PaintingDrawEvent,
    InsertingItems,
    InsertingWireLabel,
}

impl Default for MouseAction {
    fn default() -> Self {
        MouseAction::Normal(Normal)
    }
}

impl MouseActionHandler for Normal {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent) {
        match ev.kind {
            MouseEventKind::Press if ev.left() => {
                let hit = scene
                    .schematic
                    .items_at(scene.raw(ev.pos))
                    .into_iter()
                    .next();
                let additive = ev.modifiers.contains(Modifier::Ctrl);
                match hit {
                    Some(id) => {
                        let already =
                            scene.schematic.item(id).map_or(false, |item| item.selected);
                        if !already && !additive {
                            scene.schematic.clear_selection();
                        }
                        scene.schematic.set_selected(id, true);
                        scene.begin_drag(scene.snap(ev.pos));
                    }
                    None => {
                        if !additive {
                            scene.schematic.clear_selection();
                        }
                        // region selection from here is the viewer's rubber band
                    }
                }
            }
            MouseEventKind::Move => scene.drag_tick(scene.snap(ev.pos)),
            MouseEventKind::Release if ev.left() => scene.end_drag(scene.snap(ev.pos)),
            _ => {}
        }
    }
}

impl MouseActionHandler for Wiring {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent) {
        match ev.kind {
            MouseEventKind::Press if ev.left() => scene.wiring_left_press(scene.snap(ev.pos)),
            MouseEventKind::Press if ev.right() => scene.wiring_right_press(scene.snap(ev.pos)),
            MouseEventKind::Move => scene.wiring_cursor_moved(scene.snap(ev.pos)),
            _ => {}
        }
    }
}

impl MouseActionHandler for Deleting {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent) {
        if ev.kind != MouseEventKind::Press {
            return;
        }
        let Some(id) = scene
            .schematic
            .items_at(scene.raw(ev.pos))
            .into_iter()
            .next()
        else {
            return;
        };
        if ev.left() {
            scene.delete_items(&[id]);
        } else if ev.right() {
            // right click severs connections but keeps the item
            scene.disconnect_items(&[id], true);
        }
    }
}

impl MouseActionHandler for Marking {
    fn mouse_event(&self, _scene: &mut Scene, _ev: &MouseEvent) {
        // marking has no behavior yet; the mode exists so hosts can show it
    }
}

impl MouseActionHandler for Rotating {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent) {
        if ev.kind != MouseEventKind::Press {
            return;
        }
        let Some(id) = scene
            .schematic
            .items_at(scene.raw(ev.pos))
            .into_iter()
            .next()
        else {
            return;
        };
        if ev.left() {
            scene.rotate_items(&[id], AngleDirection::Clockwise);
        } else if ev.right() {
            scene.rotate_items(&[id], AngleDirection::CounterClockwise);
        }
    }
}

fn mirror_under_cursor(scene: &mut Scene, ev: &MouseEvent, left: Axis, right: Axis) {
    if ev.kind != MouseEventKind::Press {
        return;
    }
    let Some(id) = scene
        .schematic
        .items_at(scene.raw(ev.pos))
        .into_iter()
        .next()
    else {
        return;
    };
    if ev.left() {
        scene.mirror_items(&[id], left);
    } else if ev.right() {
        scene.mirror_items(&[id], right);
    }
}

impl MouseActionHandler for MirroringX {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent) {
        mirror_under_cursor(scene, ev, Axis::X, Axis::Y);
    }
}

impl MouseActionHandler for MirroringY {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent) {
        mirror_under_cursor(scene, ev, Axis::Y, Axis::X);
    }
}

impl MouseActionHandler for ChangingActiveStatus {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent) {
        if ev.kind != MouseEventKind::Press || !ev.left() {
            return;
        }
        if let Some(id) = scene
            .schematic
            .items_at(scene.raw(ev.pos))
            .into_iter()
            .next()
        {
            scene.toggle_active_status(&[id]);
        }
    }
}

impl MouseActionHandler for SettingOnGrid {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent) {
        if ev.kind != MouseEventKind::Press || !ev.left() {
            return;
        }
        if let Some(id) = scene
            .schematic
            .items_at(scene.raw(ev.pos))
            .into_iter()
            .next()
        {
            scene.set_items_on_grid(&[id]);
        }
    }
}

impl MouseActionHandler for ZoomingAtPoint {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent) {
        match ev.kind {
            MouseEventKind::Press if ev.left() => {
                scene.zoom_band = ZoomBand::Anchored(ev.pos);
            }
            MouseEventKind::Move => match scene.zoom_band {
                ZoomBand::Anchored(anchor) | ZoomBand::Dragging(anchor, _) => {
                    scene.zoom_band = ZoomBand::Dragging(anchor, ev.pos);
                }
                ZoomBand::Idle => {}
            },
            MouseEventKind::Release if ev.left() => {
                let band = std::mem::replace(&mut scene.zoom_band, ZoomBand::Idle);
                match band {
                    ZoomBand::Dragging(a, b)
                        if (a.x - b.x).abs() >= ZOOM_BAND_MIN
                            && (a.y - b.y).abs() >= ZOOM_BAND_MIN =>
                    {
                        scene.zoom_to_rect(VSBox::from_points([a, b]));
                    }
                    _ => scene.zoom_in_at(ev.pos),
                }
            }
            _ => {}
        }
    }
}

impl MouseActionHandler for ZoomingOutAtPoint {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent) {
        if ev.kind == MouseEventKind::Press && ev.left() {
            scene.zoom_out_at(ev.pos);
        }
    }
}

impl MouseActionHandler for PaintingDrawEvent {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent) {
        match ev.kind {
            MouseEventKind::Press if ev.left() => scene.painting_click(scene.snap(ev.pos)),
            MouseEventKind::Move => scene.painting_cursor_moved(scene.snap(ev.pos)),
            _ => {}
        }
    }
}

impl MouseActionHandler for InsertingItems {
    fn mouse_event(&self, scene: &mut Scene, ev: &MouseEvent) {
        match ev.kind {
            MouseEventKind::Press if ev.left() => scene.stamp_insertibles(),
            MouseEventKind::Move => scene.drag_insertibles(scene.snap(ev.pos)),
            _ => {}
        }
    }
}

impl MouseActionHandler for InsertingWireLabel {
    fn mouse_event(&self, _scene: &mut Scene, _ev: &MouseEvent) {
        // wire labels are not part of the editing core yet
    }
}
