//! pointer event types delivered by the host shell
//!
//! The editing core is toolkit agnostic; whatever widget toolkit hosts the
//! scene translates its native events into these before forwarding them to
//! [`Scene::mouse_event`](crate::scene::Scene::mouse_event).

use flagset::{flags, FlagSet};

use crate::transforms::VSPoint;

flags! {
    /// mouse buttons held down during an event
    pub enum MouseButton: u8 {
        Left,
        Right,
        Middle,
    }

    /// keyboard modifiers held down during an event
    pub enum Modifier: u8 {
        Shift,
        Ctrl,
        Alt,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    Press,
    Move,
    Release,
    DoubleClick,
}

/// a pointer event at a scene coordinate
#[derive(Clone, Copy, Debug)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// buttons held down, e.g. the pressed button for a press event
    pub buttons: FlagSet<MouseButton>,
    pub modifiers: FlagSet<Modifier>,
    /// raw scene position, not grid rounded
    pub pos: VSPoint,
}

impl MouseEvent {
    pub fn press(button: MouseButton, pos: VSPoint) -> Self {
        MouseEvent {
            kind: MouseEventKind::Press,
            buttons: button.into(),
            modifiers: FlagSet::default(),
            pos,
        }
    }

    pub fn moved(pos: VSPoint) -> Self {
        MouseEvent {
            kind: MouseEventKind::Move,
            buttons: FlagSet::default(),
            modifiers: FlagSet::default(),
            pos,
        }
    }

    pub fn release(button: MouseButton, pos: VSPoint) -> Self {
        MouseEvent {
            kind: MouseEventKind::Release,
            buttons: button.into(),
            modifiers: FlagSet::default(),
            pos,
        }
    }

    pub fn double_click(button: MouseButton, pos: VSPoint) -> Self {
        MouseEvent {
            kind: MouseEventKind::DoubleClick,
            buttons: button.into(),
            modifiers: FlagSet::default(),
            pos,
        }
    }

    pub fn with_buttons(mut self, buttons: impl Into<FlagSet<MouseButton>>) -> Self {
        self.buttons = buttons.into();
        self
    }

    pub fn with_modifiers(mut self, modifiers: impl Into<FlagSet<Modifier>>) -> Self {
        self.modifiers = modifiers.into();
        self
    }

    pub fn left(&self) -> bool {
        self.buttons.contains(MouseButton::Left)
    }

    pub fn right(&self) -> bool {
        self.buttons.contains(MouseButton::Right)
    }
}
