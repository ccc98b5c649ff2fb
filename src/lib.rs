//! Headless schematic-capture editing core.
//!
//! Everything a schematic editor does between the pointer and the pixels:
//! an item model (components, wires, paintings), a non-owning port
//! connectivity graph, an undo/redo command stack with nested macros, and a
//! modal mouse-action state machine covering wiring, deletion, batch
//! transforms and item placement. Rendering, file formats and widgetry are
//! left to the host shell, which feeds [`event::MouseEvent`]s in and
//! implements [`view::Viewer`] for the visual side effects.

pub mod clipboard;
pub mod command;
pub mod connectivity;
pub mod event;
pub mod grid;
pub mod items;
pub mod library;
pub mod scene;
pub mod schematic;
pub mod settings;
pub mod transforms;
pub mod view;

pub use scene::{MouseAction, Scene};
