//! item lookup collaborator for sidebar clicks and drag-and-drop payloads

use crate::items::Item;

/// category whose names resolve to paintings without consulting a library
pub const PAINT_TOOLS_CATEGORY: &str = "Paint Tools";

/// resolves a `(name, category)` pair to a freshly built item
///
/// The scene consults this when a sidebar entry is clicked or a typed
/// drag-and-drop bundle lands on the canvas. Paint tool names are resolved
/// by the scene itself before the library is asked.
pub trait Library {
    fn item_for_name(&self, name: &str, category: &str) -> Option<Item>;
}
