//! host viewport collaborator
//!
//! The scene is headless; zooming and rubber-band selection are visual
//! concerns it can only request, not perform. A host shell implements
//! [`Viewer`] for its viewport widget and attaches it to the scene.

use crate::transforms::{VSBox, VSPoint};

pub trait Viewer {
    /// drag-selection behavior; the scene enables this only in normal mode
    fn set_rubber_band_enabled(&mut self, enabled: bool);

    fn zoom_in_at(&mut self, pos: VSPoint);

    fn zoom_out_at(&mut self, pos: VSPoint);

    fn zoom_to_rect(&mut self, rect: VSBox);

    /// content changed and should be repainted
    fn scene_changed(&mut self) {}

    /// the unsaved-changes flag flipped
    fn modified_changed(&mut self, _modified: bool) {}
}
