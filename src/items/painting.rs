use serde::{Deserialize, Serialize};

use crate::transforms::{SSBox, SSPoint};

/// kind of drawing primitive; text carries its content
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum PaintingKind {
    Line,
    Rectangle,
    Ellipse,
    Arrow,
    Text(String),
}

/// an annotation with no electrical meaning, sized by a local rectangle
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Painting {
    pub kind: PaintingKind,
    pub rect: SSBox,
}

impl Painting {
    pub fn new(kind: PaintingKind) -> Self {
        Painting {
            kind,
            rect: SSBox::new(SSPoint::origin(), SSPoint::origin()),
        }
    }

    /// resolve a paint-tool name from the sidebar; these are hard coded
    /// rather than loaded from the component library
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "line" => PaintingKind::Line,
            "rectangle" => PaintingKind::Rectangle,
            "ellipse" => PaintingKind::Ellipse,
            "arrow" => PaintingKind::Arrow,
            "text" => PaintingKind::Text(String::new()),
            _ => return None,
        };
        Some(Painting::new(kind))
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            PaintingKind::Line => "line",
            PaintingKind::Rectangle => "rectangle",
            PaintingKind::Ellipse => "ellipse",
            PaintingKind::Arrow => "arrow",
            PaintingKind::Text(_) => "text",
        }
    }

    /// stretch the sizing corner while the painting is being drawn
    pub fn set_sizing_corner(&mut self, local: SSPoint) {
        self.rect.max = local;
    }
}
