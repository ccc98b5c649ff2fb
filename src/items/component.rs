use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::items::Port;
use crate::transforms::{SSBox, SSPoint};

/// a library-defined symbol: ports at fixed local offsets, a local bounding
/// box, and a label assigned when the component is placed
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Component {
    /// library name this component was resolved from, e.g. "resistor"
    pub name: String,
    /// label prefix, e.g. "R" yielding labels R1, R2, ...
    pub label_prefix: String,
    /// assigned label; empty until placed
    pub label: String,
    pub ports: SmallVec<[Port; 4]>,
    /// local bounding box of the symbol
    pub bounds: SSBox,
    /// active components participate in simulation; toggled per component
    pub active: bool,
}

impl Component {
    pub fn new(
        name: impl Into<String>,
        label_prefix: impl Into<String>,
        ports: SmallVec<[Port; 4]>,
        bounds: SSBox,
    ) -> Self {
        Component {
            name: name.into(),
            label_prefix: label_prefix.into(),
            label: String::new(),
            ports,
            bounds,
            active: true,
        }
    }

    /// a horizontal two-terminal symbol with ports at (-half, 0) and (half, 0)
    pub fn two_port(name: &str, label_prefix: &str, half: i32) -> Self {
        Component::new(
            name,
            label_prefix,
            smallvec![Port::new(-half, 0), Port::new(half, 0)],
            SSBox::new(SSPoint::new(-half, -half / 2), SSPoint::new(half, half / 2)),
        )
    }

    /// numeric suffix of the label, if the label is `prefix + digits`
    pub fn label_suffix(&self) -> Option<u32> {
        self.label
            .strip_prefix(self.label_prefix.as_str())
            .and_then(|s| s.parse().ok())
    }
}
