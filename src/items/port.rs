use serde::{Deserialize, Serialize};

use crate::items::ItemId;
use crate::transforms::SSVec;

/// a connection point of a component, at a fixed offset from the
/// component's reference point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Port {
    pub offset: SSVec,
}

impl Port {
    pub fn new(x: i32, y: i32) -> Self {
        Port {
            offset: SSVec::new(x, y),
        }
    }
}

/// identifies one port of one item; the connectivity graph stores these as
/// plain values rather than references into items, so deleting an item
/// cannot leave dangling pointers behind
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct PortId {
    pub item: ItemId,
    pub index: u8,
}

impl PortId {
    pub fn new(item: ItemId, index: u8) -> Self {
        PortId { item, index }
    }
}
