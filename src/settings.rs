//! persisted scene configuration

use serde::{Deserialize, Serialize};

use crate::grid::GridConfig;

/// the slice of scene state a settings store round-trips as JSON
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SceneSettings {
    pub grid: GridConfig,
}

impl SceneSettings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
