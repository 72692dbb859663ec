//! Chrome configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Placeholder shown when there is no URL to display
    pub hint: String,
    /// Delay after focus before the field is filled with the current URL
    pub populate_delay_ms: u64,
    /// Menu open/close animation length
    pub menu_animation_ms: u64,
    /// View id of the overlay menu
    pub menu_id: String,
}

impl Config {
    /// Load from a JSON file; missing keys take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded chrome config");
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn populate_delay(&self) -> Duration {
        Duration::from_millis(self.populate_delay_ms)
    }

    pub fn menu_animation(&self) -> Duration {
        Duration::from_millis(self.menu_animation_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hint: "Search or enter address".to_string(),
            populate_delay_ms: lookout_chrome::POPULATE_DELAY.as_millis() as u64,
            menu_animation_ms: lookout_chrome::MENU_ANIMATION.as_millis() as u64,
            menu_id: "menu".to_string(),
        }
    }
}
