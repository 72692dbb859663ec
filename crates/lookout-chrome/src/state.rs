//! Address bar editing state
//!
//! ```text
//! Browsing ── focus gained ──▶ Editing
//!    ▲                            │
//!    └──────── focus lost ────────┘
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditingState {
    /// Field is empty and shows the current URL as its placeholder
    #[default]
    Browsing,
    /// Field holds user input; cancel button shown, toolbar hidden
    Editing,
}

impl EditingState {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditingState::Editing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditingState::Browsing => "browsing",
            EditingState::Editing => "editing",
        }
    }
}

impl std::fmt::Display for EditingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Focus notification from the native text input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusEvent {
    Gained,
    Lost,
}

/// Visibility of toolbar items and the overlay menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    Collapsed,
}

impl Visibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }
}
