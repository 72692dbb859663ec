//! Toolbar items hidden while the address bar is being edited

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::Visibility;

pub trait Toolbar: Send {
    /// Apply `visibility` to every item
    fn set_items_visibility(&mut self, visibility: Visibility);
}

pub type SharedToolbar = Arc<Mutex<dyn Toolbar>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ActionItem {
    id: String,
    visibility: Visibility,
}

/// Action bar with a flat list of items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionBar {
    items: Vec<ActionItem>,
}

impl ActionBar {
    pub fn with_items<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: ids
                .into_iter()
                .map(|id| ActionItem {
                    id: id.into(),
                    visibility: Visibility::Visible,
                })
                .collect(),
        }
    }

    pub fn all_visible(&self) -> bool {
        self.items.iter().all(|item| item.visibility.is_visible())
    }

    pub fn any_visible(&self) -> bool {
        self.items.iter().any(|item| item.visibility.is_visible())
    }
}

impl Toolbar for ActionBar {
    fn set_items_visibility(&mut self, visibility: Visibility) {
        for item in &mut self.items {
            item.visibility = visibility;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_applies_to_every_item() {
        let mut bar = ActionBar::with_items(["menu", "reload"]);
        assert!(bar.all_visible());

        bar.set_items_visibility(Visibility::Collapsed);
        assert!(!bar.any_visible());

        bar.set_items_visibility(Visibility::Visible);
        assert!(bar.all_visible());
    }
}
