//! Overlay menu
//!
//! The menu is a collapsible view anchored to the top-right corner. Opening
//! it moves it to the front of its parent's child list before animating the
//! scale up; closing animates the scale down and only then collapses it.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::animation::Animator;
use crate::error::ChromeError;
use crate::state::Visibility;
use crate::Result;

/// Default open/close animation length
pub const MENU_ANIMATION: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub const HIDDEN: Scale = Scale { x: 0.0, y: 0.0 };
    pub const FULL: Scale = Scale { x: 1.0, y: 1.0 };
}

/// Transform origin as a fraction of the view's bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub x: f32,
    pub y: f32,
}

impl Origin {
    pub const CENTER: Origin = Origin { x: 0.5, y: 0.5 };
    pub const TOP_RIGHT: Origin = Origin { x: 1.0, y: 0.0 };
}

#[derive(Debug, Clone)]
pub struct MenuView {
    id: ViewId,
    visibility: Visibility,
    scale: Scale,
    origin: Origin,
    /// Position in the parent's child list after the last reorder
    z_order_index: Option<usize>,
    animation: u64,
}

pub type SharedMenuView = Arc<Mutex<MenuView>>;

impl MenuView {
    pub fn new(id: impl Into<ViewId>) -> Self {
        Self {
            id: id.into(),
            visibility: Visibility::Visible,
            scale: Scale::FULL,
            origin: Origin::CENTER,
            z_order_index: None,
            animation: 0,
        }
    }

    /// Collapse to a zero scale anchored top-right, so later scale
    /// animations grow out of that corner
    pub fn prepare_for_overlay(&mut self) {
        self.origin = Origin::TOP_RIGHT;
        self.scale = Scale::HIDDEN;
        self.visibility = Visibility::Collapsed;
    }

    pub fn id(&self) -> &ViewId {
        &self.id
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Scale) {
        self.scale = scale;
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn z_order_index(&self) -> Option<usize> {
        self.z_order_index
    }

    /// Start a new animation, invalidating any in flight
    pub fn begin_animation(&mut self) -> u64 {
        self.animation += 1;
        self.animation
    }

    pub fn animation_generation(&self) -> u64 {
        self.animation
    }
}

/// Parent view's ordered child list
pub trait ViewContainer: Send {
    /// Returns false if `id` was not a child
    fn remove_child(&mut self, id: &ViewId) -> bool;
    fn insert_child(&mut self, index: usize, id: ViewId);
    fn index_of(&self, id: &ViewId) -> Option<usize>;
}

pub type SharedContainer = Arc<Mutex<dyn ViewContainer>>;

/// Plain ordered child list
#[derive(Debug, Clone, Default)]
pub struct ChildList {
    children: Vec<ViewId>,
}

impl ChildList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: impl Into<ViewId>) {
        self.children.push(id.into());
    }

    pub fn children(&self) -> &[ViewId] {
        &self.children
    }
}

impl ViewContainer for ChildList {
    fn remove_child(&mut self, id: &ViewId) -> bool {
        match self.index_of(id) {
            Some(idx) => {
                self.children.remove(idx);
                true
            }
            None => false,
        }
    }

    fn insert_child(&mut self, index: usize, id: ViewId) {
        let index = index.min(self.children.len());
        self.children.insert(index, id);
    }

    fn index_of(&self, id: &ViewId) -> Option<usize> {
        self.children.iter().position(|child| child == id)
    }
}

pub struct MenuController {
    menu: SharedMenuView,
    parent: SharedContainer,
    animator: Arc<dyn Animator>,
    duration: Duration,
}

impl MenuController {
    pub fn new(menu: SharedMenuView, parent: SharedContainer, animator: Arc<dyn Animator>) -> Self {
        Self {
            menu,
            parent,
            animator,
            duration: MENU_ANIMATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn menu(&self) -> &SharedMenuView {
        &self.menu
    }

    pub fn visibility(&self) -> Visibility {
        self.menu.lock().visibility()
    }

    /// Open the menu if collapsed, close it if visible
    pub fn toggle(&self) -> Result<()> {
        let (id, visibility) = {
            let menu = self.menu.lock();
            (menu.id().clone(), menu.visibility())
        };

        match visibility {
            Visibility::Visible => self.close(&id),
            Visibility::Collapsed => self.open(id),
        }
    }

    fn close(&self, id: &ViewId) -> Result<()> {
        tracing::debug!(view = %id, "Closing menu");

        let menu = Arc::clone(&self.menu);
        self.animator.animate_scale(
            Arc::clone(&self.menu),
            Scale::HIDDEN,
            self.duration,
            Some(Box::new(move || {
                menu.lock().set_visibility(Visibility::Collapsed);
            })),
        );

        Ok(())
    }

    fn open(&self, id: ViewId) -> Result<()> {
        let z_order_index = {
            let mut parent = self.parent.lock();
            if !parent.remove_child(&id) {
                return Err(ChromeError::DetachedView(id));
            }
            parent.insert_child(0, id.clone());
            parent.index_of(&id)
        };

        tracing::debug!(view = %id, z_order = ?z_order_index, "Opening menu");

        {
            let mut menu = self.menu.lock();
            menu.z_order_index = z_order_index;
            menu.set_visibility(Visibility::Visible);
        }

        self.animator
            .animate_scale(Arc::clone(&self.menu), Scale::FULL, self.duration, None);

        Ok(())
    }
}
