//! Page shell
//!
//! The page host owns the native views and forwards lifecycle and input
//! events here. The shell holds every collaborator it needs explicitly;
//! nothing is reached through process-wide state.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;

use lookout_chrome::{
    AddressBar, AddressField, Animator, ChromeError, FocusEvent, MenuController, MenuView,
    NavigationSync, ScheduledAnimator, Scheduler, SharedContainer, SharedMenuView,
    SharedToolbar, TextInput, ViewId,
};
use lookout_navigation::BrowsingSession;

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// Page layout hook
pub trait LayoutHost: Send + Sync {
    fn request_layout(&self);
}

pub struct Shell {
    config: Config,
    session: Arc<dyn BrowsingSession>,
    toolbar: SharedToolbar,
    scheduler: Arc<dyn Scheduler>,
    animator: Arc<dyn Animator>,
    layout: RwLock<Option<Arc<dyn LayoutHost>>>,
    address_bar: RwLock<Option<AddressBar>>,
    menu: RwLock<Option<MenuController>>,
}

impl Shell {
    pub fn new(
        config: Config,
        session: Arc<dyn BrowsingSession>,
        toolbar: SharedToolbar,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let animator = Arc::new(ScheduledAnimator::new(Arc::clone(&scheduler)));

        Self {
            config,
            session,
            toolbar,
            scheduler,
            animator,
            layout: RwLock::new(None),
            address_bar: RwLock::new(None),
            menu: RwLock::new(None),
        }
    }

    /// Drive menu animations through the platform instead of the scheduler
    pub fn with_animator(mut self, animator: Arc<dyn Animator>) -> Self {
        self.animator = animator;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn address_bar(&self) -> Option<AddressBar> {
        self.address_bar.read().clone()
    }

    // === Page lifecycle ===

    /// Schedule a one-shot relayout once the first layout pass is done.
    /// Some hosts size the page wrongly on first load until asked again.
    pub fn on_page_loaded(&self, layout: Arc<dyn LayoutHost>) {
        *self.layout.write() = Some(Arc::clone(&layout));

        self.scheduler
            .defer(Duration::ZERO, Box::new(move || layout.request_layout()));

        tracing::info!("Page loaded");
    }

    /// The app returned to the foreground
    pub fn on_app_became_active(&self) {
        let layout = self.layout.read().clone();
        if let Some(layout) = layout {
            layout.request_layout();
        }
    }

    /// Build the address bar around the native input and start following
    /// the session
    pub fn on_address_field_ready(&self, input: Arc<dyn TextInput>) -> AddressBar {
        let field = AddressField::new(input, self.config.hint.clone());
        let bar = AddressBar::new(
            field,
            Arc::clone(&self.session),
            Arc::clone(&self.toolbar),
            Arc::clone(&self.scheduler),
        )
        .with_populate_delay(self.config.populate_delay());

        NavigationSync::attach(&self.session, &bar);
        bar.set_displayed_url(&self.session.current_url());

        *self.address_bar.write() = Some(bar.clone());
        tracing::debug!("Address field ready");

        bar
    }

    /// Prepare the overlay menu found in `parent` under the configured id
    pub fn on_menu_loaded(&self, parent: SharedContainer) -> Result<SharedMenuView> {
        let id = ViewId::new(self.config.menu_id.clone());
        if parent.lock().index_of(&id).is_none() {
            return Err(ChromeError::DetachedView(id).into());
        }

        let mut menu = MenuView::new(id);
        menu.prepare_for_overlay();
        let menu = Arc::new(Mutex::new(menu));

        let controller = MenuController::new(Arc::clone(&menu), parent, Arc::clone(&self.animator))
            .with_duration(self.config.menu_animation());
        *self.menu.write() = Some(controller);

        Ok(menu)
    }

    // === Input ===

    /// Load whatever the user typed. Returns the normalized URL.
    pub fn on_submit(&self) -> Result<String> {
        let bar = self
            .address_bar()
            .ok_or(CoreError::NotReady("Address field"))?;
        Ok(bar.submit())
    }

    pub fn on_field_focus_changed(&self, event: FocusEvent) -> Result<()> {
        let bar = self
            .address_bar()
            .ok_or(CoreError::NotReady("Address field"))?;
        bar.on_focus_changed(event);
        Ok(())
    }

    pub fn on_menu_toggle_requested(&self) -> Result<()> {
        let menu = self.menu.read();
        let menu = menu.as_ref().ok_or(CoreError::NotReady("Menu"))?;
        Ok(menu.toggle()?)
    }
}
