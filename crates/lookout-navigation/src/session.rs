//! Browsing session seam
//!
//! The session is owned elsewhere (the web view host). The address bar only
//! ever asks it for the current URL, asks it to load, and listens for
//! navigation state changes through a single callback slot.

use parking_lot::RwLock;
use std::sync::Arc;

/// Callback fired whenever the session's navigation state changes
pub type NavigationCallback = Box<dyn Fn() + Send + Sync>;

pub trait BrowsingSession: Send + Sync {
    /// Request navigation. Failures are reported only through later
    /// navigation state notifications.
    fn load(&self, url: &str);

    /// URL of the currently committed page
    fn current_url(&self) -> String;

    /// Install the navigation state callback, replacing any previous one
    fn set_on_navigation_state_change(&self, callback: NavigationCallback);
}

/// In-process browsing session
///
/// Records every load request. With `auto_commit` enabled a load commits
/// immediately and fires the navigation callback synchronously, otherwise
/// the embedder calls [`MemorySession::commit`] when the page is ready.
pub struct MemorySession {
    current_url: RwLock<String>,
    requested: RwLock<Vec<String>>,
    callback: RwLock<Option<Arc<NavigationCallback>>>,
    auto_commit: bool,
}

impl MemorySession {
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self {
            current_url: RwLock::new(initial_url.into()),
            requested: RwLock::new(Vec::new()),
            callback: RwLock::new(None),
            auto_commit: false,
        }
    }

    /// Commit every load as soon as it is requested
    pub fn with_auto_commit(mut self) -> Self {
        self.auto_commit = true;
        self
    }

    /// Commit a navigation and notify the listener
    pub fn commit(&self, url: impl Into<String>) {
        let url = url.into();
        tracing::debug!(url = %url, "Navigation committed");
        *self.current_url.write() = url;
        self.notify();
    }

    /// Fire the navigation callback without changing the URL
    pub fn notify(&self) {
        // Clone out of the slot so the callback may call back into us
        let callback = self.callback.read().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Every URL passed to `load`, oldest first
    pub fn requested(&self) -> Vec<String> {
        self.requested.read().clone()
    }
}

impl BrowsingSession for MemorySession {
    fn load(&self, url: &str) {
        self.requested.write().push(url.to_string());

        if self.auto_commit {
            self.commit(url);
        }
    }

    fn current_url(&self) -> String {
        self.current_url.read().clone()
    }

    fn set_on_navigation_state_change(&self, callback: NavigationCallback) {
        *self.callback.write() = Some(Arc::new(callback));
    }
}
