//! Session → address bar synchronization

use std::sync::Arc;

use lookout_navigation::BrowsingSession;

use crate::address_bar::AddressBar;

pub struct NavigationSync;

impl NavigationSync {
    /// Forward every navigation state change to `address_bar`.
    ///
    /// Takes over the session's single callback slot. The callback holds
    /// only weak references, so it stops doing anything once either side is
    /// dropped.
    pub fn attach(session: &Arc<dyn BrowsingSession>, address_bar: &AddressBar) {
        let weak_session = Arc::downgrade(session);
        let weak_bar = address_bar.downgrade();

        session.set_on_navigation_state_change(Box::new(move || {
            let (Some(session), Some(bar)) = (weak_session.upgrade(), weak_bar.upgrade()) else {
                return;
            };

            let url = session.current_url();
            tracing::trace!(url = %url, "Navigation state changed");
            bar.set_displayed_url(&url);
        }));
    }
}
