//! Address bar editing state machine
//!
//! While browsing, the field is empty and the current URL is shown as its
//! placeholder. Gaining focus switches to editing: the cancel button appears,
//! toolbar items collapse and, once the platform's focus animation has had
//! time to settle, an untouched field is filled with the URL and fully
//! selected. Losing focus keeps whatever was typed visible as the
//! placeholder for one tick, then restores the URL and the toolbar.
//!
//! Every transition bumps a generation counter. Deferred work carries the
//! generation it was scheduled under and does nothing if another transition
//! happened in between.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;

use lookout_navigation::{normalize_url, BrowsingSession};

use crate::field::{AddressField, Placeholder, CANCEL_TINT};
use crate::scheduler::Scheduler;
use crate::state::{EditingState, FocusEvent, Visibility};
use crate::toolbar::SharedToolbar;

/// Wait after focus before filling the field with the current URL
pub const POPULATE_DELAY: Duration = Duration::from_millis(500);

struct Inner {
    field: AddressField,
    state: EditingState,
    generation: u64,
}

impl Inner {
    fn enter(&mut self, state: EditingState) -> u64 {
        tracing::debug!(from = %self.state, to = %state, "Address bar state transition");
        self.state = state;
        self.generation += 1;
        self.generation
    }

    fn is_current(&self, generation: u64, state: EditingState) -> bool {
        self.generation == generation && self.state == state
    }

    /// The URL may only be written while nobody is typing
    fn can_show_url(&self) -> bool {
        !self.state.is_editing() && !self.field.is_focused()
    }
}

/// Handle to the address bar controller
///
/// Clones share the same field and state.
#[derive(Clone)]
pub struct AddressBar {
    inner: Arc<Mutex<Inner>>,
    session: Arc<dyn BrowsingSession>,
    toolbar: SharedToolbar,
    scheduler: Arc<dyn Scheduler>,
    populate_delay: Duration,
}

impl AddressBar {
    pub fn new(
        field: AddressField,
        session: Arc<dyn BrowsingSession>,
        toolbar: SharedToolbar,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                field,
                state: EditingState::Browsing,
                generation: 0,
            })),
            session,
            toolbar,
            scheduler,
            populate_delay: POPULATE_DELAY,
        }
    }

    pub fn with_populate_delay(mut self, delay: Duration) -> Self {
        self.populate_delay = delay;
        self
    }

    pub fn state(&self) -> EditingState {
        self.inner.lock().state
    }

    pub fn text(&self) -> String {
        self.inner.lock().field.text()
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        self.inner.lock().field.placeholder()
    }

    pub fn downgrade(&self) -> WeakAddressBar {
        WeakAddressBar {
            inner: Arc::downgrade(&self.inner),
            session: Arc::downgrade(&self.session),
            toolbar: Arc::clone(&self.toolbar),
            scheduler: Arc::clone(&self.scheduler),
            populate_delay: self.populate_delay,
        }
    }

    pub fn on_focus_changed(&self, event: FocusEvent) {
        match event {
            FocusEvent::Gained => self.on_focus_gained(),
            FocusEvent::Lost => self.on_focus_lost(),
        }
    }

    /// Browsing → Editing
    pub fn on_focus_gained(&self) {
        let generation = {
            let mut inner = self.inner.lock();
            if inner.state.is_editing() {
                return;
            }

            let generation = inner.enter(EditingState::Editing);
            inner.field.set_cancel_visible(true, true);
            inner.field.tint_cancel(CANCEL_TINT);
            generation
        };

        self.toolbar
            .lock()
            .set_items_visibility(Visibility::Collapsed);

        let bar = self.clone();
        self.scheduler.defer(
            self.populate_delay,
            Box::new(move || bar.populate_if_empty(generation)),
        );
    }

    fn populate_if_empty(&self, generation: u64) {
        let url = self.session.current_url();

        let mut inner = self.inner.lock();
        if !inner.is_current(generation, EditingState::Editing) {
            tracing::debug!(generation, "Stale populate skipped");
            return;
        }
        if !inner.field.text().is_empty() {
            tracing::trace!("Field already has input, not populating");
            return;
        }

        inner.field.set_text(&url);
        inner.field.set_placeholder(None);
        inner.field.select_all();
    }

    /// Editing → Browsing
    pub fn on_focus_lost(&self) {
        let generation = {
            let mut inner = self.inner.lock();
            if !inner.state.is_editing() {
                return;
            }

            let generation = inner.enter(EditingState::Browsing);
            let typed = inner.field.text();
            inner.field.set_placeholder(Some(&typed));
            inner.field.set_text("");
            generation
        };

        let bar = self.clone();
        self.scheduler
            .queue_microtask(Box::new(move || bar.restore_after_blur(generation)));
    }

    fn restore_after_blur(&self, generation: u64) {
        let url = self.session.current_url();

        {
            let mut inner = self.inner.lock();
            if !inner.is_current(generation, EditingState::Browsing) {
                tracing::debug!(generation, "Stale restore skipped");
                return;
            }
            if inner.can_show_url() {
                inner.field.set_placeholder(Some(&url));
            }
            inner.field.set_cancel_visible(false, true);
        }

        self.toolbar.lock().set_items_visibility(Visibility::Visible);
    }

    /// Show `url` unless the user is editing
    pub fn set_displayed_url(&self, url: &str) {
        let mut inner = self.inner.lock();
        if !inner.can_show_url() {
            tracing::debug!(url = %url, "Not replacing address bar content while editing");
            return;
        }
        inner.field.set_placeholder(Some(url));
    }

    /// Resign focus and leave editing
    pub fn end_editing(&self) {
        // The native blur notification may re-enter on_focus_lost from here
        let input = self.inner.lock().field.native();
        if input.is_first_responder() {
            input.resign_first_responder();
        }
        self.on_focus_lost();
    }

    /// Normalize the typed text, end editing and ask the session to load it.
    /// Returns the URL that was loaded.
    pub fn submit(&self) -> String {
        let url = normalize_url(&self.text());
        tracing::info!(url = %url, "Load url");

        self.end_editing();
        self.session.load(&url);

        url
    }
}

/// Non-owning handle, used by session callbacks
#[derive(Clone)]
pub struct WeakAddressBar {
    inner: Weak<Mutex<Inner>>,
    session: Weak<dyn BrowsingSession>,
    toolbar: SharedToolbar,
    scheduler: Arc<dyn Scheduler>,
    populate_delay: Duration,
}

impl WeakAddressBar {
    pub fn upgrade(&self) -> Option<AddressBar> {
        Some(AddressBar {
            inner: self.inner.upgrade()?,
            session: self.session.upgrade()?,
            toolbar: Arc::clone(&self.toolbar),
            scheduler: Arc::clone(&self.scheduler),
            populate_delay: self.populate_delay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Color, HeadlessInput, InputTraits, TextInput};
    use crate::scheduler::ManualScheduler;
    use crate::toolbar::ActionBar;
    use lookout_navigation::MemorySession;

    struct Fixture {
        input: HeadlessInput,
        session: Arc<MemorySession>,
        toolbar: Arc<Mutex<ActionBar>>,
        scheduler: ManualScheduler,
        bar: AddressBar,
    }

    impl Fixture {
        fn new(url: &str) -> Self {
            let input = HeadlessInput::new();
            let session = Arc::new(MemorySession::new(url));
            let toolbar = Arc::new(Mutex::new(ActionBar::with_items(["menu", "reload"])));
            let scheduler = ManualScheduler::new();

            let field = AddressField::new(Arc::new(input.clone()), "Search or enter address");
            let bar = AddressBar::new(
                field,
                session.clone(),
                toolbar.clone(),
                Arc::new(scheduler.clone()),
            );
            bar.set_displayed_url(url);

            Self {
                input,
                session,
                toolbar,
                scheduler,
                bar,
            }
        }

        fn focus(&self) {
            self.input.focus();
            self.bar.on_focus_changed(FocusEvent::Gained);
        }

        fn blur(&self) {
            self.input.blur();
            self.bar.on_focus_changed(FocusEvent::Lost);
        }

        fn placeholder_text(&self) -> String {
            self.bar
                .placeholder()
                .map(|p| p.text().to_string())
                .unwrap_or_default()
        }
    }

    #[test]
    fn test_focus_enters_editing() {
        let f = Fixture::new("http://a.com");
        f.focus();

        assert_eq!(f.bar.state(), EditingState::Editing);
        assert!(!f.toolbar.lock().any_visible());

        let snapshot = f.input.snapshot();
        assert!(snapshot.cancel_visible);
        assert_eq!(snapshot.cancel_tint, Some(CANCEL_TINT));
    }

    #[test]
    fn test_populates_after_delay() {
        let f = Fixture::new("http://a.com");
        f.focus();

        f.scheduler.advance(Duration::from_millis(499));
        assert_eq!(f.bar.text(), "");

        f.scheduler.advance(Duration::from_millis(1));
        let snapshot = f.input.snapshot();
        assert_eq!(snapshot.text, "http://a.com");
        assert_eq!(snapshot.selection, Some(0.."http://a.com".len()));
        assert!(snapshot.placeholder.unwrap().is_hint());
    }

    #[test]
    fn test_typed_input_is_not_overwritten() {
        let f = Fixture::new("http://a.com");
        f.focus();
        f.input.type_text("b.c");

        f.scheduler.advance(POPULATE_DELAY);
        assert_eq!(f.bar.text(), "b.c");
    }

    #[test]
    fn test_blur_restores_url_on_next_tick() {
        let f = Fixture::new("http://a.com");
        f.focus();
        f.input.type_text("half-typed");
        f.blur();

        // Typed text lingers as placeholder until the microtask runs
        assert_eq!(f.bar.state(), EditingState::Browsing);
        assert_eq!(f.bar.text(), "");
        assert_eq!(f.placeholder_text(), "half-typed");
        assert!(!f.toolbar.lock().any_visible());

        f.session.commit("http://c.com");
        f.scheduler.run_microtasks();

        assert_eq!(f.placeholder_text(), "http://c.com");
        assert!(f.toolbar.lock().all_visible());
        assert!(!f.input.snapshot().cancel_visible);
    }

    #[test]
    fn test_round_trip_without_typing_restores_placeholder() {
        let f = Fixture::new("http://a.com");
        let before = f.bar.placeholder();

        f.focus();
        f.scheduler.advance(POPULATE_DELAY);
        f.blur();
        f.scheduler.run_until_idle();

        assert_eq!(f.bar.placeholder(), before);
        assert_eq!(f.bar.text(), "");

        // Blurring before the field is populated ends up in the same place
        f.focus();
        f.blur();
        f.scheduler.run_until_idle();
        assert_eq!(f.bar.placeholder(), before);
        assert_eq!(f.bar.text(), "");
    }

    #[test]
    fn test_stale_populate_after_refocus_is_ignored() {
        let f = Fixture::new("http://a.com");
        f.focus();
        f.scheduler.advance(Duration::from_millis(200));
        f.blur();
        f.scheduler.run_microtasks();
        f.focus();

        // First focus's timer falls due here and must do nothing
        f.scheduler.advance(Duration::from_millis(300));
        assert_eq!(f.bar.text(), "");

        f.scheduler.advance(Duration::from_millis(200));
        assert_eq!(f.bar.text(), "http://a.com");
    }

    #[test]
    fn test_refocus_before_restore_keeps_editing_chrome() {
        let f = Fixture::new("http://a.com");
        f.focus();
        f.blur();
        f.focus();
        f.scheduler.run_microtasks();

        assert_eq!(f.bar.state(), EditingState::Editing);
        assert!(!f.toolbar.lock().any_visible());
        assert!(f.input.snapshot().cancel_visible);
    }

    #[test]
    fn test_repeated_events_are_ignored() {
        let f = Fixture::new("http://a.com");
        f.blur();
        assert_eq!(f.scheduler.pending(), 0);

        f.focus();
        f.focus();
        assert_eq!(f.scheduler.pending(), 1);
    }

    #[test]
    fn test_displayed_url_skipped_while_editing() {
        let f = Fixture::new("http://a.com");
        f.bar.set_displayed_url("http://b.com");
        assert_eq!(f.placeholder_text(), "http://b.com");

        f.focus();
        f.input.type_text("draft");
        f.bar.set_displayed_url("http://c.com");

        assert_eq!(f.bar.text(), "draft");
        assert_eq!(f.placeholder_text(), "http://b.com");
    }

    #[test]
    fn test_submit_normalizes_and_loads() {
        let f = Fixture::new("http://a.com");
        f.focus();
        f.scheduler.advance(POPULATE_DELAY);
        f.input.type_text("B.com");

        assert_eq!(f.bar.submit(), "http://b.com");
        assert_eq!(f.session.requested(), vec!["http://b.com".to_string()]);
        assert_eq!(f.bar.state(), EditingState::Browsing);
        assert!(!f.input.snapshot().focused);
    }

    #[test]
    fn test_blank_submit_still_loads() {
        let f = Fixture::new("http://a.com");
        f.focus();

        assert_eq!(f.bar.submit(), "http://");
        assert_eq!(f.session.requested(), vec!["http://".to_string()]);
        assert_eq!(f.bar.state(), EditingState::Browsing);
    }

    /// Native input that posts the blur notification from inside resign,
    /// the way the platform control does
    struct ReentrantInput {
        input: HeadlessInput,
        bar: Mutex<Option<WeakAddressBar>>,
    }

    impl TextInput for ReentrantInput {
        fn text(&self) -> String {
            self.input.text()
        }
        fn set_text(&self, text: &str) {
            self.input.set_text(text)
        }
        fn placeholder(&self) -> Option<Placeholder> {
            self.input.placeholder()
        }
        fn set_placeholder(&self, placeholder: Placeholder) {
            self.input.set_placeholder(placeholder)
        }
        fn is_first_responder(&self) -> bool {
            self.input.is_first_responder()
        }
        fn resign_first_responder(&self) {
            self.input.resign_first_responder();
            let bar = self.bar.lock().as_ref().and_then(|weak| weak.upgrade());
            if let Some(bar) = bar {
                bar.on_focus_changed(FocusEvent::Lost);
            }
        }
        fn select_all(&self) {
            self.input.select_all()
        }
        fn apply_traits(&self, traits: &InputTraits) {
            self.input.apply_traits(traits)
        }
        fn set_shows_cancel_button(&self, shows: bool, animated: bool) {
            self.input.set_shows_cancel_button(shows, animated)
        }
        fn set_cancel_button_tint(&self, color: Color) {
            self.input.set_cancel_button_tint(color)
        }
    }

    #[test]
    fn test_submit_with_synchronous_blur_notification() {
        let headless = HeadlessInput::new();
        let native = Arc::new(ReentrantInput {
            input: headless.clone(),
            bar: Mutex::new(None),
        });
        let session = Arc::new(MemorySession::new("http://a.com"));
        let scheduler = ManualScheduler::new();
        let bar = AddressBar::new(
            AddressField::new(native.clone(), "Search or enter address"),
            session.clone(),
            Arc::new(Mutex::new(ActionBar::with_items(["menu"]))),
            Arc::new(scheduler.clone()),
        );
        *native.bar.lock() = Some(bar.downgrade());

        headless.focus();
        bar.on_focus_changed(FocusEvent::Gained);
        headless.type_text("b.com");

        assert_eq!(bar.submit(), "http://b.com");
        assert_eq!(bar.state(), EditingState::Browsing);
        assert_eq!(session.requested(), vec!["http://b.com".to_string()]);

        // Exactly one blur transition ran, so one restore is queued
        assert_eq!(scheduler.run_microtasks(), 1);
        assert_eq!(bar.placeholder().unwrap().text(), "http://a.com");
    }

    #[test]
    fn test_round_trip_restores_hint_without_url() {
        let f = Fixture::new("");
        let before = f.bar.placeholder();
        assert!(before.as_ref().unwrap().is_hint());

        f.focus();
        f.scheduler.advance(POPULATE_DELAY);
        f.blur();
        f.scheduler.run_until_idle();

        assert_eq!(f.bar.placeholder(), before);
        assert_eq!(f.bar.text(), "");
    }

    #[test]
    fn test_weak_handle_does_not_keep_bar_alive() {
        let f = Fixture::new("http://a.com");
        let weak = f.bar.downgrade();
        assert!(weak.upgrade().is_some());

        drop(f);
        assert!(weak.upgrade().is_none());
    }
}
