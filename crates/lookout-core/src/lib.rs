//! Lookout Core
//!
//! Page-level coordination for the browser chrome. The page host forwards
//! its lifecycle and input events to a [`Shell`], which owns the address bar
//! and menu controllers and wires them to the browsing session.

mod config;
mod error;
mod shell;

pub use config::Config;
pub use error::CoreError;
pub use shell::{LayoutHost, Shell};

// Re-export chrome and navigation components
pub use lookout_chrome::{
    ActionBar, AddressBar, AddressField, Animator, ChildList, ChromeError, EditingState,
    FocusEvent, HeadlessInput, ManualScheduler, MenuController, MenuView, Placeholder, Scale,
    ScheduledAnimator, Scheduler, SharedContainer, SharedMenuView, SharedToolbar, TextInput,
    TokioScheduler, Toolbar, ViewContainer, ViewId, Visibility,
};
pub use lookout_navigation::{normalize_url, BrowsingSession, MemorySession};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
