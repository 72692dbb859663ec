//! Lookout Chrome
//!
//! Browser chrome around the web view:
//! - Address bar: URL-entry text field with a browsing/editing state machine
//! - Navigation sync: session URL changes pushed into the address bar
//! - Overlay menu: scale-animated, brought to the front when opened
//!
//! Everything runs on the UI thread. Deferred work goes through a
//! [`Scheduler`]; animations through an [`Animator`].

mod address_bar;
mod animation;
mod error;
mod field;
mod menu;
mod scheduler;
mod state;
mod sync;
mod toolbar;

pub use address_bar::{AddressBar, WeakAddressBar, POPULATE_DELAY};
pub use animation::{Animator, ScheduledAnimator};
pub use error::ChromeError;
pub use field::{
    AddressField, Autocapitalization, Color, FieldAppearance, HeadlessInput, InputSnapshot,
    InputTraits, KeyboardType, Placeholder, ReturnKey, TextInput, CANCEL_TINT, PLACEHOLDER_COLOR,
};
pub use menu::{
    ChildList, MenuController, MenuView, Origin, Scale, SharedContainer, SharedMenuView,
    ViewContainer, ViewId, MENU_ANIMATION,
};
pub use scheduler::{ManualScheduler, Scheduler, Task, TokioScheduler};
pub use state::{EditingState, FocusEvent, Visibility};
pub use sync::NavigationSync;
pub use toolbar::{ActionBar, SharedToolbar, Toolbar};

pub type Result<T> = std::result::Result<T, ChromeError>;
