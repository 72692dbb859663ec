//! Lookout Navigation
//!
//! Address bar input normalization and the browsing session seam:
//! - Raw text → loadable URL (`http://` assumed when no scheme is present)
//! - `BrowsingSession`: the collaborator that actually navigates
//! - `MemorySession`: in-process session for headless embedding

mod normalize;
mod session;

pub use normalize::{has_scheme, normalize_url, DEFAULT_SCHEME};
pub use session::{BrowsingSession, MemorySession, NavigationCallback};
