//! Chrome error types

use thiserror::Error;

use crate::menu::ViewId;

#[derive(Error, Debug)]
pub enum ChromeError {
    #[error("View {0} is not attached to its parent container")]
    DetachedView(ViewId),
}
