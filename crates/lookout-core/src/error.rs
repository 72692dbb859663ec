//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Chrome error: {0}")]
    Chrome(#[from] lookout_chrome::ChromeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{0} is not loaded yet")]
    NotReady(&'static str),
}
