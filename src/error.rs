//! Error types shared by the window, renderer and CLI.

use thiserror::Error;

/// Errors raised while bringing up or driving the window.
///
/// `Initialization` and `WindowCreation` are fatal at startup; the binary logs
/// them and exits. `Resize` and `Present` end the frame loop the same way.
/// Nothing retries.
#[derive(Debug, Error)]
pub enum Error {
    #[error("error while starting the windowing library: {0}")]
    Initialization(String),
    #[error("error while opening the window: {0}")]
    WindowCreation(String),
    #[error("failed to resize frame: {0}")]
    Resize(String),
    #[error("failed to present frame: {0}")]
    Present(String),
    #[error("failed to write screenshot: {0}")]
    Screenshot(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
