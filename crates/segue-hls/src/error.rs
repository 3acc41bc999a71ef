#![forbid(unsafe_code)]

use thiserror::Error;

/// Walk orchestration errors.
///
/// Loader and parse errors are delivered in-band on the walk stream; they do
/// not terminate the walk. The consumer decides whether to keep reading.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Network error: {0}")]
    Net(#[from] segue_net::NetError),

    #[error("Playlist parsing error: {0}")]
    PlaylistParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type WalkResult<T> = Result<T, WalkError>;
