//! Items delivered on the walk stream.

use crate::model::{MasterPlaylist, MediaPlaylist, Segment};

/// One item on the walk stream.
///
/// Ordering guarantees: a master playlist precedes every media playlist
/// discovered through it, and a media playlist precedes its newly discovered
/// segments. Across variants no order is guaranteed.
#[derive(Debug, Clone)]
pub enum WalkEvent {
    MasterPlaylist(MasterPlaylist),
    MediaPlaylist(MediaPlaylist),
    Segment(Segment),
}

impl WalkEvent {
    /// Short kind label for logs and demos.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            WalkEvent::MasterPlaylist(_) => "master-playlist",
            WalkEvent::MediaPlaylist(_) => "media-playlist",
            WalkEvent::Segment(_) => "segment",
        }
    }
}
