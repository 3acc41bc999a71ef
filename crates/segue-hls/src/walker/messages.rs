//! Messages serialized into the walk controller task.

use segue_net::{Loaded, NetResult};
use url::Url;

use crate::pending::TimerId;

/// What an outstanding fetch was for; determines which slot its payload
/// lands in.
#[derive(Debug, Clone)]
pub(crate) enum FetchKind {
    /// Root, variant, rendition, or refresh fetch. Master vs. media is
    /// decided by the parse result.
    Playlist,
    SegmentData { playlist: Url, segment: Url },
    SegmentKey { playlist: Url, key: Url },
    InitMap { playlist: Url, map: Url },
    SessionData { master: Url, index: usize },
    SessionKey { master: Url, index: usize },
}

#[derive(Debug)]
pub(crate) enum EngineMsg {
    FetchDone {
        url: Url,
        kind: FetchKind,
        result: NetResult<Loaded>,
    },
    Tick {
        id: TimerId,
        url: Url,
    },
}
