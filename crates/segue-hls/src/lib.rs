#![forbid(unsafe_code)]

//! Pull-based HLS playlist walker.
//!
//! Given a URL (or filesystem path) pointing at an HLS playlist, the walker
//! incrementally fetches, parses, and emits the entire hierarchy — master
//! playlists, media playlists, and media segments together with their
//! initialization maps, encryption keys, and session data — as a lazy,
//! ordered stream of [`WalkEvent`] items. Live playlists are refetched on
//! their prescribed cadence until every playlist has terminated.
//!
//! Modules:
//! - `model`: playlist/segment data types and the emit-gate predicates.
//! - `parsing`: M3U8 conversion into the model (delegating to `m3u8-rs`).
//! - `hash`: content hashing for unchanged-playlist deduplication.
//! - `pending`: in-flight counter and cancellable refresh timers.
//! - `walker`: the controller task integrating diffing, scheduling,
//!   subresource loading and the emit gate.
//! - `stream`: the consumer-facing pull stream.
//!
//! ```no_run
//! use futures::StreamExt;
//! use segue_hls::{HlsWalker, WalkOptions};
//!
//! # async fn demo() -> Result<(), segue_hls::WalkError> {
//! let walker = HlsWalker::new("https://example.com/master.m3u8", WalkOptions::default())?;
//! let mut stream = walker.into_stream();
//! while let Some(item) = stream.next().await {
//!     match item {
//!         Ok(event) => println!("{}", event.kind()),
//!         Err(e) => eprintln!("walk error: {e}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod events;
mod hash;
mod model;
mod options;
mod parsing;
mod pending;
mod stream;
mod urls;
mod walker;

pub use crate::error::{WalkError, WalkResult};
pub use crate::events::WalkEvent;
pub use crate::hash::ContentHash;
pub use crate::model::{
    ByteRange, InitMap, KeyMethod, MasterPlaylist, MediaPlaylist, MediaType, Playlist,
    PlaylistType, Rendition, Segment, SegmentKey, SessionDataEntry, SessionKey, Variant,
};
pub use crate::options::{RenditionSelector, VariantSelector, WalkOptions};
pub use crate::parsing::parse_playlist;
pub use crate::stream::WalkStream;
pub use crate::urls::{join_url, resolve_location};
pub use crate::walker::HlsWalker;

pub use segue_net::{
    FileLoader, HttpLoader, LoadOptions, Loaded, Loader, NetError, NetOptions, NetResult,
};

pub use bytes::Bytes;
