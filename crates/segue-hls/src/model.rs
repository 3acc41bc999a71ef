//! Playlist and segment data types emitted by the walker.
//!
//! Playload buffers are `bytes::Bytes`: cloning an emitted item copies the
//! metadata envelope while sharing the underlying payload as an immutable
//! view. Emission always hands the consumer such a clone, so downstream
//! mutation cannot corrupt the walker's caches.

use std::time::Duration;

use bytes::Bytes;
use url::Url;

use crate::hash::ContentHash;

/// A parsed playlist, either master or media.
#[derive(Debug, Clone)]
pub enum Playlist {
    Master(MasterPlaylist),
    Media(MediaPlaylist),
}

/// Rendition group type (`EXT-X-MEDIA` `TYPE` attribute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    Audio,
    Video,
    Subtitles,
    ClosedCaptions,
    Other(String),
}

/// One `EXT-X-MEDIA` alternate rendition.
#[derive(Debug, Clone)]
pub struct Rendition {
    pub media_type: MediaType,
    pub group_id: String,
    pub name: String,
    pub language: Option<String>,
    /// Absent for closed-captions renditions; renditions without a URI are
    /// never fetched.
    pub uri: Option<Url>,
    pub default: bool,
    pub autoselect: bool,
}

/// One `EXT-X-STREAM-INF` variant stream.
#[derive(Debug, Clone)]
pub struct Variant {
    pub uri: Url,
    pub bandwidth: u64,
    pub average_bandwidth: Option<u64>,
    pub codecs: Option<String>,
    pub resolution: Option<(u64, u64)>,
    pub frame_rate: Option<f64>,
    pub audio: Option<String>,
    pub video: Option<String>,
    pub subtitles: Option<String>,
}

/// One `EXT-X-SESSION-DATA` entry.
///
/// Exactly one of `value` / `uri` is set at parse time. `data` holds the
/// fetched and JSON-parsed payload for URI entries; `failed` records a JSON
/// parse failure, which counts as resolved for the emit gate so a malformed
/// payload cannot block the master playlist forever.
#[derive(Debug, Clone)]
pub struct SessionDataEntry {
    pub data_id: String,
    pub value: Option<String>,
    pub uri: Option<Url>,
    pub language: Option<String>,
    pub data: Option<serde_json::Value>,
    pub failed: bool,
}

impl SessionDataEntry {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.value.is_some() || self.data.is_some() || self.failed
    }
}

/// Encryption method of a key reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMethod {
    Aes128,
    SampleAes,
    Other(String),
}

/// One `EXT-X-SESSION-KEY` entry. `data` is filled once the key bytes have
/// been fetched.
#[derive(Debug, Clone)]
pub struct SessionKey {
    pub uri: Url,
    pub method: KeyMethod,
    pub iv: Option<String>,
    pub data: Option<Bytes>,
}

/// A master playlist version. Replaced wholesale (never mutated in place)
/// when a refetch yields a different content hash.
#[derive(Debug, Clone)]
pub struct MasterPlaylist {
    pub uri: Url,
    pub hash: ContentHash,
    pub variants: Vec<Variant>,
    pub renditions: Vec<Rendition>,
    pub session_data: Vec<SessionDataEntry>,
    pub session_keys: Vec<SessionKey>,
}

impl MasterPlaylist {
    /// Emit-gate predicate: every session-data entry resolved and every
    /// session key fetched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session_data.iter().all(SessionDataEntry::is_resolved)
            && self.session_keys.iter().all(|k| k.data.is_some())
    }
}

/// `EXT-X-PLAYLIST-TYPE`, with absence meaning a live sliding window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistType {
    Vod,
    Event,
    Live,
}

/// `EXT-X-BYTERANGE:<n>[@<o>]` — a sub-range of the resource at a URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub length: u64,
    pub offset: Option<u64>,
}

impl ByteRange {
    /// Slice a fetched payload to this range. The offset defaults to 0 and
    /// the range is clamped to the buffer, so a malformed range can at worst
    /// shorten the payload.
    #[must_use]
    pub fn slice(&self, data: &Bytes) -> Bytes {
        let len = data.len() as u64;
        let start = self.offset.unwrap_or(0).min(len);
        let end = start.saturating_add(self.length).min(len);
        data.slice(start as usize..end as usize)
    }
}

/// The `EXT-X-KEY` reference effective for a segment. `data` is filled once
/// the key bytes have been fetched; a segment is never emitted before that.
#[derive(Debug, Clone)]
pub struct SegmentKey {
    pub uri: Url,
    pub method: KeyMethod,
    pub iv: Option<String>,
    pub data: Option<Bytes>,
}

/// The `EXT-X-MAP` initialization section effective for a segment.
#[derive(Debug, Clone)]
pub struct InitMap {
    pub uri: Url,
    pub byte_range: Option<ByteRange>,
    pub data: Option<Bytes>,
    pub mime_type: Option<String>,
}

/// One media segment. `data` / `mime_type` are filled when the payload has
/// been fetched (and byte-range sliced unless the walk runs in raw-response
/// mode); key and map slots are shared with sibling segments referencing the
/// same URI.
#[derive(Debug, Clone)]
pub struct Segment {
    pub uri: Url,
    pub duration: Duration,
    pub byte_range: Option<ByteRange>,
    pub key: Option<SegmentKey>,
    pub map: Option<InitMap>,
    pub data: Option<Bytes>,
    pub mime_type: Option<String>,
}

impl Segment {
    /// Emit-gate predicate: payload present, and key/map present when
    /// referenced.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.data.is_some()
            && self.key.as_ref().map_or(true, |k| k.data.is_some())
            && self.map.as_ref().map_or(true, |m| m.data.is_some())
    }
}

/// A media playlist version. Replaced wholesale on refetch when the content
/// hash changes; surviving segments inherit their fetched slots by URI.
#[derive(Debug, Clone)]
pub struct MediaPlaylist {
    pub uri: Url,
    pub hash: ContentHash,
    pub playlist_type: PlaylistType,
    pub end_list: bool,
    pub target_duration: Duration,
    pub segments: Vec<Segment>,
}

impl MediaPlaylist {
    /// Terminal playlists (endlist or VOD) are never refetched.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.end_list || self.playlist_type == PlaylistType::Vod
    }

    #[must_use]
    pub fn segment(&self, uri: &Url) -> Option<&Segment> {
        self.segments.iter().find(|s| &s.uri == uri)
    }

    pub fn segment_mut(&mut self, uri: &Url) -> Option<&mut Segment> {
        self.segments.iter_mut().find(|s| &s.uri == uri)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn payload() -> Bytes {
        Bytes::from_static(b"0123456789")
    }

    #[rstest]
    #[case::offset_and_length(ByteRange { length: 4, offset: Some(2) }, &b"2345"[..])]
    #[case::offset_defaults_to_zero(ByteRange { length: 3, offset: None }, &b"012"[..])]
    #[case::length_clamped(ByteRange { length: 100, offset: Some(7) }, &b"789"[..])]
    #[case::offset_beyond_end(ByteRange { length: 4, offset: Some(50) }, &b""[..])]
    fn byte_range_slicing(#[case] range: ByteRange, #[case] expected: &[u8]) {
        assert_eq!(&range.slice(&payload())[..], expected);
    }

    #[test]
    fn media_playlist_terminality() {
        let mut playlist = MediaPlaylist {
            uri: "http://example.com/live.m3u8".parse().unwrap(),
            hash: ContentHash::of(b"x"),
            playlist_type: PlaylistType::Live,
            end_list: false,
            target_duration: Duration::from_secs(6),
            segments: Vec::new(),
        };
        assert!(!playlist.is_terminal());

        playlist.end_list = true;
        assert!(playlist.is_terminal());

        playlist.end_list = false;
        playlist.playlist_type = PlaylistType::Vod;
        assert!(playlist.is_terminal());

        playlist.playlist_type = PlaylistType::Event;
        assert!(!playlist.is_terminal());
    }

    #[test]
    fn segment_gate_requires_key_and_map_data() {
        let uri: Url = "http://example.com/seg1.ts".parse().unwrap();
        let mut segment = Segment {
            uri: uri.clone(),
            duration: Duration::from_secs(4),
            byte_range: None,
            key: Some(SegmentKey {
                uri: "http://example.com/k.key".parse().unwrap(),
                method: KeyMethod::Aes128,
                iv: None,
                data: None,
            }),
            map: None,
            data: None,
            mime_type: None,
        };
        assert!(!segment.is_complete());

        segment.data = Some(Bytes::from_static(b"payload"));
        assert!(!segment.is_complete());

        segment.key.as_mut().unwrap().data = Some(Bytes::from_static(b"0123456789abcdef"));
        assert!(segment.is_complete());
    }

    #[test]
    fn session_data_entry_resolution() {
        let mut entry = SessionDataEntry {
            data_id: "com.example.title".to_string(),
            value: None,
            uri: Some("http://example.com/title.json".parse().unwrap()),
            language: None,
            data: None,
            failed: false,
        };
        assert!(!entry.is_resolved());

        entry.failed = true;
        assert!(entry.is_resolved());

        entry.failed = false;
        entry.data = Some(serde_json::json!({"title": "A walk"}));
        assert!(entry.is_resolved());
    }
}
