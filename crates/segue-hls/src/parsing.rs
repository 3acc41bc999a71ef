//! Playlist parsing: converts raw M3U8 text into the walker's data model.
//!
//! Parsing proper is delegated to `m3u8-rs`; this module resolves every URI
//! against the playlist's own URL, propagates `EXT-X-KEY` / `EXT-X-MAP` tags
//! forward across the segments they apply to, and tags the result as either
//! a master or a media playlist.

use std::time::Duration;

use url::Url;

use crate::{
    error::{WalkError, WalkResult},
    hash::ContentHash,
    model::{
        ByteRange, InitMap, KeyMethod, MasterPlaylist, MediaPlaylist, MediaType, Playlist,
        PlaylistType, Rendition, Segment, SegmentKey, SessionDataEntry, SessionKey, Variant,
    },
    urls::join_url,
};

/// Parse playlist text fetched from `base` into a tagged [`Playlist`].
pub fn parse_playlist(base: &Url, data: &[u8], hash: ContentHash) -> WalkResult<Playlist> {
    match m3u8_rs::parse_playlist(data) {
        Ok((_, m3u8_rs::Playlist::MasterPlaylist(pl))) => {
            master_from(base, pl, hash).map(Playlist::Master)
        }
        Ok((_, m3u8_rs::Playlist::MediaPlaylist(pl))) => {
            media_from(base, pl, hash).map(Playlist::Media)
        }
        Err(e) => Err(WalkError::PlaylistParse(e.to_string())),
    }
}

fn method_from(method: &m3u8_rs::KeyMethod) -> KeyMethod {
    match method {
        m3u8_rs::KeyMethod::AES128 => KeyMethod::Aes128,
        m3u8_rs::KeyMethod::SampleAES => KeyMethod::SampleAes,
        m3u8_rs::KeyMethod::None => KeyMethod::Other("NONE".to_string()),
        m3u8_rs::KeyMethod::Other(s) => KeyMethod::Other(s.clone()),
    }
}

fn media_type_from(media_type: &m3u8_rs::AlternativeMediaType) -> MediaType {
    match media_type {
        m3u8_rs::AlternativeMediaType::Audio => MediaType::Audio,
        m3u8_rs::AlternativeMediaType::Video => MediaType::Video,
        m3u8_rs::AlternativeMediaType::Subtitles => MediaType::Subtitles,
        m3u8_rs::AlternativeMediaType::ClosedCaptions => MediaType::ClosedCaptions,
        m3u8_rs::AlternativeMediaType::Other(s) => MediaType::Other(s.clone()),
    }
}

fn byte_range_from(range: &m3u8_rs::ByteRange) -> ByteRange {
    ByteRange {
        length: range.length,
        offset: range.offset,
    }
}

fn master_from(
    base: &Url,
    pl: m3u8_rs::MasterPlaylist,
    hash: ContentHash,
) -> WalkResult<MasterPlaylist> {
    let mut variants = Vec::with_capacity(pl.variants.len());
    for vs in &pl.variants {
        // I-frame trick-play streams are not walked.
        if vs.is_i_frame {
            continue;
        }

        variants.push(Variant {
            uri: join_url(base, &vs.uri)?,
            bandwidth: vs.bandwidth,
            average_bandwidth: vs.average_bandwidth,
            codecs: vs.codecs.clone(),
            resolution: vs.resolution.map(|r| (r.width, r.height)),
            frame_rate: vs.frame_rate,
            audio: vs.audio.clone(),
            video: vs.video.clone(),
            subtitles: vs.subtitles.clone(),
        });
    }

    let mut renditions = Vec::with_capacity(pl.alternatives.len());
    for alt in &pl.alternatives {
        let uri = match &alt.uri {
            Some(uri) => Some(join_url(base, uri)?),
            None => None,
        };
        renditions.push(Rendition {
            media_type: media_type_from(&alt.media_type),
            group_id: alt.group_id.clone(),
            name: alt.name.clone(),
            language: alt.language.clone(),
            uri,
            default: alt.default,
            autoselect: alt.autoselect,
        });
    }

    let mut session_data = Vec::with_capacity(pl.session_data.len());
    for entry in &pl.session_data {
        let (value, uri) = match &entry.field {
            m3u8_rs::SessionDataField::Value(value) => (Some(value.clone()), None),
            m3u8_rs::SessionDataField::Uri(uri) => (None, Some(join_url(base, uri)?)),
        };
        session_data.push(SessionDataEntry {
            data_id: entry.data_id.clone(),
            value,
            uri,
            language: entry.language.clone(),
            data: None,
            failed: false,
        });
    }

    let mut session_keys = Vec::with_capacity(pl.session_key.len());
    for key in &pl.session_key {
        let key = &key.0;
        let Some(uri) = key.uri.as_deref().filter(|u| !u.is_empty()) else {
            continue;
        };
        if key.method == m3u8_rs::KeyMethod::None {
            continue;
        }
        session_keys.push(SessionKey {
            uri: join_url(base, uri)?,
            method: method_from(&key.method),
            iv: key.iv.clone(),
            data: None,
        });
    }

    Ok(MasterPlaylist {
        uri: base.clone(),
        hash,
        variants,
        renditions,
        session_data,
        session_keys,
    })
}

fn media_from(
    base: &Url,
    pl: m3u8_rs::MediaPlaylist,
    hash: ContentHash,
) -> WalkResult<MediaPlaylist> {
    let playlist_type = match pl.playlist_type {
        Some(m3u8_rs::MediaPlaylistType::Vod) => PlaylistType::Vod,
        Some(m3u8_rs::MediaPlaylistType::Event) => PlaylistType::Event,
        Some(m3u8_rs::MediaPlaylistType::Other(_)) | None => PlaylistType::Live,
    };

    // EXT-X-KEY and EXT-X-MAP apply to every segment that follows them, but
    // the parser only attaches them where the tag appeared. Carry them
    // forward here.
    let mut current_key: Option<SegmentKey> = None;
    let mut current_map: Option<InitMap> = None;

    let mut segments = Vec::with_capacity(pl.segments.len());
    for seg in &pl.segments {
        if let Some(key) = &seg.key {
            if key.method == m3u8_rs::KeyMethod::None {
                current_key = None;
            } else if let Some(uri) = key.uri.as_deref().filter(|u| !u.is_empty()) {
                current_key = Some(SegmentKey {
                    uri: join_url(base, uri)?,
                    method: method_from(&key.method),
                    iv: key.iv.clone(),
                    data: None,
                });
            }
        }

        if let Some(map) = &seg.map {
            current_map = Some(InitMap {
                uri: join_url(base, &map.uri)?,
                byte_range: map.byte_range.as_ref().map(byte_range_from),
                data: None,
                mime_type: None,
            });
        }

        segments.push(Segment {
            uri: join_url(base, &seg.uri)?,
            duration: Duration::try_from_secs_f64(f64::from(seg.duration)).unwrap_or_default(),
            byte_range: seg.byte_range.as_ref().map(byte_range_from),
            key: current_key.clone(),
            map: current_map.clone(),
            data: None,
            mime_type: None,
        });
    }

    Ok(MediaPlaylist {
        uri: base.clone(),
        hash,
        playlist_type,
        end_list: pl.end_list,
        target_duration: Duration::try_from_secs_f64(f64::from(pl.target_duration))
            .unwrap_or_default(),
        segments,
    })
}
