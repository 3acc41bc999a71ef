//! The walk controller: a single task owning all walker state.
//!
//! Fetches run as spawned tasks, but their completions (and timer ticks) are
//! serialized into this task through one channel, so the playlist maps, the
//! pending registry, and the state machine are only ever touched from one
//! place. The controller moves through `Initialized -> Reading -> Ended ->
//! Closed`; the output stream closes on the final transition.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Duration,
};

use segue_net::{LoadOptions, Loaded, Loader};
use tokio::sync::{mpsc, oneshot, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::{
    error::{WalkError, WalkResult},
    events::WalkEvent,
    hash::ContentHash,
    model::{MasterPlaylist, MediaPlaylist, Playlist},
    options::WalkOptions,
    parsing,
    pending::{PendingRegistry, TimerId},
    walker::messages::{EngineMsg, FetchKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkState {
    Initialized,
    Reading,
    Ended,
    Closed,
}

struct MasterRecord {
    playlist: MasterPlaylist,
    /// At most one emission per cached version.
    emitted: bool,
    /// Selected variant and rendition URIs, in playlist order, deduplicated.
    referenced: Vec<Url>,
    /// Media playlist fetches held back until this version has been emitted,
    /// so a master always precedes the playlists discovered through it.
    pending_media: Vec<Url>,
    refresh_timer: Option<TimerId>,
}

struct MediaRecord {
    playlist: MediaPlaylist,
    /// Segment URIs already emitted; survives playlist replacement so a
    /// segment is emitted at most once per URI across versions.
    emitted: HashSet<String>,
    refresh_timer: Option<TimerId>,
}

pub(crate) struct Engine {
    root: Url,
    options: WalkOptions,
    loader: Arc<dyn Loader>,
    state: WalkState,
    masters: HashMap<String, MasterRecord>,
    medias: HashMap<String, MediaRecord>,
    pending: PendingRegistry,
    permits: Arc<Semaphore>,
    tx: mpsc::Sender<EngineMsg>,
    out: mpsc::Sender<WalkResult<WalkEvent>>,
}

impl Engine {
    pub(crate) fn new(
        root: Url,
        options: WalkOptions,
        loader: Arc<dyn Loader>,
        tx: mpsc::Sender<EngineMsg>,
        out: mpsc::Sender<WalkResult<WalkEvent>>,
    ) -> Self {
        let permits = Arc::new(Semaphore::new(options.max_concurrent_fetches));
        Self {
            root,
            options,
            loader,
            state: WalkState::Initialized,
            masters: HashMap::new(),
            medias: HashMap::new(),
            pending: PendingRegistry::new(),
            permits,
            tx,
            out,
        }
    }

    pub(crate) async fn run(
        mut self,
        start: oneshot::Receiver<()>,
        mut rx: mpsc::Receiver<EngineMsg>,
        cancel: CancellationToken,
    ) {
        // The first downstream read starts the walk.
        tokio::select! {
            _ = cancel.cancelled() => {
                self.shutdown("cancelled before start");
                return;
            }
            started = start => {
                if started.is_err() {
                    self.shutdown("stream dropped before start");
                    return;
                }
            }
        }

        self.state = WalkState::Reading;
        info!(root = %self.root, "segue-hls: walk started");
        self.spawn_fetch(
            self.root.clone(),
            FetchKind::Playlist,
            LoadOptions::playlist(),
        );

        loop {
            let msg = tokio::select! {
                _ = cancel.cancelled() => break,
                msg = rx.recv() => match msg {
                    Some(msg) => msg,
                    None => break,
                },
            };

            if !self.handle(msg).await {
                break;
            }

            if self.state == WalkState::Ended && self.pending.is_idle() {
                debug!("segue-hls: walk consumed");
                break;
            }
        }

        self.shutdown("closed");
    }

    fn shutdown(&mut self, reason: &str) {
        self.pending.cancel_all();
        self.masters.clear();
        self.medias.clear();
        self.state = WalkState::Closed;
        info!(reason, "segue-hls: walk closed");
    }

    async fn handle(&mut self, msg: EngineMsg) -> bool {
        match msg {
            EngineMsg::Tick { id, url } => {
                self.pending.complete(id);
                self.clear_timer_marker(&url, id);
                if self.state == WalkState::Reading && self.is_known(&url) {
                    debug!(url = %url, "segue-hls: refresh timer fired");
                    self.spawn_fetch(url, FetchKind::Playlist, LoadOptions::playlist());
                }
                true
            }
            EngineMsg::FetchDone { url, kind, result } => {
                self.pending.decr();
                match result {
                    Ok(loaded) => self.on_loaded(url, kind, loaded).await,
                    Err(e) => {
                        warn!(url = %url, error = %e, "segue-hls: fetch failed");
                        if self.can_emit() {
                            self.emit_error(WalkError::Net(e)).await
                        } else {
                            true
                        }
                    }
                }
            }
        }
    }

    async fn on_loaded(&mut self, url: Url, kind: FetchKind, loaded: Loaded) -> bool {
        match kind {
            FetchKind::Playlist => self.on_playlist(url, loaded).await,
            FetchKind::SegmentData { playlist, segment } => {
                self.on_segment_data(&playlist, &segment, loaded).await
            }
            FetchKind::SegmentKey { playlist, key } => {
                self.on_segment_key(&playlist, &key, loaded).await
            }
            FetchKind::InitMap { playlist, map } => self.on_init_map(&playlist, &map, loaded).await,
            FetchKind::SessionData { master, index } => {
                self.on_session_data(&master, index, loaded).await
            }
            FetchKind::SessionKey { master, index } => {
                self.on_session_key(&master, index, loaded).await
            }
        }
    }

    // ------------------------------------------------------------------
    // Playlist updates
    // ------------------------------------------------------------------

    async fn on_playlist(&mut self, url: Url, loaded: Loaded) -> bool {
        let hash = ContentHash::of(&loaded.data);

        // Unchanged refetches replace nothing and fetch nothing; they only
        // feed the refresh scheduler.
        if let Some(rec) = self.masters.get(url.as_str()) {
            if rec.playlist.hash == hash {
                trace!(url = %url, "segue-hls: master playlist unchanged");
                if self.state == WalkState::Reading {
                    self.schedule_master_refresh(&url);
                }
                return true;
            }
        }
        if let Some(rec) = self.medias.get(url.as_str()) {
            if rec.playlist.hash == hash {
                trace!(url = %url, "segue-hls: media playlist unchanged");
                if self.state == WalkState::Reading && !rec.playlist.is_terminal() {
                    let delay = rec.playlist.target_duration / 2;
                    self.schedule_media_refresh(&url, delay);
                }
                return true;
            }
        }

        if self.state != WalkState::Reading {
            return true;
        }

        match parsing::parse_playlist(&url, &loaded.data, hash) {
            Ok(Playlist::Master(master)) => self.update_master(master).await,
            Ok(Playlist::Media(media)) => {
                if self.is_referenced(&url) {
                    self.update_media(media).await
                } else {
                    debug!(url = %url, "segue-hls: ignoring media playlist no longer referenced");
                    true
                }
            }
            Err(e) => {
                warn!(url = %url, error = %e, "segue-hls: playlist parse failed");
                self.emit_error(e).await
            }
        }
    }

    async fn update_master(&mut self, master: MasterPlaylist) -> bool {
        let url = master.uri.clone();
        let key = url.to_string();

        // Selection hooks run synchronously, before any media playlist load.
        let variant_indices = match &self.options.variants {
            Some(select) => select(&master.variants),
            None => (0..master.variants.len()).collect(),
        };
        let rendition_indices = match &self.options.renditions {
            Some(select) => select(&master.renditions),
            None => (0..master.renditions.len()).collect(),
        };

        let mut referenced: Vec<Url> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for i in variant_indices {
            if let Some(variant) = master.variants.get(i) {
                if seen.insert(variant.uri.to_string()) {
                    referenced.push(variant.uri.clone());
                }
            }
        }
        for i in rendition_indices {
            if let Some(rendition) = master.renditions.get(i) {
                if let Some(uri) = &rendition.uri {
                    if seen.insert(uri.to_string()) {
                        referenced.push(uri.clone());
                    }
                }
            }
        }

        // A URI lives in at most one of the two maps.
        if let Some(stale) = self.medias.remove(&key) {
            if let Some(timer) = stale.refresh_timer {
                self.pending.cancel(timer);
            }
        }

        let old = self.masters.remove(&key);
        if let Some(old_rec) = &old {
            if let Some(timer) = old_rec.refresh_timer {
                self.pending.cancel(timer);
            }
            // Variants that disappeared take their media cache entries along.
            for gone in old_rec
                .referenced
                .iter()
                .filter(|u| !seen.contains(u.as_str()))
            {
                if let Some(dropped) = self.medias.remove(gone.as_str()) {
                    if let Some(timer) = dropped.refresh_timer {
                        self.pending.cancel(timer);
                    }
                    debug!(url = %gone, "segue-hls: variant removed; media playlist dropped");
                }
            }
        }

        let new_media: Vec<Url> = match &old {
            Some(old_rec) => {
                let old_set: HashSet<&str> =
                    old_rec.referenced.iter().map(Url::as_str).collect();
                referenced
                    .iter()
                    .filter(|u| !old_set.contains(u.as_str()))
                    .cloned()
                    .collect()
            }
            None => referenced.clone(),
        };

        debug!(
            url = %url,
            hash = %master.hash,
            variants = master.variants.len(),
            renditions = master.renditions.len(),
            selected = referenced.len(),
            new = new_media.len(),
            "segue-hls: master playlist updated"
        );

        // Session subresources are loaded per playlist version. Entries with
        // an inline value are already resolved.
        for (index, entry) in master.session_data.iter().enumerate() {
            if entry.value.is_none() {
                if let Some(uri) = &entry.uri {
                    self.spawn_fetch(
                        uri.clone(),
                        FetchKind::SessionData {
                            master: url.clone(),
                            index,
                        },
                        LoadOptions::playlist(),
                    );
                }
            }
        }
        for (index, session_key) in master.session_keys.iter().enumerate() {
            self.spawn_fetch(
                session_key.uri.clone(),
                FetchKind::SessionKey {
                    master: url.clone(),
                    index,
                },
                LoadOptions::buffer(),
            );
        }

        self.masters.insert(
            key.clone(),
            MasterRecord {
                playlist: master,
                emitted: false,
                referenced,
                pending_media: new_media,
                refresh_timer: None,
            },
        );

        // Trivially complete masters are emitted right away; otherwise the
        // session arrivals re-check the gate.
        if !self.try_emit_master(&url).await {
            return false;
        }

        let nothing_selected = self
            .masters
            .get(&key)
            .map_or(false, |rec| rec.referenced.is_empty());
        if nothing_selected && self.medias.is_empty() {
            // No media playlists will ever be discovered; the walk is done
            // once the session subresources settle.
            self.set_ended();
            return true;
        }

        // Dropping a variant may have removed the last live playlist.
        if self.all_playlists_terminal() {
            self.set_ended();
        } else if self.need_to_reload(&key) {
            self.schedule_master_refresh(&url);
        }

        true
    }

    /// A master still needs reloading while any selected URI has no media
    /// cache entry yet, or has one that is still live.
    fn need_to_reload(&self, key: &str) -> bool {
        let Some(rec) = self.masters.get(key) else {
            return false;
        };
        rec.referenced.iter().any(|uri| {
            self.medias
                .get(uri.as_str())
                .map_or(true, |m| !m.playlist.is_terminal())
        })
    }

    async fn update_media(&mut self, mut media: MediaPlaylist) -> bool {
        let url = media.uri.clone();
        let key = url.to_string();

        // A URI lives in at most one of the two maps.
        if let Some(stale) = self.masters.remove(&key) {
            if let Some(timer) = stale.refresh_timer {
                self.pending.cancel(timer);
            }
        }

        let mut emitted: HashSet<String> = HashSet::new();
        let mut old_playlist: Option<MediaPlaylist> = None;
        if let Some(old_rec) = self.medias.remove(&key) {
            if let Some(timer) = old_rec.refresh_timer {
                self.pending.cancel(timer);
            }
            emitted = old_rec.emitted;
            old_playlist = Some(old_rec.playlist);
        }

        // Segments surviving from the prior version inherit their fetched
        // slots, so nothing is downloaded twice.
        if let Some(old_pl) = &old_playlist {
            for seg in media.segments.iter_mut() {
                if let Some(prev) = old_pl.segment(&seg.uri) {
                    seg.data = prev.data.clone();
                    seg.mime_type = prev.mime_type.clone();
                    if let (Some(k), Some(pk)) = (seg.key.as_mut(), prev.key.as_ref()) {
                        if k.uri == pk.uri {
                            k.data = pk.data.clone();
                        }
                    }
                    if let (Some(m), Some(pm)) = (seg.map.as_mut(), prev.map.as_ref()) {
                        if m.uri == pm.uri {
                            m.data = pm.data.clone();
                            m.mime_type = pm.mime_type.clone();
                        }
                    }
                }
            }
        }

        // Plan subresource fetches: data for segments new in this version,
        // keys and maps for URIs with no payload yet (deduplicated).
        let mut data_fetches: Vec<Url> = Vec::new();
        let mut key_fetches: Vec<Url> = Vec::new();
        let mut map_fetches: Vec<Url> = Vec::new();
        let mut requested: HashSet<String> = HashSet::new();
        for seg in &media.segments {
            if let Some(k) = &seg.key {
                if k.data.is_some() {
                    requested.insert(k.uri.to_string());
                }
            }
            if let Some(m) = &seg.map {
                if m.data.is_some() {
                    requested.insert(m.uri.to_string());
                }
            }
        }
        for seg in &media.segments {
            let is_new = old_playlist
                .as_ref()
                .map_or(true, |old| old.segment(&seg.uri).is_none());
            if is_new && seg.data.is_none() {
                data_fetches.push(seg.uri.clone());
            }
            if let Some(k) = &seg.key {
                if k.data.is_none() && requested.insert(k.uri.to_string()) {
                    key_fetches.push(k.uri.clone());
                }
            }
            if let Some(m) = &seg.map {
                if m.data.is_none() && requested.insert(m.uri.to_string()) {
                    map_fetches.push(m.uri.clone());
                }
            }
        }

        debug!(
            url = %url,
            hash = %media.hash,
            segments = media.segments.len(),
            new_segments = data_fetches.len(),
            terminal = media.is_terminal(),
            "segue-hls: media playlist updated"
        );

        let terminal = media.is_terminal();
        let target_duration = media.target_duration;
        let snapshot = media.clone();

        self.medias.insert(
            key,
            MediaRecord {
                playlist: media,
                emitted,
                refresh_timer: None,
            },
        );

        // The playlist itself is emitted as soon as it is parsed, before any
        // of its segments resolve.
        if self.can_emit() && !self.emit_event(WalkEvent::MediaPlaylist(snapshot)).await {
            return false;
        }

        for segment in data_fetches {
            self.spawn_fetch(
                segment.clone(),
                FetchKind::SegmentData {
                    playlist: url.clone(),
                    segment,
                },
                LoadOptions::buffer(),
            );
        }
        for key_url in key_fetches {
            self.spawn_fetch(
                key_url.clone(),
                FetchKind::SegmentKey {
                    playlist: url.clone(),
                    key: key_url,
                },
                LoadOptions::buffer(),
            );
        }
        for map_url in map_fetches {
            self.spawn_fetch(
                map_url.clone(),
                FetchKind::InitMap {
                    playlist: url.clone(),
                    map: map_url,
                },
                LoadOptions::buffer(),
            );
        }

        if terminal {
            if self.all_playlists_terminal() {
                self.set_ended();
            }
        } else {
            self.schedule_media_refresh(&url, target_duration);
        }

        true
    }

    /// The walk has nothing further to discover once every selected URI has
    /// a media cache entry and every entry is terminal.
    fn all_playlists_terminal(&self) -> bool {
        for master in self.masters.values() {
            for uri in &master.referenced {
                match self.medias.get(uri.as_str()) {
                    Some(rec) if rec.playlist.is_terminal() => {}
                    _ => return false,
                }
            }
        }
        !self.medias.is_empty() && self.medias.values().all(|rec| rec.playlist.is_terminal())
    }

    // ------------------------------------------------------------------
    // Subresource arrivals
    // ------------------------------------------------------------------

    async fn on_segment_data(&mut self, playlist: &Url, segment: &Url, loaded: Loaded) -> bool {
        let raw = self.options.raw_response;
        let Some(rec) = self.medias.get_mut(playlist.as_str()) else {
            return true;
        };
        let Some(seg) = rec.playlist.segment_mut(segment) else {
            return true;
        };

        let data = if raw {
            loaded.data
        } else if let Some(range) = seg.byte_range {
            range.slice(&loaded.data)
        } else {
            loaded.data
        };
        seg.data = Some(data);
        seg.mime_type = loaded.mime_type;

        self.try_emit_segments(playlist, std::slice::from_ref(segment))
            .await
    }

    async fn on_segment_key(&mut self, playlist: &Url, key_url: &Url, loaded: Loaded) -> bool {
        let Some(rec) = self.medias.get_mut(playlist.as_str()) else {
            return true;
        };

        let mut affected: Vec<Url> = Vec::new();
        for seg in rec.playlist.segments.iter_mut() {
            if let Some(k) = seg.key.as_mut() {
                if &k.uri == key_url && k.data.is_none() {
                    k.data = Some(loaded.data.clone());
                    affected.push(seg.uri.clone());
                }
            }
        }

        self.try_emit_segments(playlist, &affected).await
    }

    async fn on_init_map(&mut self, playlist: &Url, map_url: &Url, loaded: Loaded) -> bool {
        let raw = self.options.raw_response;
        let Some(rec) = self.medias.get_mut(playlist.as_str()) else {
            return true;
        };

        let mut affected: Vec<Url> = Vec::new();
        for seg in rec.playlist.segments.iter_mut() {
            if let Some(m) = seg.map.as_mut() {
                if &m.uri == map_url && m.data.is_none() {
                    let data = if raw {
                        loaded.data.clone()
                    } else if let Some(range) = m.byte_range {
                        range.slice(&loaded.data)
                    } else {
                        loaded.data.clone()
                    };
                    m.data = Some(data);
                    m.mime_type = loaded.mime_type.clone();
                    affected.push(seg.uri.clone());
                }
            }
        }

        self.try_emit_segments(playlist, &affected).await
    }

    async fn on_session_data(&mut self, master: &Url, index: usize, loaded: Loaded) -> bool {
        {
            let Some(rec) = self.masters.get_mut(master.as_str()) else {
                return true;
            };
            let Some(entry) = rec.playlist.session_data.get_mut(index) else {
                return true;
            };
            match serde_json::from_slice::<serde_json::Value>(&loaded.data) {
                Ok(value) => entry.data = Some(value),
                Err(e) => {
                    // A malformed payload is logged and the entry marked
                    // resolved, so it cannot block the master forever.
                    warn!(
                        master = %master,
                        data_id = %entry.data_id,
                        error = %e,
                        "segue-hls: session data JSON parse failed"
                    );
                    entry.failed = true;
                }
            }
        }

        self.try_emit_master(master).await
    }

    async fn on_session_key(&mut self, master: &Url, index: usize, loaded: Loaded) -> bool {
        {
            let Some(rec) = self.masters.get_mut(master.as_str()) else {
                return true;
            };
            let Some(session_key) = rec.playlist.session_keys.get_mut(index) else {
                return true;
            };
            session_key.data = Some(loaded.data);
        }

        self.try_emit_master(master).await
    }

    // ------------------------------------------------------------------
    // Emit gate
    // ------------------------------------------------------------------

    async fn try_emit_master(&mut self, master: &Url) -> bool {
        if !self.can_emit() {
            return true;
        }

        let event;
        let pending_media;
        {
            let Some(rec) = self.masters.get_mut(master.as_str()) else {
                return true;
            };
            if rec.emitted || !rec.playlist.is_complete() {
                return true;
            }
            rec.emitted = true;
            event = WalkEvent::MasterPlaylist(rec.playlist.clone());
            pending_media = std::mem::take(&mut rec.pending_media);
        }

        if !self.emit_event(event).await {
            return false;
        }

        // The master is out; the playlists it references may follow.
        for uri in pending_media {
            self.spawn_fetch(uri, FetchKind::Playlist, LoadOptions::playlist());
        }

        true
    }

    async fn try_emit_segments(&mut self, playlist: &Url, uris: &[Url]) -> bool {
        if !self.can_emit() {
            return true;
        }

        let mut events: Vec<WalkEvent> = Vec::new();
        if let Some(rec) = self.medias.get_mut(playlist.as_str()) {
            for uri in uris {
                if rec.emitted.contains(uri.as_str()) {
                    continue;
                }
                if let Some(seg) = rec.playlist.segment(uri) {
                    if seg.is_complete() {
                        rec.emitted.insert(uri.to_string());
                        events.push(WalkEvent::Segment(seg.clone()));
                    }
                }
            }
        }

        for event in events {
            if !self.emit_event(event).await {
                return false;
            }
        }
        true
    }

    async fn emit_event(&mut self, event: WalkEvent) -> bool {
        trace!(kind = event.kind(), "segue-hls: emit");
        self.out.send(Ok(event)).await.is_ok()
    }

    async fn emit_error(&mut self, error: WalkError) -> bool {
        self.out.send(Err(error)).await.is_ok()
    }

    // ------------------------------------------------------------------
    // Scheduling and bookkeeping
    // ------------------------------------------------------------------

    fn can_emit(&self) -> bool {
        matches!(self.state, WalkState::Reading | WalkState::Ended)
    }

    fn is_known(&self, url: &Url) -> bool {
        self.masters.contains_key(url.as_str()) || self.medias.contains_key(url.as_str())
    }

    fn is_referenced(&self, url: &Url) -> bool {
        url == &self.root
            || self
                .masters
                .values()
                .any(|rec| rec.referenced.iter().any(|u| u == url))
    }

    fn set_ended(&mut self) {
        if self.state != WalkState::Reading {
            return;
        }
        self.state = WalkState::Ended;
        // Every playlist is terminal; pending refreshes have nothing left to
        // observe.
        self.pending.mark_ended();
        self.pending.cancel_all();
        for rec in self.masters.values_mut() {
            rec.refresh_timer = None;
        }
        for rec in self.medias.values_mut() {
            rec.refresh_timer = None;
        }
        debug!("segue-hls: every media playlist terminal; walk ended");
    }

    fn spawn_fetch(&mut self, url: Url, kind: FetchKind, opts: LoadOptions) {
        if self.state != WalkState::Reading {
            return;
        }

        self.pending.incr();
        let loader = Arc::clone(&self.loader);
        let permits = Arc::clone(&self.permits);
        let tx = self.tx.clone();

        trace!(url = %url, "segue-hls: fetch issued");
        tokio::spawn(async move {
            let permit = permits.acquire_owned().await.ok();
            let result = loader.load(&url, opts).await;
            drop(permit);
            let _ = tx.send(EngineMsg::FetchDone { url, kind, result }).await;
        });
    }

    fn schedule_master_refresh(&mut self, url: &Url) {
        if self.state != WalkState::Reading {
            return;
        }
        if self
            .masters
            .get(url.as_str())
            .map_or(true, |rec| rec.refresh_timer.is_some())
        {
            return;
        }

        let delay = self.options.master_playlist_timeout;
        let tick_url = url.clone();
        let id = self
            .pending
            .schedule(delay, self.tx.clone(), move |id| EngineMsg::Tick {
                id,
                url: tick_url,
            });
        if let (Some(id), Some(rec)) = (id, self.masters.get_mut(url.as_str())) {
            rec.refresh_timer = Some(id);
        }
    }

    fn schedule_media_refresh(&mut self, url: &Url, delay: Duration) {
        if self.state != WalkState::Reading {
            return;
        }
        // A missing target duration parses as zero; never spin.
        let delay = delay.max(Duration::from_millis(100));
        if self
            .medias
            .get(url.as_str())
            .map_or(true, |rec| rec.refresh_timer.is_some())
        {
            return;
        }

        let tick_url = url.clone();
        let id = self
            .pending
            .schedule(delay, self.tx.clone(), move |id| EngineMsg::Tick {
                id,
                url: tick_url,
            });
        if let (Some(id), Some(rec)) = (id, self.medias.get_mut(url.as_str())) {
            rec.refresh_timer = Some(id);
        }
    }

    fn clear_timer_marker(&mut self, url: &Url, id: TimerId) {
        if let Some(rec) = self.masters.get_mut(url.as_str()) {
            if rec.refresh_timer == Some(id) {
                rec.refresh_timer = None;
            }
        }
        if let Some(rec) = self.medias.get_mut(url.as_str()) {
            if rec.refresh_timer == Some(id) {
                rec.refresh_timer = None;
            }
        }
    }
}
