#![forbid(unsafe_code)]

use std::{path::PathBuf, sync::Arc, time::Duration};

use segue_net::NetOptions;
use tokio_util::sync::CancellationToken;

use crate::model::{Rendition, Variant};

/// Callback selecting which variants of a master playlist to walk.
///
/// Receives the variants in playlist order and returns the indices to load;
/// out-of-range indices are ignored. Absent selector means "all".
pub type VariantSelector = Arc<dyn Fn(&[Variant]) -> Vec<usize> + Send + Sync>;

/// Callback selecting which alternate renditions to walk. Same contract as
/// [`VariantSelector`]; renditions without a URI are skipped regardless.
pub type RenditionSelector = Arc<dyn Fn(&[Rendition]) -> Vec<usize> + Send + Sync>;

/// Configuration for a playlist walk.
#[derive(Clone)]
pub struct WalkOptions {
    /// Base directory for relative filesystem locations.
    pub root_path: PathBuf,
    /// Deliver segment payloads uninterpreted instead of applying byte
    /// ranges.
    pub raw_response: bool,
    /// Delay between refetches of a master playlist that is unchanged or
    /// still waiting for live media playlists.
    pub master_playlist_timeout: Duration,
    /// Upper bound on concurrently running loader calls.
    pub max_concurrent_fetches: usize,
    /// Capacity of the output channel; a slow consumer stalls emission (but
    /// not in-flight fetches) once this many events are buffered.
    pub event_capacity: usize,
    /// Variant selection hook.
    pub variants: Option<VariantSelector>,
    /// Rendition selection hook.
    pub renditions: Option<RenditionSelector>,
    /// Options forwarded to the default HTTP loader.
    pub net: NetOptions,
    /// External cancellation for the walk.
    pub cancel: Option<CancellationToken>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            raw_response: false,
            master_playlist_timeout: Duration::from_secs(10),
            max_concurrent_fetches: 16,
            event_capacity: 32,
            variants: None,
            renditions: None,
            net: NetOptions::default(),
            cancel: None,
        }
    }
}

impl std::fmt::Debug for WalkOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkOptions")
            .field("root_path", &self.root_path)
            .field("raw_response", &self.raw_response)
            .field("master_playlist_timeout", &self.master_playlist_timeout)
            .field("max_concurrent_fetches", &self.max_concurrent_fetches)
            .field("event_capacity", &self.event_capacity)
            .field("variants", &self.variants.as_ref().map(|_| "VariantSelector"))
            .field(
                "renditions",
                &self.renditions.as_ref().map(|_| "RenditionSelector"),
            )
            .field("net", &self.net)
            .finish()
    }
}

impl WalkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base directory for relative filesystem locations.
    pub fn with_root_path(mut self, root_path: impl Into<PathBuf>) -> Self {
        self.root_path = root_path.into();
        self
    }

    /// Deliver segment payloads uninterpreted.
    pub fn with_raw_response(mut self, raw_response: bool) -> Self {
        self.raw_response = raw_response;
        self
    }

    /// Set the unchanged-master refetch delay.
    pub fn with_master_playlist_timeout(mut self, timeout: Duration) -> Self {
        self.master_playlist_timeout = timeout;
        self
    }

    /// Bound concurrent loader calls.
    pub fn with_max_concurrent_fetches(mut self, max: usize) -> Self {
        self.max_concurrent_fetches = max.max(1);
        self
    }

    /// Set the output channel capacity.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Install a variant selection hook.
    pub fn with_variants(mut self, selector: VariantSelector) -> Self {
        self.variants = Some(selector);
        self
    }

    /// Install a rendition selection hook.
    pub fn with_renditions(mut self, selector: RenditionSelector) -> Self {
        self.renditions = Some(selector);
        self
    }

    /// Set loader network options.
    pub fn with_net(mut self, net: NetOptions) -> Self {
        self.net = net;
        self
    }

    /// Set a cancellation token for graceful shutdown.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}
