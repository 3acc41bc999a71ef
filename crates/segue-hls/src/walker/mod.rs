//! Public walker handle.

mod engine;
mod messages;

use std::sync::Arc;

use segue_net::{FileLoader, HttpLoader, Loader};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{error::WalkResult, options::WalkOptions, stream::WalkStream, urls};

use self::engine::Engine;

/// A configured playlist walk, not yet started.
///
/// Constructing the walker resolves the location and picks a loader; no I/O
/// happens until the stream returned by [`HlsWalker::into_stream`] is polled
/// for the first time.
pub struct HlsWalker {
    root: Url,
    options: WalkOptions,
    loader: Arc<dyn Loader>,
}

impl HlsWalker {
    /// Create a walker for a URL or filesystem path, with a loader chosen by
    /// scheme: [`FileLoader`] for `file:` locations, [`HttpLoader`] (driven
    /// by `options.net`) otherwise.
    pub fn new(location: &str, options: WalkOptions) -> WalkResult<Self> {
        let root = urls::resolve_location(location, &options.root_path)?;
        let loader: Arc<dyn Loader> = if root.scheme() == "file" {
            Arc::new(FileLoader::new())
        } else {
            Arc::new(HttpLoader::new(&options.net)?)
        };
        Ok(Self {
            root,
            options,
            loader,
        })
    }

    /// Create a walker with an injected loader.
    pub fn with_loader(
        location: &str,
        options: WalkOptions,
        loader: Arc<dyn Loader>,
    ) -> WalkResult<Self> {
        let root = urls::resolve_location(location, &options.root_path)?;
        Ok(Self {
            root,
            options,
            loader,
        })
    }

    /// The resolved root playlist URL.
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Spawn the walk controller and hand back the pull stream.
    ///
    /// The controller stays idle until the stream's first poll. Dropping the
    /// stream cancels the walk.
    pub fn into_stream(self) -> WalkStream {
        let cancel = self
            .options
            .cancel
            .clone()
            .unwrap_or_else(CancellationToken::new);
        let (out_tx, out_rx) = mpsc::channel(self.options.event_capacity);
        let (msg_tx, msg_rx) = mpsc::channel(64);
        let (start_tx, start_rx) = oneshot::channel();

        let engine = Engine::new(self.root, self.options, self.loader, msg_tx, out_tx);
        tokio::spawn(engine.run(start_rx, msg_rx, cancel.clone()));

        WalkStream::new(out_rx, start_tx, cancel)
    }
}
