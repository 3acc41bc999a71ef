//! Generic resource loader trait.

use async_trait::async_trait;
use url::Url;

use crate::{
    error::NetResult,
    types::{LoadOptions, Loaded},
};

/// Resolves a URL to a byte payload plus mime type.
///
/// Implementations:
/// - [`HttpLoader`](crate::HttpLoader): production loader over reqwest
/// - [`FileLoader`](crate::FileLoader): `file:` URLs via tokio::fs
/// - test mocks backed by in-memory maps
///
/// Implementations must be safe to invoke concurrently; every call resolves
/// exactly once, to either a payload or an error.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self, url: &Url, opts: LoadOptions) -> NetResult<Loaded>;
}
