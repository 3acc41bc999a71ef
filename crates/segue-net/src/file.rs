use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use url::Url;

use crate::{
    error::{NetError, NetResult},
    loader::Loader,
    types::{LoadOptions, Loaded},
};

/// Filesystem loader for `file:` URLs.
///
/// Path resolution against a root directory happens before URLs reach this
/// loader, so it only deals with absolute `file:` URLs. The mime type is
/// guessed from the file extension.
#[derive(Clone, Debug, Default)]
pub struct FileLoader;

impl FileLoader {
    pub fn new() -> Self {
        Self
    }
}

/// Best-effort mime type from a path extension.
pub fn mime_type_for_path(path: &str) -> Option<&'static str> {
    let clean = path.split('?').next().unwrap_or(path);
    let ext = clean.rsplit('.').next()?.to_ascii_lowercase();

    match ext.as_str() {
        "m3u8" | "m3u" => Some("application/vnd.apple.mpegurl"),
        "ts" | "m2ts" => Some("video/mp2t"),
        "mp4" | "m4s" | "m4v" => Some("video/mp4"),
        "m4a" => Some("audio/mp4"),
        "aac" => Some("audio/aac"),
        "mp3" => Some("audio/mpeg"),
        "vtt" => Some("text/vtt"),
        "json" => Some("application/json"),
        "key" | "bin" => Some("application/octet-stream"),
        _ => None,
    }
}

#[async_trait]
impl Loader for FileLoader {
    async fn load(&self, url: &Url, _opts: LoadOptions) -> NetResult<Loaded> {
        if url.scheme() != "file" {
            return Err(NetError::UnsupportedUrl(url.to_string()));
        }

        let path = url
            .to_file_path()
            .map_err(|()| NetError::UnsupportedUrl(url.to_string()))?;

        let data = tokio::fs::read(&path).await.map_err(|source| NetError::Io {
            path: path.display().to_string(),
            source,
        })?;

        debug!(
            path = %path.display(),
            bytes = data.len(),
            "segue-net: file load done"
        );

        Ok(Loaded {
            data: Bytes::from(data),
            mime_type: mime_type_for_path(url.path()).map(str::to_string),
        })
    }
}
