//! Location resolution helpers.
//!
//! The walker accepts either an absolute URL or a filesystem path; paths are
//! resolved against the configured root directory into `file:` URLs so the
//! rest of the engine only ever deals with `url::Url`.

use std::path::Path;

use url::Url;

use crate::error::{WalkError, WalkResult};

/// Turn the user-supplied location into an absolute URL.
pub fn resolve_location(location: &str, root_path: &Path) -> WalkResult<Url> {
    match Url::parse(location) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let path = Path::new(location);
            let absolute = if path.is_absolute() {
                path.to_path_buf()
            } else if root_path.is_absolute() {
                root_path.join(path)
            } else {
                std::env::current_dir()
                    .map_err(|e| WalkError::InvalidUrl(format!("{location}: {e}")))?
                    .join(root_path)
                    .join(path)
            };

            Url::from_file_path(&absolute).map_err(|()| {
                WalkError::InvalidUrl(format!("not a valid file path: {}", absolute.display()))
            })
        }
        Err(e) => Err(WalkError::InvalidUrl(format!("{location}: {e}"))),
    }
}

/// Resolve a possibly relative playlist URI against its parent playlist URL.
pub fn join_url(base: &Url, uri: &str) -> WalkResult<Url> {
    base.join(uri)
        .map_err(|e| WalkError::InvalidUrl(format!("{uri} (relative to {base}): {e}")))
}
